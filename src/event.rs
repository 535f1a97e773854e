use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Terminal-side events fed into the main loop.
#[derive(Debug, Clone)]
pub enum Event {
    Init,
    Tick,
    Render,
    Key(KeyEvent),
}

impl Event {
    /// Ctrl+C always quits, regardless of screen or dialog state.
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}
