use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::api::ApiClient;
use crate::error::TuduError;
use crate::event::Event;
use crate::page::{self, LIST_PAGE_SIZE, TODO_PAGE_SIZE};
use crate::pager;
use crate::types::{NewList, Todo, TodoList};

/// Toast lifetime in ticks. At the 250ms tick rate this is ~3 seconds.
const TOAST_TICKS: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview, // all lists, paginated
    Detail,   // one list's todos, paginated
}

/// Per-controller fetch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Title,
    Description,
    Completed,
}

/// A working copy being edited in a popup. Nothing here touches the
/// controllers' state until the submit round-trip succeeds.
#[derive(Debug, Clone)]
pub enum Dialog {
    CreateList {
        title: String,
        description: String,
        field: DialogField,
    },
    EditList {
        id: String,
        title: String,
        description: String,
        field: DialogField,
    },
    AddTodo {
        title: String,
        completed: bool,
        field: DialogField,
    },
    EditTodo {
        id: String,
        title: String,
        completed: bool,
        field: DialogField,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

/// Transient status-bar notification, expired by ticks.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    ticks_left: u8,
}

pub struct App {
    pub screen: Screen,

    // Overview controller
    pub lists: Vec<TodoList>,
    pub overview_load: LoadState,
    pub overview_page: usize,
    pub overview_cursor: usize,

    // Detail controller
    pub detail_id: Option<String>,
    pub detail: Option<TodoList>,
    pub detail_load: LoadState,
    pub detail_page: usize,
    pub detail_cursor: usize,

    pub dialog: Option<Dialog>,
    pub toast: Option<Toast>,
    pub write_in_flight: bool,
    pub should_quit: bool,

    load_seq: u64,
    first_load_done: bool,
    api: Arc<ApiClient>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(api: ApiClient, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            screen: Screen::Overview,

            lists: Vec::new(),
            overview_load: LoadState::Idle,
            overview_page: 1,
            overview_cursor: 0,

            detail_id: None,
            detail: None,
            detail_load: LoadState::Idle,
            detail_page: 1,
            detail_cursor: 0,

            dialog: None,
            toast: None,
            write_in_flight: false,
            should_quit: false,

            load_seq: 0,
            first_load_done: false,
            api: Arc::new(api),
            action_tx,
        }
    }

    /// The slice of lists on the current overview page.
    pub fn visible_lists(&self) -> &[TodoList] {
        page::visible_slice(&self.lists, self.overview_page, LIST_PAGE_SIZE)
    }

    /// The slice of todos on the current detail page.
    pub fn visible_todos(&self) -> &[Todo] {
        match &self.detail {
            Some(list) => page::visible_slice(&list.todos, self.detail_page, TODO_PAGE_SIZE),
            None => &[],
        }
    }

    pub fn selected_list(&self) -> Option<&TodoList> {
        self.visible_lists().get(self.overview_cursor)
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.visible_todos().get(self.detail_cursor)
    }

    pub fn loading(&self) -> bool {
        match self.screen {
            Screen::Overview => self.overview_load == LoadState::Loading,
            Screen::Detail => self.detail_load == LoadState::Loading,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Refresh,
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.dialog.is_some() {
            return Self::handle_dialog_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.screen == Screen::Overview {
                    Action::Quit
                } else {
                    Action::Back
                }
            }
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::Char('h') | KeyCode::Left => Action::PrevPage,
            KeyCode::Char('l') | KeyCode::Right => Action::NextPage,
            KeyCode::Enter => {
                if self.screen == Screen::Overview {
                    Action::Select
                } else {
                    Action::None
                }
            }
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('n') => {
                if self.screen == Screen::Overview {
                    Action::OpenCreateList
                } else {
                    Action::None
                }
            }
            KeyCode::Char('a') => {
                if self.screen == Screen::Detail {
                    Action::OpenAddTodo
                } else {
                    Action::None
                }
            }
            KeyCode::Char('e') => match self.screen {
                Screen::Overview => Action::OpenEditList,
                Screen::Detail => Action::OpenEditTodo,
            },
            KeyCode::Char('d') => Action::DeleteSelected,
            KeyCode::Char(' ') => {
                if self.screen == Screen::Detail {
                    Action::ToggleSelected
                } else {
                    Action::None
                }
            }
            KeyCode::Char('p') => {
                if self.screen == Screen::Detail {
                    Action::PrintList
                } else {
                    Action::None
                }
            }
            _ => Action::None,
        }
    }

    fn handle_dialog_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::DialogCancel,
            KeyCode::Enter => Action::DialogSubmit,
            KeyCode::Tab | KeyCode::BackTab => Action::DialogNextField,
            KeyCode::Backspace => Action::DialogBackspace,
            KeyCode::Char(c) => Action::DialogInput(c),
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                if let Some(toast) = &mut self.toast {
                    toast.ticks_left = toast.ticks_left.saturating_sub(1);
                    if toast.ticks_left == 0 {
                        self.toast = None;
                    }
                }
            }
            Action::Back => match self.screen {
                Screen::Overview => {
                    self.should_quit = true;
                }
                Screen::Detail => {
                    self.screen = Screen::Overview;
                    self.detail_id = None;
                    self.detail = None;
                    self.detail_load = LoadState::Idle;
                    self.detail_page = 1;
                    self.detail_cursor = 0;
                    // Invalidate any detail fetch still in flight.
                    self.load_seq += 1;
                }
            },

            Action::CursorUp => {
                let cursor = self.cursor_mut();
                if *cursor > 0 {
                    *cursor -= 1;
                }
            }
            Action::CursorDown => {
                let len = match self.screen {
                    Screen::Overview => self.visible_lists().len(),
                    Screen::Detail => self.visible_todos().len(),
                };
                let cursor = self.cursor_mut();
                if len > 0 && *cursor < len - 1 {
                    *cursor += 1;
                }
            }
            Action::PrevPage => {
                match self.screen {
                    Screen::Overview => {
                        if page::has_prev(self.overview_page) {
                            self.overview_page -= 1;
                            self.overview_cursor = 0;
                        }
                    }
                    Screen::Detail => {
                        if page::has_prev(self.detail_page) {
                            self.detail_page -= 1;
                            self.detail_cursor = 0;
                        }
                    }
                };
            }
            Action::NextPage => match self.screen {
                Screen::Overview => {
                    if page::has_next(self.overview_page, self.lists.len(), LIST_PAGE_SIZE) {
                        self.overview_page += 1;
                        self.overview_cursor = 0;
                    }
                }
                Screen::Detail => {
                    let total = self.detail.as_ref().map_or(0, |l| l.todos.len());
                    if page::has_next(self.detail_page, total, TODO_PAGE_SIZE) {
                        self.detail_page += 1;
                        self.detail_cursor = 0;
                    }
                }
            },

            Action::Select => {
                if let Some(list) = self.selected_list() {
                    let id = list.id.clone();
                    self.screen = Screen::Detail;
                    self.detail_id = Some(id.clone());
                    self.detail = None;
                    self.detail_load = LoadState::Loading;
                    self.detail_page = 1;
                    self.detail_cursor = 0;
                    self.load_seq += 1;
                    self.spawn_load_detail(id, self.load_seq);
                }
            }
            Action::Refresh => match self.screen {
                Screen::Overview => {
                    self.overview_load = LoadState::Loading;
                    self.load_seq += 1;
                    self.spawn_load_lists(self.load_seq);
                }
                Screen::Detail => {
                    if let Some(id) = self.detail_id.clone() {
                        self.detail_load = LoadState::Loading;
                        self.load_seq += 1;
                        self.spawn_load_detail(id, self.load_seq);
                    }
                }
            },

            // Dialogs
            Action::OpenCreateList => {
                if self.screen == Screen::Overview {
                    self.dialog = Some(Dialog::CreateList {
                        title: String::new(),
                        description: String::new(),
                        field: DialogField::Title,
                    });
                }
            }
            Action::OpenEditList => {
                if let Some(list) = self.selected_list() {
                    self.dialog = Some(Dialog::EditList {
                        id: list.id.clone(),
                        title: list.title.clone(),
                        description: list.description.clone(),
                        field: DialogField::Title,
                    });
                }
            }
            Action::OpenAddTodo => {
                if self.detail_load == LoadState::Loaded {
                    self.dialog = Some(Dialog::AddTodo {
                        title: String::new(),
                        completed: false,
                        field: DialogField::Title,
                    });
                }
            }
            Action::OpenEditTodo => {
                if let Some(todo) = self.selected_todo() {
                    self.dialog = Some(Dialog::EditTodo {
                        id: todo.id.clone(),
                        title: todo.title.clone(),
                        completed: todo.completed,
                        field: DialogField::Title,
                    });
                }
            }
            Action::DialogInput(c) => self.dialog_input(c),
            Action::DialogBackspace => {
                if let Some(dialog) = &mut self.dialog {
                    if let Some(text) = dialog.active_text_mut() {
                        text.pop();
                    }
                }
            }
            Action::DialogNextField => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.cycle_field();
                }
            }
            Action::DialogCancel => {
                self.dialog = None;
            }
            Action::DialogSubmit => self.submit_dialog(),

            Action::DeleteSelected => self.delete_selected(),
            Action::ToggleSelected => self.toggle_selected(),

            Action::PrintList => {
                if let Some(list) = &self.detail {
                    let content = pager::format_list(list);
                    self.action_tx.send(Action::SuspendForPager(content)).ok();
                }
            }
            // Handled by the main loop (terminal suspension); nothing to do
            // at the state level.
            Action::SuspendForPager(_) => {}

            // Load completions
            Action::ListsLoaded(lists, seq) => {
                if seq != self.load_seq {
                    return;
                }
                self.lists = lists;
                self.overview_load = LoadState::Loaded;
                if !self.first_load_done {
                    self.first_load_done = true;
                    self.overview_page = 1;
                } else {
                    self.overview_page =
                        page::clamp_page(self.overview_page, self.lists.len(), LIST_PAGE_SIZE);
                }
                self.clamp_cursor();
            }
            Action::ListsLoadFailed(message, seq) => {
                if seq != self.load_seq {
                    return;
                }
                self.overview_load = LoadState::Failed;
                self.show_toast(ToastKind::Error, message);
            }
            Action::DetailLoaded(list, seq) => {
                if seq != self.load_seq {
                    return;
                }
                self.detail = Some(*list);
                self.detail_load = LoadState::Loaded;
                self.detail_page = 1;
                self.detail_cursor = 0;
            }
            Action::DetailLoadFailed(message, seq) => {
                if seq != self.load_seq {
                    return;
                }
                // A refresh failure with data already on screen keeps the
                // data; without any successful response this renders as
                // "List not found".
                self.detail_load = if self.detail.is_some() {
                    LoadState::Loaded
                } else {
                    LoadState::Failed
                };
                self.show_toast(ToastKind::Error, message);
            }

            // Mutation completions
            Action::ListCreated(list) => {
                self.write_in_flight = false;
                self.lists.push(*list);
                self.dialog = None;
                self.show_toast(ToastKind::Success, "List created".to_string());
            }
            Action::ListReplaced {
                id,
                title,
                description,
            } => {
                self.write_in_flight = false;
                // Patch title/description only; todos stay as previously held.
                if let Some(list) = self.lists.iter_mut().find(|l| l.id == id) {
                    list.title = title;
                    list.description = description;
                }
                self.dialog = None;
                self.show_toast(ToastKind::Success, "List updated".to_string());
            }
            Action::ListDeleted(id) => {
                self.write_in_flight = false;
                self.lists.retain(|l| l.id != id);
                self.overview_page =
                    page::clamp_page(self.overview_page, self.lists.len(), LIST_PAGE_SIZE);
                self.clamp_cursor();
                self.show_toast(ToastKind::Success, "List deleted".to_string());
            }
            Action::TodosSaved(updated, message) => {
                self.write_in_flight = false;
                let total = updated.todos.len();
                self.detail = Some(*updated);
                self.detail_page = page::clamp_page(self.detail_page, total, TODO_PAGE_SIZE);
                self.clamp_cursor();
                self.dialog = None;
                self.show_toast(ToastKind::Success, message);
            }
            Action::WriteFailed(message) => {
                // Local state is untouched; the dialog (if any) stays open
                // so the working copy survives the failure.
                self.write_in_flight = false;
                self.show_toast(ToastKind::Error, message);
            }

            Action::None => {}
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Overview => &mut self.overview_cursor,
            Screen::Detail => &mut self.detail_cursor,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = match self.screen {
            Screen::Overview => self.visible_lists().len(),
            Screen::Detail => self.visible_todos().len(),
        };
        let cursor = self.cursor_mut();
        *cursor = (*cursor).min(len.saturating_sub(1));
    }

    fn show_toast(&mut self, kind: ToastKind, message: String) {
        self.toast = Some(Toast {
            message,
            kind,
            ticks_left: TOAST_TICKS,
        });
    }

    fn dialog_input(&mut self, c: char) {
        let Some(dialog) = &mut self.dialog else {
            return;
        };
        if dialog.field() == DialogField::Completed {
            if c == ' ' {
                dialog.toggle_completed();
            }
            return;
        }
        if let Some(text) = dialog.active_text_mut() {
            text.push(c);
        }
    }

    fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };

        // Empty required title: abort before any network call.
        if let Err(err) = validate_title(dialog.title()) {
            self.show_toast(ToastKind::Warning, err.to_string());
            return;
        }

        // A write is already outstanding; drop this submission instead of
        // racing two replaces.
        if self.write_in_flight {
            return;
        }

        match dialog {
            Dialog::CreateList {
                title, description, ..
            } => {
                self.write_in_flight = true;
                self.spawn_create_list(NewList {
                    title,
                    description,
                    todos: Vec::new(),
                });
            }
            Dialog::EditList {
                id,
                title,
                description,
                ..
            } => {
                let Some(existing) = self.lists.iter().find(|l| l.id == id) else {
                    self.dialog = None;
                    self.show_toast(ToastKind::Error, "List no longer exists".to_string());
                    return;
                };
                let body = TodoList {
                    id: id.clone(),
                    title,
                    description,
                    todos: existing.todos.clone(),
                };
                self.write_in_flight = true;
                self.spawn_replace_list_meta(body);
            }
            Dialog::AddTodo {
                title, completed, ..
            } => {
                let Some(list) = &self.detail else {
                    return;
                };
                let updated = list.with_todo_added(Todo::new(title, completed));
                self.write_in_flight = true;
                self.spawn_save_todos(updated, "Todo added");
            }
            Dialog::EditTodo {
                id,
                title,
                completed,
                ..
            } => {
                let Some(list) = &self.detail else {
                    return;
                };
                let updated = list.with_todo_edited(&id, title, completed);
                self.write_in_flight = true;
                self.spawn_save_todos(updated, "Todo updated");
            }
        }
    }

    fn delete_selected(&mut self) {
        if self.write_in_flight {
            return;
        }
        match self.screen {
            Screen::Overview => {
                if let Some(list) = self.selected_list() {
                    let id = list.id.clone();
                    self.write_in_flight = true;
                    self.spawn_delete_list(id);
                }
            }
            Screen::Detail => {
                let Some(todo) = self.selected_todo() else {
                    return;
                };
                let id = todo.id.clone();
                let Some(list) = &self.detail else {
                    return;
                };
                let updated = list.with_todo_removed(&id);
                self.write_in_flight = true;
                self.spawn_save_todos(updated, "Todo deleted");
            }
        }
    }

    fn toggle_selected(&mut self) {
        if self.write_in_flight {
            return;
        }
        let Some(todo) = self.selected_todo() else {
            return;
        };
        let (id, title, completed) = (todo.id.clone(), todo.title.clone(), todo.completed);
        let Some(list) = &self.detail else {
            return;
        };
        let updated = list.with_todo_edited(&id, title, !completed);
        self.write_in_flight = true;
        self.spawn_save_todos(updated, "Todo updated");
    }

    fn spawn_load_lists(&self, seq: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.get_lists().await {
                Ok(lists) => {
                    tx.send(Action::ListsLoaded(lists, seq)).ok();
                }
                Err(e) => {
                    tx.send(Action::ListsLoadFailed(e.to_string(), seq)).ok();
                }
            }
        });
    }

    fn spawn_load_detail(&self, id: String, seq: u64) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.get_list(&id).await {
                Ok(list) => {
                    tx.send(Action::DetailLoaded(Box::new(list), seq)).ok();
                }
                Err(e) => {
                    tx.send(Action::DetailLoadFailed(e.to_string(), seq)).ok();
                }
            }
        });
    }

    fn spawn_create_list(&self, body: NewList) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.create_list(&body).await {
                Ok(created) => {
                    tx.send(Action::ListCreated(Box::new(created))).ok();
                }
                Err(e) => {
                    tx.send(Action::WriteFailed(e.to_string())).ok();
                }
            }
        });
    }

    fn spawn_replace_list_meta(&self, body: TodoList) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.replace_list(&body.id, &body).await {
                Ok(_) => {
                    tx.send(Action::ListReplaced {
                        id: body.id,
                        title: body.title,
                        description: body.description,
                    })
                    .ok();
                }
                Err(e) => {
                    tx.send(Action::WriteFailed(e.to_string())).ok();
                }
            }
        });
    }

    fn spawn_delete_list(&self, id: String) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.delete_list(&id).await {
                Ok(()) => {
                    tx.send(Action::ListDeleted(id)).ok();
                }
                Err(e) => {
                    tx.send(Action::WriteFailed(e.to_string())).ok();
                }
            }
        });
    }

    /// Replace the whole todos sequence server-side; on success local state
    /// becomes the locally computed list, not the server's response body.
    fn spawn_save_todos(&self, updated: TodoList, message: &'static str) {
        let tx = self.action_tx.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            match api.replace_list(&updated.id, &updated).await {
                Ok(_) => {
                    tx.send(Action::TodosSaved(Box::new(updated), message.to_string()))
                        .ok();
                }
                Err(e) => {
                    tx.send(Action::WriteFailed(e.to_string())).ok();
                }
            }
        });
    }
}

/// Required-field check, run before any network call.
fn validate_title(title: &str) -> crate::error::Result<()> {
    if title.trim().is_empty() {
        return Err(TuduError::Validation("Title is required".to_string()));
    }
    Ok(())
}

impl Dialog {
    pub fn field(&self) -> DialogField {
        match self {
            Dialog::CreateList { field, .. }
            | Dialog::EditList { field, .. }
            | Dialog::AddTodo { field, .. }
            | Dialog::EditTodo { field, .. } => *field,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Dialog::CreateList { title, .. }
            | Dialog::EditList { title, .. }
            | Dialog::AddTodo { title, .. }
            | Dialog::EditTodo { title, .. } => title,
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self {
            Dialog::CreateList {
                title,
                description,
                field,
            }
            | Dialog::EditList {
                title,
                description,
                field,
                ..
            } => match field {
                DialogField::Title => Some(title),
                DialogField::Description => Some(description),
                DialogField::Completed => None,
            },
            Dialog::AddTodo { title, field, .. } | Dialog::EditTodo { title, field, .. } => {
                match field {
                    DialogField::Title => Some(title),
                    _ => None,
                }
            }
        }
    }

    fn cycle_field(&mut self) {
        match self {
            Dialog::CreateList { field, .. } | Dialog::EditList { field, .. } => {
                *field = match field {
                    DialogField::Title => DialogField::Description,
                    _ => DialogField::Title,
                };
            }
            Dialog::AddTodo { field, .. } | Dialog::EditTodo { field, .. } => {
                *field = match field {
                    DialogField::Title => DialogField::Completed,
                    _ => DialogField::Title,
                };
            }
        }
    }

    fn toggle_completed(&mut self) {
        if let Dialog::AddTodo { completed, .. } | Dialog::EditTodo { completed, .. } = self {
            *completed = !*completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        // The receiver is dropped; spawned tasks' sends are ignored, which
        // is fine because tests inject completion actions directly.
        App::new(ApiClient::new("http://localhost:3000"), tx)
    }

    fn make_lists(n: usize) -> Vec<TodoList> {
        (0..n)
            .map(|i| TodoList {
                id: format!("l{i}"),
                title: format!("List {i}"),
                description: String::new(),
                todos: Vec::new(),
            })
            .collect()
    }

    fn loaded_app(n: usize) -> App {
        let mut app = app();
        app.load_seq = 1;
        app.update(Action::ListsLoaded(make_lists(n), 1));
        app
    }

    fn detail_app(todos: Vec<Todo>) -> App {
        let mut app = loaded_app(1);
        app.screen = Screen::Detail;
        app.detail_id = Some("l0".to_string());
        app.load_seq = 2;
        app.update(Action::DetailLoaded(
            Box::new(TodoList {
                id: "l0".to_string(),
                title: "List 0".to_string(),
                description: String::new(),
                todos,
            }),
            2,
        ));
        app
    }

    #[test]
    fn initial_load_resets_to_page_one_and_marks_loaded() {
        let app = loaded_app(13);
        assert_eq!(app.overview_load, LoadState::Loaded);
        assert_eq!(app.overview_page, 1);
        assert_eq!(app.visible_lists().len(), 4);
    }

    #[test]
    fn later_loads_keep_the_current_page() {
        let mut app = loaded_app(13);
        app.update(Action::NextPage);
        assert_eq!(app.overview_page, 2);

        app.load_seq = 2;
        app.update(Action::ListsLoaded(make_lists(13), 2));
        assert_eq!(app.overview_page, 2);
    }

    #[test]
    fn stale_load_completion_is_dropped() {
        let mut app = loaded_app(4);
        app.load_seq = 7;
        app.update(Action::ListsLoaded(make_lists(1), 3));
        assert_eq!(app.lists.len(), 4);
    }

    #[test]
    fn load_failure_keeps_no_data_and_reports() {
        let mut app = app();
        app.load_seq = 1;
        app.update(Action::ListsLoadFailed("connection refused".to_string(), 1));
        assert_eq!(app.overview_load, LoadState::Failed);
        assert!(app.lists.is_empty());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn page_navigation_respects_bounds() {
        let mut app = loaded_app(13); // 4 pages of 4
        app.update(Action::PrevPage);
        assert_eq!(app.overview_page, 1);
        for _ in 0..10 {
            app.update(Action::NextPage);
        }
        assert_eq!(app.overview_page, 4);
        assert_eq!(app.visible_lists().len(), 1);
    }

    #[test]
    fn create_with_empty_title_performs_no_network_call() {
        // No tokio runtime here: if submission tried to spawn a request,
        // this test would panic.
        let mut app = loaded_app(2);
        app.update(Action::OpenCreateList);
        app.update(Action::DialogInput(' '));
        app.update(Action::DialogSubmit);

        assert!(app.dialog.is_some());
        assert!(!app.write_in_flight);
        assert_eq!(app.lists.len(), 2);
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Warning);
    }

    #[test]
    fn add_todo_with_blank_title_is_rejected_before_network() {
        let mut app = detail_app(vec![]);
        app.update(Action::OpenAddTodo);
        app.update(Action::DialogInput(' '));
        app.update(Action::DialogSubmit);

        assert!(app.dialog.is_some());
        assert!(!app.write_in_flight);
        assert!(app.detail.as_ref().unwrap().todos.is_empty());
    }

    #[test]
    fn submit_while_write_in_flight_is_dropped() {
        // Also runtime-free: a leaked submission would panic on spawn.
        let mut app = loaded_app(1);
        app.write_in_flight = true;
        app.update(Action::OpenCreateList);
        app.update(Action::DialogInput('x'));
        app.update(Action::DialogSubmit);

        assert!(app.dialog.is_some());
        assert!(app.write_in_flight);
    }

    #[test]
    fn delete_while_write_in_flight_is_dropped() {
        let mut app = loaded_app(3);
        app.write_in_flight = true;
        app.update(Action::DeleteSelected);
        assert_eq!(app.lists.len(), 3);
    }

    #[tokio::test]
    async fn valid_create_submission_marks_write_in_flight() {
        let mut app = loaded_app(0);
        app.update(Action::OpenCreateList);
        for c in "Groceries".chars() {
            app.update(Action::DialogInput(c));
        }
        app.update(Action::DialogSubmit);
        assert!(app.write_in_flight);
        assert!(app.dialog.is_some()); // closes only on success
    }

    #[test]
    fn list_created_appends_and_closes_dialog() {
        let mut app = loaded_app(2);
        app.dialog = Some(Dialog::CreateList {
            title: "Chores".to_string(),
            description: String::new(),
            field: DialogField::Title,
        });
        app.write_in_flight = true;

        app.update(Action::ListCreated(Box::new(TodoList {
            id: "srv-9".to_string(),
            title: "Chores".to_string(),
            description: String::new(),
            todos: Vec::new(),
        })));

        assert_eq!(app.lists.len(), 3);
        assert_eq!(app.lists[2].id, "srv-9");
        assert!(app.dialog.is_none());
        assert!(!app.write_in_flight);
    }

    #[test]
    fn list_replaced_patches_meta_but_not_todos() {
        let mut app = loaded_app(2);
        app.lists[1].todos = vec![Todo::new("keep me", false)];
        let kept = app.lists[1].todos.clone();

        app.update(Action::ListReplaced {
            id: "l1".to_string(),
            title: "Renamed".to_string(),
            description: "new text".to_string(),
        });

        assert_eq!(app.lists[1].title, "Renamed");
        assert_eq!(app.lists[1].description, "new text");
        assert_eq!(app.lists[1].todos, kept);
    }

    #[test]
    fn deleting_the_last_item_of_the_last_page_clamps_the_page() {
        let mut app = loaded_app(5); // pages: 4 + 1
        app.update(Action::NextPage);
        assert_eq!(app.overview_page, 2);

        app.update(Action::ListDeleted("l4".to_string()));
        assert_eq!(app.lists.len(), 4);
        assert_eq!(app.overview_page, 1);
        assert_eq!(app.visible_lists().len(), 4);
    }

    #[test]
    fn failed_write_leaves_todos_byte_for_byte_identical() {
        let mut app = detail_app(vec![Todo::new("Eggs", false), Todo::new("Milk", true)]);
        let before = serde_json::to_string(&app.detail).unwrap();

        app.update(Action::OpenEditTodo);
        app.update(Action::DialogInput('!'));
        app.update(Action::WriteFailed("server error (500): boom".to_string()));

        let after = serde_json::to_string(&app.detail).unwrap();
        assert_eq!(before, after);
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
        assert!(app.dialog.is_some()); // working copy survives the failure
    }

    #[test]
    fn todos_saved_replaces_local_state_with_computed_snapshot() {
        let mut app = detail_app(vec![]);
        let updated = app
            .detail
            .as_ref()
            .unwrap()
            .with_todo_added(Todo::new("Eggs", false));
        app.write_in_flight = true;
        app.dialog = Some(Dialog::AddTodo {
            title: "Eggs".to_string(),
            completed: false,
            field: DialogField::Title,
        });

        app.update(Action::TodosSaved(
            Box::new(updated.clone()),
            "Todo added".to_string(),
        ));

        assert_eq!(app.detail.as_ref().unwrap(), &updated);
        assert!(app.dialog.is_none());
        assert!(!app.write_in_flight);
    }

    #[test]
    fn deleting_a_todo_on_the_last_page_clamps_the_detail_page() {
        let todos: Vec<Todo> = (0..7).map(|i| Todo::new(format!("t{i}"), false)).collect();
        let mut app = detail_app(todos.clone()); // pages: 6 + 1
        app.update(Action::NextPage);
        assert_eq!(app.detail_page, 2);

        let shrunk = app.detail.as_ref().unwrap().with_todo_removed(&todos[6].id);
        app.update(Action::TodosSaved(
            Box::new(shrunk),
            "Todo deleted".to_string(),
        ));

        assert_eq!(app.detail_page, 1);
        assert_eq!(app.visible_todos().len(), 6);
    }

    #[test]
    fn detail_fetch_failure_without_data_renders_not_found() {
        let mut app = loaded_app(1);
        app.screen = Screen::Detail;
        app.detail_id = Some("l0".to_string());
        app.detail_load = LoadState::Loading;
        app.load_seq = 2;

        app.update(Action::DetailLoadFailed("Server error (404): gone".to_string(), 2));
        assert_eq!(app.detail_load, LoadState::Failed);
        assert!(app.detail.is_none());
    }

    #[test]
    fn detail_refresh_failure_keeps_existing_data() {
        let mut app = detail_app(vec![Todo::new("Eggs", false)]);
        app.detail_load = LoadState::Loading;
        app.load_seq = 3;
        app.update(Action::DetailLoadFailed("timeout".to_string(), 3));

        assert_eq!(app.detail_load, LoadState::Loaded);
        assert_eq!(app.detail.as_ref().unwrap().todos.len(), 1);
    }

    #[test]
    fn back_from_detail_invalidates_inflight_detail_load() {
        let mut app = detail_app(vec![]);
        let stale_seq = app.load_seq;
        app.update(Action::Back);
        assert_eq!(app.screen, Screen::Overview);

        app.update(Action::DetailLoaded(
            Box::new(TodoList {
                id: "l0".to_string(),
                title: "late".to_string(),
                description: String::new(),
                todos: Vec::new(),
            }),
            stale_seq,
        ));
        assert!(app.detail.is_none());
    }

    #[test]
    fn toast_expires_after_its_ticks() {
        let mut app = app();
        app.show_toast(ToastKind::Success, "done".to_string());
        for _ in 0..TOAST_TICKS {
            app.update(Action::Tick);
        }
        assert!(app.toast.is_none());
    }

    #[test]
    fn dialog_fields_cycle_and_checkbox_toggles() {
        let mut app = detail_app(vec![]);
        app.update(Action::OpenAddTodo);
        for c in "Eggs".chars() {
            app.update(Action::DialogInput(c));
        }
        app.update(Action::DialogNextField);
        app.update(Action::DialogInput(' ')); // toggles the checkbox

        match app.dialog.as_ref().unwrap() {
            Dialog::AddTodo {
                title, completed, ..
            } => {
                assert_eq!(title, "Eggs");
                assert!(*completed);
            }
            other => panic!("unexpected dialog: {other:?}"),
        }
    }
}
