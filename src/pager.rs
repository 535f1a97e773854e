use std::process::Command;

use crate::error::Result;
use crate::types::TodoList;

/// Detect the user's preferred pager: $PAGER, falling back to "less".
pub fn detect_pager() -> String {
    if let Ok(pager) = std::env::var("PAGER") {
        if !pager.is_empty() {
            return pager;
        }
    }
    "less".to_string()
}

/// Full, non-paginated, read-only rendering of a list for the print view.
pub fn format_list(list: &TodoList) -> String {
    let mut out = String::new();
    out.push_str(&list.title);
    out.push('\n');
    if !list.description.is_empty() {
        out.push_str(&list.description);
        out.push('\n');
    }
    out.push('\n');

    if list.todos.is_empty() {
        out.push_str("No todos are available.\n");
        return out;
    }

    for todo in &list.todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        out.push_str(&format!("[{}] {}\n", mark, todo.title));
    }

    let done = list.todos.iter().filter(|t| t.completed).count();
    out.push_str(&format!("\n{} of {} completed\n", done, list.todos.len()));
    out
}

/// Pipe content to the pager's stdin. Pagers read from stdin when used this
/// way, so the same invocation works for less, bat, most, etc.
pub fn open_pager(content: &str, pager_cmd: &str) -> Result<()> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new("sh")
        .args(["-c", pager_cmd])
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // Write everything then drop to close the pipe (signals EOF)
        let _ = stdin.write_all(content.as_bytes());
    }

    child.wait()?;
    Ok(())
}
