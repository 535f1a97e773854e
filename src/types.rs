use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, server-persisted collection of todo items.
///
/// Identity is `id` (opaque, server-assigned). `todos` is always rewritten
/// as a whole unit: every item-level change ships the complete sequence back
/// to the server in a single replacement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

/// A titled, completable item owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// New item with a freshly generated random id.
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed,
        }
    }
}

/// Creation payload for `POST /lists`. The server assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewList {
    pub title: String,
    pub description: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// The replacement list after appending a new todo at the end.
    pub fn with_todo_added(&self, todo: Todo) -> TodoList {
        let mut updated = self.clone();
        updated.todos.push(todo);
        updated
    }

    /// The replacement list after rewriting the matching item's
    /// title/completed in place. Position and id are preserved; a
    /// non-matching id leaves the sequence unchanged.
    pub fn with_todo_edited(&self, id: &str, title: String, completed: bool) -> TodoList {
        let mut updated = self.clone();
        for todo in &mut updated.todos {
            if todo.id == id {
                todo.title = title;
                todo.completed = completed;
                break;
            }
        }
        updated
    }

    /// The replacement list after removing the matching item. Relative order
    /// of the remaining items is preserved.
    pub fn with_todo_removed(&self, id: &str) -> TodoList {
        let mut updated = self.clone();
        updated.todos.retain(|todo| todo.id != id);
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> TodoList {
        TodoList {
            id: "l1".to_string(),
            title: "Groceries".to_string(),
            description: String::new(),
            todos: vec![],
        }
    }

    #[test]
    fn adding_to_empty_list_yields_single_item_with_fresh_id() {
        let list = groceries();
        let updated = list.with_todo_added(Todo::new("Buy milk", false));

        assert_eq!(updated.todos.len(), 1);
        assert_eq!(updated.todos[0].title, "Buy milk");
        assert!(!updated.todos[0].completed);
        assert!(!updated.todos[0].id.is_empty());
        // The source list is a snapshot, untouched until the write succeeds.
        assert!(list.todos.is_empty());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = Todo::new("a", false);
        let b = Todo::new("b", false);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn edit_changes_only_target_fields_and_keeps_position() {
        let mut list = groceries();
        list.todos = vec![
            Todo::new("first", false),
            Todo::new("second", false),
            Todo::new("third", true),
        ];
        let target = list.todos[1].id.clone();

        let updated = list.with_todo_edited(&target, "renamed".to_string(), true);

        assert_eq!(updated.todos.len(), 3);
        assert_eq!(updated.todos[1].id, target);
        assert_eq!(updated.todos[1].title, "renamed");
        assert!(updated.todos[1].completed);
        assert_eq!(updated.todos[0], list.todos[0]);
        assert_eq!(updated.todos[2], list.todos[2]);
    }

    #[test]
    fn edit_with_unknown_id_is_a_no_op() {
        let mut list = groceries();
        list.todos = vec![Todo::new("only", false)];
        let updated = list.with_todo_edited("missing", "x".to_string(), true);
        assert_eq!(updated.todos, list.todos);
    }

    #[test]
    fn remove_deletes_exactly_the_match_and_keeps_order() {
        let mut list = groceries();
        list.todos = vec![
            Todo::new("first", false),
            Todo::new("second", false),
            Todo::new("third", false),
        ];
        let target = list.todos[1].id.clone();

        let updated = list.with_todo_removed(&target);

        assert_eq!(updated.todos.len(), 2);
        assert_eq!(updated.todos[0].title, "first");
        assert_eq!(updated.todos[1].title, "third");
    }

    #[test]
    fn add_complete_delete_round() {
        let list = groceries();

        let added = list.with_todo_added(Todo::new("Eggs", false));
        assert_eq!(added.todos.len(), 1);
        assert_eq!(added.todos[0].title, "Eggs");
        assert!(!added.todos[0].completed);

        let id = added.todos[0].id.clone();
        let completed = added.with_todo_edited(&id, "Eggs".to_string(), true);
        assert!(completed.todos[0].completed);

        let emptied = completed.with_todo_removed(&id);
        assert!(emptied.todos.is_empty());
    }

    #[test]
    fn list_round_trips_through_json() {
        let mut list = groceries();
        list.todos = vec![Todo::new("Buy milk", true)];
        let json = serde_json::to_string(&list).unwrap();
        let back: TodoList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn missing_optional_fields_default() {
        let list: TodoList = serde_json::from_str(r#"{"id":"l9","title":"Bare"}"#).unwrap();
        assert!(list.description.is_empty());
        assert!(list.todos.is_empty());
    }
}
