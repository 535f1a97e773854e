use crate::types::TodoList;

/// Everything the app can be asked to do, whether it came from a key press
/// or from a completed network call reporting back over the action channel.
///
/// Load completions carry the sequence number of the fetch that produced
/// them; `App::update` drops any completion whose sequence is no longer
/// current, so a response that arrives after the user navigated away cannot
/// clobber newer state.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    Tick,

    // Cursor and pagination (re-slices held data, never a network call)
    CursorUp,
    CursorDown,
    PrevPage,
    NextPage,

    Select,
    Refresh,

    // Dialog working copies
    OpenCreateList,
    OpenEditList,
    OpenAddTodo,
    OpenEditTodo,
    DialogInput(char),
    DialogBackspace,
    DialogNextField,
    DialogSubmit,
    DialogCancel,

    // Direct mutations on the current selection
    DeleteSelected,
    ToggleSelected,

    // Print view
    PrintList,
    SuspendForPager(String),

    // Load completions
    ListsLoaded(Vec<TodoList>, u64),
    ListsLoadFailed(String, u64),
    DetailLoaded(Box<TodoList>, u64),
    DetailLoadFailed(String, u64),

    // Mutation completions
    ListCreated(Box<TodoList>),
    ListReplaced {
        id: String,
        title: String,
        description: String,
    },
    ListDeleted(String),
    /// A successful todos rewrite: the locally computed replacement list
    /// (the client trusts its own write) plus the toast to show.
    TodosSaved(Box<TodoList>, String),
    WriteFailed(String),

    None,
}
