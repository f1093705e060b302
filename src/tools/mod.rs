//! Tool dispatch
//!
//! Routes named tool calls onto the note store and formats text responses.
//! The three operations form a closed set of request variants; `dispatch` is
//! the single routing point. Store faults are caught here and turned into
//! error-flagged text responses so they never escape to the transport layer.

use crate::store::{NoteStore, StoreError};
use serde_json::Value;

/// The closed set of operations the server understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    /// Save (or overwrite) a note
    SaveNote { title: String, content: String },
    /// List all notes with their metadata
    ListNotes,
    /// Read one note's content
    ReadNote { title: String },
}

/// Text payload returned to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    /// Human-readable result or error text
    pub text: String,
    /// Whether this response reports an error
    pub is_error: bool,
}

impl ToolResponse {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Resolve a named call with a JSON argument bundle into a request variant.
///
/// Unknown operation names yield an error response naming the operation
/// rather than a fault. Missing or non-string arguments resolve to empty
/// strings so that `dispatch` reports them through its required-field
/// validation messages.
pub fn parse_call(name: &str, args: &Value) -> Result<ToolRequest, ToolResponse> {
    match name {
        "save_note" => Ok(ToolRequest::SaveNote {
            title: string_arg(args, "title"),
            content: string_arg(args, "content"),
        }),
        "list_notes" => Ok(ToolRequest::ListNotes),
        "read_note" => Ok(ToolRequest::ReadNote {
            title: string_arg(args, "title"),
        }),
        other => Err(ToolResponse::error(format!("Unknown tool: {}", other))),
    }
}

/// Parse and dispatch in one step, for callers holding raw (name, args) pairs
pub fn handle_call(store: &NoteStore, name: &str, args: &Value) -> ToolResponse {
    match parse_call(name, args) {
        Ok(request) => dispatch(store, request),
        Err(response) => response,
    }
}

/// Route a request to its handler
pub fn dispatch(store: &NoteStore, request: ToolRequest) -> ToolResponse {
    match request {
        ToolRequest::SaveNote { title, content } => save_note(store, &title, &content),
        ToolRequest::ListNotes => list_notes(store),
        ToolRequest::ReadNote { title } => read_note(store, &title),
    }
}

fn string_arg(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn save_note(store: &NoteStore, title: &str, content: &str) -> ToolResponse {
    if title.is_empty() || content.is_empty() {
        return ToolResponse::error("Error: Both title and content are required");
    }

    match store.save(title, content) {
        Ok(filename) => ToolResponse::success(format!("Note saved successfully: {}", filename)),
        Err(e) => ToolResponse::error(format!("Error saving note: {}", e)),
    }
}

fn list_notes(store: &NoteStore) -> ToolResponse {
    let notes = match store.list() {
        Ok(notes) => notes,
        Err(e) => return ToolResponse::error(format!("Error listing notes: {}", e)),
    };

    if notes.is_empty() {
        return ToolResponse::success(format!(
            "No notes found in {}",
            store.notes_dir().display()
        ));
    }

    let entries: Vec<String> = notes
        .iter()
        .map(|note| {
            format!(
                "- **{}** ({})\n  Last modified: {}",
                note.title,
                note.filename,
                note.last_modified.format("%Y-%m-%d %H:%M:%S")
            )
        })
        .collect();

    ToolResponse::success(format!(
        "Found {} note(s):\n\n{}",
        notes.len(),
        entries.join("\n")
    ))
}

fn read_note(store: &NoteStore, title: &str) -> ToolResponse {
    if title.is_empty() {
        return ToolResponse::error("Error: Title is required");
    }

    match store.read(title) {
        Ok(content) => ToolResponse::success(format!("# {}\n\n{}", title, content)),
        Err(e @ StoreError::NotFound(_)) => ToolResponse::error(e.to_string()),
        Err(e) => ToolResponse::error(format!("Error reading note: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store() -> (NoteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = NoteStore::new(temp_dir.path().join("notes"), "week4");
        (store, temp_dir)
    }

    #[test]
    fn test_parse_save_note_call() {
        let args = json!({"title": "Test Note", "content": "body"});
        let request = parse_call("save_note", &args).unwrap();
        assert_eq!(
            request,
            ToolRequest::SaveNote {
                title: "Test Note".to_string(),
                content: "body".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_call_defaults_missing_arguments() {
        let request = parse_call("read_note", &json!({})).unwrap();
        assert_eq!(
            request,
            ToolRequest::ReadNote {
                title: String::new()
            }
        );
    }

    #[test]
    fn test_parse_call_unknown_tool() {
        let response = parse_call("invalid_tool", &json!({})).unwrap_err();
        assert!(response.is_error);
        assert_eq!(response.text, "Unknown tool: invalid_tool");
    }

    #[test]
    fn test_save_note_requires_both_fields() {
        let (store, _temp_dir) = create_test_store();

        for args in [
            json!({}),
            json!({"title": "Only Title"}),
            json!({"content": "only content"}),
        ] {
            let response = handle_call(&store, "save_note", &args);
            assert!(response.is_error);
            assert_eq!(response.text, "Error: Both title and content are required");
        }
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_read_note_requires_title() {
        let (store, _temp_dir) = create_test_store();
        let response = handle_call(&store, "read_note", &json!({}));
        assert!(response.is_error);
        assert_eq!(response.text, "Error: Title is required");
    }

    #[test]
    fn test_save_note_confirms_filename() {
        let (store, _temp_dir) = create_test_store();
        let response = handle_call(
            &store,
            "save_note",
            &json!({"title": "Test Note", "content": "body"}),
        );
        assert!(!response.is_error);
        assert_eq!(response.text, "Note saved successfully: week4-test-note.md");
    }

    #[test]
    fn test_read_note_formats_title_header() {
        let (store, _temp_dir) = create_test_store();
        store.save("Test Note", "# My Test Note\n\nbody").unwrap();

        let response = handle_call(&store, "read_note", &json!({"title": "Test Note"}));
        assert!(!response.is_error);
        assert!(response.text.starts_with("# Test Note\n\n*Created/Updated: "));
        assert!(response.text.ends_with("# My Test Note\n\nbody"));
    }

    #[test]
    fn test_read_note_not_found() {
        let (store, _temp_dir) = create_test_store();
        let response = handle_call(&store, "read_note", &json!({"title": "Does Not Exist"}));
        assert!(response.is_error);
        assert_eq!(response.text, "Note not found: week4-does-not-exist.md");
        // The failed read must not create the file
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_notes_empty_store() {
        let (store, _temp_dir) = create_test_store();
        let response = handle_call(&store, "list_notes", &json!({}));
        assert!(!response.is_error);
        assert!(response.text.starts_with("No notes found in "));
    }

    #[test]
    fn test_list_notes_after_save() {
        let (store, _temp_dir) = create_test_store();
        store.save("API Design Ideas", "body").unwrap();

        let response = handle_call(&store, "list_notes", &json!({}));
        assert!(!response.is_error);
        assert!(response.text.starts_with("Found 1 note(s):"));
        assert!(response.text.contains("week4-api-design-ideas.md"));
    }

    #[test]
    fn test_unknown_tool_changes_no_state() {
        let (store, _temp_dir) = create_test_store();
        let response = handle_call(&store, "invalid_tool", &json!({"title": "X"}));
        assert!(response.is_error);
        assert_eq!(response.text, "Unknown tool: invalid_tool");
        assert!(store.list().unwrap().is_empty());
    }
}
