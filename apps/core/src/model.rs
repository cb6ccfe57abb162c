use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedApp {
    pub name: String,
    /// Executable path, shortcut path, or a URI such as `ms-settings:`.
    pub path: String,
}

impl IndexedApp {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedFile {
    pub name: String,
    pub path: String,
    pub kind: FileKind,
}

impl IndexedFile {
    pub fn new(name: &str, path: &str, kind: FileKind) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardKind {
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipboardItem {
    pub id: String,
    pub content: String,
    pub kind: ClipboardKind,
    pub created_at_epoch_ms: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    App,
    File,
    /// Reserved for host-provided commands; never produced by the core.
    Command,
    Clipboard,
}

/// One row of a result list. `path` holds the launch target for apps and
/// files, and the full copied text for clipboard rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub kind: ResultKind,
    pub path: String,
}

impl SearchResult {
    pub fn from_app(app: &IndexedApp) -> Self {
        Self {
            id: format!("app-{}", app.name),
            title: app.name.clone(),
            subtitle: "Application".to_string(),
            kind: ResultKind::App,
            path: app.path.clone(),
        }
    }

    pub fn from_file(file: &IndexedFile) -> Self {
        let subtitle = match file.kind {
            FileKind::Folder => "Folder",
            FileKind::File => "File",
        };
        Self {
            id: format!("file-{}", file.path),
            title: file.name.clone(),
            subtitle: subtitle.to_string(),
            kind: ResultKind::File,
            path: file.path.clone(),
        }
    }

    pub fn from_clipboard(item: &ClipboardItem, title_chars: usize) -> Self {
        Self {
            id: format!("clipboard-{}", item.id),
            title: clipboard_title(&item.content, title_chars),
            subtitle: "Clipboard".to_string(),
            kind: ResultKind::Clipboard,
            path: item.content.clone(),
        }
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input.trim().to_lowercase()
}

fn clipboard_title(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_title_keeps_short_content_intact() {
        assert_eq!(clipboard_title("Hello World", 60), "Hello World");
    }

    #[test]
    fn clipboard_title_truncates_by_characters() {
        let content = "é".repeat(61);
        let title = clipboard_title(&content, 60);
        assert_eq!(title, format!("{}...", "é".repeat(60)));
    }

    #[test]
    fn result_kinds_serialize_lowercase() {
        let app = SearchResult::from_app(&IndexedApp::new("Notepad", "notepad.exe"));
        let encoded = serde_json::to_string(&app).unwrap();
        assert!(encoded.contains("\"kind\":\"app\""));
        assert!(encoded.contains("\"id\":\"app-Notepad\""));
    }

    #[test]
    fn folder_results_use_folder_subtitle() {
        let folder = IndexedFile::new("Projects", "/home/u/Projects", FileKind::Folder);
        let result = SearchResult::from_file(&folder);
        assert_eq!(result.subtitle, "Folder");
        assert_eq!(result.kind, ResultKind::File);
        assert_eq!(result.id, "file-/home/u/Projects");
    }
}
