// Export Model
// Output formats and keyboard shortcuts

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Html,
    Url,
}

/// Keyboard shortcut advertised to clients (Ctrl, or Cmd on macOS)
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub key: &'static str,
    pub command: &'static str,
    pub description: &'static str,
}

pub const SHORTCUTS: [Shortcut; 6] = [
    Shortcut { key: "Enter", command: "generate", description: "Generate badge" },
    Shortcut { key: "m", command: "export:markdown", description: "Copy Markdown" },
    Shortcut { key: "h", command: "export:html", description: "Copy HTML" },
    Shortcut { key: "l", command: "export:url", description: "Copy URL" },
    Shortcut { key: "1", command: "switch_mode:static", description: "Static badge" },
    Shortcut { key: "2", command: "switch_mode:dynamic", description: "Dynamic badge" },
];
