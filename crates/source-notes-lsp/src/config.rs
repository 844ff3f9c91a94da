use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::MessageType;

/// Client-side settings, read from the `sourceNotes` configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LspSettings {
    /// Lowest level of messages forwarded to the client log
    pub log_level: LogLevel,

    /// Show note bodies when hovering annotated lines
    pub hover: bool,

    /// Put a lens above the first line of every note
    pub code_lens: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Level of an LSP message type
    pub fn of(typ: MessageType) -> Self {
        match typ {
            MessageType::ERROR => LogLevel::Error,
            MessageType::WARNING => LogLevel::Warning,
            MessageType::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl Default for LspSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            hover: true,
            code_lens: true,
        }
    }
}

impl LspSettings {
    pub fn allows(&self, typ: MessageType) -> bool {
        LogLevel::of(typ) >= self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings: LspSettings =
            serde_json::from_value(serde_json::json!({ "logLevel": "warning" })).unwrap();
        assert_eq!(settings.log_level, LogLevel::Warning);
        assert!(settings.hover);
        assert!(settings.code_lens);
    }

    #[test]
    fn test_allows() {
        let settings = LspSettings {
            log_level: LogLevel::Warning,
            ..Default::default()
        };
        assert!(settings.allows(MessageType::ERROR));
        assert!(settings.allows(MessageType::WARNING));
        assert!(!settings.allows(MessageType::INFO));
        assert!(!settings.allows(MessageType::LOG));
    }
}
