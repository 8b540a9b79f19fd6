//! Scan presentation options.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options resolved by the CLI collaborator.
///
/// The scanner itself always observes every entry; `show_hidden` only
/// controls which rows the presentation layer keeps.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanOptions {
    /// Root path to scan.
    pub root: PathBuf,

    /// Show entries whose name starts with a dot.
    #[builder(default = "false")]
    #[serde(default)]
    pub show_hidden: bool,
}

impl ScanOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.root {
            Some(root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl ScanOptions {
    /// Create a builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Create options for scanning a path with defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            show_hidden: false,
        }
    }

    /// Whether a child with the given name should be kept for display.
    pub fn keeps(&self, name: &str) -> bool {
        self.show_hidden || !name.starts_with('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ScanOptions::builder()
            .root("/home/user")
            .show_hidden(true)
            .build()
            .unwrap();

        assert_eq!(options.root, PathBuf::from("/home/user"));
        assert!(options.show_hidden);
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanOptions::builder().root("").build().is_err());
        assert!(ScanOptions::builder().build().is_err());
    }

    #[test]
    fn test_keeps_hidden() {
        let mut options = ScanOptions::new("/test");
        assert!(options.keeps("src"));
        assert!(!options.keeps(".git"));

        options.show_hidden = true;
        assert!(options.keeps(".git"));
    }
}
