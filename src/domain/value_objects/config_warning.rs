//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// Non-fatal problem found while reading `entityg.toml`.
///
/// Unknown keys do not stop a session from starting; they are reported
/// alongside the result so a typo like `default_max_node` is not silently
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key, e.g. `graph.use_tooltip`
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, when the key could be located in the source text
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}
