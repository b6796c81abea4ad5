use crossterm::style::Color;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};

/// Design tokens for the EntityG CLI UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and tree glyphs must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";

    // Node roles.
    pub const CENTER: &str = "●";
    pub const INFORMATION: &str = "○";

    // Subtree state.
    pub const EXPANDED: &str = "▼";
    pub const COLLAPSED: &str = "▶";

    // Command identifiers (used in headers).
    pub const CHECK: &str = "🔍";
    pub const GRAPH: &str = "◎";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";

    pub const CENTER: &str = "*";
    pub const INFORMATION: &str = "o";

    pub const EXPANDED: &str = "[-]";
    pub const COLLAPSED: &str = "[+]";

    pub const CHECK: &str = "[CHECK]";
    pub const GRAPH: &str = "[GRAPH]";
}

/// Branch glyphs for the graph outline.
pub mod branches {
    pub const TEE: &str = "├─ ";
    pub const ELBOW: &str = "└─ ";
    pub const PIPE: &str = "│  ";
    pub const BLANK: &str = "   ";
}

pub mod branches_ascii {
    pub const TEE: &str = "|- ";
    pub const ELBOW: &str = "`- ";
    pub const PIPE: &str = "|  ";
    pub const BLANK: &str = "   ";
}

/// Prompt theme for dialoguer: colorful when color is enabled, plain otherwise.
pub fn prompt_theme(supports_color: bool) -> Box<dyn Theme> {
    if supports_color {
        Box::new(ColorfulTheme::default())
    } else {
        Box::new(SimpleTheme)
    }
}
