use std::fmt;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

/// Text with an optional semantic color, rendered plain when color is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    color: Option<SemanticColor>,
    bold: bool,
}

impl ColoredText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    pub fn styled(text: impl Into<String>, color: SemanticColor) -> Self {
        Self {
            color: Some(color),
            ..Self::plain(text)
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::styled(text, SemanticColor::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::styled(text, SemanticColor::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::styled(text, SemanticColor::Warning)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::styled(text, SemanticColor::Info)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::styled(text, SemanticColor::Dim)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Right-pad with spaces to `width` terminal columns.
    pub fn pad_to(mut self, width: usize) -> Self {
        let current = self.text.width();
        if current < width {
            self.text.push_str(&" ".repeat(width - current));
        }
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        if !supports_color {
            return self.text.clone();
        }

        let text = self.text.as_str();
        let mut styled = match self.color {
            Some(SemanticColor::Success) => text.with(theme::colors::SUCCESS),
            Some(SemanticColor::Error) => text.with(theme::colors::ERROR),
            Some(SemanticColor::Warning) => text.with(theme::colors::WARNING),
            Some(SemanticColor::Info) => text.with(theme::colors::INFO),
            Some(SemanticColor::Dim) => text.with(theme::colors::DIM),
            None if self.bold => text.bold(),
            None => return self.text.clone(),
        };

        if self.bold {
            styled = styled.bold();
        }

        format!("{}", styled)
    }
}

impl fmt::Display for ColoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
