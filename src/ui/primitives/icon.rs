use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Center,
    Information,
    Expanded,
    Collapsed,
    Check,
    Graph,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Center) => theme::icons::CENTER,
            (true, Icon::Information) => theme::icons::INFORMATION,
            (true, Icon::Expanded) => theme::icons::EXPANDED,
            (true, Icon::Collapsed) => theme::icons::COLLAPSED,
            (true, Icon::Check) => theme::icons::CHECK,
            (true, Icon::Graph) => theme::icons::GRAPH,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Center) => theme::icons_ascii::CENTER,
            (false, Icon::Information) => theme::icons_ascii::INFORMATION,
            (false, Icon::Expanded) => theme::icons_ascii::EXPANDED,
            (false, Icon::Collapsed) => theme::icons_ascii::COLLAPSED,
            (false, Icon::Check) => theme::icons_ascii::CHECK,
            (false, Icon::Graph) => theme::icons_ascii::GRAPH,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Collapsed => theme::colors::WARNING,
            Icon::Arrow | Icon::Expanded | Icon::Information => theme::colors::DIM,
            Icon::Center | Icon::Check | Icon::Graph => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Center.render(false), "*");
        assert_eq!(Icon::Collapsed.render(false), "[+]");
    }

    #[test]
    fn colored_without_color_is_plain() {
        assert_eq!(Icon::Success.colored(false, true), "✓");
        assert!(Icon::Error.colored(true, true).contains("\u{1b}["));
    }
}
