use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    success: bool,
    stats: Vec<(String, usize)>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            success: true,
            stats: Vec::new(),
            next_step: None,
        }
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(title)
        }
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (icon, title) = if self.success {
            (Icon::Success, ColoredText::success(self.title.as_str()))
        } else {
            (Icon::Warning, ColoredText::warning(self.title.as_str()))
        };

        let mut out = format!(
            "\n{} {}\n",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );

        if !self.stats.is_empty() {
            let stats: Vec<String> = self
                .stats
                .iter()
                .map(|(label, count)| format!("{count} {label}"))
                .collect();
            out.push_str(&format!("  {}\n", stats.join(", ")));
        }

        if let Some(next_step) = &self.next_step {
            out.push_str(&format!(
                "  {} {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        out
    }
}
