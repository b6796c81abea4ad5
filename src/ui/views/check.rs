use entityg::application::CheckResult;

use crate::ui::blocks::check_item::render_check_item;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_check_header(
    config_source: &str,
    source_type: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "EntityG Check");
    header.add("Config", config_source);
    header.add("Source", source_type);
    header.render(supports_color, supports_unicode)
}

pub fn render_check_report(
    result: &CheckResult,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::from("\n");
    for item in &result.items {
        out.push_str(&render_check_item(
            item,
            verbose > 0,
            supports_color,
            supports_unicode,
        ));
    }
    out
}

pub fn render_check_summary(
    result: &CheckResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if !result.is_success() {
        "Check FAILED"
    } else if result.warnings > 0 {
        "Check passed with warnings"
    } else {
        "All checks passed"
    };

    let mut summary = if result.is_clean() {
        ResultSummary::success(title)
    } else {
        ResultSummary::partial(title)
    };

    summary.add_stat("passed", result.passed);
    summary.add_stat("warnings", result.warnings);
    summary.add_stat("errors", result.errors);
    if result.is_success() {
        summary.with_next_step("Run `entityg explore` to start exploring");
    }

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entityg::application::CheckUseCase;
    use entityg::config::{Config, LoadedConfig};

    #[test]
    fn failed_check_has_no_next_step() {
        let loaded = LoadedConfig {
            config: Config::default(),
            warnings: Vec::new(),
            path: None,
        };
        let result = CheckUseCase::new(&loaded).execute();

        let summary = render_check_summary(&result, false, false);
        assert!(summary.contains("[WARN] Check FAILED"));
        assert!(!summary.contains("Next:"));

        let report = render_check_report(&result, 0, false, false);
        assert!(report.contains("  [FAIL] loader - no filter template configured\n"));
    }
}
