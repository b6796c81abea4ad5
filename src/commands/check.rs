use anyhow::Result;

use entityg::application::CheckUseCase;
use entityg::presentation::{factory, ConfigArgs};

use crate::ui::context::UiContext;

pub fn cmd_check(args: &ConfigArgs, ui: &UiContext) -> Result<()> {
    let loaded = factory::load_config(args.config.as_deref(), &args.overrides)?;
    let config_source = loaded
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    let source_type = loaded.config.source_type().to_string();

    let use_case = CheckUseCase::new(&loaded);

    let result = if ui.json {
        let mut out = std::io::stdout().lock();
        let _ = crate::ui::json::write_event(
            &mut out,
            &serde_json::json!({
                "event": "start",
                "command": "check",
                "config": config_source,
                "source_type": source_type,
            }),
        );
        use_case.execute_with_callback(|item| {
            let mut event = serde_json::json!({ "event": "check", "command": "check" });
            if let (Some(map), Ok(serde_json::Value::Object(fields))) =
                (event.as_object_mut(), serde_json::to_value(item))
            {
                map.extend(fields);
            }
            let _ = crate::ui::json::write_event(&mut out, &event);
        })
    } else {
        print!(
            "{}",
            crate::ui::views::check::render_check_header(
                &config_source,
                &source_type,
                ui.color,
                ui.unicode
            )
        );
        use_case.execute()
    };

    if ui.json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "check",
            "passes": result.passed,
            "warnings": result.warnings,
            "errors": result.errors,
            "success": result.is_success(),
        }));
    } else {
        print!(
            "{}",
            crate::ui::views::check::render_check_report(&result, ui.verbose, ui.color, ui.unicode)
        );
        print!(
            "{}",
            crate::ui::views::check::render_check_summary(&result, ui.color, ui.unicode)
        );
    }

    if !result.is_success() {
        tracing::debug!(errors = result.errors, "check failed");
        std::process::exit(1);
    }

    Ok(())
}
