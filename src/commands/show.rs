use anyhow::Result;

use entityg::config::ConfigWarning;
use entityg::presentation::{factory, ConfigArgs};
use entityg::SessionError;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::graph::{render_click_outcome, render_graph, render_tree_outline};

pub struct ShowOptions<'a> {
    pub seed: Option<&'a str>,
    pub clicks: &'a [String],
    pub tree: bool,
}

pub fn cmd_show(args: &ConfigArgs, options: ShowOptions<'_>, ui: &UiContext) -> Result<()> {
    let loaded = factory::load_config(args.config.as_deref(), &args.overrides)?;
    report_warnings(&loaded.warnings, ui);

    let config = &loaded.config;
    let mut session = factory::start_session(config, options.seed)?;

    if ui.json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "show",
            "source_type": session.source_type().to_string(),
            "nodes": session.graph().node_count(),
        }));
    } else {
        let mut header = CommandHeader::new(Icon::Graph, "EntityG Show");
        header.add("Source", session.source_type().to_string());
        if let Some(path) = config.data_path() {
            header.add("Data", path.display().to_string());
        }
        header.add("Max nodes", session.options().max_nodes.to_string());
        println!("{}", header.render(ui.color, ui.unicode));
    }

    for label in options.clicks {
        let outcome = match session.click_label(label) {
            Ok(outcome) => outcome,
            Err(SessionError::UnknownLabel(_)) => entityg::ClickOutcome::Failed {
                reason: "no node with this label is shown".to_string(),
            },
            Err(err) => return Err(err.into()),
        };

        if ui.json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "click",
                "command": "show",
                "label": label,
                "result": outcome,
            }));
        } else {
            print!(
                "{}",
                render_click_outcome(label, &outcome, ui.color, ui.unicode)
            );
        }
    }

    if ui.json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "show",
            "graph": session.snapshot(),
        }));
        return Ok(());
    }

    if !options.clicks.is_empty() {
        println!();
    }
    print!(
        "{}",
        render_graph(session.graph(), session.tree(), ui.color, ui.unicode)
    );
    if options.tree {
        println!();
        print!("{}", render_tree_outline(&session.snapshot(), ui.color));
    }

    Ok(())
}

/// Unknown config keys go to stderr (text) or into the event stream (JSON).
pub fn report_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        if ui.json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
        } else {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                warning
            );
        }
    }
}
