use std::io::Write;

use anyhow::{bail, Result};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::FuzzySelect;

use entityg::presentation::{factory, ConfigArgs};
use entityg::ExploreSession;

use crate::commands::show::report_warnings;
use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::prompt_theme;
use crate::ui::views::graph::{render_click_outcome, render_graph};

pub fn cmd_explore(args: &ConfigArgs, seed: Option<&str>, ui: &UiContext) -> Result<()> {
    if ui.json {
        bail!("explore is interactive and has no JSON output\n  → Fix: Use `entityg show --json --click <label>`");
    }
    if !ui.caps.is_tty || !ui.caps.stdin_tty {
        bail!("explore needs an interactive terminal\n  → Fix: Use `entityg show --click <label>` for scripted runs");
    }

    let loaded = factory::load_config(args.config.as_deref(), &args.overrides)?;
    report_warnings(&loaded.warnings, ui);
    let mut session = factory::start_session(&loaded.config, seed)?;

    let theme = prompt_theme(ui.color);
    let mut last_message = String::new();

    loop {
        redraw(&session, &last_message, ui)?;

        let (nodes, mut items) = pick_list(&mut session);
        items.push(ColoredText::dim("Quit").render(ui.color));

        let selection = FuzzySelect::with_theme(theme.as_ref())
            .with_prompt("Double-click a node")
            .items(&items)
            .default(0)
            .interact_opt()?;

        let Some(node) = selection.and_then(|i| nodes.get(i).copied()) else {
            break;
        };

        let label = session
            .graph()
            .node(node)
            .map(|n| n.label().to_string())
            .unwrap_or_default();
        let outcome = session.on_node_double_clicked(node)?;
        tracing::info!(label = %label, ?outcome, "clicked");
        last_message = render_click_outcome(&label, &outcome, ui.color, ui.unicode);
    }

    Ok(())
}

fn redraw(session: &ExploreSession, message: &str, ui: &UiContext) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    crossterm::execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(
        stdout,
        "{}",
        render_graph(session.graph(), session.tree(), ui.color, ui.unicode)
    )?;
    if !message.is_empty() {
        write!(stdout, "\n{message}")?;
    }
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Visible nodes and their picker entries. With tooltips on, each entry
/// carries the node's header the way a hover would show it.
fn pick_list(session: &mut ExploreSession) -> (Vec<entityg::DisplayNodeId>, Vec<String>) {
    let nodes = session.graph().visible_nodes();
    let items = nodes
        .iter()
        .map(|&node| {
            let label = session
                .graph()
                .node(node)
                .map(|n| n.label().to_string())
                .unwrap_or_default();
            let entry = match session.on_node_hover_enter(node) {
                Some(header) => format!("{label}  ({header})"),
                None => label,
            };
            session.on_node_hover_exit();
            entry
        })
        .collect();
    (nodes, items)
}
