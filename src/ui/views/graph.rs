//! Text rendering of the visible display graph
//!
//! The outline follows the spanning structure (who introduced whom). Edges
//! that connect a node to one introduced elsewhere are listed underneath.

use entityg::domain::entities::EntityTree;
use entityg::domain::services::{visibility, DisplayGraph, SubtreeState};
use entityg::domain::value_objects::{DisplayNodeId, NodeRole};
use entityg::{ClickOutcome, GraphSnapshot};
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme;

struct Line {
    prefix: String,
    node: DisplayNodeId,
    label: String,
    header: String,
    role: NodeRole,
}

pub fn render_graph(
    graph: &DisplayGraph,
    tree: &EntityTree,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let Some(root) = graph.root() else {
        return "(empty graph)\n".to_string();
    };

    let mut lines = Vec::new();
    collect_lines(graph, tree, root, String::new(), String::new(), supports_unicode, &mut lines);

    let label_width = lines
        .iter()
        .map(|l| l.prefix.width() + 2 + l.label.width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for line in &lines {
        let icon = match line.role {
            NodeRole::Center => Icon::Center,
            NodeRole::Information => Icon::Information,
        };
        let plain_left = format!("{}{} {}", line.prefix, icon.render(supports_unicode), line.label);
        let padding = " ".repeat(label_width.saturating_sub(plain_left.width()) + 2);

        let label = match line.role {
            NodeRole::Center => ColoredText::info(line.label.as_str()).bold(),
            NodeRole::Information => ColoredText::plain(line.label.as_str()),
        };
        out.push_str(&format!(
            "{}{} {}{}{}",
            ColoredText::dim(line.prefix.as_str()).render(supports_color),
            icon.colored(supports_color, supports_unicode),
            label.render(supports_color),
            padding,
            ColoredText::dim(line.header.as_str()).render(supports_color),
        ));

        match visibility::subtree_state(graph, line.node) {
            Some(SubtreeState::Expanded) => {
                out.push(' ');
                out.push_str(&Icon::Expanded.colored(supports_color, supports_unicode));
            }
            Some(SubtreeState::Collapsed) => {
                let hidden = graph.spanning_descendants(line.node).len();
                out.push(' ');
                out.push_str(&Icon::Collapsed.colored(supports_color, supports_unicode));
                out.push_str(&format!(" {hidden} hidden"));
            }
            None => {}
        }
        out.push('\n');
    }

    let links = cross_links(graph);
    if !links.is_empty() {
        let dash = if supports_unicode { "─" } else { "--" };
        out.push_str(&format!(
            "\n{}\n",
            ColoredText::dim("also linked:").render(supports_color)
        ));
        for (a, b) in links {
            out.push_str(&format!("  {a} {dash} {b}\n"));
        }
    }

    let visible = graph.visible_nodes().len();
    let hidden = graph.node_count() - visible;
    let mut footer = format!(
        "{visible} nodes, {} edges visible",
        graph.rendered_edges().len()
    );
    if hidden > 0 {
        footer.push_str(&format!(", {hidden} hidden"));
    }
    out.push_str(&format!("\n{}\n", ColoredText::dim(footer).render(supports_color)));
    out
}

fn collect_lines(
    graph: &DisplayGraph,
    tree: &EntityTree,
    node: DisplayNodeId,
    prefix: String,
    child_prefix: String,
    supports_unicode: bool,
    lines: &mut Vec<Line>,
) {
    let Some(display) = graph.node(node) else {
        return;
    };
    let Some(data) = tree.get(display.tree_node()) else {
        return;
    };
    lines.push(Line {
        prefix,
        node,
        label: display.label().to_string(),
        header: data.header().to_string(),
        role: data.role(),
    });

    let (tee, elbow, pipe, blank) = if supports_unicode {
        (
            theme::branches::TEE,
            theme::branches::ELBOW,
            theme::branches::PIPE,
            theme::branches::BLANK,
        )
    } else {
        (
            theme::branches_ascii::TEE,
            theme::branches_ascii::ELBOW,
            theme::branches_ascii::PIPE,
            theme::branches_ascii::BLANK,
        )
    };

    let children: Vec<DisplayNodeId> = display
        .spanning_children()
        .iter()
        .copied()
        .filter(|&c| graph.is_visible(c))
        .collect();
    let last = children.len().saturating_sub(1);
    for (i, child) in children.into_iter().enumerate() {
        let (branch, next) = if i == last { (elbow, blank) } else { (tee, pipe) };
        collect_lines(
            graph,
            tree,
            child,
            format!("{child_prefix}{branch}"),
            format!("{child_prefix}{next}"),
            supports_unicode,
            lines,
        );
    }
}

/// Rendered edges that are not part of the outline.
fn cross_links(graph: &DisplayGraph) -> Vec<(&str, &str)> {
    let introduced = |parent: DisplayNodeId, child: DisplayNodeId| {
        graph
            .node(child)
            .is_some_and(|n| n.spanning_parent() == Some(parent))
    };
    let label = |id: DisplayNodeId| graph.node(id).map(|n| n.label()).unwrap_or_default();

    graph
        .rendered_edges()
        .into_iter()
        .filter_map(|edge| {
            let (a, b) = edge.endpoints();
            if introduced(a, b) || introduced(b, a) {
                None
            } else {
                Some((label(a), label(b)))
            }
        })
        .collect()
}

/// The underlying tree, one entry per line, indented by depth.
pub fn render_tree_outline(snapshot: &GraphSnapshot, supports_color: bool) -> String {
    let mut out = String::new();
    for entry in &snapshot.tree {
        let marker = if entry.display.is_some() { "" } else { " (not shown)" };
        out.push_str(&format!(
            "{}{} {}{}\n",
            "  ".repeat(entry.depth),
            entry.value,
            ColoredText::dim(format!("[{}]", entry.header)).render(supports_color),
            marker
        ));
    }
    out
}

/// One line describing what a click did.
pub fn render_click_outcome(
    label: &str,
    outcome: &ClickOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (icon, message) = match outcome {
        ClickOutcome::Loaded { report } => (
            Icon::Success,
            format!(
                "{label}: {} new node(s), {} new edge(s), {} already shown",
                report.added_nodes, report.added_edges, report.reused_nodes
            ),
        ),
        ClickOutcome::Collapsed { hidden } => {
            (Icon::Collapsed, format!("{label}: collapsed, {hidden} hidden"))
        }
        ClickOutcome::Expanded { shown } => {
            (Icon::Expanded, format!("{label}: expanded, {shown} shown"))
        }
        ClickOutcome::NothingFound => (Icon::Warning, format!("{label}: nothing related found")),
        ClickOutcome::NoChange => (
            Icon::Arrow,
            format!("{label}: everything related is already shown elsewhere"),
        ),
        ClickOutcome::Failed { reason } => (Icon::Error, format!("{label}: {reason}")),
    };
    format!("{} {}\n", icon.colored(supports_color, supports_unicode), message)
}
