//! Property tests for the display graph built from a growing tree.

use std::collections::HashSet;

use proptest::prelude::*;

use entityg::NodeRole;

use super::fixture::{clicks, explore, people, session};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: No two display nodes share a label, ignoring case.
    #[test]
    fn property_labels_are_unique(rows in people(), picks in clicks(), max in 1..6usize) {
        let mut session = session(&rows, max);
        explore(&mut session, &picks, false);

        let graph = session.graph();
        let labels: HashSet<String> = graph
            .nodes()
            .map(|(_, n)| n.label().to_lowercase())
            .collect();
        prop_assert_eq!(labels.len(), graph.node_count());
    }

    /// PROPERTY: Edges are unordered, unique and never loop.
    #[test]
    fn property_edges_are_unique(rows in people(), picks in clicks(), max in 1..6usize) {
        let mut session = session(&rows, max);
        explore(&mut session, &picks, false);

        let graph = session.graph();
        let mut seen = HashSet::new();
        for edge in graph.edges() {
            let (a, b) = edge.endpoints();
            prop_assert_ne!(a, b);
            prop_assert!(seen.insert((a.min(b), a.max(b))), "duplicate edge {a}-{b}");
        }
    }

    /// PROPERTY: Roles alternate down the tree and every tree node is shown by
    /// a display node with the same label.
    #[test]
    fn property_roles_alternate(rows in people(), picks in clicks(), max in 1..6usize) {
        let mut session = session(&rows, max);
        explore(&mut session, &picks, false);

        let tree = session.tree();
        let root = tree.root().unwrap();
        prop_assert_eq!(tree.get(root).unwrap().role(), NodeRole::Center);

        for id in tree.pre_order(root) {
            let node = tree.get(id).unwrap();
            for &child in tree.children_of(id) {
                prop_assert_ne!(tree.get(child).unwrap().role(), node.role());
            }

            let display = session.graph().display_for_tree(id).unwrap();
            let label = session.graph().node(display).unwrap().label();
            prop_assert!(label.eq_ignore_ascii_case(node.value()), "{label} vs {}", node.value());
        }
    }

    /// PROPERTY: A center expansion never adds more children than the cap.
    #[test]
    fn property_center_expansion_is_capped(rows in people(), picks in clicks(), max in 1..6usize) {
        let mut session = session(&rows, max);
        explore(&mut session, &picks, false);

        let tree = session.tree();
        for id in tree.pre_order(tree.root().unwrap()) {
            if tree.get(id).unwrap().role() == NodeRole::Information {
                prop_assert!(tree.children_of(id).len() <= max);
            }
        }
    }
}
