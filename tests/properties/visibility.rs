//! Property tests for collapsing and expanding subtrees.

use std::collections::HashSet;

use proptest::prelude::*;

use entityg::ClickOutcome;

use super::fixture::{clicks, explore, people, session};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Collapsing then expanding a node restores the graph exactly,
    /// and the collapse only hides that node's spanning descendants.
    #[test]
    fn property_toggle_twice_restores(
        rows in people(),
        picks in clicks(),
        target in any::<usize>(),
        max in 1..6usize,
    ) {
        let mut session = session(&rows, max);
        explore(&mut session, &picks, true);

        let candidates: Vec<_> = session
            .graph()
            .visible_nodes()
            .into_iter()
            .filter(|&n| !session.graph().spanning_descendants(n).is_empty())
            .collect();
        prop_assume!(!candidates.is_empty());
        let node = candidates[target % candidates.len()];

        let before = session.snapshot();
        let descendants: HashSet<_> =
            session.graph().spanning_descendants(node).into_iter().collect();

        let collapsed = session.on_node_double_clicked(node).unwrap();
        prop_assert_eq!(collapsed, ClickOutcome::Collapsed { hidden: descendants.len() });

        for (id, n) in session.graph().nodes() {
            if descendants.contains(&id) {
                prop_assert!(!n.is_visible());
            } else {
                prop_assert_eq!(n.is_visible(), before.nodes[id.index()].visible);
            }
        }

        session.on_node_double_clicked(node).unwrap();
        prop_assert_eq!(session.snapshot(), before);
    }
}
