use super::mcts::SearchTree;
use crate::{model::network::Network, rules::Rules};

impl<'a, R: Rules, NET: Network<R>> SearchTree<'a, R, NET> {
    /// Table of the most visited actions at `position`.
    pub fn debug(&self, position: &R::Position, limit: Option<usize>) -> String {
        let mut table = String::from("action    visits        q    prior\n");
        if let Some(node) = self.node(position) {
            let mut edges: Vec<_> = node.edges.iter().collect();
            edges.sort_by_key(|edge| std::cmp::Reverse(edge.visits));
            for edge in edges.into_iter().take(limit.unwrap_or(usize::MAX)) {
                table.push_str(&format!(
                    "{: <8} {: >8} {: >8.4} {: >8.4}\n",
                    edge.action,
                    edge.visits,
                    edge.q_value(),
                    edge.prior,
                ));
            }
        }
        table
    }
}
