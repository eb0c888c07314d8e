use super::node::Node;

// Lets the priors order unvisited actions before the first visit.
const EPSILON: f32 = 1e-8;

/// U(s, a) = Q(s, a) + c_puct * P(s, a) * sqrt(N(s)) / (1 + N(s, a))
pub fn upper_confidence_bound(q_value: f32, prior: f32, parent_visits: u32, visits: u32, c_puct: f32) -> f32 {
    q_value + c_puct * prior * (parent_visits as f32 + EPSILON).sqrt() / (1.0 + visits as f32)
}

impl Node {
    /// Index of the edge with the highest upper confidence bound.
    /// Ties go to the lowest action.
    pub fn select(&self, c_puct: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, edge) in self.edges.iter().enumerate() {
            let ucb = upper_confidence_bound(edge.q_value(), edge.prior, self.visits, edge.visits, c_puct);
            if best.map_or(true, |(_, best_ucb)| ucb > best_ucb) {
                best = Some((index, ucb));
            }
        }
        best.map(|(index, _)| index)
    }
}
