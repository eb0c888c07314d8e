use log::warn;

/// Statistics of a (position, action) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Edge {
    pub action: usize,
    pub prior: f32,      // P(s, a)
    pub visits: u32,     // N(s, a)
    pub value_sum: f32,  // W(s, a)
}

impl Edge {
    pub fn new(action: usize, prior: f32) -> Self {
        Edge {
            action,
            prior,
            ..Default::default()
        }
    }

    /// Q(s, a)
    pub fn q_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f32
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Game result for the player to move, if the game is over.
    pub terminal: Option<f32>,
    /// Evaluator estimate for the player to move.
    pub value: f32,
    pub visits: u32,
    /// Only legal actions, in increasing order.
    pub edges: Box<[Edge]>,
}

impl Node {
    pub fn terminal(reward: f32) -> Self {
        Node {
            terminal: Some(reward),
            value: reward,
            ..Default::default()
        }
    }

    /// Mask the priors to the legal actions and renormalize them.
    pub fn expanded(policy: &[f32], legal: &[bool], value: f32) -> Self {
        let mut edges: Box<[Edge]> = legal
            .iter()
            .zip(policy)
            .enumerate()
            .filter_map(|(action, (&legal, &prior))| {
                let prior = if prior.is_finite() && prior > 0.0 { prior } else { 0.0 };
                legal.then(|| Edge::new(action, prior))
            })
            .collect();

        let total: f32 = edges.iter().map(|edge| edge.prior).sum();
        if total > 0.0 {
            edges.iter_mut().for_each(|edge| edge.prior /= total);
        } else if !edges.is_empty() {
            // The network put no mass on legal moves.
            warn!("all legal moves were masked, falling back to uniform priors");
            let uniform = 1.0 / edges.len() as f32;
            edges.iter_mut().for_each(|edge| edge.prior = uniform);
        }

        Node {
            terminal: None,
            value,
            visits: 0,
            edges,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn update(&mut self, index: usize, value: f32) {
        let edge = &mut self.edges[index];
        edge.visits += 1;
        edge.value_sum += value;
        self.visits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priors_are_masked_and_renormalized() {
        let node = Node::expanded(&[0.5, 0.25, 0.25, 0.0], &[false, true, true, true], 0.3);
        let priors: Vec<_> = node.edges.iter().map(|e| (e.action, e.prior)).collect();
        assert_eq!(priors, [(1, 0.5), (2, 0.5), (3, 0.0)]);
        assert_eq!(node.value, 0.3);
    }

    #[test]
    fn degenerate_priors_become_uniform() {
        let node = Node::expanded(&[1.0, 0.0, f32::NAN, 0.0], &[false, true, true, true], 0.0);
        assert_eq!(node.edges.len(), 3);
        assert!(node.edges.iter().all(|e| (e.prior - 1.0 / 3.0).abs() < 1e-6));
    }

    #[test]
    fn update_accumulates() {
        let mut node = Node::expanded(&[0.5, 0.5], &[true, true], 0.0);
        node.update(1, 1.0);
        node.update(1, -0.5);
        assert_eq!(node.visits, 2);
        assert_eq!(node.edges[1].visits, 2);
        assert_eq!(node.edges[1].q_value(), 0.25);
        assert_eq!(node.edges[0].q_value(), 0.0);
    }
}
