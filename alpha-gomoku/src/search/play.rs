use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use super::node::Node;

impl Node {
    pub fn visit_counts(&self, action_space: usize) -> Vec<u32> {
        let mut counts = vec![0; action_space];
        for edge in self.edges.iter() {
            counts[edge.action] = edge.visits;
        }
        counts
    }

    /// Generate an improved policy from the visits.
    pub fn improved_policy(&self, action_space: usize, temperature: f32) -> Vec<f32> {
        let mut policy = vec![0.0; action_space];
        let max_visits = self.edges.iter().map(|edge| edge.visits).max().unwrap_or(0);

        if temperature <= 0.0 {
            // The first action with the most visits takes everything.
            if let Some(best) = self.edges.iter().find(|edge| edge.visits == max_visits) {
                policy[best.action] = 1.0;
            }
        } else if max_visits == 0 {
            let uniform = 1.0 / self.edges.len() as f32;
            for edge in self.edges.iter() {
                policy[edge.action] = uniform;
            }
        } else {
            // Scaling by the maximum keeps the powers finite for small temperatures.
            let exponent = 1.0 / temperature as f64;
            let weights: Vec<f64> = self
                .edges
                .iter()
                .map(|edge| (edge.visits as f64 / max_visits as f64).powf(exponent))
                .collect();
            let total: f64 = weights.iter().sum();
            for (edge, weight) in self.edges.iter().zip(weights) {
                policy[edge.action] = (weight / total) as f32;
            }
        }
        policy
    }
}

/// First index with the highest probability.
pub fn argmax(policy: &[f32]) -> usize {
    let mut best = 0;
    for (index, &p) in policy.iter().enumerate() {
        if p > policy[best] {
            best = index;
        }
    }
    best
}

/// Select an action to play.
/// Greedy for temperature 0, otherwise sampled from the policy.
pub fn pick_action<G: Rng + ?Sized>(policy: &[f32], temperature: f32, rng: &mut G) -> usize {
    if temperature <= 0.0 {
        return argmax(policy);
    }
    match WeightedIndex::new(policy) {
        Ok(distr) => distr.sample(rng),
        Err(_) => argmax(policy),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn visited(visits: &[u32]) -> Node {
        let mut node = Node::expanded(&vec![1.0; visits.len()], &vec![true; visits.len()], 0.0);
        for (index, &n) in visits.iter().enumerate() {
            for _ in 0..n {
                node.update(index, 0.0);
            }
        }
        node
    }

    #[test]
    fn greedy_policy_is_one_hot() {
        let node = visited(&[1, 4, 4, 2]);
        assert_eq!(node.improved_policy(4, 0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn temperature_one_is_proportional() {
        let node = visited(&[1, 3, 0, 4]);
        assert_eq!(node.improved_policy(4, 1.0), [0.125, 0.375, 0.0, 0.5]);
    }

    #[test]
    fn temperature_flattens_or_sharpens() {
        let node = visited(&[1, 4]);
        let cold = node.improved_policy(2, 0.5);
        let warm = node.improved_policy(2, 1.0);
        let hot = node.improved_policy(2, 2.0);
        assert!((cold[0] - 1.0 / 17.0).abs() < 1e-6);
        assert!((warm[0] - 0.2).abs() < 1e-6);
        assert!((hot[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!(cold[0] < warm[0] && warm[0] < hot[0]);
        for policy in [cold, warm, hot] {
            assert!((policy.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn unvisited_node_is_uniform_over_legal() {
        let node = Node::expanded(&[0.5, 0.5, 0.0], &[true, false, true], 0.0);
        assert_eq!(node.improved_policy(3, 1.0), [0.5, 0.0, 0.5]);
    }

    #[test]
    fn visit_counts_cover_action_space() {
        let mut node = Node::expanded(&[0.5, 0.5, 0.0], &[false, true, true], 0.0);
        node.update(1, 0.0);
        assert_eq!(node.visit_counts(3), [0, 0, 1]);
    }

    #[test]
    fn argmax_takes_first() {
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), 1);
    }

    #[test]
    fn sampling_respects_zero_mass() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let action = pick_action(&[0.0, 0.5, 0.0, 0.5], 1.0, &mut rng);
            assert!(action == 1 || action == 3);
        }
        assert_eq!(pick_action(&[0.0, 0.3, 0.7], 0.0, &mut rng), 2);
    }
}
