use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use super::node::Node;

impl Node {
    /// Mix Dirichlet noise into the priors of the legal actions.
    pub fn apply_dirichlet<G: Rng + ?Sized>(&mut self, alpha: f32, ratio: f32, rng: &mut G) {
        // The distribution needs at least two categories.
        if self.edges.len() < 2 {
            return;
        }
        let dirichlet = match Dirichlet::new(&vec![alpha; self.edges.len()]) {
            Ok(dirichlet) => dirichlet,
            Err(_) => return,
        };
        let samples = dirichlet.sample(rng);
        for (edge, noise) in self.edges.iter_mut().zip(samples) {
            edge.prior = noise * ratio + edge.prior * (1. - ratio);
        }
    }
}
