use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use rustc_hash::FxHashMap;

use super::node::Node;
use crate::{
    config::SearchConfig,
    error::Error,
    model::network::Network,
    rules::{Player, Rules},
};

/// Monte Carlo tree search over canonical positions.
///
/// Statistics are keyed by position, so transpositions share a node
/// and the tree survives between moves until [`SearchTree::reset`].
pub struct SearchTree<'a, R: Rules, NET: Network<R>> {
    rules: &'a R,
    network: &'a NET,
    config: SearchConfig,
    nodes: FxHashMap<R::Position, Node>,
    /// Source of the root noise.
    rng: StdRng,
}

impl<'a, R: Rules, NET: Network<R>> SearchTree<'a, R, NET> {
    pub fn new(rules: &'a R, network: &'a NET, config: SearchConfig) -> Self {
        SearchTree {
            rules,
            network,
            config,
            nodes: FxHashMap::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Make the root noise reproducible.
    pub fn seed_noise(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Forget every statistic.
    pub fn reset(&mut self) {
        self.nodes.clear();
    }

    /// Number of expanded positions.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, position: &R::Position) -> Option<&Node> {
        self.nodes.get(position)
    }

    /// Run the configured number of simulations from the canonical `root`
    /// and return the visit distribution over the whole action space.
    ///
    /// With temperature 0 all mass goes to the first most visited action.
    pub fn action_prob(&mut self, root: &R::Position, temperature: f32) -> Result<Vec<f32>, Error> {
        self.prepare_root(root)?;
        if let Some(noise) = self.config.noise {
            if let Some(node) = self.nodes.get_mut(root) {
                node.apply_dirichlet(noise.alpha, noise.ratio, &mut self.rng);
            }
        }

        for _ in 0..self.config.simulations {
            self.simulate(root)?;
        }

        let node = self.nodes.get(root).ok_or(Error::TerminalRoot)?;
        debug!("search from\n{}\n{}", self.rules.display(root), self.debug(root, Some(5)));
        Ok(node.improved_policy(self.rules.action_space(), temperature))
    }

    /// Expand the root if needed. Terminal roots cannot be searched.
    fn prepare_root(&mut self, root: &R::Position) -> Result<(), Error> {
        if !self.nodes.contains_key(root) {
            self.expand(root)?;
        }
        match self.nodes.get(root) {
            Some(node) if !node.is_terminal() && !node.edges.is_empty() => Ok(()),
            _ => Err(Error::TerminalRoot),
        }
    }

    /// Walk down the tree until a terminal or an unexpanded position,
    /// then back the value up along the path.
    pub fn simulate(&mut self, root: &R::Position) -> Result<(), Error> {
        let mut position = root.clone();
        let mut path = Vec::new();

        let mut value = loop {
            if !self.nodes.contains_key(&position) {
                break self.expand(&position)?;
            }
            let node = &self.nodes[&position];
            if let Some(reward) = node.terminal {
                break reward;
            }
            let index = node.select(self.config.c_puct).ok_or(Error::TerminalRoot)?;
            let action = node.edges[index].action;

            let (next, to_move) = self.rules.apply_move(&position, Player::First, action)?;
            path.push((position, index));
            position = self.rules.canonical_form(&next, to_move);
        };

        // The value is from the perspective of the player to move at the leaf,
        // so it changes sign at every ply on the way up.
        for (position, index) in path.into_iter().rev() {
            value = -value;
            if let Some(node) = self.nodes.get_mut(&position) {
                node.update(index, value);
            }
        }
        Ok(())
    }

    /// Evaluate a new position and store it. Returns its value for the player to move.
    fn expand(&mut self, position: &R::Position) -> Result<f32, Error> {
        if let Some(reward) = self.rules.reward(position, Player::First) {
            self.nodes.insert(position.clone(), Node::terminal(reward));
            return Ok(reward);
        }

        let legal = self.rules.legal_moves(position, Player::First);
        if !legal.contains(&true) {
            return Err(Error::TerminalRoot);
        }
        let (policy, value) = self
            .network
            .policy_eval(std::slice::from_ref(position))
            .pop()
            .ok_or_else(|| Error::Network("no evaluation returned".into()))?;
        if policy.len() != legal.len() {
            return Err(Error::ActionSpace {
                expected: legal.len(),
                found: policy.len(),
            });
        }

        self.nodes.insert(position.clone(), Node::expanded(&policy, &legal, value));
        Ok(value)
    }

    /// Visit counts N(s, a) over the whole action space.
    pub fn visits(&self, position: &R::Position) -> Option<Vec<u32>> {
        self.nodes
            .get(position)
            .map(|node| node.visit_counts(self.rules.action_space()))
    }

    /// Q(s, a) of visited actions, `None` elsewhere.
    pub fn q_values(&self, position: &R::Position) -> Option<Vec<Option<f32>>> {
        self.nodes.get(position).map(|node| {
            let mut q_values = vec![None; self.rules.action_space()];
            for edge in node.edges.iter().filter(|edge| edge.visits > 0) {
                q_values[edge.action] = Some(edge.q_value());
            }
            q_values
        })
    }
}
