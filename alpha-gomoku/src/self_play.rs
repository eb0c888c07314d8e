use log::debug;
use rand::Rng;

use crate::{
    config::SearchConfig,
    error::Error,
    example::{Example, IncompleteExample},
    model::network::Network,
    rules::{Outcome, Player, Rules},
    search::{pick_action, SearchTree},
};

/// One game of the network against itself.
pub struct SelfPlayEpisode<'a, R: Rules, NET: Network<R>> {
    rules: &'a R,
    tree: SearchTree<'a, R, NET>,
    temperature_threshold: usize,
}

impl<'a, R: Rules, NET: Network<R>> SelfPlayEpisode<'a, R, NET> {
    /// Every episode searches with a tree of its own.
    pub fn new(rules: &'a R, network: &'a NET, search: SearchConfig, temperature_threshold: usize) -> Self {
        SelfPlayEpisode {
            rules,
            tree: SearchTree::new(rules, network, search),
            temperature_threshold,
        }
    }

    /// Play until the game ends and return the labelled examples of every ply,
    /// expanded by the symmetries of the position.
    pub fn run<G: Rng + ?Sized>(mut self, rng: &mut G) -> Result<Vec<Example<R::Position>>, Error> {
        let mut position = self.rules.initial_position();
        let mut player = Player::First;
        let mut examples = Vec::new();
        self.tree.seed_noise(rng.next_u64());

        for ply in 1.. {
            let canonical = self.rules.canonical_form(&position, player);
            // Explore in the opening, then play the best move.
            let temperature = if ply < self.temperature_threshold { 1.0 } else { 0.0 };
            let policy = self.tree.action_prob(&canonical, temperature)?;

            for (position, policy) in self.rules.symmetries(&canonical, &policy) {
                examples.push(IncompleteExample {
                    position,
                    policy,
                    player,
                });
            }

            let action = pick_action(&policy, temperature, rng);
            let (next, to_move) = self.rules.apply_move(&position, player, action)?;
            position = next;
            player = to_move;

            let outcome = self.rules.outcome(&position);
            if !outcome.is_ongoing() {
                debug!("{outcome:?} in {ply} plies\n{}", self.rules.display(&position));
                return Ok(complete_examples(examples, outcome));
            }
        }
        unreachable!("games end before the ply counter overflows")
    }
}

/// Label every example with the game result from the perspective of
/// the player who was to move when it was recorded.
pub fn complete_examples<P>(examples: Vec<IncompleteExample<P>>, outcome: Outcome) -> Vec<Example<P>> {
    examples
        .into_iter()
        .map(|example| {
            let result = outcome.reward(example.player).unwrap_or_default();
            example.complete(result)
        })
        .collect()
}
