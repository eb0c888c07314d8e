use log::debug;

use crate::{
    config::SearchConfig,
    error::Error,
    model::network::Network,
    rules::{Outcome, Player, Rules},
    search::{argmax, SearchTree},
};

/// Something that picks actions in canonical positions.
pub trait Agent<P> {
    /// Called before every game.
    fn new_game(&mut self) {}

    fn pick_action(&mut self, position: &P) -> Result<usize, Error>;
}

impl<P, F: FnMut(&P) -> usize> Agent<P> for F {
    fn pick_action(&mut self, position: &P) -> Result<usize, Error> {
        Ok(self(position))
    }
}

/// Plays the most visited action. The tree is kept between the moves
/// of one game and cleared when a new game starts.
pub struct MctsAgent<'a, R: Rules, NET: Network<R>> {
    tree: SearchTree<'a, R, NET>,
}

impl<'a, R: Rules, NET: Network<R>> MctsAgent<'a, R, NET> {
    pub fn new(rules: &'a R, network: &'a NET, search: SearchConfig) -> Self {
        MctsAgent {
            tree: SearchTree::new(rules, network, search),
        }
    }
}

impl<'a, R: Rules, NET: Network<R>> Agent<R::Position> for MctsAgent<'a, R, NET> {
    fn new_game(&mut self) {
        self.tree.reset();
    }

    fn pick_action(&mut self, position: &R::Position) -> Result<usize, Error> {
        let policy = self.tree.action_prob(position, 0.0)?;
        Ok(argmax(&policy))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PitResult {
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
}

impl PitResult {
    pub fn total(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }

    /// Share of the decisive games won by B.
    pub fn win_rate_b(&self) -> f64 {
        let decisive = self.wins_a + self.wins_b;
        if decisive == 0 {
            0.0
        } else {
            self.wins_b as f64 / decisive as f64
        }
    }

    fn update(&mut self, outcome: Outcome, a_plays: Player) {
        match outcome {
            Outcome::Winner(winner) => {
                if winner == a_plays {
                    self.wins_a += 1
                } else {
                    self.wins_b += 1
                }
            }
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }
}

/// Head to head games between two agents.
pub struct Arena<'a, R: Rules, A, B> {
    rules: &'a R,
    agent_a: A,
    agent_b: B,
}

impl<'a, R: Rules, A: Agent<R::Position>, B: Agent<R::Position>> Arena<'a, R, A, B> {
    pub fn new(rules: &'a R, agent_a: A, agent_b: B) -> Self {
        Arena {
            rules,
            agent_a,
            agent_b,
        }
    }

    pub fn into_agents(self) -> (A, B) {
        (self.agent_a, self.agent_b)
    }

    /// Play one game to the end. Agents only see canonical positions.
    pub fn play_game(&mut self, a_first: bool) -> Result<Outcome, Error> {
        self.agent_a.new_game();
        self.agent_b.new_game();

        let mut position = self.rules.initial_position();
        let mut player = Player::First;
        let mut ply = 0;
        loop {
            let outcome = self.rules.outcome(&position);
            if !outcome.is_ongoing() {
                debug!("{outcome:?} in {ply} plies\n{}", self.rules.display(&position));
                return Ok(outcome);
            }

            let canonical = self.rules.canonical_form(&position, player);
            let action = if (player == Player::First) == a_first {
                self.agent_a.pick_action(&canonical)?
            } else {
                self.agent_b.pick_action(&canonical)?
            };
            if !self.rules.is_legal(&canonical, Player::First, action) {
                return Err(Error::IllegalAction {
                    action,
                    position: canonical.to_string(),
                });
            }

            let (next, to_move) = self.rules.apply_move(&position, player, action)?;
            position = next;
            player = to_move;
            ply += 1;
        }
    }

    /// Play `games` games, with A moving first in the first half
    /// (rounded up) and B moving first in the rest.
    pub fn play_games(&mut self, games: usize) -> Result<PitResult, Error> {
        let mut result = PitResult::default();
        let a_first_games = (games + 1) / 2;
        for i in 0..games {
            let a_first = i < a_first_games;
            debug!("pit game {}/{games}", i + 1);
            let outcome = self.play_game(a_first)?;
            let a_plays = if a_first { Player::First } else { Player::Second };
            result.update(outcome, a_plays);
        }
        Ok(result)
    }
}
