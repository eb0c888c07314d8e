use std::path::Path;

use crate::{error::Error, example::Example, rules::Rules};

pub type Policy = Vec<f32>;
pub type Eval = f32;

/// Maps canonical positions to move priors and a value estimate.
pub trait Network<R: Rules>: Sized {
    /// A network that has not been trained yet.
    fn initialize(rules: &R) -> Self;

    /// For each position, priors over the whole action space and
    /// an evaluation in `[-1, 1]` for the player to move.
    fn policy_eval(&self, positions: &[R::Position]) -> Vec<(Policy, Eval)>;

    fn train(&mut self, examples: &[Example<R::Position>]) -> Result<(), Error>;

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), Error>;

    /// Fails if there is no model at `path`.
    fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error>;
}
