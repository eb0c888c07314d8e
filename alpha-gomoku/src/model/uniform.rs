use std::{fs, path::Path};

use super::network::{Eval, Network, Policy};
use crate::{error::Error, example::Example, rules::Rules};

/// Uniform priors and an even evaluation everywhere.
/// Training does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformNet {
    pub action_space: usize,
}

impl<R: Rules> Network<R> for UniformNet {
    fn initialize(rules: &R) -> Self {
        UniformNet {
            action_space: rules.action_space(),
        }
    }

    fn policy_eval(&self, positions: &[R::Position]) -> Vec<(Policy, Eval)> {
        let prior = 1.0 / self.action_space as f32;
        vec![(vec![prior; self.action_space], 0.0); positions.len()]
    }

    fn train(&mut self, _examples: &[Example<R::Position>]) -> Result<(), Error> {
        Ok(())
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), Error> {
        fs::write(path, format!("{}\n", self.action_space))?;
        Ok(())
    }

    fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let action_space = fs::read_to_string(path)?
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::Parse {
                line: 1,
                reason: "action space cannot be parsed".into(),
            })?;
        Ok(UniformNet { action_space })
    }
}
