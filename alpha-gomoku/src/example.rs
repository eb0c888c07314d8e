use std::{fmt::Display, str::FromStr};

use crate::{error::Error, rules::Player};

/// An example whose outcome is not known until the game ends.
#[derive(Clone, Debug)]
pub struct IncompleteExample<P> {
    pub position: P,
    pub policy: Vec<f32>,
    pub player: Player,
}

impl<P> IncompleteExample<P> {
    #[must_use]
    pub fn complete(self, result: f32) -> Example<P> {
        Example {
            position: self.position,
            policy: self.policy,
            result,
        }
    }
}

/// Canonical position, improved policy, and the game result
/// from the perspective of the player to move.
#[derive(Clone, Debug, PartialEq)]
pub struct Example<P> {
    pub position: P,
    pub policy: Vec<f32>,
    pub result: f32,
}

impl<P: Display> Display for Example<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};{};", self.position, self.result)?;
        for (i, p) in self.policy.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

impl<P: FromStr> FromStr for Example<P>
where
    P::Err: Display,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| Error::Parse { line: 0, reason };
        let mut chunks = s.trim().split(';');

        let position = chunks
            .next()
            .ok_or_else(|| parse_error("missing position".into()))?
            .parse::<P>()
            .map_err(|e: P::Err| parse_error(e.to_string()))?;
        let result = chunks
            .next()
            .ok_or_else(|| parse_error("missing result".into()))?
            .parse::<f32>()
            .map_err(|_| parse_error("result cannot be parsed".into()))?;
        let policy = chunks
            .next()
            .ok_or_else(|| parse_error("missing policy".into()))?
            .split_whitespace()
            .map(|p| p.parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| parse_error("policy cannot be parsed".into()))?;
        if chunks.next().is_some() {
            return Err(parse_error("trailing data".into()));
        }

        Ok(Example {
            position,
            policy,
            result,
        })
    }
}
