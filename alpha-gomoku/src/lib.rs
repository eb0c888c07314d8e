#[cfg(feature = "torch")]
#[macro_use]
extern crate lazy_static;

pub mod model;
pub mod rules;
pub mod search;

pub mod checkpoint;
pub mod coach;
pub mod config;
pub mod error;
pub mod example;
pub mod history;
pub mod pit;
pub mod self_play;

pub use coach::{should_promote, Coach, IterationOutcome};
pub use error::Error;
pub use example::{Example, IncompleteExample};
pub use model::network::Network;
pub use pit::{Agent, Arena, MctsAgent, PitResult};
pub use rules::{Outcome, Player, Rules};
pub use search::SearchTree;
pub use self_play::SelfPlayEpisode;
