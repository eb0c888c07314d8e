mod debug;
mod mcts;
mod node;
mod noise;
mod play;
mod ucb;

pub use mcts::SearchTree;
pub use node::{Edge, Node};
pub use play::{argmax, pick_action};
pub use ucb::upper_confidence_bound;

#[cfg(test)]
mod tests;
