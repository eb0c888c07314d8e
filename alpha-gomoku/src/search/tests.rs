use std::path::Path;

use gomoku::Board;

use super::{argmax, SearchTree};
use crate::{
    config::SearchConfig,
    error::Error,
    example::Example,
    model::{
        network::{Eval, Network, Policy},
        uniform::UniformNet,
    },
    rules::{Player, Rules, TicTacToe},
};

/// Returns the same output for every position.
struct FixedNet {
    policy: Vec<f32>,
    value: f32,
}

impl Network<TicTacToe> for FixedNet {
    fn initialize(rules: &TicTacToe) -> Self {
        FixedNet {
            policy: vec![1.0; rules.action_space()],
            value: 0.0,
        }
    }

    fn policy_eval(&self, positions: &[Board<3>]) -> Vec<(Policy, Eval)> {
        vec![(self.policy.clone(), self.value); positions.len()]
    }

    fn train(&mut self, _examples: &[Example<Board<3>>]) -> Result<(), Error> {
        Ok(())
    }

    fn save<T: AsRef<Path>>(&self, _path: T) -> Result<(), Error> {
        Ok(())
    }

    fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        Err(Error::MissingFile(path.as_ref().to_path_buf()))
    }
}

fn config(simulations: usize) -> SearchConfig {
    SearchConfig {
        simulations,
        c_puct: 1.0,
        noise: None,
    }
}

fn uniform() -> UniformNet {
    Network::<TicTacToe>::initialize(&TicTacToe::default())
}

#[test]
fn probabilities_cover_only_legal_actions() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(30));
    let root: Board<3> = "x--/-o-/---".parse().unwrap();

    let probs = tree.action_prob(&root, 1.0).unwrap();
    assert_eq!(probs.len(), 9);
    assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    assert_eq!(probs[0], 0.0);
    assert_eq!(probs[4], 0.0);
    assert!(probs.iter().all(|&p| p >= 0.0));
}

#[test]
fn root_visits_match_simulations() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(25));
    let root = rules.initial_position();

    tree.action_prob(&root, 1.0).unwrap();
    assert_eq!(tree.visits(&root).unwrap().iter().sum::<u32>(), 25);
    assert_eq!(tree.node(&root).unwrap().visits, 25);
}

#[test]
fn visits_grow_by_one_per_simulation() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(5));
    let root = rules.initial_position();

    tree.action_prob(&root, 1.0).unwrap();
    let mut before = tree.visits(&root).unwrap();
    for _ in 0..20 {
        tree.simulate(&root).unwrap();
        let after = tree.visits(&root).unwrap();
        assert!(before.iter().zip(&after).all(|(b, a)| a >= b));
        assert_eq!(after.iter().sum::<u32>(), before.iter().sum::<u32>() + 1);
        before = after;
    }
}

#[test]
fn greedy_search_is_deterministic() {
    let rules = TicTacToe::default();
    let network = uniform();
    let root: Board<3> = "x--/---/--o".parse().unwrap();

    let mut first = SearchTree::new(&rules, &network, config(40));
    let mut second = SearchTree::new(&rules, &network, config(40));
    let a = first.action_prob(&root, 0.0).unwrap();
    let b = second.action_prob(&root, 0.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.iter().filter(|&&p| p == 1.0).count(), 1);
    assert_eq!(a.iter().sum::<f32>(), 1.0);

    let node = first.node(&root).unwrap();
    assert_eq!(node.improved_policy(9, 0.0), node.improved_policy(9, 0.0));
}

#[test]
fn empty_board_prefers_centre_or_corner() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(25));

    let probs = tree.action_prob(&rules.initial_position(), 0.0).unwrap();
    let action = argmax(&probs);
    assert!([0, 2, 4, 6, 8].contains(&action), "picked {action}");
}

#[test]
fn finds_win_in_one() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(50));
    let root: Board<3> = "xx-/oo-/---".parse().unwrap();

    let probs = tree.action_prob(&root, 0.0).unwrap();
    assert_eq!(argmax(&probs), 2);
    assert_eq!(tree.q_values(&root).unwrap()[2], Some(1.0));
}

#[test]
fn terminal_root_is_an_error() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(10));

    let won: Board<3> = "xxx/oo-/---".parse().unwrap();
    assert!(matches!(tree.action_prob(&won, 1.0), Err(Error::TerminalRoot)));
    let full: Board<3> = "xox/xoo/oxx".parse().unwrap();
    assert!(matches!(tree.action_prob(&full, 0.0), Err(Error::TerminalRoot)));
}

#[test]
fn masked_policy_falls_back_to_uniform() {
    let rules = TicTacToe::default();
    let mut policy = vec![0.0; 9];
    policy[0] = 1.0;
    let network = FixedNet { policy, value: 0.0 };
    let mut tree = SearchTree::new(&rules, &network, config(20));
    let root: Board<3> = "x--/-o-/---".parse().unwrap();

    let probs = tree.action_prob(&root, 1.0).unwrap();
    assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    assert_eq!(probs[0], 0.0);
    let node = tree.node(&root).unwrap();
    assert_eq!(node.edges.len(), 7);
    assert!(node.edges.iter().all(|edge| (edge.prior - 1.0 / 7.0).abs() < 1e-6));
}

#[test]
fn wrong_action_space_is_an_error() {
    let rules = TicTacToe::default();
    let network = FixedNet {
        policy: vec![0.25; 4],
        value: 0.0,
    };
    let mut tree = SearchTree::new(&rules, &network, config(5));
    assert!(matches!(
        tree.action_prob(&rules.initial_position(), 1.0),
        Err(Error::ActionSpace { expected: 9, found: 4 })
    ));
}

#[test]
fn statistics_are_kept_for_later_moves() {
    let rules = TicTacToe::default();
    let network = uniform();
    let mut tree = SearchTree::new(&rules, &network, config(50));
    let root = rules.initial_position();

    tree.action_prob(&root, 1.0).unwrap();
    let (next, to_move) = rules.apply_move(&root, Player::First, 0).unwrap();
    let child = rules.canonical_form(&next, to_move);
    let visited = tree.node(&child).unwrap().visits;
    assert!(visited > 0);

    tree.action_prob(&child, 1.0).unwrap();
    assert_eq!(tree.node(&child).unwrap().visits, visited + 50);

    tree.reset();
    assert!(tree.is_empty());
}
