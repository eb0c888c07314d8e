use alpha_gomoku::{
    checkpoint::Checkpoints,
    config::{Config, SearchConfig},
    model::table::TableNet,
    rules::TicTacToe,
    Coach,
    IterationOutcome,
    Network,
    Rules,
};
use gomoku::Board;

fn config(dir: &std::path::Path) -> Config {
    Config {
        iterations: 3,
        episodes: 4,
        temperature_threshold: 3,
        update_threshold: 0.55,
        max_queue_len: 10_000,
        history_iterations: 2,
        arena_games: 4,
        search: SearchConfig {
            simulations: 25,
            c_puct: 1.0,
            noise: None,
        },
        checkpoint_dir: dir.to_path_buf(),
        seed: Some(7),
    }
}

#[test]
fn table_net_learns_tic_tac_toe() {
    let dir = tempfile::tempdir().unwrap();
    let rules = TicTacToe::default();
    let network: TableNet<Board<3>> = Network::<TicTacToe>::initialize(&rules);
    let mut coach = Coach::new(&rules, network, config(dir.path()));

    assert_eq!(coach.iteration(1).unwrap(), IterationOutcome::Accepted);
    for i in 2..=3 {
        let outcome = coach.iteration(i).unwrap();
        assert_ne!(outcome, IterationOutcome::Skipped);
    }
    assert!(coach.history().len() <= 2);
    assert!(!coach.network().is_empty());

    let checkpoints = Checkpoints::new(dir.path());
    let best: TableNet<Board<3>> = Network::<TicTacToe>::load(checkpoints.best()).unwrap();
    let (policy, value) = Network::<TicTacToe>::policy_eval(&best, &[rules.initial_position()]).remove(0);
    assert!((policy.iter().sum::<f32>() - 1.0).abs() < 1e-4);
    assert!((-1.0..=1.0).contains(&value));
}

#[test]
fn learning_resumes_from_history() {
    let dir = tempfile::tempdir().unwrap();
    let rules = TicTacToe::default();
    let checkpoints = Checkpoints::new(dir.path());

    let mut coach = Coach::new(
        &rules,
        Network::<TicTacToe>::initialize(&rules),
        Config {
            iterations: 1,
            ..config(dir.path())
        },
    );
    coach.learn().unwrap();
    let trained: TableNet<Board<3>> = coach.into_network();

    let loaded: TableNet<Board<3>> = Network::<TicTacToe>::load(checkpoints.checkpoint(1)).unwrap();
    assert_eq!(loaded.len(), trained.len());

    let mut resumed = Coach::new(&rules, loaded, config(dir.path()));
    resumed.load_train_examples(checkpoints.checkpoint(0)).unwrap();
    assert_eq!(resumed.iteration(1).unwrap(), IterationOutcome::Accepted);
}
