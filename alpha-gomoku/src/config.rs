use std::path::PathBuf;

// learning loop
pub const ITERATIONS: usize = 1000;
pub const EPISODES: usize = 100;
pub const MAX_QUEUE_LEN: usize = 200_000;
pub const HISTORY_ITERATIONS: usize = 20;
pub const CHECKPOINT_DIR: &str = "./temp/";

// self-play
pub const TEMPERATURE_THRESHOLD: usize = 15;

// search
pub const SIMULATIONS: usize = 25;
pub const C_PUCT: f32 = 1.0;

// pit
pub const ARENA_GAMES: usize = 40;
pub const UPDATE_THRESHOLD: f64 = 0.6;

/// Dirichlet noise mixed into the root priors during self-play.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Noise {
    pub alpha: f32,
    pub ratio: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    pub simulations: usize,
    pub c_puct: f32,
    pub noise: Option<Noise>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            simulations: SIMULATIONS,
            c_puct: C_PUCT,
            noise: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub iterations: usize,
    pub episodes: usize,
    /// Plies played with temperature 1 before switching to greedy play.
    pub temperature_threshold: usize,
    /// Fraction of decisive arena games the candidate has to win.
    pub update_threshold: f64,
    /// Maximum number of examples kept from a single iteration.
    pub max_queue_len: usize,
    /// Number of iterations whose examples are kept for training.
    pub history_iterations: usize,
    pub arena_games: usize,
    pub search: SearchConfig,
    pub checkpoint_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            iterations: ITERATIONS,
            episodes: EPISODES,
            temperature_threshold: TEMPERATURE_THRESHOLD,
            update_threshold: UPDATE_THRESHOLD,
            max_queue_len: MAX_QUEUE_LEN,
            history_iterations: HISTORY_ITERATIONS,
            arena_games: ARENA_GAMES,
            search: SearchConfig::default(),
            checkpoint_dir: PathBuf::from(CHECKPOINT_DIR),
            seed: None,
        }
    }
}
