use std::path::PathBuf;

use alpha_gomoku::config::{
    Config,
    Noise,
    SearchConfig,
    ARENA_GAMES,
    CHECKPOINT_DIR,
    C_PUCT,
    EPISODES,
    HISTORY_ITERATIONS,
    ITERATIONS,
    MAX_QUEUE_LEN,
    SIMULATIONS,
    TEMPERATURE_THRESHOLD,
    UPDATE_THRESHOLD,
};
use clap::Parser;

/// Train AlphaGomoku
#[derive(Parser)]
pub struct Args {
    /// Side length of the board: 3 (tic-tac-toe), 15 or 20
    #[clap(short, long, default_value_t = 20)]
    pub board_size: usize,
    /// Model to start from, a new one is created if missing
    #[clap(long)]
    pub load_model: Option<PathBuf>,
    /// Resume with the examples saved next to the loaded model
    #[clap(long, requires = "load-model")]
    pub load_examples: bool,
    /// Directory for checkpoints and example history
    #[clap(long, default_value = CHECKPOINT_DIR)]
    pub checkpoint: PathBuf,
    #[clap(long, default_value_t = ITERATIONS)]
    pub iterations: usize,
    /// Self-play games per iteration
    #[clap(long, default_value_t = EPISODES)]
    pub episodes: usize,
    /// Plies played with temperature 1
    #[clap(long, default_value_t = TEMPERATURE_THRESHOLD)]
    pub temperature_threshold: usize,
    /// Share of decisive arena games a new model has to win
    #[clap(long, default_value_t = UPDATE_THRESHOLD)]
    pub update_threshold: f64,
    /// Maximum number of examples from one iteration
    #[clap(long, default_value_t = MAX_QUEUE_LEN)]
    pub max_queue_len: usize,
    /// Number of iterations to keep examples from
    #[clap(long, default_value_t = HISTORY_ITERATIONS)]
    pub history_iterations: usize,
    #[clap(long, default_value_t = ARENA_GAMES)]
    pub arena_games: usize,
    /// Search simulations per move
    #[clap(long, default_value_t = SIMULATIONS)]
    pub simulations: usize,
    #[clap(long, default_value_t = C_PUCT)]
    pub c_puct: f32,
    /// Dirichlet noise concentration for self-play, no noise if missing
    #[clap(long)]
    pub noise_alpha: Option<f32>,
    #[clap(long, default_value_t = 0.25)]
    pub noise_ratio: f32,
    #[clap(long)]
    pub seed: Option<u64>,
    /// Log to this file instead of stderr
    #[clap(long)]
    pub log_file: Option<PathBuf>,
    /// Log search details
    #[clap(short, long)]
    pub verbose: bool,
    /// Disable GPU usage
    #[clap(short, long)]
    pub no_gpu: bool,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            iterations: self.iterations,
            episodes: self.episodes,
            temperature_threshold: self.temperature_threshold,
            update_threshold: self.update_threshold,
            max_queue_len: self.max_queue_len,
            history_iterations: self.history_iterations,
            arena_games: self.arena_games,
            search: SearchConfig {
                simulations: self.simulations,
                c_puct: self.c_puct,
                noise: self.noise_alpha.map(|alpha| Noise {
                    alpha,
                    ratio: self.noise_ratio,
                }),
            },
            checkpoint_dir: self.checkpoint.clone(),
            seed: self.seed,
        }
    }
}
