use std::path::PathBuf;

use alpha_gomoku::config::{SearchConfig, C_PUCT, SIMULATIONS};
use clap::Parser;

/// Answer move requests for AlphaGomoku over TCP
#[derive(Parser)]
pub struct Args {
    /// Path to model, an untrained one is used if missing
    pub model_path: Option<PathBuf>,
    /// Side length of the board: 3 (tic-tac-toe), 15 or 20
    #[clap(short, long, default_value_t = 20)]
    pub board_size: usize,
    #[clap(short, long, default_value = "127.0.0.1:7878")]
    pub address: String,
    /// Search simulations per request, 0 plays the best prior
    #[clap(short, long, default_value_t = SIMULATIONS)]
    pub simulations: usize,
    #[clap(long, default_value_t = C_PUCT)]
    pub c_puct: f32,
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
    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            simulations: self.simulations,
            c_puct: self.c_puct,
            noise: None,
        }
    }
}
