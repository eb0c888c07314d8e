use std::{sync::mpsc::channel, thread::spawn};

#[cfg(feature = "torch")]
use alpha_gomoku::model::{conv::ConvNet, use_cuda};
#[cfg(not(feature = "torch"))]
use alpha_gomoku::model::table::TableNet;
use alpha_gomoku::rules::{Gomoku15, Gomoku20, TicTacToe};
use clap::Parser;
#[cfg(not(feature = "torch"))]
use gomoku::Board;
use log::{error, info, LevelFilter};
use mimalloc::MiMalloc;
use tokio::{net::TcpListener, select, signal::ctrl_c};

use crate::{bot::run_bot, cli::Args, server::serve};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod bot;
mod cli;
mod server;

#[cfg(feature = "torch")]
type Net<const N: usize> = ConvNet<N>;
#[cfg(not(feature = "torch"))]
type Net<const N: usize> = TableNet<Board<N>>;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    match &args.log_file {
        Some(path) => {
            if let Err(err) = simple_logging::log_to_file(path, level) {
                eprintln!("could not log to {}: {err}", path.display());
                return;
            }
        }
        None => simple_logging::log_to_stderr(level),
    }
    if !(args.no_gpu || cuda_ready()) {
        error!("could not enable CUDA");
        return;
    }

    let (tx, rx) = channel();
    let model_path = args.model_path.clone();
    let search = args.search();
    match args.board_size {
        3 => spawn(move || run_bot::<_, Net<3>>(TicTacToe::default(), model_path, search, rx)),
        15 => spawn(move || run_bot::<_, Net<15>>(Gomoku15::default(), model_path, search, rx)),
        20 => spawn(move || run_bot::<_, Net<20>>(Gomoku20::default(), model_path, search, rx)),
        x => {
            error!("unsupported board size {x}");
            return;
        }
    };

    let listener = match TcpListener::bind(&args.address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("could not listen on {}: {err}", args.address);
            return;
        }
    };
    info!("listening on {}", args.address);

    select! {
        _ = ctrl_c() => (),
        result = serve(listener, tx) => {
            if let Err(err) = result {
                error!("{err}");
            }
        }
    }
    info!("shutting down...");
}

#[cfg(feature = "torch")]
fn cuda_ready() -> bool {
    use_cuda()
}

#[cfg(not(feature = "torch"))]
fn cuda_ready() -> bool {
    true
}
