use std::{
    fmt::Display,
    io::{self, Write},
    process,
    str::FromStr,
};

#[cfg(feature = "torch")]
use alpha_gomoku::model::{conv::ConvNet, use_cuda};
#[cfg(not(feature = "torch"))]
use alpha_gomoku::model::table::TableNet;
use alpha_gomoku::{
    rules::{Gomoku15, Gomoku20, TicTacToe},
    Coach,
    Error,
    Network,
    Rules,
};
use clap::Parser;
use cli::Args;
#[cfg(not(feature = "torch"))]
use gomoku::Board;
use log::{error, info, warn, LevelFilter};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod cli;

#[cfg(feature = "torch")]
type Net<const N: usize> = ConvNet<N>;
#[cfg(not(feature = "torch"))]
type Net<const N: usize> = TableNet<Board<N>>;

fn main() {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    match &args.log_file {
        Some(path) => {
            if let Err(err) = simple_logging::log_to_file(path, level) {
                eprintln!("could not log to {}: {err}", path.display());
                process::exit(1);
            }
        }
        None => simple_logging::log_to_stderr(level),
    }

    if !(args.no_gpu || cuda_ready()) {
        error!("could not enable CUDA");
        return;
    }

    let result = match args.board_size {
        3 => train::<_, Net<3>>(&TicTacToe::default(), &args),
        15 => train::<_, Net<15>>(&Gomoku15::default(), &args),
        20 => train::<_, Net<20>>(&Gomoku20::default(), &args),
        x => {
            error!("unsupported board size {x}");
            process::exit(1);
        }
    };
    if let Err(err) = result {
        error!("{err}");
        process::exit(1);
    }
}

fn train<R: Rules, NET: Network<R>>(rules: &R, args: &Args) -> Result<(), Error>
where
    <R::Position as FromStr>::Err: Display,
{
    let network = match &args.load_model {
        Some(path) => {
            info!("loading model from {}", path.display());
            NET::load(path)?
        }
        None => NET::initialize(rules),
    };

    let mut coach = Coach::new(rules, network, args.config());
    if let (Some(path), true) = (&args.load_model, args.load_examples) {
        match coach.load_train_examples(path) {
            Ok(()) => {}
            Err(Error::MissingFile(file)) => {
                warn!("file {} with training examples not found", file.display());
                if !confirm("Continue? [y|n]")? {
                    return Ok(());
                }
            }
            Err(err) => return Err(err),
        }
    }

    info!("starting the learning process");
    coach.learn()
}

#[cfg(feature = "torch")]
fn cuda_ready() -> bool {
    use_cuda()
}

#[cfg(not(feature = "torch"))]
fn cuda_ready() -> bool {
    true
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim() == "y")
}
