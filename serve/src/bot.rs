use std::{fmt::Display, path::PathBuf, str::FromStr, sync::mpsc::Receiver};

use alpha_gomoku::{
    config::SearchConfig,
    search::{argmax, SearchTree},
    Error,
    Network,
    Player,
    Rules,
};
use log::{error, info, warn};
use tokio::sync::oneshot;

/// One line from a client and where to send the answer.
pub struct Request {
    pub line: String,
    pub reply: oneshot::Sender<String>,
}

/// Owns the network and answers requests until every sender is gone.
pub fn run_bot<R: Rules, NET: Network<R>>(
    rules: R,
    model_path: Option<PathBuf>,
    search: SearchConfig,
    rx: Receiver<Request>,
) where
    <R::Position as FromStr>::Err: Display,
{
    let network = match &model_path {
        Some(path) => match NET::load(path) {
            Ok(network) => network,
            Err(err) => {
                error!("could not load model at {}: {err}", path.display());
                return;
            }
        },
        None => {
            warn!("no model given, playing with an untrained network");
            NET::initialize(&rules)
        }
    };
    info!("bot is ready");

    while let Ok(request) = rx.recv() {
        let reply = match answer(&rules, &network, search, &request.line) {
            Ok(action) => action.to_string(),
            Err(err) => {
                warn!("could not answer {:?}: {err}", request.line);
                format!("error: {err}")
            }
        };
        if request.reply.send(reply).is_err() {
            warn!("client left before getting an answer");
        }
    }
    info!("bot shutting down");
}

/// Parse `<board> <x|o>` and pick an action for the side to move.
pub fn answer<R: Rules, NET: Network<R>>(
    rules: &R,
    network: &NET,
    search: SearchConfig,
    line: &str,
) -> Result<usize, Error>
where
    <R::Position as FromStr>::Err: Display,
{
    let parse_error = |reason: String| Error::Parse { line: 1, reason };
    let mut words = line.split_whitespace();
    let position = words
        .next()
        .ok_or_else(|| parse_error("missing board".into()))?
        .parse::<R::Position>()
        .map_err(|e| parse_error(e.to_string()))?;
    let player = match words.next() {
        Some("x") => Player::First,
        Some("o") => Player::Second,
        Some(side) => return Err(parse_error(format!("unknown side {side:?}"))),
        None => return Err(parse_error("missing side to move".into())),
    };

    let canonical = rules.canonical_form(&position, player);
    if !rules.outcome(&canonical).is_ongoing() {
        return Err(Error::TerminalRoot);
    }

    if search.simulations == 0 {
        let legal = rules.legal_moves(&canonical, Player::First);
        let (policy, _) = network
            .policy_eval(std::slice::from_ref(&canonical))
            .pop()
            .ok_or_else(|| Error::Network("no evaluation returned".into()))?;
        let masked: Vec<f32> = policy
            .into_iter()
            .zip(legal)
            .map(|(p, legal)| if legal { p.max(0.0) } else { -1.0 })
            .collect();
        Ok(argmax(&masked))
    } else {
        let mut tree = SearchTree::new(rules, network, search);
        let policy = tree.action_prob(&canonical, 0.0)?;
        Ok(argmax(&policy))
    }
}
