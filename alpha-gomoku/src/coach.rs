use std::{collections::VecDeque, fmt::Display, path::Path, str::FromStr};

use log::{info, warn};
use rand::{prelude::SliceRandom, rngs::StdRng, SeedableRng};

use crate::{
    checkpoint::Checkpoints,
    config::{Config, SearchConfig},
    error::Error,
    example::Example,
    history::History,
    model::network::Network,
    pit::{Arena, MctsAgent},
    rules::Rules,
    self_play::SelfPlayEpisode,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    /// There was nothing to train on.
    Skipped,
    Accepted,
    Rejected,
}

/// The candidate replaces the previous network if it wins enough of
/// the decisive games. Only draws means rejection.
pub fn should_promote(wins_new: u32, wins_old: u32, update_threshold: f64) -> bool {
    let decisive = wins_new + wins_old;
    decisive > 0 && wins_new as f64 / decisive as f64 >= update_threshold
}

/// Self-play, training and evaluation, over and over.
pub struct Coach<'a, R: Rules, NET: Network<R>> {
    rules: &'a R,
    network: NET,
    config: Config,
    checkpoints: Checkpoints,
    history: History<R::Position>,
    skip_first_self_play: bool,
    rng: StdRng,
}

impl<'a, R: Rules, NET: Network<R>> Coach<'a, R, NET> {
    pub fn new(rules: &'a R, network: NET, config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Coach {
            rules,
            network,
            checkpoints: Checkpoints::new(&config.checkpoint_dir),
            history: History::new(config.history_iterations),
            skip_first_self_play: false,
            rng,
            config,
        }
    }

    /// The currently accepted network.
    pub fn network(&self) -> &NET {
        &self.network
    }

    pub fn into_network(self) -> NET {
        self.network
    }

    pub fn history(&self) -> &History<R::Position> {
        &self.history
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub fn learn(&mut self) -> Result<(), Error> {
        for i in 1..=self.config.iterations {
            info!("starting iteration {i}/{}", self.config.iterations);
            self.iteration(i)?;
        }
        Ok(())
    }

    pub fn iteration(&mut self, i: usize) -> Result<IterationOutcome, Error> {
        if !(i == 1 && self.skip_first_self_play) {
            let examples = self.self_play()?;
            if examples.is_empty() {
                warn!("self-play produced no examples, skipping iteration {i}");
                return Ok(IterationOutcome::Skipped);
            }
            if let Some(evicted) = self.history.push(examples) {
                info!(
                    "history is longer than {} iterations, dropped the oldest {} examples",
                    self.history.max_len(),
                    evicted.len()
                );
            }
        }

        // Saved before training so that a crash does not lose the games.
        self.history
            .save(Checkpoints::examples_for(&self.checkpoints.checkpoint(i - 1)))?;

        let mut examples = self.history.flatten();
        if examples.is_empty() {
            warn!("no examples to train on, skipping iteration {i}");
            return Ok(IterationOutcome::Skipped);
        }
        examples.shuffle(&mut self.rng);

        self.checkpoints.create_dir()?;
        let temp = self.checkpoints.temp();
        self.network.save(&temp)?;
        info!("training on {} examples", examples.len());
        self.network.train(&examples)?;

        if i > 1 {
            let previous = NET::load(&temp)?;
            let search = self.arena_search();
            info!("pitting against previous version");
            let result = Arena::new(
                self.rules,
                MctsAgent::new(self.rules, &previous, search),
                MctsAgent::new(self.rules, &self.network, search),
            )
            .play_games(self.config.arena_games)?;
            info!(
                "new/prev wins: {} / {}, draws: {}",
                result.wins_b, result.wins_a, result.draws
            );

            if !should_promote(result.wins_b, result.wins_a, self.config.update_threshold) {
                info!("rejecting new model");
                self.network = previous;
                return Ok(IterationOutcome::Rejected);
            }
        }

        info!("accepting new model");
        self.network.save(self.checkpoints.checkpoint(i))?;
        self.network.save(self.checkpoints.best())?;
        Ok(IterationOutcome::Accepted)
    }

    /// Examples of one iteration, keeping only the most recent ones
    /// when there are too many.
    fn self_play(&mut self) -> Result<Vec<Example<R::Position>>, Error> {
        let mut queue = VecDeque::new();
        for episode in 0..self.config.episodes {
            let examples = SelfPlayEpisode::new(
                self.rules,
                &self.network,
                self.config.search,
                self.config.temperature_threshold,
            )
            .run(&mut self.rng)?;
            info!(
                "self-play game {}/{}: {} examples",
                episode + 1,
                self.config.episodes,
                examples.len()
            );
            queue.extend(examples);
            while queue.len() > self.config.max_queue_len {
                queue.pop_front();
            }
        }
        Ok(queue.into())
    }

    /// Arena games are played greedily and without noise.
    fn arena_search(&self) -> SearchConfig {
        SearchConfig {
            noise: None,
            ..self.config.search
        }
    }
}

impl<'a, R: Rules, NET: Network<R>> Coach<'a, R, NET>
where
    <R::Position as FromStr>::Err: Display,
{
    /// Resume from the history saved next to `model`.
    /// The first iteration will then train without playing new games.
    pub fn load_train_examples<T: AsRef<Path>>(&mut self, model: T) -> Result<(), Error> {
        let path = Checkpoints::examples_for(model.as_ref());
        info!("loading examples from {}", path.display());
        self.history = History::load(&path, self.config.history_iterations)?;
        info!(
            "loaded {} examples from {} iterations",
            self.history.example_count(),
            self.history.len()
        );
        self.skip_first_self_play = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku::Board;

    use crate::{
        model::{table::TableNet, uniform::UniformNet},
        rules::TicTacToe,
    };

    fn config(dir: &Path) -> Config {
        Config {
            iterations: 2,
            episodes: 2,
            temperature_threshold: 4,
            update_threshold: 0.6,
            max_queue_len: 1_000,
            history_iterations: 1,
            arena_games: 2,
            search: SearchConfig {
                simulations: 10,
                c_puct: 1.0,
                noise: None,
            },
            checkpoint_dir: dir.to_path_buf(),
            seed: Some(42),
        }
    }

    fn coach(rules: &TicTacToe, config: Config) -> Coach<'_, TicTacToe, UniformNet> {
        Coach::new(rules, UniformNet { action_space: 9 }, config)
    }

    #[test]
    fn promotion_law() {
        assert!(should_promote(6, 4, 0.6));
        assert!(!should_promote(5, 5, 0.6));
        assert!(should_promote(1, 0, 0.6));
        assert!(!should_promote(0, 0, 0.6));
        assert!(!should_promote(0, 0, 0.0));
        assert!(!should_promote(0, 3, 0.6));
    }

    #[test]
    fn first_iteration_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let mut coach = coach(&rules, config(dir.path()));

        assert_eq!(coach.iteration(1).unwrap(), IterationOutcome::Accepted);
        let checkpoints = coach.checkpoints();
        assert!(checkpoints.checkpoint(1).is_file());
        assert!(checkpoints.best().is_file());
        assert!(Checkpoints::examples_for(&checkpoints.checkpoint(0)).is_file());
    }

    #[test]
    fn equal_networks_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let mut coach = coach(&rules, config(dir.path()));

        coach.iteration(1).unwrap();
        assert_eq!(coach.iteration(2).unwrap(), IterationOutcome::Rejected);
        assert!(!coach.checkpoints().checkpoint(2).exists());
        assert_eq!(coach.history().len(), 1);
    }

    #[test]
    fn rejected_candidate_is_rolled_back() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let config = Config {
            update_threshold: 1.1,
            ..config(dir.path())
        };
        let network: TableNet<Board<3>> = Network::<TicTacToe>::initialize(&rules);
        let mut coach = Coach::new(&rules, network, config);

        assert_eq!(coach.iteration(1).unwrap(), IterationOutcome::Accepted);
        let accepted = coach.network().clone();
        assert!(!accepted.is_empty());

        assert_eq!(coach.iteration(2).unwrap(), IterationOutcome::Rejected);
        let best: TableNet<Board<3>> = Network::<TicTacToe>::load(coach.checkpoints().best()).unwrap();
        assert_eq!(coach.network(), &best);
        assert_eq!(coach.network(), &accepted);

        // Training on the same history would have changed the table.
        let mut candidate = accepted.clone();
        Network::<TicTacToe>::train(&mut candidate, &coach.history().flatten()).unwrap();
        assert_ne!(candidate, accepted);
    }

    #[test]
    fn working_buffer_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let config = Config {
            max_queue_len: 20,
            ..config(dir.path())
        };
        let mut coach = coach(&rules, config);

        coach.iteration(1).unwrap();
        assert_eq!(coach.history().example_count(), 20);
    }

    #[test]
    fn no_games_no_training() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let config = Config {
            episodes: 0,
            ..config(dir.path())
        };
        let mut coach = coach(&rules, config);

        assert_eq!(coach.iteration(1).unwrap(), IterationOutcome::Skipped);
        assert!(!coach.checkpoints().best().exists());
    }

    #[test]
    fn resume_trains_on_loaded_history() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let mut first = coach(&rules, config(dir.path()));
        first.iteration(1).unwrap();
        let saved = first.history().flatten();

        let mut resumed = coach(&rules, config(dir.path()));
        resumed
            .load_train_examples(resumed.checkpoints().checkpoint(0))
            .unwrap();
        assert_eq!(resumed.iteration(1).unwrap(), IterationOutcome::Accepted);
        assert_eq!(resumed.history().flatten(), saved);
    }

    #[test]
    fn resume_without_history_fails() {
        let dir = tempfile::tempdir().unwrap();
        let rules = TicTacToe::default();
        let mut coach = coach(&rules, config(dir.path()));
        assert!(matches!(
            coach.load_train_examples(dir.path().join("best.model")),
            Err(Error::MissingFile(_))
        ));
    }
}
