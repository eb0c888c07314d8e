use std::{
    fmt::Display,
    fs::{self, File},
    hash::Hash,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use log::info;
use rustc_hash::FxHashMap;

use super::network::{Eval, Network, Policy};
use crate::{error::Error, example::Example, rules::Rules};

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    visits: u32,
    value: f32,
    policy: Vec<f32>,
}

/// Lookup table over canonical positions.
///
/// Each entry is the running mean of the training targets seen for that
/// position. Unknown positions get uniform priors and an even evaluation,
/// so this only learns something useful on boards small enough to enumerate.
#[derive(Clone, Debug)]
pub struct TableNet<P> {
    action_space: usize,
    entries: FxHashMap<P, Entry>,
}

impl<P: Eq + Hash> TableNet<P> {
    pub fn new(action_space: usize) -> Self {
        TableNet {
            action_space,
            entries: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn learn(&mut self, example: &Example<P>) -> Result<(), Error>
    where
        P: Clone,
    {
        if example.policy.len() != self.action_space {
            return Err(Error::ActionSpace {
                expected: self.action_space,
                found: example.policy.len(),
            });
        }
        let action_space = self.action_space;
        let entry = self
            .entries
            .entry(example.position.clone())
            .or_insert_with(|| Entry {
                visits: 0,
                value: 0.0,
                policy: vec![0.0; action_space],
            });
        entry.visits += 1;
        let rate = 1.0 / entry.visits as f32;
        entry.value += (example.result - entry.value) * rate;
        for (p, target) in entry.policy.iter_mut().zip(&example.policy) {
            *p += (target - *p) * rate;
        }
        Ok(())
    }
}

impl<P: Eq + Hash> PartialEq for TableNet<P> {
    fn eq(&self, other: &Self) -> bool {
        self.action_space == other.action_space && self.entries == other.entries
    }
}

impl<R: Rules> Network<R> for TableNet<R::Position>
where
    <R::Position as FromStr>::Err: Display,
{
    fn initialize(rules: &R) -> Self {
        TableNet::new(rules.action_space())
    }

    fn policy_eval(&self, positions: &[R::Position]) -> Vec<(Policy, Eval)> {
        positions
            .iter()
            .map(|position| match self.entries.get(position) {
                Some(entry) => (entry.policy.clone(), entry.value),
                None => (vec![1.0 / self.action_space as f32; self.action_space], 0.0),
            })
            .collect()
    }

    fn train(&mut self, examples: &[Example<R::Position>]) -> Result<(), Error> {
        info!("starting training with {} examples", examples.len());
        for example in examples {
            self.learn(example)?;
        }
        info!("table holds {} positions", self.entries.len());
        Ok(())
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), Error> {
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "{}", self.action_space)?;
        for (position, entry) in &self.entries {
            write!(file, "{position};{};{};", entry.visits, entry.value)?;
            for (i, p) in entry.policy.iter().enumerate() {
                if i != 0 {
                    write!(file, " ")?;
                }
                write!(file, "{p}")?;
            }
            writeln!(file)?;
        }
        file.flush()?;
        Ok(())
    }

    fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let mut lines = content.lines().enumerate();
        let parse_error = |line: usize, reason: String| Error::Parse { line: line + 1, reason };

        let action_space = lines
            .next()
            .and_then(|(_, line)| line.trim().parse::<usize>().ok())
            .ok_or_else(|| parse_error(0, "missing action space".into()))?;
        let mut net = TableNet::new(action_space);

        for (i, line) in lines.filter(|(_, line)| !line.trim().is_empty()) {
            let mut chunks = line.split(';');
            let position = chunks
                .next()
                .unwrap_or_default()
                .parse::<R::Position>()
                .map_err(|e| parse_error(i, e.to_string()))?;
            let visits = chunks
                .next()
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or_else(|| parse_error(i, "missing visit count".into()))?;
            let value = chunks
                .next()
                .and_then(|s| s.parse::<f32>().ok())
                .ok_or_else(|| parse_error(i, "missing value".into()))?;
            let policy = chunks
                .next()
                .ok_or_else(|| parse_error(i, "missing policy".into()))?
                .split_whitespace()
                .map(str::parse::<f32>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| parse_error(i, e.to_string()))?;
            if policy.len() != action_space {
                return Err(Error::ActionSpace {
                    expected: action_space,
                    found: policy.len(),
                });
            }
            net.entries.insert(position, Entry { visits, value, policy });
        }
        Ok(net)
    }
}
