use std::{
    collections::VecDeque,
    fmt::Display,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};

use crate::{error::Error, example::Example};

const BATCH_HEADER: &str = "#";

/// Training examples of the most recent iterations, oldest first.
#[derive(Clone, Debug)]
pub struct History<P> {
    batches: VecDeque<Vec<Example<P>>>,
    max_len: usize,
}

impl<P> History<P> {
    pub fn new(max_len: usize) -> Self {
        History {
            batches: VecDeque::new(),
            max_len,
        }
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn example_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn batches(&self) -> impl Iterator<Item = &[Example<P>]> {
        self.batches.iter().map(Vec::as_slice)
    }

    /// Append the batch of one iteration.
    /// Returns the oldest batch if it had to be evicted.
    pub fn push(&mut self, batch: Vec<Example<P>>) -> Option<Vec<Example<P>>> {
        self.batches.push_back(batch);
        if self.batches.len() > self.max_len {
            self.batches.pop_front()
        } else {
            None
        }
    }
}

impl<P: Clone> History<P> {
    pub fn flatten(&self) -> Vec<Example<P>> {
        self.batches.iter().flatten().cloned().collect()
    }
}

impl<P: Display> History<P> {
    pub fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), Error> {
        if let Some(dir) = path.as_ref().parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = BufWriter::new(File::create(path)?);
        for (i, batch) in self.batches.iter().enumerate() {
            writeln!(file, "{BATCH_HEADER} batch {i} ({} examples)", batch.len())?;
            for example in batch {
                writeln!(file, "{example}")?;
            }
        }
        file.flush()?;
        Ok(())
    }
}

impl<P: FromStr> History<P>
where
    P::Err: Display,
{
    /// Fails with [`Error::MissingFile`] when there is nothing to resume from.
    pub fn load<T: AsRef<Path>>(path: T, max_len: usize) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }

        let mut batches: VecDeque<Vec<Example<P>>> = VecDeque::new();
        for (i, line) in fs::read_to_string(path)?.lines().enumerate() {
            if line.starts_with(BATCH_HEADER) {
                batches.push_back(Vec::new());
            } else if !line.trim().is_empty() {
                let example = line.parse::<Example<P>>().map_err(|e| match e {
                    Error::Parse { reason, .. } => Error::Parse { line: i + 1, reason },
                    e => e,
                })?;
                batches
                    .back_mut()
                    .ok_or(Error::Parse {
                        line: i + 1,
                        reason: "example outside of a batch".into(),
                    })?
                    .push(example);
            }
        }

        let mut history = History::new(max_len);
        for batch in batches {
            history.push(batch);
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use gomoku::Board;

    use super::*;

    fn batch(result: f32, len: usize) -> Vec<Example<Board<3>>> {
        vec![
            Example {
                position: Board::default(),
                policy: vec![1.0 / 9.0; 9],
                result,
            };
            len
        ]
    }

    #[test]
    fn oldest_batch_is_evicted_first() {
        let mut history = History::new(2);
        assert!(history.push(batch(1.0, 1)).is_none());
        assert!(history.push(batch(2.0, 2)).is_none());
        let evicted = history.push(batch(3.0, 3)).unwrap();
        assert_eq!(evicted[0].result, 1.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.example_count(), 5);
        let results: Vec<_> = history.batches().map(|b| b[0].result).collect();
        assert_eq!(results, [2.0, 3.0]);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint_0.model.examples");
        let mut history = History::new(3);
        history.push(batch(1.0, 2));
        history.push(batch(-1.0, 1));
        history.save(&path).unwrap();

        let loaded = History::<Board<3>>::load(&path, 3).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.flatten(), history.flatten());
    }

    #[test]
    fn loading_respects_new_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.examples");
        let mut history = History::new(3);
        for i in 0..3 {
            history.push(batch(i as f32, 1));
        }
        history.save(&path).unwrap();
        let loaded = History::<Board<3>>::load(&path, 1).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.flatten()[0].result, 2.0);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.examples");
        assert!(matches!(
            History::<Board<3>>::load(&path, 1),
            Err(Error::MissingFile(p)) if p == path
        ));
    }
}
