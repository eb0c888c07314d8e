use std::{
    ffi::OsString,
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
};

const MODEL_EXTENSION: &str = "model";
const EXAMPLES_EXTENSION: &str = "examples";

/// File layout of a training run.
///
/// Every accepted iteration `i` is saved as `checkpoint_{i}.model`, the most
/// recently accepted model is also saved as `best.model`, and the history of
/// training examples lives next to a model in `{model}.examples`.
#[derive(Clone, Debug)]
pub struct Checkpoints {
    dir: PathBuf,
}

impl Checkpoints {
    pub fn new<T: Into<PathBuf>>(dir: T) -> Self {
        Checkpoints { dir: dir.into() }
    }

    pub fn create_dir(&self) -> io::Result<()> {
        create_dir_all(&self.dir)
    }

    pub fn checkpoint(&self, iteration: usize) -> PathBuf {
        self.dir.join(format!("checkpoint_{iteration}.{MODEL_EXTENSION}"))
    }

    pub fn best(&self) -> PathBuf {
        self.dir.join(format!("best.{MODEL_EXTENSION}"))
    }

    /// Snapshot of the accepted model taken before training.
    pub fn temp(&self) -> PathBuf {
        self.dir.join(format!("temp.{MODEL_EXTENSION}"))
    }

    pub fn examples_for(model: &Path) -> PathBuf {
        let mut path = OsString::from(model.as_os_str());
        path.push(".");
        path.push(EXAMPLES_EXTENSION);
        PathBuf::from(path)
    }
}
