use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("which page?")]
    Usage,

    #[error("no page for {0:?}")]
    NotFound(String),

    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("could not find included page {0:?}")]
    MissingInclude(String),

    #[error("inclusion cycle detected at {0:?}")]
    InclusionCycle(String),

    #[error("running pager {command:?}: {source}")]
    Pager { command: String, source: io::Error },

    #[error("pager {command:?} exited with {status}")]
    PagerStatus { command: String, status: ExitStatus },

    #[error("bad pattern: {0}")]
    Pattern(#[from] regex::Error),
}
