//! Where the normalized page ends up.

use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::process::Command;

use tempfile::Builder;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Print straight to standard output.
    Stdout,
    /// Hand a temporary copy to this shell command.
    Pager(String),
}

impl Output {
    /// Page on a terminal, print otherwise.
    pub fn choose(is_tty: bool, pager: &str) -> Output {
        if is_tty {
            Output::Pager(pager.to_owned())
        } else {
            Output::Stdout
        }
    }

    pub fn show(&self, text: &[u8]) -> Result<()> {
        match *self {
            Output::Stdout => print(text),
            Output::Pager(ref command) => page(text, command),
        }
    }
}

fn print(text: &[u8]) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let written = stdout
        .write_all(text)
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush());
    match written {
        Err(ref e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

/// Write `text` to a temporary file and run `command` on it. The file is
/// removed once the pager has exited, whether or not it succeeded.
pub fn page(text: &[u8], command: &str) -> Result<()> {
    let mut file = Builder::new().prefix("info.").tempfile()?;
    file.write_all(text)?;
    let path = file.into_temp_path();

    run_shell(command, &path)?;
    path.close()?;
    Ok(())
}

/// Run `command` through `/bin/sh` with `file` as its last argument, sharing
/// our stdio, and wait for it.
pub fn run_shell(command: &str, file: &Path) -> Result<()> {
    debug!(command, file = %file.display(), "spawning pager");
    let status = Command::new("/bin/sh")
        .arg("-c")
        .arg(format!("{} \"$1\"", command))
        .arg("sh")
        .arg(file)
        .status()
        .map_err(|source| Error::Pager {
            command: command.to_owned(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::PagerStatus {
            command: command.to_owned(),
            status,
        })
    }
}
