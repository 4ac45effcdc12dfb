//! Settings taken from the environment.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_INFO_DIR: &str = "/usr/share/info/";
pub const DEFAULT_PAGER: &str = "more -s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directories searched for pages, in order.
    pub search_path: Vec<PathBuf>,
    /// Shell command used to page output on a terminal.
    pub pager: String,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_vars(
            env::var("INFOPATH").ok(),
            env::var("MANPAGER").ok(),
            env::var("PAGER").ok(),
        )
    }

    pub fn from_vars(
        infopath: Option<String>,
        manpager: Option<String>,
        pager: Option<String>,
    ) -> Config {
        let mut search_path: Vec<PathBuf> = infopath
            .as_deref()
            .unwrap_or("")
            .split(':')
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .collect();
        if search_path.is_empty() {
            search_path.push(PathBuf::from(DEFAULT_INFO_DIR));
        }

        let pager = [manpager, pager]
            .into_iter()
            .flatten()
            .find(|cmd| !cmd.is_empty())
            .unwrap_or_else(|| DEFAULT_PAGER.to_owned());

        Config { search_path, pager }
    }
}
