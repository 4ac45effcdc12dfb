//! Display texinfo pages as plain text.
//!
//! [`locate::Locator`] finds a page on the info path, [`normalize::Normalizer`]
//! strips it down, and [`pager::Output`] shows the result.

pub mod config;
pub mod error;
pub mod locate;
pub mod normalize;
pub mod pager;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::locate::{Document, Locator, PageSource};
pub use crate::normalize::{Normalizer, Rules};
pub use crate::pager::Output;

/// Find and normalize `name` using the directories in `config`.
pub fn render(config: &Config, name: &str) -> Result<Vec<u8>> {
    let rules = Rules::new()?;
    let locator = Locator::new(config.search_path.clone());

    let doc = locator
        .locate(name)?
        .ok_or_else(|| Error::NotFound(name.to_owned()))?;
    Normalizer::new(&rules, &locator).normalize(doc)
}
