//! Turning raw info pages into plain text.
//!
//! A page is split into fragments on the `0x1f` separator. Every fragment is
//! run through one ordered rule table: the substitutions strip navigation
//! lines and menus and then squeeze blank lines, and the deletions drop whole
//! fragments of license and bookkeeping boilerplate. Split manuals list their
//! parts in an `Indirect:` table; each part is fetched from a [`PageSource`],
//! normalized the same way and appended after the primary text.

use regex::bytes::{NoExpand, Regex};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::locate::{page_file_name, Document, PageSource};

pub const FRAGMENT_SEPARATOR: u8 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace every match with the given bytes.
    Replace(&'static [u8]),
    /// Drop the whole fragment if it matches anywhere.
    Delete,
}

#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Regex,
    action: Action,
}

impl Rule {
    pub fn replace(pattern: &str, with: &'static [u8]) -> Result<Rule> {
        Ok(Rule {
            matcher: Regex::new(pattern)?,
            action: Action::Replace(with),
        })
    }

    pub fn delete(pattern: &str) -> Result<Rule> {
        Ok(Rule {
            matcher: Regex::new(pattern)?,
            action: Action::Delete,
        })
    }
}

/// The compiled rule table. Build it once and share it by reference.
///
/// Patterns run with Unicode off so pages in any 8-bit encoding pass through
/// byte for byte.
#[derive(Debug, Clone)]
pub struct Rules {
    rules: Vec<Rule>,
    indirect: Regex,
}

impl Rules {
    pub fn new() -> Result<Rules> {
        let rules = vec![
            // Navigation header of every node.
            Rule::replace(r"(?-u)(^|\n)File: [\w\-]+.info,  Node: .+($|\n)", b"")?,
            // Menu of the node's children.
            Rule::replace(r"(?-u)\n\* Menu:\n\n(\* .+?::( .+?)?\n){1,}", b"")?,
            // Must run after the two above; they leave blank runs behind.
            Rule::replace(r"(?-u)\n{3,}", b"\n\n")?,
            Rule::delete(r"(?-u)^\s*\d+ Copying\n\*{9,}\n\n")?,
            Rule::delete(r"(?-u)^\s*[\d.]+ GNU Free Documentation License\n={32,}\n\n")?,
            Rule::delete(r"(?-u)Appendix \w Free Software Needs Free Documentation\n\*{49,}\n\n")?,
            Rule::delete(r"(?-u)Appendix \w GNU Free Documentation License\n\*{41,}\n\n")?,
            Rule::delete(r"(?-u)GNU General Public License\n\*{26}")?,
            Rule::delete(r"(?-u)Permission is granted to copy, distribute and/or modify this")?,
            Rule::delete(r"(?-u)\x00\x08\[index\x00\x08\]\n")?,
            Rule::delete(r"(?-u)^\s*Tag Table:\n")?,
            Rule::delete(r"(?-u)^\s*End Tag Table\n")?,
            Rule::delete(r"(?-u)^\s*Local Variables:\n")?,
            Rule::delete(r"(?-u)\nIndirect:\n(.+?: \d+\n)+?")?,
        ];

        // ^_
        // Indirect:
        // tar.info-1: 1139
        // tar.info-2: 303202
        // ^_
        let indirect = Regex::new(r"(?-u)\x1f\nIndirect:\n(.+?: \d+\n)+?\x1f")?;

        Ok(Rules { rules, indirect })
    }

    /// Clean a single fragment. Returns nothing for boilerplate.
    pub fn clean_fragment(&self, fragment: &[u8]) -> Vec<u8> {
        let mut text = fragment.to_vec();
        for rule in &self.rules {
            match rule.action {
                Action::Replace(with) => {
                    text = rule.matcher.replace_all(&text, NoExpand(with)).into_owned();
                }
                Action::Delete => {
                    if rule.matcher.is_match(&text) {
                        trace!(pattern = rule.matcher.as_str(), "dropping fragment");
                        return Vec::new();
                    }
                }
            }
        }
        text.trim_ascii().to_vec()
    }

    /// Names listed in the first indirect table of `text`, in order.
    ///
    /// Lines that are not exactly `name: offset` are skipped.
    pub fn includes<'t>(&self, text: &'t [u8]) -> Vec<&'t [u8]> {
        let block = match self.indirect.find(text) {
            Some(m) => m.as_bytes(),
            None => return Vec::new(),
        };

        block
            .split(|&b| b == b'\n')
            .skip(2)
            .filter_map(|line| {
                let mut parts = line.split(|&b| b == b':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(name), Some(_), None) => Some(name),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Normalizes pages, pulling in split parts from `source`.
pub struct Normalizer<'a, S: PageSource + ?Sized> {
    rules: &'a Rules,
    source: &'a S,
}

impl<'a, S: PageSource + ?Sized> Normalizer<'a, S> {
    pub fn new(rules: &'a Rules, source: &'a S) -> Normalizer<'a, S> {
        Normalizer { rules, source }
    }

    pub fn normalize(&self, doc: Document) -> Result<Vec<u8>> {
        let mut chain = vec![page_file_name(doc.name())];
        self.normalize_document(doc, &mut chain)
    }

    pub fn normalize_bytes(&self, name: &str, raw: &[u8]) -> Result<Vec<u8>> {
        let mut chain = vec![page_file_name(name)];
        self.normalize_raw(raw, &mut chain)
    }

    fn normalize_document(&self, doc: Document, chain: &mut Vec<String>) -> Result<Vec<u8>> {
        let raw = doc.read_all()?;
        self.normalize_raw(&raw, chain)
    }

    fn normalize_raw(&self, raw: &[u8], chain: &mut Vec<String>) -> Result<Vec<u8>> {
        let mut subpages = Vec::new();
        for name in self.rules.includes(raw) {
            // Page names are file names; keep them as text.
            let name = String::from_utf8_lossy(name);
            let key = page_file_name(&name);
            if chain.contains(&key) {
                return Err(Error::InclusionCycle(name.into_owned()));
            }

            let doc = self
                .source
                .open(&name)?
                .ok_or_else(|| Error::MissingInclude(name.to_string()))?;
            debug!(page = %name, depth = chain.len(), "including");

            chain.push(key);
            let sub = self.normalize_document(doc, chain)?;
            chain.pop();
            subpages.push(sub);
        }

        let mut parts: Vec<Vec<u8>> = raw
            .split(|&b| b == FRAGMENT_SEPARATOR)
            .map(|fragment| self.rules.clean_fragment(fragment))
            .filter(|fragment| !fragment.is_empty())
            .collect();
        trace!(kept = parts.len(), "fragments cleaned");

        parts.extend(
            subpages
                .iter()
                .map(|sub| sub.trim_ascii())
                .filter(|sub| !sub.is_empty())
                .map(<[u8]>::to_vec),
        );

        let mut out = parts.join(&b"\n\n"[..]).trim_ascii().to_vec();
        out.push(b'\n');
        Ok(out)
    }
}
