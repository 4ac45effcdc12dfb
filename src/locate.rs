//! Finding info pages on disk.

use std::fmt;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use libflate::gzip::Decoder as GzipDecoder;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Marker identifying a name as already carrying the info extension, as in
/// the split parts `tar.info-1`, `tar.info-2`.
pub const INFO_MARKER: &str = ".info";

/// Anything the normalizer can fetch pages from.
pub trait PageSource {
    /// Open a page by name. `Ok(None)` means no such page exists.
    fn open(&self, name: &str) -> Result<Option<Document>>;
}

/// An opened page, read once and then dropped.
pub struct Document {
    name: String,
    path: PathBuf,
    reader: Box<dyn Read>,
}

impl Document {
    pub fn new<R: Read + 'static>(name: &str, path: PathBuf, reader: R) -> Document {
        Document {
            name: name.to_owned(),
            path,
            reader: Box::new(reader),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole page. Failures carry the path they happened on.
    pub fn read_all(mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        match self.reader.read_to_end(&mut data) {
            Ok(_) => Ok(data),
            Err(source) => Err(Error::Read {
                path: self.path,
                source,
            }),
        }
    }
}

impl Read for Document {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

/// File name for a page, adding the `.info` extension unless it is there.
pub fn page_file_name(name: &str) -> String {
    if name.contains(INFO_MARKER) {
        name.to_owned()
    } else {
        format!("{}{}", name, INFO_MARKER)
    }
}

/// Searches a list of directories for plain or gzipped pages.
#[derive(Debug, Clone)]
pub struct Locator {
    dirs: Vec<PathBuf>,
}

impl Locator {
    pub fn new(dirs: Vec<PathBuf>) -> Locator {
        Locator { dirs }
    }

    pub fn locate(&self, name: &str) -> Result<Option<Document>> {
        let file_name = page_file_name(name);

        for dir in &self.dirs {
            let path = dir.join(&file_name);
            trace!(path = %path.display(), "trying");
            match File::open(&path) {
                Ok(file) => {
                    debug!(path = %path.display(), "found page");
                    return Ok(Some(Document::new(name, path, file)));
                }
                Err(ref e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(Error::Read { path, source }),
            }

            let gz_path = dir.join(format!("{}.gz", file_name));
            trace!(path = %gz_path.display(), "trying");
            match File::open(&gz_path) {
                Ok(file) => {
                    debug!(path = %gz_path.display(), "found compressed page");
                    return match GzipDecoder::new(file) {
                        Ok(decoder) => Ok(Some(Document::new(name, gz_path, decoder))),
                        Err(source) => Err(Error::Read {
                            path: gz_path,
                            source,
                        }),
                    };
                }
                Err(ref e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(Error::Read {
                        path: gz_path,
                        source,
                    })
                }
            }
        }

        debug!(page = name, "not in any search directory");
        Ok(None)
    }
}

impl PageSource for Locator {
    fn open(&self, name: &str) -> Result<Option<Document>> {
        self.locate(name)
    }
}
