//! Dump archive fetching.
//!
//! Fetching is kept out of the pipeline: an [ArchiveProvider] turns a language code
//! into a local archive, and [fetch_all] handles ordering and retries.
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

/// Latest articles dump of a Wikipedia, `{lang}` being the language code.
pub const DUMP_URL: &str =
    "https://dumps.wikimedia.org/{lang}wiki/latest/{lang}wiki-latest-pages-articles.xml.bz2";

#[derive(Debug)]
pub enum Error {
    Reqwest(reqwest::Error),
    Io(std::io::Error),
    Url(url::ParseError),
    InvalidLang(String),
}

impl Error {
    /// Network and filesystem hiccups can be retried, bad input (or a 4xx) can't.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Reqwest(e) => !e.status().map_or(false, |s| s.is_client_error()),
            Error::Io(_) => true,
            Error::Url(_) | Error::InvalidLang(_) => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Reqwest(e) => write!(f, "{}", e),
            Error::Io(e) => write!(f, "{}", e),
            Error::Url(e) => write!(f, "invalid dump url: {}", e),
            Error::InvalidLang(l) => write!(f, "invalid language code {:?}", l),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Reqwest(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Url(err)
    }
}

/// Something that can bring the dump of a language on the local disk.
pub trait ArchiveProvider {
    fn fetch(&self, lang: &str) -> Result<PathBuf, Error>;
}

/// Check that `lang` looks like a wiki code (`en`, `simple`, `zh_yue`, `be-x-old`).
pub fn validate_lang(lang: &str) -> Result<(), Error> {
    let valid = !lang.is_empty()
        && lang
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidLang(lang.to_string()))
    }
}

/// Wikimedia dumps, downloaded with a blocking http client.
pub struct WikipediaDumps {
    template: String,
    dst: PathBuf,
    client: reqwest::blocking::Client,
}

impl WikipediaDumps {
    /// Store archives in `dst`, fetching them from [DUMP_URL].
    pub fn new(dst: &Path) -> Self {
        Self {
            template: DUMP_URL.to_string(),
            dst: dst.to_path_buf(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Use another url template. `{lang}` is replaced by the language code.
    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn url(&self, lang: &str) -> Result<Url, Error> {
        validate_lang(lang)?;
        Ok(Url::parse(&self.template.replace("{lang}", lang))?)
    }

    /// Create a new, uniquely named archive file in the destination folder.
    fn create_unique(&self, lang: &str) -> Result<(PathBuf, File), Error> {
        loop {
            let path = self
                .dst
                .join(format!("{}wiki-{:016x}.xml.bz2", lang, rand::random::<u64>()));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl ArchiveProvider for WikipediaDumps {
    /// Stream the dump of `lang` to disk, without holding it in memory.
    fn fetch(&self, lang: &str) -> Result<PathBuf, Error> {
        let url = self.url(lang)?;
        info!("downloading {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;

        let (path, mut out) = self.create_unique(lang)?;
        let mut body = BufReader::new(response);
        match std::io::copy(&mut body, &mut out) {
            Ok(nb_bytes) => {
                debug!("wrote {} bytes to {:?}", nb_bytes, path);
                Ok(path)
            }
            Err(e) => {
                if let Err(rm) = std::fs::remove_file(&path) {
                    warn!("could not remove partial download {:?}: {}", path, rm);
                }
                Err(e.into())
            }
        }
    }
}

/// Fetch the archives of `langs`, in order.
///
/// Transient failures are retried up to `retries` times, waiting `backoff`
/// before the first retry and doubling the wait each time.
pub fn fetch_all(
    provider: &impl ArchiveProvider,
    langs: &[String],
    retries: usize,
    backoff: Duration,
) -> Result<Vec<PathBuf>, Error> {
    let nb_langs = langs.len();
    let mut paths = Vec::with_capacity(nb_langs);

    for (idx, lang) in langs.iter().enumerate() {
        info!("fetching {} ({}/{})", lang, idx + 1, nb_langs);
        let mut wait = backoff;
        let mut attempt = 0;
        let path = loop {
            match provider.fetch(lang) {
                Ok(path) => break path,
                Err(e) if e.is_transient() && attempt < retries => {
                    attempt += 1;
                    warn!(
                        "fetching {} failed ({}), retry {}/{} in {:?}",
                        lang, e, attempt, retries, wait
                    );
                    std::thread::sleep(wait);
                    wait *= 2;
                }
                Err(e) => return Err(e),
            }
        };
        info!("{} stored at {:?}", lang, path);
        paths.push(path);
    }

    Ok(paths)
}
