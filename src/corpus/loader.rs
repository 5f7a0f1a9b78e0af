use super::{sonnet::Sonnet, sonnets::Sonnets};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("fetching sonnets from {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read cache file {}", .path.display())]
    ReadCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt cache file {} (invalid JSON)", .path.display())]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write cache file {}", .path.display())]
    WriteCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize sonnets into {}", .path.display())]
    SerializeCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere sonnets can be downloaded from.
#[cfg_attr(test, mockall::automock)]
pub trait SonnetSource {
    fn fetch(&self) -> Result<Vec<Sonnet>, LoadError>;
}

/// The PoetryDB HTTP API.
pub struct PoetryDb {
    url: String,
    timeout: Duration,
}

impl PoetryDb {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    fn get(&self) -> reqwest::Result<Vec<Sonnet>> {
        reqwest::blocking::Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()
    }
}

impl SonnetSource for PoetryDb {
    fn fetch(&self) -> Result<Vec<Sonnet>, LoadError> {
        info!(url = %self.url, "fetching sonnets");

        self.get().map_err(|source| LoadError::Fetch {
            url: self.url.clone(),
            source,
        })
    }
}

/// Where the corpus came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Remote,
}

impl Origin {
    pub fn message(self) -> &'static str {
        match self {
            Origin::Cache => "Loaded sonnets from the cache.",
            Origin::Remote => "Downloaded sonnets from PoetryDB.",
        }
    }
}

/// Loads the corpus from a cache file, downloading and caching it on the
/// first run.
pub struct CorpusLoader<S> {
    source: S,
    cache_path: PathBuf,
}

impl<S: SonnetSource> CorpusLoader<S> {
    pub fn new(source: S, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
        }
    }

    pub fn load(&self) -> Result<(Sonnets, Origin), LoadError> {
        if self.cache_path.exists() {
            debug!(path = %self.cache_path.display(), "reading sonnets from cache");
            let sonnets = read_cache(&self.cache_path)?;
            return Ok((sonnets.into_iter().collect(), Origin::Cache));
        }

        let sonnets = self.source.fetch()?;
        write_cache(&self.cache_path, &sonnets)?;
        debug!(path = %self.cache_path.display(), count = sonnets.len(), "cache written");

        Ok((sonnets.into_iter().collect(), Origin::Remote))
    }
}

fn read_cache(path: &Path) -> Result<Vec<Sonnet>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadCache {
        path: path.into(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::CorruptCache {
        path: path.into(),
        source,
    })
}

fn write_cache(path: &Path, sonnets: &[Sonnet]) -> Result<(), LoadError> {
    let write_error = |source| LoadError::WriteCache {
        path: path.into(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, sonnets).map_err(|source| {
        LoadError::SerializeCache {
            path: path.into(),
            source,
        }
    })?;
    writer.flush().map_err(write_error)
}
