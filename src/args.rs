use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

pub const POETRYDB_URL: &str = "https://poetrydb.org/author,title/Shakespeare;Sonnet";
pub const CACHE_FILENAME: &str = "sonnets.json";
pub const CONFIG_FILENAME: &str = "config.json";

pub const DATA_DIR_ENV: &str = "SONNETS_DATA_DIR";
pub const URL_ENV: &str = "SONNETS_URL";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the sonnet cache and the configuration file.
    #[clap(long, env = DATA_DIR_ENV, default_value = ".")]
    pub data_dir: PathBuf,
    /// Endpoint the sonnets are downloaded from when there is no cache yet.
    #[clap(long, env = URL_ENV, default_value = POETRYDB_URL)]
    pub url: String,
    /// Connect and read timeout of the download, in seconds.
    #[clap(long, default_value_t = 10)]
    pub timeout: u64,
    /// Verbosity of diagnostics written to stderr.
    #[clap(long, default_value_t = Level::WARN)]
    pub log_level: Level,
}

impl Args {
    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILENAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() {
        std::env::remove_var(DATA_DIR_ENV);
        std::env::remove_var(URL_ENV);

        let args = Args::try_parse_from(["sonnets"]).unwrap();

        assert_eq!(args.url, POETRYDB_URL);
        assert_eq!(args.timeout, 10);
        assert_eq!(args.log_level, Level::WARN);
        assert_eq!(args.cache_path(), PathBuf::from("./sonnets.json"));
        assert_eq!(args.config_path(), PathBuf::from("./config.json"));
    }

    #[test_case(&["--log-level", "debug"] => matches Ok(_); "log level")]
    #[test_case(&["--log-level", "loud"] => matches Err(_); "unknown log level")]
    #[test_case(&["--timeout", "3"] => matches Ok(_); "timeout")]
    #[test_case(&["--timeout", "-1"] => matches Err(_); "negative timeout")]
    #[test_case(&["--data-dir", "/tmp/sonnets"] => matches Ok(_); "data dir")]
    #[test_case(&["love"] => matches Err(_); "positional")]
    fn parse(cli: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("sonnets").chain(cli.iter().copied()))
    }
}
