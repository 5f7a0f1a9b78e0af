use super::{
    input_handler::{self, Input},
    result_list::{print_results, Style},
};
use crate::{
    config::{ConfigStore, Configuration, Setting},
    corpus::Sonnets,
};
use anyhow::{Context, Result};
use std::{
    io::{self, BufRead, Write},
    ops::ControlFlow,
    time::Instant,
};
use tracing::{debug, error};

include!(concat!(env!("OUT_DIR"), "/commands.rs"));

pub const BANNER: &str = "PandA IR: Shakespeare's sonnets (PoetryDB + caching + timing)
Type :help for commands. Type :quit to exit.";

const HELP_NOTES: &str = "
Usage:
  Enter one or more words to search. Examples:
    love
    summer day

Notes:
  - Case-insensitive search
  - Print only matching sonnets
  - Use ANSI escape codes for highlighting when enabled
  - Load Shakespeare's sonnets via PoetryDB (with local caching)
  - Print how long loading and each query took";

/// The read-eval-print loop: owns the corpus, the configuration and where
/// it is persisted.
pub struct App<S, W> {
    sonnets: Sonnets,
    config: Configuration,
    store: S,
    out: W,
}

impl<S: ConfigStore, W: Write> App<S, W> {
    pub fn new(sonnets: Sonnets, config: Configuration, store: S, out: W) -> Self {
        Self {
            sonnets,
            config,
            store,
            out,
        }
    }

    pub fn run(&mut self, mut input: impl BufRead) -> Result<()> {
        let mut buffer = Vec::new();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            buffer.clear();
            if input
                .read_until(b'\n', &mut buffer)
                .context("failed to read input")?
                == 0
            {
                writeln!(self.out, "\nBye.")?;
                break;
            }
            // invalid UTF-8 is replaced instead of ending the session
            let line = String::from_utf8_lossy(&buffer);

            if self.handle_line(&line)?.is_break() {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<ControlFlow<()>> {
        match input_handler::parse(line) {
            Input::Empty => (),
            Input::Quit => {
                writeln!(self.out, "Bye.")?;
                return Ok(ControlFlow::Break(()));
            }
            Input::Help => writeln!(self.out, "{COMMANDS_TABLE}{HELP_NOTES}")?,
            Input::Setting(setting, value) => self.change_setting(setting, value)?,
            Input::UnknownCommand(command) => {
                debug!(command, "unknown command");
                writeln!(self.out, "Unknown command. Type :help for commands.")?;
            }
            Input::Query(words) => self.query(line.trim(), &words)?,
        }

        Ok(ControlFlow::Continue(()))
    }

    fn change_setting(&mut self, setting: &Setting, value: &str) -> io::Result<()> {
        let Some(value) = setting.parse_value(value) else {
            return writeln!(self.out, "{}", setting.usage());
        };

        setting.apply(&mut self.config, &value);
        writeln!(self.out, "{} {}", setting.label, value)?;

        // the new value stays active for this session even if it cannot be stored
        if let Err(e) = self.store.save(&self.config) {
            error!(error = ?e, "failed to save configuration");
            writeln!(self.out, "{e}.")?;
        }

        Ok(())
    }

    fn query(&mut self, query: &str, words: &[&str]) -> io::Result<()> {
        let start = Instant::now();
        let results = self.sonnets.search(words, self.config.search_mode);
        let elapsed = start.elapsed();

        debug!(query, ?elapsed, matched = results.matched_count(), "query evaluated");

        let style = Style {
            highlight: self.config.highlight,
            mode: self.config.highlight_mode,
        };
        print_results(&mut self.out, &results, query, style, Some(elapsed))
    }
}
