use crate::config::{find_setting, Setting};

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Empty,
    Help,
    Quit,
    /// A settings command with everything that followed the command word.
    Setting(&'static Setting, &'a str),
    UnknownCommand(&'a str),
    Query(Vec<&'a str>),
}

pub fn parse(line: &str) -> Input<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Input::Empty;
    }

    if !line.starts_with(':') {
        return Input::Query(line.split_whitespace().collect());
    }

    match line {
        ":quit" => return Input::Quit,
        ":help" => return Input::Help,
        _ => (),
    }

    let (command, argument) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    match find_setting(command) {
        Some(setting) => Input::Setting(setting, argument.trim()),
        None => Input::UnknownCommand(command),
    }
}
