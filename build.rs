use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};

use anyhow::{ensure, Context, Result};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=README.md");

    commands_table().context("failed to prepare commands table")?;

    Ok(())
}

fn commands_table() -> Result<()> {
    let readme = File::open("README.md").context("failed to open README.md")?;
    let readme = BufReader::new(readme);

    let table: Vec<String> = readme
        .lines()
        .skip_while(|line| !matches!(line, Ok(line) if line == "<!-- commands start -->"))
        .skip(3) // begin marker, header, separator line
        .take_while(|line| !matches!(line, Ok(line) if line == "<!-- commands end -->"))
        .collect::<std::result::Result<_, _>>()
        .context("failed to read table")?;

    ensure!(!table.is_empty(), "no commands in table");
    ensure!(
        table
            .iter()
            .all(|line| line.starts_with('|') && line.ends_with('|') && line.contains(" | ")),
        "table is not a table"
    );

    let content: Vec<(String, String)> = table
        .into_iter()
        .map(|line| line.trim_matches('|').to_string())
        .map(|line| {
            let (command, description) = line.split_once(" | ").unwrap();

            let command = command
                .trim()
                .replace("\\|", "|")
                .chars()
                .filter(|c| c != &'`')
                .collect();

            let description = description.trim().to_string();

            (command, description)
        })
        .collect();

    let max_command = content
        .iter()
        .map(|(command, _)| command.len())
        .max()
        .context("no max command length")?;

    let out_dir = std::env::var("OUT_DIR").context("no $OUT_DIR")?;

    let table_file = File::create(format!("{out_dir}/commands.txt"))
        .context("failed to create table file")?;
    let mut table_file = BufWriter::new(table_file);
    writeln!(table_file, "Commands:").context("failed to write table file: header")?;
    for (command, description) in content {
        writeln!(table_file, "  {command:<0$}  {description}", max_command)
            .context("failed to write table file: content")?;
    }

    let data_file =
        File::create(format!("{out_dir}/commands.rs")).context("failed to create data file")?;
    let mut data_file = BufWriter::new(data_file);
    writeln!(
        data_file,
        r#"const COMMANDS_TABLE: &str = include_str!(concat!(env!("OUT_DIR"), "/commands.txt"));"#
    )
    .context("failed to write data file: table")?;

    Ok(())
}
