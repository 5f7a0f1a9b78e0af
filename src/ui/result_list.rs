use super::highlight::{ansi_highlight, HighlightMode};
use crate::corpus::{search_result::SearchResult, span::Span, SearchResults};
use std::{io, io::Write, time::Duration};

/// How matched text is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub highlight: bool,
    pub mode: HighlightMode,
}

impl Style {
    fn render(&self, text: &str, spans: &[Span]) -> String {
        if self.highlight {
            ansi_highlight(text, spans, self.mode)
        } else {
            text.to_string()
        }
    }
}

pub fn summary(results: &SearchResults, query: &str, elapsed: Option<Duration>) -> String {
    let mut line = format!(
        "{} out of {} sonnets contain \"{}\".",
        results.matched_count(),
        results.len(),
        query
    );

    if let Some(elapsed) = elapsed {
        let ms = elapsed.as_secs_f64() * 1000.0;
        line.push_str(&format!(" Your query took {ms:.2}ms."));
    }

    line
}

/// Prints the summary line followed by every sonnet that matched.
pub fn print_results(
    out: &mut impl Write,
    results: &SearchResults,
    query: &str,
    style: Style,
    elapsed: Option<Duration>,
) -> io::Result<()> {
    writeln!(out, "{}", summary(results, query, elapsed))?;

    for (index, result) in results.matched().enumerate() {
        print_entry(out, result, index + 1, results.len(), style)?;
    }

    Ok(())
}

fn print_entry(
    out: &mut impl Write,
    result: &SearchResult,
    index: usize,
    total: usize,
    style: Style,
) -> io::Result<()> {
    writeln!(
        out,
        "\n[{index}/{total}] {}",
        style.render(result.title(), result.title_spans())
    )?;

    for line in result.line_matches() {
        writeln!(
            out,
            "  [{:2}] {}",
            line.line_number,
            style.render(&line.text, &line.spans)
        )?;
    }

    Ok(())
}
