use crate::corpus::span::Span;
use strum::{Display, EnumString, VariantNames};

pub const RESET: &str = "\x1b[0m";

/// Visual style used to mark matches.
#[derive(Display, EnumString, VariantNames, Default, PartialEq, Eq, Copy, Clone, Debug)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HighlightMode {
    /// Black text on a yellow background.
    #[default]
    Default,
    /// Bold bright green text.
    Green,
}

impl HighlightMode {
    pub fn start_marker(self) -> &'static str {
        match self {
            HighlightMode::Default => "\x1b[43m\x1b[30m",
            HighlightMode::Green => "\x1b[1;92m",
        }
    }
}

/// Sorts `spans` and merges the ones that overlap or touch.
pub fn merge_spans(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort_unstable();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some((_, current_end)) if start <= *current_end => {
                *current_end = (*current_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }

    merged
}

/// Wraps every matched run of `text` in ANSI escape codes.
///
/// Spans are character offsets; they are translated to byte positions so
/// that multi-byte characters are never split.
pub fn ansi_highlight(text: &str, spans: &[Span], mode: HighlightMode) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let byte = |offset: usize| boundaries[offset.min(boundaries.len() - 1)];

    let mut out = String::with_capacity(text.len() + spans.len() * 16);
    let mut position = 0;
    for (start, end) in merge_spans(spans) {
        let (start, end) = (byte(start), byte(end));

        out.push_str(&text[position..start]);
        out.push_str(mode.start_marker());
        out.push_str(&text[start..end]);
        out.push_str(RESET);

        position = end;
    }
    out.push_str(&text[position..]);

    out
}
