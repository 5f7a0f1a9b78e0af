use super::span::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMatch {
    pub line_number: usize,
    pub text: String,
    pub spans: Vec<Span>,
}

impl LineMatch {
    pub fn new(line_number: usize, text: String, spans: Vec<Span>) -> Self {
        Self {
            line_number,
            text,
            spans,
        }
    }
}
