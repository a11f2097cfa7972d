//! Minimal rich text: plain and emphasised spans.
//!
//! Pure functions, no I/O.
//!
//! Description bodies mark emphasis with paired double asterisks
//! (`**Poetry**`). A pair only matches within a single line and the
//! shortest match wins, so `**a** and **b**` yields two emphasised spans.
//! A marker with no partner on its line is kept as literal text.

/// Emphasis delimiter.
const MARKER: &str = "**";

/// One run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(s) | Segment::Emphasis(s) => s,
        }
    }

    pub fn is_emphasis(&self) -> bool {
        matches!(self, Segment::Emphasis(_))
    }
}

/// Parsed text as an ordered list of segments.
///
/// Adjacent plain runs are merged and empty segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    segments: Vec<Segment>,
}

impl RichText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The text with all markup removed.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Only the emphasised runs, in order.
    pub fn emphasized(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_emphasis())
            .map(Segment::text)
    }

    fn push_plain(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Plain(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Plain(text.to_string()));
        }
    }

    fn push_emphasis(&mut self, text: &str) {
        if !text.is_empty() {
            self.segments.push(Segment::Emphasis(text.to_string()));
        }
    }
}

/// Parse `**emphasis**` markup into segments.
pub fn parse(source: &str) -> RichText {
    let mut out = RichText::default();
    let mut rest = source;

    while let Some(open) = rest.find(MARKER) {
        let after = &rest[open + MARKER.len()..];
        let line_end = after.find('\n').unwrap_or(after.len());

        match after[..line_end].find(MARKER) {
            Some(close) => {
                out.push_plain(&rest[..open]);
                out.push_emphasis(&after[..close]);
                rest = &after[close + MARKER.len()..];
            }
            None => {
                // No partner on this line: nothing up to the newline can match.
                let consumed = open + MARKER.len() + line_end;
                out.push_plain(&rest[..consumed]);
                rest = &rest[consumed..];
            }
        }
    }

    out.push_plain(rest);
    out
}

// ============================================================================
// TESTS
// ============================================================================
