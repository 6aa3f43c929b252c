use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[34m(.*?)\x1b\[39m").unwrap());

/// One raw line of the trace log. Immutable once read; ANSI escapes are kept
/// in place because the triggers match against the colorized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub index: usize,
    pub text: String,
}

impl LogLine {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// The timestamp wrapped in the blue SGR pair (`ESC[34m … ESC[39m`),
    /// derived lazily from the raw text.
    pub fn timestamp(&self) -> Option<&str> {
        TIMESTAMP_RE
            .captures(&self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

pub fn read_lines(text: &str) -> Vec<LogLine> {
    text.lines()
        .enumerate()
        .map(|(index, line)| LogLine::new(index, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_from_colorized_prefix() {
        let line = LogLine::new(
            0,
            "\u{1b}[34m2024-06-18 14:29:55.647\u{1b}[39m | TRACE | axon",
        );
        assert_eq!(line.timestamp(), Some("2024-06-18 14:29:55.647"));
    }

    #[test]
    fn no_timestamp_on_plain_line() {
        let line = LogLine::new(0, "Incoming request: UID 101 - HK abc -");
        assert_eq!(line.timestamp(), None);
    }

    #[test]
    fn read_lines_assigns_sequential_indexes() {
        let lines = read_lines("first\nsecond\nthird");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].index, 1);
        assert_eq!(lines[2].text, "third");
    }
}
