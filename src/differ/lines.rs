use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered list of text lines forming one side of a comparison.
///
/// Lines are split on `\n`, `\r\n`, a lone `\r` and the other Unicode line
/// boundaries (form feed, NEL, U+2028 and friends). A trailing terminator
/// does not produce an extra empty line, and empty text has no lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text into lines, dropping terminators.
    pub fn from_text(text: &str) -> Self {
        Self::new(split_lines(text, false))
    }

    /// Split text into lines, keeping each line's terminator.
    pub fn from_text_keep_ends(text: &str) -> Self {
        Self::new(split_lines(text, true))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Concatenate the lines back into a single text.
    ///
    /// Only exact for sequences built with [`LineSequence::from_text_keep_ends`].
    pub fn joined(&self) -> String {
        self.lines.concat()
    }
}

impl Index<usize> for LineSequence {
    type Output = String;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lines[index]
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Line boundaries: `\n`, `\r`, `\r\n`, the ASCII vertical tab, form feed and
/// file/group/record separators, NEL, and the Unicode line and paragraph separators.
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn split_lines(text: &str, keep_ends: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        let mut terminator_end = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            terminator_end += 1;
        }

        let end = if keep_ends { terminator_end } else { i };
        lines.push(text[start..end].to_string());
        start = terminator_end;
    }

    if start < text.len() {
        lines.push(text[start..].to_string());
    }

    lines
}
