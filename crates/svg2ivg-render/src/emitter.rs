//! Indentation-tracking line accumulator for the nested-bracket syntax.
//!
//! A line ending in `[` opens a scope; a line that is exactly `]` closes one. Scopes are indented
//! by one tab per level.

#[derive(Debug, Clone, Default)]
pub struct Emitter {
    buf: String,
    indent: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line == "]" {
            self.indent = self.indent.saturating_sub(1);
        }
        for _ in 0..self.indent {
            self.buf.push('\t');
        }
        self.buf.push_str(line);
        self.buf.push('\n');
        if line.ends_with('[') {
            self.indent += 1;
        }
    }

    /// Opens a scope: `<head> [`.
    pub fn open(&mut self, head: &str) {
        self.line(format!("{head} ["));
    }

    pub fn close(&mut self) {
        self.line("]");
    }

    pub fn depth(&self) -> usize {
        self.indent
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }

    /// The emitted statements with indentation stripped and blank lines dropped.
    pub fn into_lines(self) -> Vec<String> {
        self.buf
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}
