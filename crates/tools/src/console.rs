use std::collections::BTreeMap;

use stereoscape_common::DiagnosticSink;

/// Row-addressed diagnostic console.
///
/// Rows are kept sorted; `print_all` emits them top-down, or bottom-up when
/// the reverse flag is set.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    rows: BTreeMap<u16, String>,
    reversed: bool,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row: u16) -> Option<&str> {
        self.rows.get(&row).map(String::as_str)
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn toggle_reversed(&mut self) {
        self.reversed = !self.reversed;
    }

    /// Non-empty rows in display order.
    pub fn lines(&self) -> Vec<&str> {
        let rows = self.rows.values().map(String::as_str).filter(|s| !s.is_empty());
        if self.reversed {
            rows.rev().collect()
        } else {
            rows.collect()
        }
    }

    /// Re-emit every row through the log.
    pub fn print_all(&self) {
        for line in self.lines() {
            tracing::info!(target: "console", "{line}");
        }
    }
}

impl DiagnosticSink for ConsoleLog {
    fn line(&mut self, row: u16, text: &str) {
        tracing::trace!(row, text, "console");
        if text.is_empty() {
            self.rows.remove(&row);
        } else {
            self.rows.insert(row, text.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_overwrite_and_clear() {
        let mut console = ConsoleLog::new();
        console.line(9, "Yaw: 1");
        console.line(9, "Yaw: 2");
        assert_eq!(console.row(9), Some("Yaw: 2"));
        console.clear_line(9);
        assert_eq!(console.row(9), None);
    }

    #[test]
    fn reverse_flips_order() {
        let mut console = ConsoleLog::new();
        console.line(12, "third");
        console.line(8, "first");
        console.line(10, "second");
        assert_eq!(console.lines(), vec!["first", "second", "third"]);
        console.toggle_reversed();
        assert!(console.is_reversed());
        assert_eq!(console.lines(), vec!["third", "second", "first"]);
    }
}
