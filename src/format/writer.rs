//! Structural text writer with lazy indentation.
//!
//! Tracks nesting depth and materializes indentation only when non-empty content follows
//! a line start, so an empty line never carries trailing whitespace.

use std::fmt;

use crate::Result;

/// Spaces emitted per nesting level.
const INDENT: &str = "    ";

/// Line-oriented writer over any [`fmt::Write`] sink.
pub struct IndentedWriter<W: fmt::Write> {
    sink: W,
    depth: usize,
    at_line_start: bool,
}

impl<W: fmt::Write> IndentedWriter<W> {
    /// Wrap a sink at depth zero.
    #[must_use]
    pub fn new(sink: W) -> Self {
        IndentedWriter {
            sink,
            depth: 0,
            at_line_start: true,
        }
    }

    /// Increase the nesting depth by one level.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the nesting depth by one level.
    ///
    /// # Panics
    /// Panics on underflow — unbalanced indent/unindent is caller misuse and is surfaced
    /// immediately at the call site.
    pub fn unindent(&mut self) {
        assert!(self.depth > 0, "indentation underflow");
        self.depth -= 1;
    }

    /// Write text into the current line, materializing pending indentation first.
    ///
    /// # Errors
    /// Propagates failures from the underlying sink.
    pub fn write(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for _ in 0..self.depth {
                self.sink.write_str(INDENT)?;
            }
            self.at_line_start = false;
        }
        self.sink.write_str(text)?;
        Ok(())
    }

    /// Write text and terminate the line.
    ///
    /// # Errors
    /// Propagates failures from the underlying sink.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.finish_line()
    }

    /// Terminate the current line; a line with no content stays completely empty.
    ///
    /// # Errors
    /// Propagates failures from the underlying sink.
    pub fn finish_line(&mut self) -> Result<()> {
        self.sink.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Unwrap the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_materializes_per_line() {
        let mut writer = IndentedWriter::new(String::new());
        writer.write_line("namespace Demo").unwrap();
        writer.write_line("{").unwrap();
        writer.indent();
        writer.write_line("class A").unwrap();
        writer.unindent();
        writer.write_line("}").unwrap();

        assert_eq!(
            writer.into_inner(),
            "namespace Demo\n{\n    class A\n}\n"
        );
    }

    #[test]
    fn test_empty_line_has_no_trailing_whitespace() {
        let mut writer = IndentedWriter::new(String::new());
        writer.indent();
        writer.write_line("first").unwrap();
        writer.finish_line().unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(writer.into_inner(), "    first\n\n    second\n");
    }

    #[test]
    fn test_partial_writes_share_one_indentation() {
        let mut writer = IndentedWriter::new(String::new());
        writer.indent();
        writer.write("public ").unwrap();
        writer.write("int Value").unwrap();
        writer.write_line(";").unwrap();

        assert_eq!(writer.into_inner(), "    public int Value;\n");
    }

    #[test]
    #[should_panic(expected = "indentation underflow")]
    fn test_unindent_underflow_panics() {
        let mut writer = IndentedWriter::new(String::new());
        writer.unindent();
    }
}
