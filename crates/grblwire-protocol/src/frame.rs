//! Outgoing frame builder
//!
//! A growable buffer the encoders append fields to. Every frame is closed
//! with CRLF by [`FrameBuilder::finish`].

use crate::axis::format_axis_values;
use grblwire_core::ReportUnits;
use std::fmt;

pub const LINE_TERMINATOR: &str = "\r\n";

/// Builder for one outgoing frame
#[derive(Debug, Default, Clone)]
pub struct FrameBuilder {
    buf: String,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, ch: char) -> &mut Self {
        self.buf.push(ch);
        self
    }

    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Append formatted text, as produced by `format_args!`
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        // Writing into a String cannot fail.
        let _ = fmt::Write::write_fmt(&mut self.buf, args);
        self
    }

    /// Append an axis vector in the given report units
    pub fn axis_values(&mut self, values: &[f32], units: ReportUnits) -> &mut Self {
        format_axis_values(values, units, &mut self.buf);
        self
    }

    /// End the current line with CRLF without closing the frame
    pub fn end_line(&mut self) -> &mut Self {
        self.buf.push_str(LINE_TERMINATOR);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Close the frame with CRLF and return its text
    pub fn finish(mut self) -> String {
        self.buf.push_str(LINE_TERMINATOR);
        self.buf
    }

    /// Return the text as built, for frames whose last line already ends
    /// with CRLF
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Write for FrameBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}
