//! Splits the serial byte stream into report lines.

/// Longest line kept, in bytes, terminator excluded.
pub const MAX_LINE_LEN: usize = 1024;

/// Incremental line framer.
///
/// Lines end at `\n`; a trailing `\r` is dropped. Bytes that are not valid
/// UTF-8 are replaced rather than rejected. A line growing past
/// [`MAX_LINE_LEN`] is discarded up to and including its terminator.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
    discarding: bool,
}

impl LineFramer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `bytes` and return the lines they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                if let Some(line) = self.take_line() {
                    lines.push(line);
                }
                continue;
            }
            if self.discarding {
                continue;
            }
            // One byte of slack for the `\r` of a `\r\n` terminator.
            if self.buf.len() > MAX_LINE_LEN {
                self.buf.clear();
                self.discarding = true;
                continue;
            }
            self.buf.push(byte);
        }
        lines
    }

    fn take_line(&mut self) -> Option<String> {
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let oversized = self.discarding || self.buf.len() > MAX_LINE_LEN;
        self.discarding = false;
        if oversized {
            self.buf.clear();
            tracing::debug!(max = MAX_LINE_LEN, "oversized serial line discarded");
            return None;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_on_newline_and_strip_carriage_return() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"T1:25.0,Soil:45\r\nT1:26.0\n");
        assert_eq!(lines, vec!["T1:25.0,Soil:45", "T1:26.0"]);
    }

    #[test]
    fn should_join_line_split_across_reads() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"T1:25").is_empty());
        assert!(framer.push(b".0,Soil").is_empty());
        assert_eq!(framer.push(b":45\r\n"), vec!["T1:25.0,Soil:45"]);
    }

    #[test]
    fn should_emit_empty_line() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"\r\n"), vec![String::new()]);
    }

    #[test]
    fn should_replace_invalid_utf8() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"RFID:\xff\xfe\n");
        assert_eq!(lines, vec!["RFID:\u{fffd}\u{fffd}"]);
    }

    #[test]
    fn should_keep_line_of_exactly_max_length() {
        let mut framer = LineFramer::new();
        let mut input = vec![b'a'; MAX_LINE_LEN];
        input.push(b'\n');
        let lines = framer.push(&input);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), MAX_LINE_LEN);
    }

    #[test]
    fn should_keep_max_length_line_with_crlf_terminator() {
        let mut framer = LineFramer::new();
        let mut input = vec![b'a'; MAX_LINE_LEN];
        input.extend_from_slice(b"\r\n");
        assert_eq!(framer.push(&input)[0].len(), MAX_LINE_LEN);
    }

    #[test]
    fn should_discard_line_one_byte_too_long() {
        let mut framer = LineFramer::new();
        let mut input = vec![b'a'; MAX_LINE_LEN + 1];
        input.extend_from_slice(b"\nSoil:45\n");
        assert_eq!(framer.push(&input), vec!["Soil:45"]);
    }

    #[test]
    fn should_discard_oversized_line_and_resume_after_it() {
        let mut framer = LineFramer::new();
        let mut input = vec![b'x'; MAX_LINE_LEN + 10];
        input.extend_from_slice(b"\nSoil:45\n");
        assert_eq!(framer.push(&input), vec!["Soil:45"]);
    }

    #[test]
    fn should_hold_partial_line_until_terminated() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"T1:25.0").is_empty());
        assert_eq!(framer.push(b"\n"), vec!["T1:25.0"]);
    }
}
