// crates/tracuu-core/src/parser.rs

//! # Record Parser
//!
//! Turns the line-oriented export into [`WardRecord`]s.
//!
//! The source writes one field per line. Six consecutive non-blank lines form
//! a block; blocks are separated by one or more blank lines. Each line may be
//! wrapped in double quotes and/or carry a trailing comma (CSV export
//! artifacts), see [`clean_line`].
//!
//! Parsing never fails on content: blocks of the wrong size and the header
//! block are dropped. Only the underlying reader can fail, and even then the
//! records materialized so far are kept.

use crate::model::WardRecord;
use crate::text::clean_line;
use std::io::{self, BufRead};

/// First field of the header block.
pub const HEADER_NEW_PROVINCE: &str = "TinhThanh_Moi";
/// Second field of the header block.
pub const HEADER_NEW_WARD: &str = "PhuongXa_Moi";
/// Number of lines in a valid block.
pub const FIELDS_PER_BLOCK: usize = 6;

/// What happened to a finished block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Record(WardRecord),
    Header,
    Malformed { lines: usize },
}

/// Materialize a block of cleaned, non-empty lines.
pub fn materialize(block: &[String]) -> BlockOutcome {
    if block.len() != FIELDS_PER_BLOCK {
        return BlockOutcome::Malformed { lines: block.len() };
    }
    if block[0] == HEADER_NEW_PROVINCE && block[1] == HEADER_NEW_WARD {
        return BlockOutcome::Header;
    }
    match WardRecord::from_lines(block) {
        Some(record) => BlockOutcome::Record(record),
        None => BlockOutcome::Malformed { lines: block.len() },
    }
}

/// Streaming block accumulator.
///
/// Feed physical lines with [`BlockParser::push_line`] and call
/// [`BlockParser::finish`] once the input is exhausted to flush an
/// unterminated final block.
#[derive(Debug, Default)]
pub struct BlockParser {
    current: Vec<String>,
    records: Vec<WardRecord>,
    lines_seen: usize,
    dropped_blocks: usize,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, raw: &str) {
        self.lines_seen += 1;
        let content = clean_line(raw);
        if content.is_empty() {
            self.flush();
        } else {
            self.current.push(content.to_string());
        }
    }

    /// Physical lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Malformed blocks dropped so far (the header is not counted).
    pub fn dropped_blocks(&self) -> usize {
        self.dropped_blocks
    }

    /// Records materialized so far, without flushing the pending block.
    pub fn records(&self) -> &[WardRecord] {
        &self.records
    }

    /// Flush the pending block and return every record.
    pub fn finish(mut self) -> Vec<WardRecord> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        match materialize(&self.current) {
            BlockOutcome::Record(record) => self.records.push(record),
            BlockOutcome::Header => {}
            BlockOutcome::Malformed { lines } => {
                self.dropped_blocks += 1;
                tracing::trace!(
                    lines,
                    first = %self.current[0],
                    "dropping malformed block"
                );
            }
        }
        self.current.clear();
    }
}

/// Parse a whole in-memory text.
///
/// ```rust
/// use tracuu_core::parser::parse;
///
/// let text = "\"Hà Nội\",\n\"Ba Đình\",\n\"Phường Phúc Xá\",\nphuc_xa,\n\"Quận Ba Đình\",\n\"Hà Nội\",\n";
/// let records = parse(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].new_ward, "Ba Đình");
/// ```
pub fn parse(raw_text: &str) -> Vec<WardRecord> {
    let mut parser = BlockParser::new();
    for line in raw_text.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

/// Result of [`parse_reader`].
#[derive(Debug)]
pub struct ParseOutcome {
    /// Records materialized before EOF or before the read failure.
    pub records: Vec<WardRecord>,
    pub lines_read: usize,
    pub dropped_blocks: usize,
    /// The read error that aborted parsing, if any.
    pub error: Option<io::Error>,
}

impl ParseOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse from a buffered reader.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and parsing goes
/// on. Only a read error aborts: the pending (possibly truncated) block is
/// discarded, records completed before the failure are returned alongside
/// the error.
pub fn parse_reader<R: BufRead>(mut reader: R) -> ParseOutcome {
    let mut parser = BlockParser::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => parser.push_line(&String::from_utf8_lossy(&buf)),
            Err(e) => {
                return ParseOutcome {
                    lines_read: parser.lines_seen(),
                    dropped_blocks: parser.dropped_blocks(),
                    records: parser.records,
                    error: Some(e),
                };
            }
        }
    }
    parser.flush();
    ParseOutcome {
        lines_read: parser.lines_seen,
        dropped_blocks: parser.dropped_blocks,
        records: parser.records,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    const BLOCK_A: &str = "Hanoi\nWardX\nOld Ward 1\now1\nDistrict A\nOld Province\n";
    const BLOCK_B: &str = "Hanoi\nWardX\nOld Ward 2\now2\nDistrict A\nOld Province\n";

    #[test]
    fn six_line_block_maps_positionally() {
        let records = parse(BLOCK_A);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.new_province, "Hanoi");
        assert_eq!(r.new_ward, "WardX");
        assert_eq!(r.old_ward_display, "Old Ward 1");
        assert_eq!(r.old_ward, "ow1");
        assert_eq!(r.old_district, "District A");
        assert_eq!(r.old_province, "Old Province");
    }

    #[test]
    fn header_block_is_skipped() {
        let text = format!(
            "{HEADER_NEW_PROVINCE}\n{HEADER_NEW_WARD}\nPhuongXa_Cu_HienThi\nPhuongXa_Cu\nQuanHuyen_Cu\nTinhThanh_Cu\n\n{BLOCK_A}"
        );
        let records = parse(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].old_ward, "ow1");
    }

    #[test]
    fn two_line_header_yields_nothing() {
        let text = format!("{HEADER_NEW_PROVINCE}\n{HEADER_NEW_WARD}\n");
        assert!(parse(&text).is_empty());
    }

    #[test]
    fn wrong_sized_blocks_are_dropped() {
        let text = format!("a\nb\nc\n\n{BLOCK_A}\n1\n2\n3\n4\n5\n6\n7\n\n{BLOCK_B}");
        let records = parse(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].old_ward, "ow1");
        assert_eq!(records[1].old_ward, "ow2");
    }

    #[test]
    fn consecutive_blank_lines_are_tolerated() {
        let text = format!("\n\n\n{BLOCK_A}\n\n\n   \n{BLOCK_B}\n\n");
        assert_eq!(parse(&text).len(), 2);
    }

    #[test]
    fn final_block_without_trailing_blank_is_kept() {
        let text = BLOCK_A.trim_end();
        assert_eq!(parse(text).len(), 1);
    }

    #[test]
    fn quoted_and_comma_suffixed_lines_are_cleaned() {
        let text = "\"Hanoi\",\n\"WardX\",\n\"Old Ward 1\",\now1,\n\"District A\",\n\"Old Province\"\n,\n";
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].new_province, "Hanoi");
        assert_eq!(records[0].old_province, "Old Province");
    }

    #[test]
    fn lone_comma_line_terminates_block() {
        // A line holding only "," cleans to empty and acts as a separator.
        let text = format!("{BLOCK_A},\n{BLOCK_B}");
        assert_eq!(parse(&text).len(), 2);
    }

    #[test]
    fn crlf_input_is_handled() {
        let text = BLOCK_A.replace('\n', "\r\n") + "\r\n" + &BLOCK_B.replace('\n', "\r\n");
        assert_eq!(parse(&text).len(), 2);
    }

    #[test]
    fn block_parser_counts_lines_and_drops() {
        let mut parser = BlockParser::new();
        for line in "x\ny\n\n".lines() {
            parser.push_line(line);
        }
        assert_eq!(parser.lines_seen(), 3);
        assert_eq!(parser.dropped_blocks(), 1);
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn parse_reader_matches_parse() {
        let text = format!("{BLOCK_A}\n{BLOCK_B}");
        let outcome = parse_reader(Cursor::new(text.as_bytes()));
        assert!(outcome.is_complete());
        assert_eq!(outcome.records, parse(&text));
        assert_eq!(outcome.lines_read, 13);
    }

    /// Yields `ok` bytes, then fails.
    struct FailingReader {
        ok: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.ok.read(buf)?;
            if n == 0 {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream cut"))
            } else {
                Ok(n)
            }
        }
    }

    #[test]
    fn parse_reader_keeps_records_before_failure() {
        // Second block is cut mid-way: it must not be materialized.
        let text = format!("{BLOCK_A}\nHanoi\nWardX\nOld");
        let reader = BufReader::new(FailingReader {
            ok: Cursor::new(text.into_bytes()),
        });
        let outcome = parse_reader(reader);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.error.map(|e| e.kind()),
            Some(io::ErrorKind::BrokenPipe)
        );
    }

    #[test]
    fn parse_reader_replaces_invalid_utf8_and_continues() {
        let mut bytes = b"Hanoi\nWardX\nOld Ward \xe9\now1\nDistrict A\nOld Province\n\n".to_vec();
        bytes.extend_from_slice(BLOCK_B.as_bytes());
        let outcome = parse_reader(Cursor::new(bytes));
        assert!(outcome.is_complete());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].old_ward_display, "Old Ward \u{FFFD}");
        assert_eq!(outcome.records[1].old_ward, "ow2");
    }

    #[test]
    fn parse_reader_handles_missing_final_newline() {
        let outcome = parse_reader(Cursor::new(BLOCK_A.trim_end().as_bytes()));
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].old_province, "Old Province");
        assert_eq!(outcome.lines_read, 6);
    }
}
