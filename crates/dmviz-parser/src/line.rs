//! Line parser for flat dumps.
//!
//! Each input line is trimmed and recognized as an assignment iff it matches
//! `Device.<path>=<value>`, where `<path>` is one or more non-`=` characters.
//! The first `=` after the root token is the split point, so `=` characters
//! inside a value are kept. Every other line (object headers, comments, blank
//! lines) is skipped without error.

use std::io::{self, BufRead};

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::separated_pair,
    error::{ContextError, ErrMode},
    token::{literal, rest, take_till},
};

use dmviz_core::{
    attributes::AttributeMap,
    path::{ROOT, SEPARATOR},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse the key of an assignment: the root token, a separator and at least one non-`=` character
fn key<'s>(input: &mut &'s str) -> IResult<&'s str> {
    (literal(ROOT), SEPARATOR, take_till(1.., '='))
        .take()
        .parse_next(input)
}

/// Parse `key=value`, where the value is the remainder of the line
fn assignment<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    separated_pair(key, '=', rest).parse_next(input)
}

/// Removes exactly one surrounding pair of double quotes, if present.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses one line into `(key, value)`, or `None` if it is not an assignment.
///
/// # Examples
///
/// ```
/// # use dmviz_parser::line::parse_line;
/// assert_eq!(
///     parse_line(r#"  Device.Firewall.Chain.1.Name="Forward_L_Medium"  "#),
///     Some(("Device.Firewall.Chain.1.Name", "Forward_L_Medium"))
/// );
/// assert_eq!(parse_line("Device.Firewall.Chain.1."), None);
/// ```
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut input = line.trim();
    let (key, value) = assignment.parse_next(&mut input).ok()?;
    Some((key.trim_end(), strip_quotes(value)))
}

/// Counters collected while parsing a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines recognized as assignments.
    pub assignments: usize,
    /// Non-empty lines that were not assignments.
    pub skipped: usize,
    /// Assignments that replaced an earlier value for the same key.
    pub overwritten: usize,
}

/// Incremental dump parser.
///
/// Feed lines in input order with [`feed_line`](Self::feed_line) and call
/// [`finish`](Self::finish) to obtain the [`AttributeMap`]. A key assigned
/// more than once keeps the value from the later line.
#[derive(Debug, Default)]
pub struct DumpParser {
    map: AttributeMap,
    stats: ParseStats,
}

impl DumpParser {
    /// Creates a parser with an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one line into the map.
    pub fn feed_line(&mut self, line: &str) {
        match parse_line(line) {
            Some((key, value)) => {
                self.stats.assignments += 1;
                if let Some(previous) = self.map.insert(key, value) {
                    self.stats.overwritten += 1;
                    trace!(key, previous = previous.as_str(); "Duplicate key overwritten");
                }
            }
            None if line.trim().is_empty() => {}
            None => {
                self.stats.skipped += 1;
                trace!(line = line.trim(); "Skipping non-assignment line");
            }
        }
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Consumes the parser and returns the finished map.
    pub fn finish(self) -> AttributeMap {
        debug!(
            assignments = self.stats.assignments,
            skipped = self.stats.skipped,
            overwritten = self.stats.overwritten,
            keys = self.map.len();
            "Dump parsed"
        );
        self.map
    }
}

/// Parses a sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> AttributeMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DumpParser::new();
    for line in lines {
        parser.feed_line(line.as_ref());
    }
    parser.finish()
}

/// Parses an in-memory dump.
pub fn parse_str(source: &str) -> AttributeMap {
    parse_lines(source.lines())
}

/// Parses a dump from a buffered reader.
///
/// # Errors
///
/// Returns an I/O error if reading fails or the input is not valid UTF-8.
/// Malformed lines are never errors.
pub fn parse_reader<R: BufRead>(reader: R) -> io::Result<AttributeMap> {
    let mut parser = DumpParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?);
    }
    Ok(parser.finish())
}
