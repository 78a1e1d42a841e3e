//! Trace parsing.
//!
//! This module reads the textual access traces the simulator is driven by. It handles:
//! 1. **Header:** Cache parameters, one per line. The first token of each line is the
//!    value; anything after it is a free-form label.
//! 2. **Records:** `<op> <hex-address>` pairs, where `op` is `0` (data store),
//!    `1` (data load) or `2` (instruction fetch).
//!
//! Blank lines and lines starting with `#` are skipped everywhere.
//!
//! ```text
//! 32      block size
//! 1       organization (0 unified, 1 split)
//! 2       associativity
//! wb      hit policy
//! wa      miss policy
//! 1024    data cache size
//! 1024    instruction cache size (split only)
//! 2 400
//! 1 1a0
//! 0 1a4
//! ```

use std::io::BufRead;

use crate::common::data::TraceOp;
use crate::common::error::{ConfigError, SimError};
use crate::config::{CacheOptions, CacheOrganization, SimConfig};

/// One access record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Access kind.
    pub op: TraceOp,
    /// Address token, exactly as written. Decoding is left to the engine so a
    /// malformed address fails that access only.
    pub address: String,
}

/// A parsed trace: configuration plus access records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    /// Cache configuration from the header.
    pub config: SimConfig,
    /// Access records in trace order.
    pub records: Vec<TraceRecord>,
}

/// Non-blank, non-comment lines with their 1-based numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn trace_error(line: usize, reason: impl Into<String>) -> SimError {
    SimError::Trace {
        line,
        reason: reason.into(),
    }
}

/// Sequential reader over the header fields.
struct Header<'a, I> {
    lines: I,
    /// Line number of the last field read.
    last_line: usize,
    _text: std::marker::PhantomData<&'a str>,
}

impl<'a, I> Header<'a, I>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    const fn new(lines: I) -> Self {
        Self {
            lines,
            last_line: 0,
            _text: std::marker::PhantomData,
        }
    }

    /// Pulls the next header value. A missing field is reported on the line
    /// after the last one read.
    fn value(&mut self, what: &str) -> Result<(usize, &'a str), SimError> {
        let (line, text) = self.lines.next().ok_or_else(|| {
            trace_error(self.last_line + 1, format!("missing header field: {what}"))
        })?;
        self.last_line = line;
        let value = text.split_whitespace().next().unwrap_or_default();
        Ok((line, value))
    }

    fn number<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, SimError> {
        let (line, value) = self.value(what)?;
        value
            .parse()
            .map_err(|_| trace_error(line, format!("invalid {what} '{value}'")))
    }

    fn parsed<T>(&mut self, what: &str) -> Result<T, SimError>
    where
        T: std::str::FromStr<Err = ConfigError>,
    {
        let (line, value) = self.value(what)?;
        value
            .parse()
            .map_err(|err: ConfigError| trace_error(line, format!("invalid {what}: {err}")))
    }

    fn into_lines(self) -> I {
        self.lines
    }
}

fn parse_record(line: usize, text: &str) -> Result<TraceRecord, SimError> {
    let mut tokens = text.split_whitespace();
    let op_text = tokens.next().unwrap_or_default();
    let code: i64 = op_text
        .parse()
        .map_err(|_| trace_error(line, format!("invalid operation '{op_text}'")))?;
    let address = tokens
        .next()
        .ok_or_else(|| trace_error(line, "missing address"))?;
    Ok(TraceRecord {
        line,
        op: TraceOp::from(code),
        address: address.to_owned(),
    })
}

impl Trace {
    /// Parses a full trace (header followed by records).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] when a header field is missing or invalid,
    /// or a record is missing its address or has a non-numeric operation.
    pub fn parse(text: &str) -> Result<Self, SimError> {
        let mut header = Header::new(content_lines(text));

        let block_size: u64 = header.number("block size")?;
        let organization: CacheOrganization = header.parsed("cache organization")?;
        let associativity: usize = header.number("associativity")?;
        let hit_policy = header.parsed("hit policy")?;
        let miss_policy = header.parsed("miss policy")?;
        let data_size: u64 = header.number("data cache size")?;

        let data = CacheOptions {
            size: data_size,
            associativity,
            block_size,
            hit_policy,
            miss_policy,
        };
        let instruction = match organization {
            CacheOrganization::Split => Some(CacheOptions {
                size: header.number("instruction cache size")?,
                ..data.clone()
            }),
            CacheOrganization::Unified => None,
        };

        let records = header
            .into_lines()
            .map(|(line, text)| parse_record(line, text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config: SimConfig {
                organization,
                data,
                instruction,
            },
            records,
        })
    }

    /// Reads and parses a full trace from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] on read failure, otherwise as [`Trace::parse`].
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, SimError> {
        let mut text = String::new();
        let _ = reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Parses a headerless record stream, pairing it with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] for a malformed record.
    pub fn parse_records(text: &str, config: SimConfig) -> Result<Self, SimError> {
        let records = content_lines(text)
            .map(|(line, text)| parse_record(line, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { config, records })
    }
}
