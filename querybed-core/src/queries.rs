use std::str::{self, FromStr};

use noodles::core::Region;
use thiserror::Error;

/// A query region on a reference sequence.
///
/// The interval is 0-based and half-open: `[start, end)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub reference_sequence_name: String,
    pub start: usize,
    pub end: usize,
}

impl Query {
    pub fn new<N>(reference_sequence_name: N, start: usize, end: usize) -> Self
    where
        N: Into<String>,
    {
        Self {
            reference_sequence_name: reference_sequence_name.into(),
            start,
            end,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("missing field")]
    MissingField,
    #[error("unexpected field")]
    UnexpectedField,
    #[error("invalid start")]
    InvalidStart,
    #[error("invalid end")]
    InvalidEnd,
    #[error("invalid region")]
    InvalidRegion,
    #[error("invalid range: start ({start}) is greater than end ({end})")]
    InvalidRange { start: usize, end: usize },
}

const REGION_DELIMITER: char = ':';

impl FromStr for Query {
    type Err = ParseError;

    /// Parses a query.
    ///
    /// The input is either a whitespace-delimited `<name> <start> <end>` triple, using 0-based,
    /// half-open coordinates, or a single region string `<name>:<start>[-<end>]`, using 1-based,
    /// closed coordinates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();

        let name = fields.next().ok_or(ParseError::Empty)?;

        let query = match fields.next() {
            Some(raw_start) => {
                let raw_end = fields.next().ok_or(ParseError::MissingField)?;

                if fields.next().is_some() {
                    return Err(ParseError::UnexpectedField);
                }

                let start: usize = raw_start.parse().map_err(|_| ParseError::InvalidStart)?;
                let end: usize = raw_end.parse().map_err(|_| ParseError::InvalidEnd)?;

                Self::new(name, start, end)
            }
            None if name.contains(REGION_DELIMITER) => parse_region(name)?,
            None => return Err(ParseError::MissingField),
        };

        if query.start > query.end {
            return Err(ParseError::InvalidRange {
                start: query.start,
                end: query.end,
            });
        }

        Ok(query)
    }
}

fn parse_region(s: &str) -> Result<Query, ParseError> {
    let region: Region = s.parse().map_err(|_| ParseError::InvalidRegion)?;

    let name = str::from_utf8(AsRef::<[u8]>::as_ref(region.name()))
        .map_err(|_| ParseError::InvalidRegion)?;

    let interval = region.interval();

    // 1-based, closed to 0-based, half-open
    let start = interval
        .start()
        .map(|position| usize::from(position) - 1)
        .unwrap_or(0);

    let end = interval.end().map(usize::from).unwrap_or(usize::MAX);

    Ok(Query::new(name, start, end))
}
