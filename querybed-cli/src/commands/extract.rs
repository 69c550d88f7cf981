use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::Path,
};

use querybed_core::{
    FeatureStore, Query,
    features::{self, ReadFeaturesError},
    queries::ParseError,
    regions,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{cli::extract, fs};

pub fn extract(args: extract::Args) -> Result<(), ExtractError> {
    let src = &args.src;

    info!(src = ?src, "reading features");

    let store = read_features(src)?;

    info!(
        reference_sequence_count = store.reference_sequence_names().len(),
        feature_count = store.len(),
        "read features"
    );

    if store.is_empty() {
        warn!(src = ?src, "no features read");
    }

    let queries_src = &args.queries;
    let validate = args.validate;

    info!(src = ?queries_src, validate, "extracting regions");

    let mut reader = fs::open(queries_src)?;

    let mut writer = create_writer(args.output.as_deref())?;

    let summary = extract_regions(&mut reader, &store, validate, &mut writer)?;
    writer.flush()?;

    info!(
        query_count = summary.query_count,
        feature_count = summary.feature_count,
        "done"
    );

    Ok(())
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("invalid features")]
    InvalidFeatures(#[from] ReadFeaturesError),
    #[error("line {line_number}: invalid query")]
    InvalidQuery {
        line_number: usize,
        #[source]
        source: ParseError,
    },
    #[error("line {line_number}: invalid features for query")]
    InvalidRegion {
        line_number: usize,
        #[source]
        source: regions::ExtractError,
    },
}

#[derive(Debug, Default, Eq, PartialEq)]
struct Summary {
    query_count: usize,
    feature_count: usize,
}

fn read_features<P>(src: P) -> Result<FeatureStore, ExtractError>
where
    P: AsRef<Path>,
{
    let mut reader = fs::open(src)?;
    let store = features::read_features(&mut reader)?;
    Ok(store)
}

fn create_writer(dst: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match dst {
        Some(dst) => {
            let file = File::create(dst)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn extract_regions<R, W>(
    reader: &mut R,
    store: &FeatureStore,
    validate: bool,
    writer: &mut W,
) -> Result<Summary, ExtractError>
where
    R: BufRead,
    W: Write,
{
    const COMMENT_PREFIX: char = '#';

    let mut summary = Summary::default();

    for (i, result) in reader.lines().enumerate() {
        let line = result?;
        let line_number = i + 1;

        let s = line.trim();

        if s.is_empty() || s.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let query: Query = s
            .parse()
            .map_err(|e| ExtractError::InvalidQuery {
                line_number,
                source: e,
            })?;

        let reference_sequence_name = query.reference_sequence_name.as_str();
        let (start, end) = (query.start, query.end);

        let segments = store.get(reference_sequence_name);

        let region = if validate {
            regions::extract_checked(segments, start, end).map_err(|e| {
                ExtractError::InvalidRegion {
                    line_number,
                    source: e,
                }
            })?
        } else {
            regions::extract(segments, start, end)
        };

        debug!(
            reference_sequence_name,
            start,
            end,
            feature_count = region.len(),
            "extracted region"
        );

        for feature in region {
            features::write_feature(writer, reference_sequence_name, feature)?;
        }

        summary.query_count += 1;
        summary.feature_count += region.len();
    }

    Ok(summary)
}
