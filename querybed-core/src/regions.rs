//! Region extraction over features sorted by start.
//!
//! A feature is in the region `[start, end)` when its _start_ is in the region. Its end is not
//! considered, so a feature that begins before `start` and extends into the region is excluded,
//! and one that begins inside the region is included no matter where it ends.

use thiserror::Error;

use crate::Feature;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ExtractError {
    #[error("invalid range: start ({start}) is greater than end ({end})")]
    InvalidRange { start: usize, end: usize },
    #[error("features are not sorted by start at index {index}")]
    Unsorted { index: usize },
    #[error("feature at index {index} is on a different reference sequence")]
    MixedReferenceSequences { index: usize },
}

/// Returns the features that start in `[start, end)`.
///
/// `features` must be sorted by start and be on a single reference sequence. Neither is checked
/// (see [`extract_checked`]); an unsorted input gives an unspecified result.
///
/// The result is a contiguous subslice of `features`. It is empty when `start >= end`, even if a
/// feature starts at `start`.
pub fn extract(features: &[Feature], start: usize, end: usize) -> &[Feature] {
    let i = lower_bound(features, start);

    if i >= features.len() {
        return &[];
    }

    let n = features[i..]
        .iter()
        .take_while(|feature| feature.start < end)
        .count();

    &features[i..i + n]
}

/// Same as [`extract`], but fails if the range or input breaks its preconditions.
pub fn extract_checked(
    features: &[Feature],
    start: usize,
    end: usize,
) -> Result<&[Feature], ExtractError> {
    if start > end {
        return Err(ExtractError::InvalidRange { start, end });
    }

    validate(features)?;

    Ok(extract(features, start, end))
}

/// Checks that features are sorted by start and share a reference sequence.
pub fn validate(features: &[Feature]) -> Result<(), ExtractError> {
    let Some(first) = features.first() else {
        return Ok(());
    };

    for (i, pair) in features.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let index = i + 1;

        if b.reference_sequence_id != first.reference_sequence_id {
            return Err(ExtractError::MixedReferenceSequences { index });
        }

        if b.start < a.start {
            return Err(ExtractError::Unsorted { index });
        }
    }

    Ok(())
}

// Returns the index of the first feature with a start >= `start`.
fn lower_bound(features: &[Feature], start: usize) -> usize {
    let mut low = 0;
    let mut high = features.len();

    while low < high {
        let mid = low + (high - low) / 2;

        if features[mid].start < start {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    low
}
