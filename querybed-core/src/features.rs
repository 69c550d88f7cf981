mod feature;
mod store;

use std::io::{self, BufRead, Write};

use indexmap::IndexSet;
use thiserror::Error;
use tracing::warn;

pub use self::{feature::Feature, store::FeatureStore};

#[derive(Error, Debug)]
pub enum ReadFeaturesError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("line {line_number}: missing field")]
    MissingField { line_number: usize },
    #[error("line {line_number}: invalid start")]
    InvalidStart { line_number: usize },
    #[error("line {line_number}: invalid end")]
    InvalidEnd { line_number: usize },
    #[error("line {line_number}: start is greater than end")]
    InvalidInterval { line_number: usize },
}

/// Reads BED records into a feature store.
///
/// Records are expected to be sorted by start within each reference sequence and are kept in
/// input order. Unsorted input is reported but not reordered.
pub fn read_features<R>(reader: &mut R) -> Result<FeatureStore, ReadFeaturesError>
where
    R: BufRead,
{
    let mut reference_sequence_names: IndexSet<String> = IndexSet::new();
    let mut features: Vec<Vec<Feature>> = Vec::new();

    let mut line = String::new();
    let mut line_number = 0;

    loop {
        line.clear();

        if read_line(reader, &mut line)? == 0 {
            break;
        }

        line_number += 1;

        if is_skippable(&line) {
            continue;
        }

        let (reference_sequence_name, feature) = parse_record(&line, line_number)?;

        let reference_sequence_id = match reference_sequence_names
            .get_index_of(reference_sequence_name)
        {
            Some(id) => id,
            None => {
                let (id, _) = reference_sequence_names.insert_full(reference_sequence_name.into());
                features.push(Vec::new());
                id
            }
        };

        features[reference_sequence_id].push(Feature {
            reference_sequence_id,
            ..feature
        });
    }

    for (name, segments) in reference_sequence_names.iter().zip(&features) {
        if !segments.is_sorted_by_key(|feature| feature.start) {
            warn!(
                reference_sequence_name = name.as_str(),
                "features are not sorted by start"
            );
        }
    }

    Ok(FeatureStore::new(reference_sequence_names, features))
}

/// Writes a feature as a BED line.
pub fn write_feature<W>(
    writer: &mut W,
    reference_sequence_name: &str,
    feature: &Feature,
) -> io::Result<()>
where
    W: Write,
{
    write!(
        writer,
        "{reference_sequence_name}{DELIMITER}{}{DELIMITER}{}",
        feature.start, feature.end
    )?;

    for field in &feature.other_fields {
        write!(writer, "{DELIMITER}{field}")?;
    }

    writeln!(writer)
}

const DELIMITER: char = '\t';

fn read_line<R>(reader: &mut R, buf: &mut String) -> io::Result<usize>
where
    R: BufRead,
{
    const LINE_FEED: char = '\n';
    const CARRIAGE_RETURN: char = '\r';

    match reader.read_line(buf)? {
        0 => Ok(0),
        n => {
            if buf.ends_with(LINE_FEED) {
                buf.pop();

                if buf.ends_with(CARRIAGE_RETURN) {
                    buf.pop();
                }
            }

            Ok(n)
        }
    }
}

fn is_skippable(s: &str) -> bool {
    const COMMENT_PREFIX: char = '#';
    const HEADER_KEYWORDS: [&str; 2] = ["track", "browser"];

    let s = s.trim_start();

    if s.is_empty() || s.starts_with(COMMENT_PREFIX) {
        return true;
    }

    let keyword = s.split_whitespace().next().unwrap_or_default();
    HEADER_KEYWORDS.contains(&keyword)
}

fn parse_record(s: &str, line_number: usize) -> Result<(&str, Feature), ReadFeaturesError> {
    let s = s.trim_end();

    let mut fields: Box<dyn Iterator<Item = &str> + '_> = if s.contains(DELIMITER) {
        Box::new(s.split(DELIMITER))
    } else {
        Box::new(s.split_whitespace())
    };

    let mut next_field = || {
        fields
            .next()
            .ok_or(ReadFeaturesError::MissingField { line_number })
    };

    let reference_sequence_name = next_field()?;

    let start: usize = next_field()?
        .trim()
        .parse()
        .map_err(|_| ReadFeaturesError::InvalidStart { line_number })?;

    let end: usize = next_field()?
        .trim()
        .parse()
        .map_err(|_| ReadFeaturesError::InvalidEnd { line_number })?;

    if start > end {
        return Err(ReadFeaturesError::InvalidInterval { line_number });
    }

    let other_fields = fields.map(String::from).collect();
    let feature = Feature::new(0, start, end).with_other_fields(other_fields);

    Ok((reference_sequence_name, feature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_features() -> Result<(), ReadFeaturesError> {
        const DATA: &[u8] = b"\
track name=genes
# sorted
sq0\t10\t15\tf0\t0\t+
sq0\t20\t28\tf1

sq1\t5\t8
sq0\t20\t21\tf2
";

        let mut reader = DATA;
        let store = read_features(&mut reader)?;

        assert_eq!(store.len(), 4);
        assert_eq!(
            store.reference_sequence_names().get_index(0).map(String::as_str),
            Some("sq0")
        );
        assert_eq!(
            store.reference_sequence_names().get_index(1).map(String::as_str),
            Some("sq1")
        );

        assert_eq!(
            store.get("sq0"),
            [
                Feature::new(0, 10, 15).with_other_fields(vec![
                    String::from("f0"),
                    String::from("0"),
                    String::from("+"),
                ]),
                Feature::new(0, 20, 28).with_other_fields(vec![String::from("f1")]),
                Feature::new(0, 20, 21).with_other_fields(vec![String::from("f2")]),
            ]
        );

        assert_eq!(store.get("sq1"), [Feature::new(1, 5, 8)]);

        Ok(())
    }

    #[test]
    fn test_read_features_with_unsorted_input() -> Result<(), ReadFeaturesError> {
        let mut reader = &b"sq0\t30\t31\tc\nsq0\t10\t11\ta\nsq0\t30\t40\td\nsq0\t20\t21\tb\n"[..];
        let store = read_features(&mut reader)?;

        let actual: Vec<_> = store
            .get("sq0")
            .iter()
            .map(|feature| (feature.start, feature.other_fields[0].as_str()))
            .collect();

        assert_eq!(actual, [(30, "c"), (10, "a"), (30, "d"), (20, "b")]);

        Ok(())
    }

    #[test]
    fn test_read_features_with_whitespace_delimited_input() -> Result<(), ReadFeaturesError> {
        let mut reader = &b"sq0 10   15 f0\r\n"[..];
        let store = read_features(&mut reader)?;

        assert_eq!(
            store.get("sq0"),
            [Feature::new(0, 10, 15).with_other_fields(vec![String::from("f0")])]
        );

        Ok(())
    }

    #[test]
    fn test_read_features_with_trailing_whitespace() -> Result<(), ReadFeaturesError> {
        let mut reader = &b"sq0\t10\t20 \nsq0\t 30 \t40\tf1 \t\n"[..];
        let store = read_features(&mut reader)?;

        assert_eq!(
            store.get("sq0"),
            [
                Feature::new(0, 10, 20),
                Feature::new(0, 30, 40).with_other_fields(vec![String::from("f1")]),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_read_features_with_invalid_records() {
        fn t(data: &[u8]) -> ReadFeaturesError {
            let mut reader = data;
            match read_features(&mut reader) {
                Ok(_) => panic!("expected error"),
                Err(e) => e,
            }
        }

        assert!(matches!(
            t(b"sq0\t1\t2\nsq0\t5\n"),
            ReadFeaturesError::MissingField { line_number: 2 }
        ));

        assert!(matches!(
            t(b"sq0\t-1\t2\n"),
            ReadFeaturesError::InvalidStart { line_number: 1 }
        ));

        assert!(matches!(
            t(b"sq0\t1\tn\n"),
            ReadFeaturesError::InvalidEnd { line_number: 1 }
        ));

        assert!(matches!(
            t(b"# c\nsq0\t8\t5\n"),
            ReadFeaturesError::InvalidInterval { line_number: 2 }
        ));
    }

    #[test]
    fn test_write_feature() -> io::Result<()> {
        let mut buf = Vec::new();

        write_feature(&mut buf, "sq0", &Feature::new(0, 5, 8))?;

        let feature = Feature::new(0, 13, 21)
            .with_other_fields(vec![String::from("f1"), String::from("960")]);
        write_feature(&mut buf, "sq0", &feature)?;

        assert_eq!(buf, b"sq0\t5\t8\nsq0\t13\t21\tf1\t960\n");

        Ok(())
    }

    #[test]
    fn test_read_line() -> io::Result<()> {
        fn t(buf: &mut String, mut data: &[u8], expected: &str) -> io::Result<()> {
            buf.clear();
            read_line(&mut data, buf)?;
            assert_eq!(buf, expected);
            Ok(())
        }

        let mut buf = String::new();

        t(&mut buf, b"sq0\t5\t8\n", "sq0\t5\t8")?;
        t(&mut buf, b"sq0\t5\t8\r\n", "sq0\t5\t8")?;
        t(&mut buf, b"sq0\t5\t8", "sq0\t5\t8")?;

        Ok(())
    }

    #[test]
    fn test_is_skippable() {
        assert!(is_skippable(""));
        assert!(is_skippable("  "));
        assert!(is_skippable("#chrom\tstart\tend"));
        assert!(is_skippable("track name=genes"));
        assert!(is_skippable("browser position sq0:1-100"));
        assert!(!is_skippable("sq0\t5\t8"));
        assert!(!is_skippable("tracked\t5\t8"));
    }
}
