/// A BED record.
///
/// `start` is 0-based and `end` is exclusive. Fields past the third are kept as-is and never
/// inspected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    pub reference_sequence_id: usize,
    pub start: usize,
    pub end: usize,
    pub other_fields: Vec<String>,
}

impl Feature {
    pub fn new(reference_sequence_id: usize, start: usize, end: usize) -> Self {
        Self {
            reference_sequence_id,
            start,
            end,
            other_fields: Vec::new(),
        }
    }

    pub fn with_other_fields(mut self, other_fields: Vec<String>) -> Self {
        self.other_fields = other_fields;
        self
    }
}

