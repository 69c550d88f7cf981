use indexmap::IndexSet;

use super::Feature;

/// Features grouped by reference sequence, each group in input order.
///
/// A store is built once by [`super::read_features`] and is read-only afterward.
#[derive(Debug, Default)]
pub struct FeatureStore {
    reference_sequence_names: IndexSet<String>,
    features: Vec<Vec<Feature>>,
}

impl FeatureStore {
    pub(super) fn new(
        reference_sequence_names: IndexSet<String>,
        features: Vec<Vec<Feature>>,
    ) -> Self {
        assert_eq!(reference_sequence_names.len(), features.len());

        Self {
            reference_sequence_names,
            features,
        }
    }

    /// Returns the features on the given reference sequence.
    ///
    /// This is empty if the reference sequence is not in the store.
    pub fn get(&self, reference_sequence_name: &str) -> &[Feature] {
        self.reference_sequence_names
            .get_index_of(reference_sequence_name)
            .map(|i| self.features[i].as_slice())
            .unwrap_or_default()
    }

    pub fn reference_sequence_names(&self) -> &IndexSet<String> {
        &self.reference_sequence_names
    }

    /// Returns the total number of features.
    pub fn len(&self) -> usize {
        self.features.iter().map(|segments| segments.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
