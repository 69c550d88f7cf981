pub mod features;
pub mod queries;
pub mod regions;

pub use self::{
    features::{Feature, FeatureStore},
    queries::Query,
};
