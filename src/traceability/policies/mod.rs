pub mod ownership_classifier;

pub use ownership_classifier::OwnershipClassifier;
