pub mod domain_classifier;
pub mod public_suffix;

pub use domain_classifier::DomainClassifier;
