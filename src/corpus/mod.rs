pub mod email;
pub mod loader;

pub use email::{Email, FeatureExtractor, FeatureMap};
pub use loader::CorpusLoader;
