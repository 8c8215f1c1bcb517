pub mod assembler;
pub mod keywords;
pub mod lexical;
pub mod pipeline;
pub mod row;

pub use assembler::{assemble, MissingSimilarity};
pub use keywords::KeywordDictionary;
pub use lexical::{LexicalExtractor, LexicalFeatures};
pub use pipeline::{FeaturePipeline, FeatureSettings};
pub use row::{FeatureMatrix, FeatureRow, FeatureSchema};
