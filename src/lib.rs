/// Feature pipeline for detecting duplicate question pairs.
///
/// Each pair of questions is normalized into token sets, compared through a
/// pair-local binary vocabulary (cosine similarity), and described by a few
/// lexical features. The resulting fixed-schema matrix feeds a binary
/// classifier that scores the probability that the two questions mean the
/// same thing.
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod model;
pub mod text;
pub mod utils;
pub mod vectorizer;
pub mod workflow;

/// Text Normalizer
/// Turns raw question text into a token set:
/// - lowercases
/// - removes whitespace-bounded stopwords
/// - splits on single spaces
/// - strips punctuation and drops empty tokens
///
/// Order and duplicates are kept; only the vocabulary builder deduplicates.
pub use text::normalizer::{Normalizer, TokenSet};

/// Stopword list configuration
/// `English` is the fixed built-in list, `Custom` replaces it, `None` disables
/// removal.
pub use text::stopwords::{StopWordConfig, StopWords};

/// Question pair records and the tables they are loaded into.
/// A dataset remembers whether it is keyed by `id` (training) or `test_id`
/// (inference).
pub use dataset::{Dataset, IdColumn, QuestionPair, RowId};

/// Pairwise cosine similarity
/// Builds the vocabulary of one pair only, encodes both questions as binary
/// membership vectors over it, and returns the cosine of the two.
/// The score is `None` when either question has no tokens left.
///
/// `batch_cosine_similarity` runs this over a whole table in parallel; each
/// pair allocates its own vocabulary.
pub use vectorizer::{batch_cosine_similarity, cosine_similarity, SimilarityScore};

/// Feature assembly
/// `FeaturePipeline` wires tokenization, similarity, and lexical extraction
/// together and joins them by row id into a `FeatureMatrix` whose column set
/// is fixed by its `FeatureSchema`.
///
/// Missing similarities follow `MissingSimilarity`: impute a constant
/// (1.0 by default) or keep them missing.
pub use features::{FeatureMatrix, FeaturePipeline, FeatureSchema, FeatureSettings, MissingSimilarity};

/// Classifier boundary and the bundled gradient-boosted stumps.
///
/// # Serialization
/// `ModelBundle` stores the fitted model together with the feature settings
/// and schema it was trained on (CBOR).
pub use model::{BoostedStumps, Classifier, GradientBoosting, ModelBundle};

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
