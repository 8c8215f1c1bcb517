pub mod batch;
pub mod compare;
pub mod membership;
pub mod vocabulary;

pub use batch::{batch_cosine_similarity, encode_pair, pair_cosine_similarity};
pub use compare::{cosine_similarity, BinaryVector, SimilarityScore};
pub use membership::{encode, MembershipVector};
pub use vocabulary::{build_vocabulary, SharedVocabulary};
