pub mod reader;
pub mod record;
pub mod writer;

pub use reader::{read_csv_from, read_jsonl_from, read_path};
pub use record::{Dataset, IdColumn, QuestionPair, RowId};
pub use writer::{write_feature_matrix, write_feature_matrix_path, write_submission, write_submission_path};
