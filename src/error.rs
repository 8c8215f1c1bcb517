/// Errors raised by the feature pipeline and the classifier boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A question cell held something other than text.
    #[error("invalid input in `{field}`: expected text, found {found}")]
    InvalidInput { field: String, found: &'static str },

    /// Join keys, column sets or row counts disagree between two streams.
    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("invalid {column} value `{value}` on row {row}")]
    InvalidValue {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("model codec error: {0}")]
    ModelCodec(#[from] serde_cbor::Error),
}

impl PipelineError {
    pub fn schema(reason: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
