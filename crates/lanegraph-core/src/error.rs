pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model document is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid model document: {message}")]
    InvalidDocument { message: String },

    #[error("Malformed layer entry at index {index}: {message}")]
    MalformedEntry { index: usize, message: String },

    #[error("Layer {index} references unresolvable source {source_ref}")]
    UnresolvableSource { index: usize, source_ref: i64 },
}
