use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse invoice input {input}: {source}")]
    InputParse {
        input: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("--output can only be used with a single input ({0} given)")]
    OutputWithManyInputs(usize),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Why a nested field (`items`, `bill_to`) could not be decoded.
///
/// These never abort a render: the caller substitutes an empty value and logs.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("field is absent")]
    Missing,

    #[error("field holds a string that is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("field has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}
