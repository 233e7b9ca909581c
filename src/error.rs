use thiserror::Error;

#[derive(Error, Debug)]
pub enum WetnessError {
    #[error("Failed to acquire image from {source_description}: {cause}")]
    AcquisitionFailure {
        source_description: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(
        "Image dimensions differ: baseline is {}x{}, snapshot is {}x{}",
        .baseline.0, .baseline.1, .snapshot.0, .snapshot.1
    )]
    DimensionMismatch {
        baseline: (u32, u32),
        snapshot: (u32, u32),
    },

    #[error("Missing configuration: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to write {path}: {cause}")]
    ArtifactWrite {
        path: String,
        #[source]
        cause: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WetnessError {
    pub(crate) fn acquisition<E>(source_description: impl Into<String>, cause: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        WetnessError::AcquisitionFailure {
            source_description: source_description.into(),
            cause: cause.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WetnessError>;
