//! Crate-level error type and `Result` alias for stable, structured error
//! handling. Converts underlying decode, encode, store, and georeferencing
//! errors, and wraps per-granule failures with the granule identifier.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fetch failed: {0}")]
    Fetch(#[source] crate::io::StoreError),

    #[error("upload failed: {0}")]
    Upload(#[source] crate::io::StoreError),

    #[error("decode error: {0}")]
    Decode(#[from] crate::io::DecodeError),

    #[error("georeference error: {0}")]
    GeoReference(#[from] crate::core::geo::GeoReferenceError),

    #[error("index computation error: {0}")]
    Index(#[from] crate::core::indices::IndexError),

    #[error("encode error: {0}")]
    Encode(#[from] crate::io::EncodeError),

    #[error("manifest error: {0}")]
    Manifest(#[from] crate::io::ManifestError),

    #[error("granule {id}: {source}")]
    Granule {
        id: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach a granule identifier to an error surfacing from the pipeline.
    pub fn for_granule(id: &str, source: Error) -> Self {
        Error::Granule {
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}
