//! I/O layer: HDF5 granule decoding, manifest parsing, the object-store
//! boundary, and GeoTIFF writers.
pub mod hdf;
pub use hdf::{DecodeError, GranuleData, GranuleReader, read_granule};

pub mod manifest;
pub use manifest::{ManifestError, parse_manifest, read_manifest};

pub mod store;
pub use store::{LocalStore, ObjectStore, StoreError};

pub mod writers;
pub use writers::{EncodeError, RasterProduct, save_geotiff};
