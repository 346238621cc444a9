#![doc = r#"
TIRPRO — an ASTER GED v3 thermal-infrared granule processing toolkit.

This crate turns GED v3 emissivity granules (HDF5, five TIR bands plus
per-pixel geolocation) into georeferenced GeoTIFF products: a derived
mineral-index stack, the original band stack, per-band error rasters, and an
observation-count layer, each tagged with fixed per-band descriptions and
optionally reprojected from EPSG:4326 to EPSG:3857. It powers the TIRPRO CLI
and can be embedded in your own Rust applications.

Requirements
------------
- GDAL development headers and runtime (with HDF5 support) available on your
  system.
- Rust 2024 edition toolchain.

Quick start: process one granule against a local store
------------------------------------------------------
```rust,no_run
use std::path::PathBuf;
use tirpro::{LocalStore, PipelineConfig, process_granule};

fn main() -> tirpro::Result<()> {
    let config = PipelineConfig {
        staging_dir: PathBuf::from("/tmp/tirpro-staging"),
        web_mercator: false,
        ..Default::default()
    };
    let store = LocalStore::new("/data/oss-mirror");
    process_granule(store, config, "AG100.v003.44.-077.0001")
}
```

Batch processing from a manifest
--------------------------------
```rust,no_run
use std::path::Path;
use tirpro::{LocalStore, PipelineConfig, process_manifest};

fn main() -> tirpro::Result<()> {
    let report = process_manifest(
        LocalStore::new("/data/oss-mirror"),
        PipelineConfig::default(),
        Path::new("AG100_filelist.txt"),
        true, // continue_on_error
    )?;
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Typed save helper (when you already have arrays)
------------------------------------------------
```rust,no_run
use std::path::Path;
use ndarray::Array3;
use tirpro::{PixelType, ProductKind, save_geotiff, EPSG_WGS84, EPSG_WEB_MERCATOR};

fn save_indices(indices: &Array3<f64>, transform: &[f64; 6]) -> tirpro::Result<()> {
    let kind = ProductKind::MineralIndex;
    save_geotiff(
        Path::new("/out/indices.tiff"),
        indices,
        transform,
        EPSG_WGS84,
        kind.pixel_type(),
        kind.descriptions(),
        Some(EPSG_WEB_MERCATOR),
    )?;
    Ok(())
}
```

Error handling
--------------
All public functions return `tirpro::Result<T>`; match on `tirpro::Error` to
handle specific cases. Per-granule failures carry the granule identifier in
`Error::Granule`.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — product kinds, pixel types, EPSG constants.
- [`core`] — geotransform derivation, index engine, pipeline orchestrator.
- [`io`] — granule decoder, manifest parser, object store, GeoTIFF writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::PipelineConfig;
pub use error::{Error, Result};
pub use types::{EPSG_WEB_MERCATOR, EPSG_WGS84, NODATA, PixelType, ProductKind};

// Core algorithms
pub use crate::core::geo::derive_geotransform;
pub use crate::core::indices::compute_indices;
pub use crate::core::pipeline::GranulePipeline;

// I/O
pub use io::hdf::{GranuleData, GranuleReader, read_granule};
pub use io::manifest::{parse_manifest, read_manifest};
pub use io::store::{LocalStore, ObjectStore};
pub use io::writers::{RasterProduct, save_geotiff};

// High-level API re-exports
pub use api::{BatchReport, process_granule, process_manifest};
