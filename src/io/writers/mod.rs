//! GeoTIFF writing: N-band tagged rasters plus the optional reprojection
//! pass that replaces an output in place.
pub mod geotiff;
pub mod warp;

pub use geotiff::{RasterProduct, save_geotiff};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("raster has {bands} bands but {descriptions} description tags")]
    DescriptionCount { bands: usize, descriptions: usize },
    #[error("reprojection failed: {0}")]
    Warp(String),
}
