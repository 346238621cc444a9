use std::path::{Path, PathBuf};

use gdal::raster::{Buffer, GdalType};
use gdal::spatial_ref::SpatialRef;
use gdal::{DriverManager, Metadata};
use ndarray::{Array3, Axis};
use tracing::info;

use super::EncodeError;
use crate::types::PixelType;

/// Handle to a written (and possibly reprojected) artifact.
#[derive(Debug, Clone)]
pub struct RasterProduct {
    pub path: PathBuf,
    pub bands: usize,
    pub epsg: u32,
}

fn epsg_wkt(epsg: u32) -> Result<String, EncodeError> {
    Ok(SpatialRef::from_epsg(epsg)?.to_wkt()?)
}

fn write_gtiff<T: GdalType + Copy>(
    path: &Path,
    data: &Array3<f64>,
    geotransform: &[f64; 6],
    wkt: &str,
    descriptions: &[&str],
    convert: impl Fn(f64) -> T,
) -> Result<(), EncodeError> {
    let (bands, rows, cols) = data.dim();
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver.create_with_band_type::<T, _>(path, cols, rows, bands)?;
    ds.set_geo_transform(geotransform)?;
    ds.set_projection(wkt)?;
    for b in 0..bands {
        let plane: Vec<T> = data
            .index_axis(Axis(0), b)
            .iter()
            .map(|&v| convert(v))
            .collect();
        let mut buf = Buffer::new((cols, rows), plane);
        let mut band = ds.rasterband(b + 1)?;
        band.write((0, 0), (cols, rows), &mut buf)?;
        band.set_description(descriptions[b])?;
    }
    Ok(())
}

/// Write a band-major array as a tagged N-band GeoTIFF and, if
/// `reproject_to` is set, resample it into the target CRS in place.
///
/// The initial write lands exactly at `path` with the requested element
/// type, the given geotransform/CRS, and one description tag per band.
/// Reprojection goes through a side file next to `path`; the original is
/// only removed once the warped file is complete, and the terminal rename
/// is the sole mutation of `path` itself.
pub fn save_geotiff(
    path: &Path,
    data: &Array3<f64>,
    geotransform: &[f64; 6],
    epsg: u32,
    pixel_type: PixelType,
    descriptions: &[&str],
    reproject_to: Option<u32>,
) -> Result<RasterProduct, EncodeError> {
    let (bands, rows, cols) = data.dim();
    if bands != descriptions.len() {
        return Err(EncodeError::DescriptionCount {
            bands,
            descriptions: descriptions.len(),
        });
    }

    let wkt = epsg_wkt(epsg)?;
    match pixel_type {
        // `as` casts: saturating, truncation toward zero, NaN -> 0.
        PixelType::Int16 => write_gtiff::<i16>(path, data, geotransform, &wkt, descriptions, |v| {
            v as i16
        })?,
        PixelType::Float32 => {
            write_gtiff::<f32>(path, data, geotransform, &wkt, descriptions, |v| v as f32)?
        }
    }

    let mut final_epsg = epsg;
    if let Some(dst_epsg) = reproject_to {
        super::warp::reproject_in_place(path, dst_epsg, descriptions)?;
        final_epsg = dst_epsg;
    }

    info!(
        "wrote {:?}: {} band(s), {}x{}, {} (EPSG:{})",
        path, bands, cols, rows, pixel_type, final_epsg
    );
    Ok(RasterProduct {
        path: path.to_path_buf(),
        bands,
        epsg: final_epsg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn description_count_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let data = Array3::<f64>::zeros((2, 4, 4));
        let err = save_geotiff(
            &dir.path().join("out.tiff"),
            &data,
            &[0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
            crate::types::EPSG_WGS84,
            PixelType::Int16,
            &["only one tag"],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::DescriptionCount { .. }));
    }
}
