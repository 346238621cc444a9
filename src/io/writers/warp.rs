//! Nearest-neighbour reprojection of a written GeoTIFF into a target CRS.
//!
//! The target grid is derived the way rasterio's `calculate_default_transform`
//! does it: reproject the corner points, take their bounding box, pick the
//! square pixel size that preserves per-axis resolution, and round the
//! dimensions up. Resampling itself goes through `GDALReprojectImage` with
//! nearest-neighbour sampling, chosen for index-like band fidelity.
use std::path::{Path, PathBuf};

use gdal::raster::GdalDataType;
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::{Dataset, DriverManager, Metadata};
use tracing::info;

use super::EncodeError;

/// Compute the target geotransform and raster dimensions that best preserve
/// the source resolution under the destination projection.
pub fn suggested_warp_output(
    src_srs: &SpatialRef,
    dst_srs: &SpatialRef,
    geotransform: &[f64; 6],
    cols: usize,
    rows: usize,
) -> Result<([f64; 6], usize, usize), EncodeError> {
    let tx = CoordTransform::new(src_srs, dst_srs)?;

    let (w, h) = (cols as f64, rows as f64);
    let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)];
    let mut xs = [0.0f64; 4];
    let mut ys = [0.0f64; 4];
    let mut zs = [0.0f64; 4];
    for (i, (col, row)) in corners.iter().enumerate() {
        xs[i] = geotransform[0] + col * geotransform[1] + row * geotransform[2];
        ys[i] = geotransform[3] + col * geotransform[4] + row * geotransform[5];
    }
    tx.transform_coords(&mut xs, &mut ys, &mut zs)?;

    let (left, right) = xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    let (bottom, top) = ys.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });

    let resolution = ((right - left) / w).max((top - bottom) / h);
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(EncodeError::Warp(format!(
            "degenerate target extent [{left}, {bottom}, {right}, {top}]"
        )));
    }
    let dst_cols = (((right - left) / resolution).ceil() as usize).max(1);
    let dst_rows = (((top - bottom) / resolution).ceil() as usize).max(1);

    Ok((
        [left, resolution, 0.0, top, 0.0, -resolution],
        dst_cols,
        dst_rows,
    ))
}

fn side_path(path: &Path, dst_epsg: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reprojected");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("tiff");
    path.with_file_name(format!("{stem}_{dst_epsg}.{ext}"))
}

fn srs_for_epsg(epsg: u32) -> Result<SpatialRef, EncodeError> {
    let mut srs = SpatialRef::from_epsg(epsg)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

fn warp_to(
    src_ds: &Dataset,
    side: &Path,
    dst_epsg: u32,
    descriptions: &[&str],
) -> Result<(), EncodeError> {
    let geotransform = src_ds.geo_transform()?;
    let (cols, rows) = src_ds.raster_size();
    let bands = src_ds.raster_count() as usize;
    if bands != descriptions.len() {
        return Err(EncodeError::DescriptionCount {
            bands,
            descriptions: descriptions.len(),
        });
    }

    let mut src_srs = src_ds.spatial_ref()?;
    src_srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    let dst_srs = srs_for_epsg(dst_epsg)?;
    let (dst_gt, dst_cols, dst_rows) =
        suggested_warp_output(&src_srs, &dst_srs, &geotransform, cols, rows)?;

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dst_ds = match src_ds.rasterband(1)?.band_type() {
        GdalDataType::Int16 => {
            driver.create_with_band_type::<i16, _>(side, dst_cols, dst_rows, bands)?
        }
        GdalDataType::Float32 => {
            driver.create_with_band_type::<f32, _>(side, dst_cols, dst_rows, bands)?
        }
        other => {
            return Err(EncodeError::Warp(format!(
                "unsupported band type for reprojection: {other:?}"
            )));
        }
    };
    dst_ds.set_geo_transform(&dst_gt)?;
    dst_ds.set_projection(&dst_srs.to_wkt()?)?;

    let rv = unsafe {
        gdal_sys::GDALReprojectImage(
            src_ds.c_dataset(),
            std::ptr::null(),
            dst_ds.c_dataset(),
            std::ptr::null(),
            gdal_sys::GDALResampleAlg::GRA_NearestNeighbour,
            0.0,
            0.0,
            None,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    if rv != gdal_sys::CPLErr::CE_None {
        return Err(EncodeError::Warp(format!(
            "GDALReprojectImage returned {rv}"
        )));
    }

    for b in 0..bands {
        let mut band = dst_ds.rasterband(b + 1)?;
        band.set_description(descriptions[b])?;
    }
    Ok(())
}

/// Resample the raster at `path` into `dst_epsg` and replace it atomically:
/// warp into a side file, delete the original, rename the side file onto the
/// original path. The rename is the last action; any failure before it
/// leaves the untransformed original in place and removes the side file.
pub fn reproject_in_place(
    path: &Path,
    dst_epsg: u32,
    descriptions: &[&str],
) -> Result<(), EncodeError> {
    let side = side_path(path, dst_epsg);

    let result = {
        let src_ds = Dataset::open(path)?;
        warp_to(&src_ds, &side, dst_epsg, descriptions)
    };
    if let Err(e) = result {
        let _ = std::fs::remove_file(&side);
        return Err(e);
    }

    std::fs::remove_file(path)?;
    std::fs::rename(&side, path)?;
    info!("reprojected {:?} to EPSG:{}", path, dst_epsg);
    Ok(())
}
