//! Derives an affine geotransform from the per-pixel latitude/longitude
//! grids shipped inside a granule.
use ndarray::Array2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoReferenceError {
    #[error("degenerate coordinate grid: {rows}x{cols} (need at least 2x2)")]
    DegenerateGrid { rows: usize, cols: usize },
    #[error("latitude grid is {lat_rows}x{lat_cols} but longitude grid is {lon_rows}x{lon_cols}")]
    ShapeMismatch {
        lat_rows: usize,
        lat_cols: usize,
        lon_rows: usize,
        lon_cols: usize,
    },
}

fn min_max(grid: &Array2<f64>) -> (f64, f64) {
    grid.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// Derive a north-up affine geotransform (GDAL coefficient order:
/// `[origin_x, pixel_width, 0, origin_y, 0, -pixel_height]`) from the
/// latitude and longitude grids of one granule.
///
/// Pixel size is taken from the coordinate extents divided by the grid
/// spans; the origin is the position of pixel (0, 0). The grids are assumed
/// regular and monotonic; an irregular grid silently yields a transform that
/// is only approximately correct.
pub fn derive_geotransform(
    latitude: &Array2<f64>,
    longitude: &Array2<f64>,
) -> Result<[f64; 6], GeoReferenceError> {
    let (rows, cols) = latitude.dim();
    let (lon_rows, lon_cols) = longitude.dim();
    if (rows, cols) != (lon_rows, lon_cols) {
        return Err(GeoReferenceError::ShapeMismatch {
            lat_rows: rows,
            lat_cols: cols,
            lon_rows,
            lon_cols,
        });
    }
    if rows < 2 || cols < 2 {
        return Err(GeoReferenceError::DegenerateGrid { rows, cols });
    }

    let (lat_min, lat_max) = min_max(latitude);
    let (lon_min, lon_max) = min_max(longitude);
    let pixel_height = (lat_max - lat_min) / (rows - 1) as f64;
    let pixel_width = (lon_max - lon_min) / (cols - 1) as f64;
    let origin_x = longitude[[0, 0]];
    let origin_y = latitude[[0, 0]];

    Ok([origin_x, pixel_width, 0.0, origin_y, 0.0, -pixel_height])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn regular_grids(
        lat0: f64,
        lat1: f64,
        lon0: f64,
        lon1: f64,
        rows: usize,
        cols: usize,
    ) -> (Array2<f64>, Array2<f64>) {
        let lat_step = (lat1 - lat0) / (rows - 1) as f64;
        let lon_step = (lon1 - lon0) / (cols - 1) as f64;
        let lat = Array2::from_shape_fn((rows, cols), |(r, _)| lat1 - r as f64 * lat_step);
        let lon = Array2::from_shape_fn((rows, cols), |(_, c)| lon0 + c as f64 * lon_step);
        (lat, lon)
    }

    #[test]
    fn hundredth_degree_pixels() {
        let (lat, lon) = regular_grids(10.0, 11.0, 100.0, 101.0, 101, 101);
        let gt = derive_geotransform(&lat, &lon).unwrap();
        assert!((gt[1] - 0.01).abs() < 1e-12, "pixel width: {}", gt[1]);
        assert!((gt[5] + 0.01).abs() < 1e-12, "pixel height: {}", gt[5]);
        assert_eq!(gt[0], lon[[0, 0]]);
        assert_eq!(gt[3], lat[[0, 0]]);
        assert_eq!(gt[2], 0.0);
        assert_eq!(gt[4], 0.0);
    }

    #[test]
    fn degenerate_grid_is_rejected() {
        let lat = Array2::zeros((1, 10));
        let lon = Array2::zeros((1, 10));
        assert!(matches!(
            derive_geotransform(&lat, &lon),
            Err(GeoReferenceError::DegenerateGrid { rows: 1, cols: 10 })
        ));
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let lat = Array2::zeros((10, 10));
        let lon = Array2::zeros((10, 11));
        assert!(matches!(
            derive_geotransform(&lat, &lon),
            Err(GeoReferenceError::ShapeMismatch { .. })
        ));
    }
}
