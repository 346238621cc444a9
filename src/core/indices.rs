//! Mineral-index computation over the five TIR emissivity bands (b10..b14).
//! All arithmetic is carried out in f64, the nodata mask is applied as a
//! multiplicative 0/1 factor, and NaN results are replaced with 0 before the
//! final scaling by 1000.
use ndarray::{Array2, Array3, Axis, Zip};
use thiserror::Error;

use crate::types::NODATA;

/// Number of TIR bands in a GED v3 granule, and of derived index bands.
pub const BAND_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("expected exactly {BAND_COUNT} TIR bands, got {got}")]
    BandCount { got: usize },
}

/// Per-pixel mask: 0 where every one of the five bands carries the nodata
/// sentinel, 1 otherwise. A pixel where only some bands are sentinel is left
/// unmasked and its raw ratios pass through.
pub fn nodata_mask(bands: &Array3<f64>) -> Array2<f64> {
    let (count, rows, cols) = bands.dim();
    let mut mask = Array2::<f64>::ones((rows, cols));
    Zip::indexed(&mut mask).for_each(|(row, col), m| {
        if (0..count).all(|b| bands[[b, row, col]] == NODATA) {
            *m = 0.0;
        }
    });
    mask
}

/// Compute the five mineral indices from a 5-band emissivity stack ordered
/// b10..b14. Output band order is fixed:
/// `[garnet, mafic, quartz-bearing rock, quartz, carbonate]`, each scaled by
/// 1000.
///
/// The carbonate band reuses the garnet formula `(b12 + b14) / b13`, matching
/// the published band description rather than a b13/b14 ratio.
pub fn compute_indices(bands: &Array3<f64>) -> Result<Array3<f64>, IndexError> {
    let (count, rows, cols) = bands.dim();
    if count != BAND_COUNT {
        return Err(IndexError::BandCount { got: count });
    }

    let b10 = bands.index_axis(Axis(0), 0);
    let b11 = bands.index_axis(Axis(0), 1);
    let b12 = bands.index_axis(Axis(0), 2);
    let b13 = bands.index_axis(Axis(0), 3);
    let b14 = bands.index_axis(Axis(0), 4);
    let mask = nodata_mask(bands);

    let mut out = Array3::<f64>::zeros((BAND_COUNT, rows, cols));

    // Masked sentinel pixels produce inf * 0 = NaN here; the NaN replacement
    // below turns them into exact zeros.
    let finalize = |raw: f64| {
        let v = if raw.is_nan() { 0.0 } else { raw };
        v * 1000.0
    };

    Zip::from(out.index_axis_mut(Axis(0), 0))
        .and(&b12)
        .and(&b13)
        .and(&b14)
        .and(&mask)
        .for_each(|g, &b12, &b13, &b14, &m| *g = finalize(((b12 + b14) / b13) * m));

    Zip::from(out.index_axis_mut(Axis(0), 1))
        .and(&b12)
        .and(&b13)
        .and(&b14)
        .and(&mask)
        .for_each(|v, &b12, &b13, &b14, &m| *v = finalize((b12 / b13) * (b14 / b13) * m));

    Zip::from(out.index_axis_mut(Axis(0), 2))
        .and(&b10)
        .and(&b12)
        .and(&b13)
        .and(&mask)
        .for_each(|v, &b10, &b12, &b13, &m| *v = finalize((b10 / b12) * (b13 / b12) * m));

    Zip::from(out.index_axis_mut(Axis(0), 3))
        .and(&b10)
        .and(&b11)
        .and(&b12)
        .and(&mask)
        .for_each(|v, &b10, &b11, &b12, &m| *v = finalize((b11 * b11) / (b10 * b12) * m));

    // Carbonate: verbatim garnet reuse.
    Zip::from(out.index_axis_mut(Axis(0), 4))
        .and(&b12)
        .and(&b13)
        .and(&b14)
        .and(&mask)
        .for_each(|v, &b12, &b13, &b14, &m| *v = finalize(((b12 + b14) / b13) * m));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn uniform_stack(value: f64) -> Array3<f64> {
        Array3::from_elem((5, 4, 4), value)
    }

    #[test]
    fn clean_input_is_finite_and_five_banded() {
        let bands = uniform_stack(100.0);
        let out = compute_indices(&bands).unwrap();
        assert_eq!(out.dim(), (5, 4, 4));
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn garnet_value_at_perturbed_pixel() {
        let mut bands = uniform_stack(100.0);
        bands[[3, 2, 1]] = 50.0; // b13
        let out = compute_indices(&bands).unwrap();
        // (100 + 100) / 50 * 1000
        assert_eq!(out[[0, 2, 1]], 4000.0);
        // carbonate mirrors garnet
        assert_eq!(out[[4, 2, 1]], 4000.0);
        // untouched pixel: (100 + 100) / 100 * 1000
        assert_eq!(out[[0, 0, 0]], 2000.0);
    }

    #[test]
    fn fully_sentinel_pixel_is_zero_in_every_band() {
        let mut bands = uniform_stack(100.0);
        for b in 0..5 {
            bands[[b, 1, 1]] = NODATA;
        }
        let out = compute_indices(&bands).unwrap();
        for b in 0..5 {
            assert_eq!(out[[b, 1, 1]], 0.0, "band {b}");
        }
    }

    #[test]
    fn partially_sentinel_pixel_is_not_masked() {
        let mut bands = uniform_stack(100.0);
        bands[[4, 1, 1]] = NODATA; // only b14
        let out = compute_indices(&bands).unwrap();
        // garnet: (100 + -9999) / 100 * 1000
        assert_eq!(out[[0, 1, 1]], ((100.0 + NODATA) / 100.0) * 1000.0);
        // rock index does not involve b14 and is unaffected
        assert_eq!(out[[2, 1, 1]], 1000.0);
    }

    #[test]
    fn nan_from_zero_over_zero_becomes_zero() {
        let mut bands = uniform_stack(100.0);
        bands[[2, 0, 0]] = 0.0; // b12
        bands[[4, 0, 0]] = 0.0; // b14
        bands[[3, 0, 0]] = 0.0; // b13 -> garnet = 0/0
        let out = compute_indices(&bands).unwrap();
        assert_eq!(out[[0, 0, 0]], 0.0);
    }

    #[test]
    fn wrong_band_count_is_fatal() {
        let bands = Array3::from_elem((4, 4, 4), 100.0);
        assert!(matches!(
            compute_indices(&bands),
            Err(IndexError::BandCount { got: 4 })
        ));
    }
}
