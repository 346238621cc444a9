//! Shared types and constants used across TIRPRO.
//! Includes the output `PixelType`, the four `ProductKind`s with their
//! fixed band descriptions and object-store keys, and EPSG constants.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Geographic CRS all products are written in by default.
pub const EPSG_WGS84: u32 = 4326;
/// Target CRS for the optional reprojection pass.
pub const EPSG_WEB_MERCATOR: u32 = 3857;

/// Sentinel value marking an invalid/missing measurement in GED v3 granules.
pub const NODATA: f64 = -9999.0;

/// Element type of a written raster band.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum PixelType {
    Int16,
    Float32,
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelType::Int16 => write!(f, "Int16"),
            PixelType::Float32 => write!(f, "Float32"),
        }
    }
}

/// One of the four persisted artifacts produced per granule.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ProductKind {
    /// 5-band mineral-index stack, scaled by 1000.
    MineralIndex,
    /// 5-band TIR emissivity mean stack (bands 10..14).
    EmissivityBands,
    /// 5-band per-band standard deviation stack.
    EmissivityStd,
    /// Single-band observation count layer.
    Observations,
}

impl ProductKind {
    pub const ALL: [ProductKind; 4] = [
        ProductKind::MineralIndex,
        ProductKind::EmissivityBands,
        ProductKind::EmissivityStd,
        ProductKind::Observations,
    ];

    /// Element type the product is written with.
    pub fn pixel_type(&self) -> PixelType {
        match self {
            ProductKind::EmissivityStd => PixelType::Float32,
            _ => PixelType::Int16,
        }
    }

    /// Fixed per-band description tags, reproduced verbatim from the
    /// published products.
    pub fn descriptions(&self) -> &'static [&'static str] {
        match self {
            ProductKind::MineralIndex => &[
                "Garnet Index: (b12 + b14) / b13) *1000 -> Int16",
                "Mafic Mineral Index: (b12 / b13) * (b14 / b13) *1000 ->Int16",
                "Quartz Bearing Rock Index: (b10 / b12) * (b13 / b12) *1000 ->Int16",
                "Quartz Index: (b11 * b11) / (b10 * b12) *1000 ->Int16",
                "Carbonate Index: ((b12 + b14) / b13) *1000 ->Int16",
            ],
            ProductKind::EmissivityBands => &[
                "TIR Band 10 [Aster GEDv3] -> Int16",
                "TIR Band 11 [Aster GEDv3] -> Int16",
                "TIR Band 12 [Aster GEDv3] -> Int16",
                "TIR Band 13 [Aster GEDv3] -> Int16",
                "TIR Band 14 [Aster GEDv3] -> Int16",
            ],
            ProductKind::EmissivityStd => &[
                "TIR std Band 10 [Aster GEDv3] -> Float32",
                "TIR std Band 11 [Aster GEDv3] -> Float32",
                "TIR std Band 12 [Aster GEDv3] -> Float32",
                "TIR std Band 13 [Aster GEDv3] -> Float32",
                "TIR std Band 14 [Aster GEDv3] -> Float32",
            ],
            ProductKind::Observations => &["TIR Observations [Aster GEDv3] -> Int16"],
        }
    }

    /// Object key of the artifact, relative to the destination prefix.
    pub fn object_key(&self, granule_id: &str) -> String {
        match self {
            ProductKind::MineralIndex => format!("tirindex_4326/{granule_id}.tiff"),
            ProductKind::EmissivityBands => format!("gedv3_tir_4326/{granule_id}.tiff"),
            ProductKind::EmissivityStd => format!("errorindicator_4326/{granule_id}_std.tiff"),
            ProductKind::Observations => format!("errorindicator_4326/{granule_id}_obs.tiff"),
        }
    }

    /// File name of the artifact in the local staging directory.
    pub fn staging_name(&self, granule_id: &str) -> String {
        match self {
            ProductKind::MineralIndex => format!("{granule_id}_index.tiff"),
            ProductKind::EmissivityBands => format!("{granule_id}_bands.tiff"),
            ProductKind::EmissivityStd => format!("{granule_id}_std.tiff"),
            ProductKind::Observations => format!("{granule_id}_obs.tiff"),
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductKind::MineralIndex => write!(f, "MineralIndex"),
            ProductKind::EmissivityBands => write!(f, "EmissivityBands"),
            ProductKind::EmissivityStd => write!(f, "EmissivityStd"),
            ProductKind::Observations => write!(f, "Observations"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_counts_match_descriptions() {
        assert_eq!(ProductKind::MineralIndex.descriptions().len(), 5);
        assert_eq!(ProductKind::EmissivityBands.descriptions().len(), 5);
        assert_eq!(ProductKind::EmissivityStd.descriptions().len(), 5);
        assert_eq!(ProductKind::Observations.descriptions().len(), 1);
    }

    #[test]
    fn object_keys_follow_published_layout() {
        let id = "AG100.v003.44.-077.0001";
        assert_eq!(
            ProductKind::MineralIndex.object_key(id),
            "tirindex_4326/AG100.v003.44.-077.0001.tiff"
        );
        assert_eq!(
            ProductKind::EmissivityBands.object_key(id),
            "gedv3_tir_4326/AG100.v003.44.-077.0001.tiff"
        );
        assert_eq!(
            ProductKind::EmissivityStd.object_key(id),
            "errorindicator_4326/AG100.v003.44.-077.0001_std.tiff"
        );
        assert_eq!(
            ProductKind::Observations.object_key(id),
            "errorindicator_4326/AG100.v003.44.-077.0001_obs.tiff"
        );
    }

    #[test]
    fn std_product_is_float32() {
        for kind in ProductKind::ALL {
            let expected = if kind == ProductKind::EmissivityStd {
                PixelType::Float32
            } else {
                PixelType::Int16
            };
            assert_eq!(kind.pixel_type(), expected);
        }
    }
}
