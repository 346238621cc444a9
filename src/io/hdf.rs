//! ASTER GED v3 granule decoder. Granules are HDF5 files read through
//! GDAL's subdataset mechanism; each named dataset is opened as its own
//! GDAL dataset and read band-by-band into f64 ndarrays.
use std::path::{Path, PathBuf};

use gdal::Dataset;
use ndarray::{Array2, Array3};
use thiserror::Error;

const EMISSIVITY_MEAN: &str = "//Emissivity/Mean";
const EMISSIVITY_SDEV: &str = "//Emissivity/SDev";
const LATITUDE: &str = "//Geolocation/Latitude";
const LONGITUDE: &str = "//Geolocation/Longitude";
const OBSERVATIONS: &str = "//Observations/NumObs";
const LAND_WATER_MAP: &str = "//Land Water Map/LWmap";
const NDVI_MEAN: &str = "//NDVI/Mean";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("granule file not found: {0}")]
    NotFound(PathBuf),
    #[error("missing or unreadable dataset {name}: {source}")]
    Dataset {
        name: String,
        #[source]
        source: gdal::errors::GdalError,
    },
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("malformed granule: {0}")]
    Shape(String),
}

/// Decoded arrays of one granule, the subset the pipeline consumes.
#[derive(Debug, Clone)]
pub struct GranuleData {
    /// Emissivity mean, band-major `[5][rows][cols]` (b10..b14).
    pub mean: Array3<f64>,
    /// Emissivity standard deviation, `[5][rows][cols]`.
    pub std: Array3<f64>,
    pub latitude: Array2<f64>,
    pub longitude: Array2<f64>,
    pub observations: Array2<f64>,
}

/// Reader over the named datasets of one `.h5` granule.
pub struct GranuleReader {
    path: PathBuf,
}

impl GranuleReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DecodeError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(DecodeError::NotFound(path));
        }
        Ok(Self { path })
    }

    fn dataset(&self, name: &str) -> Result<Dataset, DecodeError> {
        // GDAL HDF5 subdataset syntax: HDF5:"<file>":<dataset path>
        let spec = format!("HDF5:\"{}\":{}", self.path.display(), name);
        Dataset::open(&spec).map_err(|source| DecodeError::Dataset {
            name: name.to_string(),
            source,
        })
    }

    fn read_band(ds: &Dataset, index: usize) -> Result<Array2<f64>, DecodeError> {
        let (size_x, size_y) = ds.raster_size();
        let band = ds.rasterband(index)?;
        let buf = band.read_as::<f64>((0, 0), (size_x, size_y), (size_x, size_y), None)?;
        Array2::from_shape_vec((size_y, size_x), buf.data().to_vec())
            .map_err(|e| DecodeError::Shape(e.to_string()))
    }

    fn read_2d(&self, name: &str) -> Result<Array2<f64>, DecodeError> {
        let ds = self.dataset(name)?;
        Self::read_band(&ds, 1)
    }

    fn read_3d(&self, name: &str) -> Result<Array3<f64>, DecodeError> {
        let ds = self.dataset(name)?;
        let bands = ds.raster_count() as usize;
        let (size_x, size_y) = ds.raster_size();
        let mut out = Array3::<f64>::zeros((bands, size_y, size_x));
        for b in 0..bands {
            let plane = Self::read_band(&ds, b + 1)?;
            out.index_axis_mut(ndarray::Axis(0), b).assign(&plane);
        }
        Ok(out)
    }

    pub fn emissivity_mean(&self) -> Result<Array3<f64>, DecodeError> {
        self.read_3d(EMISSIVITY_MEAN)
    }

    pub fn emissivity_std(&self) -> Result<Array3<f64>, DecodeError> {
        self.read_3d(EMISSIVITY_SDEV)
    }

    pub fn latitude(&self) -> Result<Array2<f64>, DecodeError> {
        self.read_2d(LATITUDE)
    }

    pub fn longitude(&self) -> Result<Array2<f64>, DecodeError> {
        self.read_2d(LONGITUDE)
    }

    pub fn observations(&self) -> Result<Array2<f64>, DecodeError> {
        self.read_2d(OBSERVATIONS)
    }

    pub fn land_water_map(&self) -> Result<Array2<f64>, DecodeError> {
        self.read_2d(LAND_WATER_MAP)
    }

    pub fn ndvi(&self) -> Result<Array2<f64>, DecodeError> {
        self.read_2d(NDVI_MEAN)
    }
}

/// Decode the datasets the pipeline consumes and validate their shapes.
pub fn read_granule<P: AsRef<Path>>(path: P) -> Result<GranuleData, DecodeError> {
    let reader = GranuleReader::open(path)?;
    let mean = reader.emissivity_mean()?;
    let std = reader.emissivity_std()?;
    let latitude = reader.latitude()?;
    let longitude = reader.longitude()?;
    let observations = reader.observations()?;

    let (bands, rows, cols) = mean.dim();
    if bands != crate::core::indices::BAND_COUNT {
        return Err(DecodeError::Shape(format!(
            "emissivity mean has {bands} bands, expected {}",
            crate::core::indices::BAND_COUNT
        )));
    }
    if std.dim() != mean.dim() {
        return Err(DecodeError::Shape(format!(
            "emissivity std shape {:?} does not match mean {:?}",
            std.dim(),
            mean.dim()
        )));
    }
    for (name, shape) in [
        ("latitude", latitude.dim()),
        ("longitude", longitude.dim()),
        ("observations", observations.dim()),
    ] {
        if shape != (rows, cols) {
            return Err(DecodeError::Shape(format!(
                "{name} grid is {shape:?}, expected ({rows}, {cols})"
            )));
        }
    }

    Ok(GranuleData {
        mean,
        std,
        latitude,
        longitude,
        observations,
    })
}
