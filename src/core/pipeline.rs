//! Per-granule orchestration: fetch, decode, georeference, index, encode
//! four products, upload, and release staging files. The pipeline never
//! retries; failures surface to the caller tagged with the granule id and
//! the batch driver decides what to do with them.
use std::fs;
use std::path::PathBuf;

use ndarray::Axis;
use tracing::info;

use crate::core::geo::derive_geotransform;
use crate::core::indices::compute_indices;
use crate::core::params::PipelineConfig;
use crate::error::{Error, Result};
use crate::io::hdf::{GranuleData, read_granule};
use crate::io::store::ObjectStore;
use crate::io::writers::save_geotiff;
use crate::types::{EPSG_WEB_MERCATOR, EPSG_WGS84, ProductKind};

/// Removes its staging files when dropped, so local copies never outlive a
/// granule run regardless of which step failed.
struct Staging {
    paths: Vec<PathBuf>,
}

impl Drop for Staging {
    fn drop(&mut self) {
        for path in &self.paths {
            let _ = fs::remove_file(path);
        }
    }
}

/// Orchestrator for one configured processing run. The store and the
/// configuration are supplied at construction; there is no global state.
pub struct GranulePipeline<S: ObjectStore> {
    store: S,
    config: PipelineConfig,
}

impl<S: ObjectStore> GranulePipeline<S> {
    pub fn new(store: S, config: PipelineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one granule end to end. The fetch is skipped when a staging
    /// copy of the source `.h5` is already present.
    pub fn process(&self, granule_id: &str) -> Result<()> {
        self.fetch_and_run(granule_id)
            .map_err(|e| Error::for_granule(granule_id, e))
    }

    /// Run the processing chain from already-decoded arrays. This is the
    /// entrypoint for embedders that decode granules themselves.
    pub fn process_decoded(&self, granule_id: &str, data: &GranuleData) -> Result<()> {
        fs::create_dir_all(&self.config.staging_dir)
            .map_err(|e| Error::for_granule(granule_id, e.into()))?;
        self.run(granule_id, data)
            .map_err(|e| Error::for_granule(granule_id, e))
    }

    fn fetch_and_run(&self, id: &str) -> Result<()> {
        fs::create_dir_all(&self.config.staging_dir)?;
        let h5_path = self.config.staging_dir.join(format!("{id}.h5"));
        let _h5_guard = Staging {
            paths: vec![h5_path.clone()],
        };

        if h5_path.exists() {
            info!("staging copy of {id} already present; skipping fetch");
        } else {
            self.store
                .fetch(&self.config.source_key(id), &h5_path)
                .map_err(Error::Fetch)?;
        }

        let data = read_granule(&h5_path)?;
        self.run(id, &data)
    }

    fn run(&self, id: &str, data: &GranuleData) -> Result<()> {
        let staged: Vec<(ProductKind, PathBuf)> = ProductKind::ALL
            .iter()
            .map(|&kind| (kind, self.config.staging_dir.join(kind.staging_name(id))))
            .collect();
        let _guard = Staging {
            paths: staged.iter().map(|(_, p)| p.clone()).collect(),
        };

        let geotransform = derive_geotransform(&data.latitude, &data.longitude)?;
        let indices = compute_indices(&data.mean)?;
        let observations = data.observations.clone().insert_axis(Axis(0));
        let reproject_to = self.config.web_mercator.then_some(EPSG_WEB_MERCATOR);

        for (kind, path) in &staged {
            let bands = match kind {
                ProductKind::MineralIndex => &indices,
                ProductKind::EmissivityBands => &data.mean,
                ProductKind::EmissivityStd => &data.std,
                ProductKind::Observations => &observations,
            };
            save_geotiff(
                path,
                bands,
                &geotransform,
                EPSG_WGS84,
                kind.pixel_type(),
                kind.descriptions(),
                reproject_to,
            )?;
        }

        // Encode-then-upload ordering: nothing partial ever leaves staging.
        for (kind, path) in &staged {
            self.store
                .put(path, &self.config.dest_key(*kind, id))
                .map_err(Error::Upload)?;
        }

        info!("granule {id}: {} products uploaded", staged.len());
        Ok(())
    }
}
