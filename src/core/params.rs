use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Pipeline configuration suitable for config files and embedding.
///
/// Replaces process-wide mutable configuration: an instance is handed to the
/// orchestrator at construction and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Local staging directory for fetched granules and encoded products.
    pub staging_dir: PathBuf,
    /// Object-store prefix the source `.h5` granules live under.
    pub src_prefix: String,
    /// Object-store prefix the output products are written under.
    pub dst_prefix: String,
    /// Reproject every product from EPSG:4326 to EPSG:3857 before upload.
    pub web_mercator: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("staging"),
            src_prefix: "basic/aster/Aster-GEDv3/h5".to_string(),
            dst_prefix: "asterpreprocess/tirpipeline".to_string(),
            web_mercator: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(std::io::Error::other)
    }

    /// Full source key of a granule's `.h5` object.
    pub fn source_key(&self, granule_id: &str) -> String {
        format!("{}/{granule_id}.h5", self.src_prefix)
    }

    /// Full destination key of one output artifact.
    pub fn dest_key(&self, kind: crate::types::ProductKind, granule_id: &str) -> String {
        format!("{}/{}", self.dst_prefix, kind.object_key(granule_id))
    }
}
