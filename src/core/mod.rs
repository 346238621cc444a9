//! Core processing building blocks: geotransform derivation, mineral-index
//! computation, pipeline configuration, and the per-granule orchestrator.
pub mod geo;
pub mod indices;
pub mod params;
pub mod pipeline;
