use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tirpro", version, about = "TIRPRO CLI")]
pub struct CliArgs {
    /// Single granule id to process (e.g. AG100.v003.44.-077.0001)
    #[arg(short, long)]
    pub granule: Option<String>,

    /// Manifest file with one granule filename per line (batch mode)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Root directory of the local object store
    #[arg(long)]
    pub store_root: PathBuf,

    /// Local staging directory for fetched granules and encoded products
    #[arg(long, default_value = "staging")]
    pub staging_dir: PathBuf,

    /// Object-store prefix the source .h5 granules live under
    #[arg(long, default_value = "basic/aster/Aster-GEDv3/h5")]
    pub src_prefix: String,

    /// Object-store prefix the output products are written under
    #[arg(long, default_value = "asterpreprocess/tirpipeline")]
    pub dst_prefix: String,

    /// Reproject every product from EPSG:4326 to EPSG:3857 before upload
    #[arg(long, default_value_t = false)]
    pub web_mercator: bool,

    /// Optional JSON pipeline configuration; overrides the per-field flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Abort the batch on the first failing granule
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
