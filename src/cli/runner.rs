use tracing::info;

use tirpro::api::{process_granule, process_manifest};
use tirpro::core::params::PipelineConfig;
use tirpro::io::store::LocalStore;

use super::args::CliArgs;
use super::errors::AppError;

fn build_config(args: &CliArgs) -> Result<PipelineConfig, AppError> {
    if let Some(path) = &args.config {
        return Ok(PipelineConfig::from_file(path)?);
    }
    Ok(PipelineConfig {
        staging_dir: args.staging_dir.clone(),
        src_prefix: args.src_prefix.clone(),
        dst_prefix: args.dst_prefix.clone(),
        web_mercator: args.web_mercator,
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let config = build_config(&args)?;
    let store = LocalStore::new(&args.store_root);

    if let Some(manifest) = &args.manifest {
        info!("starting batch processing from manifest: {:?}", manifest);
        let report = process_manifest(store, config, manifest, !args.fail_fast)?;
        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Errors: {}", report.errors);
    } else {
        let granule = args.granule.ok_or(AppError::MissingArgument {
            arg: "--granule or --manifest".to_string(),
        })?;
        process_granule(store, config, &granule)?;
        info!("Successfully processed: {granule}");
    }

    Ok(())
}
