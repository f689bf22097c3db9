//! Check command implementation
//!
//! Prints the resolved configuration and the worker pool the kernels run on.

use ad_operators::ParallelConfig;
use tracing::info;

use crate::config::CliConfig;

/// Run the check command
pub fn run(config_path: &str, config: &CliConfig) -> anyhow::Result<()> {
    info!("Checking configuration...");

    let source = if std::path::Path::new(config_path).exists() {
        config_path
    } else {
        "(defaults)"
    };
    let kernels = if ParallelConfig::always_parallel().should_parallelize(0) {
        "enabled"
    } else {
        "disabled (built without `parallel`)"
    };

    println!("Configuration: {}", source);
    println!("{}", toml::to_string_pretty(config)?);
    println!("Parallel kernels: {}", kernels);
    println!("Worker threads:   {}", rayon::current_num_threads());

    info!("Check complete");
    Ok(())
}
