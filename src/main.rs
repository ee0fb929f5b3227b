mod cli;

use airtime::{config, DurationResolver};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve { path, json } => resolve(cli.config.as_deref(), &path, json),
        Commands::Container { file } => container(&file),
        Commands::CheckTools => check_tools(),
        Commands::Validate { config } => validate(config.or(cli.config).as_deref()),
    }
}

fn resolve(config_path: Option<&std::path::Path>, path: &str, json: bool) -> Result<()> {
    let config = config::ResolverConfig::load(config_path)?;
    let resolver = DurationResolver::new(&config);

    let resolution = resolver.resolve(path);
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else if resolution.is_resolved() {
        println!("{}", resolution.seconds());
    } else {
        tracing::warn!(path, "duration could not be determined");
        println!("0");
    }
    Ok(())
}

fn container(file: &std::path::Path) -> Result<()> {
    match airtime_container::file_duration(file)? {
        Some(seconds) => println!("{seconds}"),
        None => {
            tracing::warn!(path = %file.display(), "container parsed but duration undetermined");
            println!("0");
        }
    }
    Ok(())
}

fn check_tools() -> Result<()> {
    let mut all_available = true;
    for info in airtime_probe::check_tools() {
        if info.available {
            println!(
                "{:10} ok  {}  ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown version"),
                info.path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            );
        } else {
            all_available = false;
            println!("{:10} MISSING", info.name);
        }
    }
    if !all_available {
        tracing::warn!("some tools missing; only byte-level strategies will work");
    }
    Ok(())
}

fn validate(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::ResolverConfig::load(config_path)?;
    println!(
        "config ok: {} strategies, {} ms probe timeout",
        config.strategies.len(),
        config.probe_timeout_ms
    );
    Ok(())
}
