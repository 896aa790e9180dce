//! resloc - resource location toolkit
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use resloc::cli::{Cli, Commands};
use resloc::config::{Config, ConfigManager};
use resloc::error::ReslocResult;
use resloc::mount::MountRegistry;
use resloc::resolve::{Resolver, RuntimeImage};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> ReslocResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load()?;

    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Resolve(args) => with_resolver(&config, |resolver| {
            resloc::cli::commands::resolve(args, resolver)
        }),
        Commands::Hash(args) => with_resolver(&config, |resolver| {
            resloc::cli::commands::hash(args, resolver, &config)
        }),
        Commands::Name(args) => resloc::cli::commands::name(args),
        Commands::Config(args) => resloc::cli::commands::config(args, &config_manager, &config),
    }
}

/// Run `command` against a process-wide registry, closing every mount after
fn with_resolver<F>(config: &Config, command: F) -> ReslocResult<()>
where
    F: FnOnce(&Resolver) -> ReslocResult<()>,
{
    let mounts = Arc::new(MountRegistry::new());
    let resolver = build_resolver(Arc::clone(&mounts), config);

    let result = command(&resolver);

    mounts.close_all();
    result
}

/// 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("resloc=warn"),
        1 => EnvFilter::new("resloc=info"),
        _ => EnvFilter::new("resloc=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();

    if config.general.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_resolver(mounts: Arc<MountRegistry>, config: &Config) -> Resolver {
    let resolver = Resolver::new(mounts);

    let image = match config.runtime_image.path {
        Some(ref path) => Some(RuntimeImage::new(path.clone())),
        None => RuntimeImage::discover(),
    };

    match image {
        Some(image) => {
            debug!("Using runtime image {}", image.path().display());
            resolver.with_runtime_image(image)
        }
        None => resolver,
    }
}
