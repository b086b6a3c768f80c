use hwprofile::cli::{Cli, Commands, ConfigAction};
use hwprofile::config::Config;
use hwprofile::error::{HwProfileError, Result};
use hwprofile::pipeline::ProfilePipeline;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Normalize { file } => {
            cmd_normalize(cli.config, &file)?;
        }
        Commands::Extract { file, normalize } => {
            cmd_extract(cli.config, &file, normalize)?;
        }
        Commands::Batch { files, output } => {
            cmd_batch(cli.config, &files, output)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "hwprofile=debug" } else { "hwprofile=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays valid JSON
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_normalize(config_path: Option<PathBuf>, file: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let pipeline = ProfilePipeline::new(&config)?;
    let (name, capture) = read_capture(file)?;

    let normalized = pipeline.normalizer().normalize(&name, &capture);
    if normalized.is_empty() {
        eprintln!("Skipped {}: not a valid lshw capture", name);
        return Ok(());
    }

    print_json(&normalized, config.output.pretty)
}

fn cmd_extract(config_path: Option<PathBuf>, file: &Path, normalize: bool) -> Result<()> {
    let mut config = load_config(config_path)?;
    config.output.normalize_first = normalize;

    let pipeline = ProfilePipeline::new(&config)?;
    let (name, capture) = read_capture(file)?;

    match pipeline.process(&name, &capture) {
        Some(result) => print_json(&result.profile, config.output.pretty),
        None => {
            eprintln!("Skipped {}: not a valid lshw capture", name);
            Ok(())
        }
    }
}

fn cmd_batch(config_path: Option<PathBuf>, files: &[PathBuf], output: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let pipeline = ProfilePipeline::new(&config)?;

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        match read_capture(file) {
            Ok(document) => documents.push(document),
            // Unreadable files are skipped like invalid captures
            Err(e) => tracing::error!("{}", e),
        }
    }

    let (results, mut stats) = pipeline.process_batch_parallel(&documents, config.output.parallelism);
    stats.documents = files.len();
    stats.skipped = files.len() - stats.extracted;

    let mut lines = String::new();
    for result in &results {
        let line = serde_json::to_string(&result.profile).map_err(|e| HwProfileError::Json {
            source: e,
            context: format!("Failed to serialize profile of {}", result.name),
        })?;
        lines.push_str(&line);
        lines.push('\n');
    }

    match output {
        Some(path) => {
            std::fs::write(&path, lines).map_err(|e| HwProfileError::Io {
                source: e,
                context: format!("Failed to write profiles: {:?}", path),
            })?;
            println!("✓ Wrote {} profiles to {}", results.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(lines.as_bytes())
                .map_err(|e| HwProfileError::Io {
                    source: e,
                    context: "Failed to write profiles to stdout".to_string(),
                })?;
        }
    }

    eprintln!(
        "Batch: {} documents, {} normalized, {} extracted, {} skipped ({}ms)",
        stats.documents, stats.normalized, stats.extracted, stats.skipped, stats.processing_time_ms
    );

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let text = toml::to_string_pretty(&config)?;
            println!("{}", text);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| HwProfileError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::debug!(
            "Config file not found, using defaults. Run 'hwprofile config init' to create one."
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        return Ok(config);
    }

    Config::load(&path)
}

/// Read a capture file, naming it after its file name
fn read_capture(path: &Path) -> Result<(String, Value)> {
    let content = std::fs::read_to_string(path).map_err(|e| HwProfileError::Io {
        source: e,
        context: format!("Failed to read capture: {:?}", path),
    })?;

    let capture = serde_json::from_str(&content).map_err(|e| HwProfileError::Json {
        source: e,
        context: format!("Failed to parse capture: {:?}", path),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok((name, capture))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| HwProfileError::Json {
        source: e,
        context: "Failed to serialize output".to_string(),
    })?;

    println!("{}", rendered);
    Ok(())
}
