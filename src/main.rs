//! Wheelwatch - Wheel Gesture Analysis Engine
//!
//! Classifies recorded wheel/trackpad delta streams into semantic gestures.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wheelwatch::app::cli::{Cli, Commands, ConfigAction};
use wheelwatch::app::config::Config;
use wheelwatch::workflow::replay::Replayer;
use wheelwatch::workflow::synth::SynthPattern;
use wheelwatch::workflow::trace::WheelTrace;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Replay {
            input,
            output,
            detailed,
        } => {
            run_replay(&input, output, detailed, &config)?;
        }
        Commands::Synth { pattern, output } => {
            run_synth(&pattern, output)?;
        }
        Commands::List { detailed } => {
            run_list(detailed)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_replay(
    input: &Path,
    output: Option<PathBuf>,
    detailed: bool,
    config: &Config,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Trace file not found: {:?}", input);
    }

    let trace = WheelTrace::load(input)?;
    info!(
        "Loaded trace '{}' with {} samples",
        trace.metadata.name,
        trace.len()
    );

    let replayer = Replayer::new(
        config.analyzer,
        config.wheelstop,
        config.session.clone(),
    );
    let report = replayer.run(&trace)?;

    println!(
        "Replayed '{}': {} samples, {} notifications",
        report.trace_name,
        report.samples_processed,
        report.notifications.len()
    );
    for n in &report.notifications {
        if detailed {
            match (&n.x, &n.y) {
                (Some(x), Some(y)) => println!(
                    "  {:>10.2}  {:<22} x: {{delta: {}, sign: {}, speed: {:.4}}}  y: {{delta: {}, sign: {}, speed: {:.4}}}",
                    n.at, n.name, x.delta, x.sign, x.speed, y.delta, y.sign, y.speed
                ),
                _ => println!("  {:>10.2}  {}", n.at, n.name),
            }
        } else {
            println!("  {:>10.2}  {}", n.at, n.name);
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        info!("Saved replay report to {:?}", path);
    }

    Ok(())
}

fn run_synth(pattern: &str, output: Option<String>) -> anyhow::Result<()> {
    let pattern: SynthPattern = pattern.parse()?;
    let trace = pattern.generate();

    let traces_dir = Cli::traces_dir();
    std::fs::create_dir_all(&traces_dir)?;

    let file_name = output.unwrap_or_else(|| pattern.name().to_string());
    let path = traces_dir.join(format!("{}.json", file_name));
    trace.save(&path)?;

    info!("Generated {} samples", trace.len());
    println!("Saved '{}' trace to {:?}", pattern.name(), path);

    Ok(())
}

fn run_list(detailed: bool) -> anyhow::Result<()> {
    let traces_dir = Cli::traces_dir();

    if !traces_dir.exists() {
        println!("No traces found in {}", traces_dir.display());
        println!("Generate one with: wheelwatch synth");
        return Ok(());
    }

    println!("Traces in {:?}:", traces_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&traces_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match WheelTrace::load(&path) {
                Ok(trace) => {
                    let m = &trace.metadata;
                    let description = m.description.as_deref().unwrap_or("-");
                    println!(
                        "  {}  ({} samples, {:.0} ms, {})",
                        file_name, m.sample_count, m.duration_ms, description
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
        println!("Generate one with: wheelwatch synth");
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::traces_dir())?;
    println!("Created traces directory: {:?}", Cli::traces_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Get { key } => {
            let value = toml::Value::try_from(config)
                .map_err(|e| anyhow::anyhow!("config serialization failed: {}", e))?;
            match lookup_value(&value, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => anyhow::bail!("Configuration key '{}' not found", key),
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'wheelwatch init' first.");
            }

            let content = std::fs::read_to_string(&config_path)?;
            let mut doc: toml::Value = toml::from_str(&content)?;

            if !set_value(&mut doc, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }

            // Re-validate before persisting
            let updated: Config = doc
                .try_into()
                .map_err(|e| anyhow::anyhow!("invalid config after update: {}", e))?;
            updated.validate()?;
            updated.save(&config_path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Navigate a dotted key through nested TOML tables.
fn lookup_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Set a dotted key to a raw string value, keeping the existing value's type.
/// Returns false if the key does not exist or the value does not parse.
fn set_value(doc: &mut toml::Value, key: &str, raw: &str) -> bool {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = match parts.pop() {
        Some(leaf) => leaf,
        None => return false,
    };

    let mut current = doc;
    for part in parts {
        current = match current.get_mut(part) {
            Some(v) => v,
            None => return false,
        };
    }

    let existing = match current.get(leaf) {
        Some(v) => v,
        None => return false,
    };

    let parsed = match existing {
        toml::Value::Boolean(_) => raw.parse().ok().map(toml::Value::Boolean),
        toml::Value::Integer(_) => raw.parse().ok().map(toml::Value::Integer),
        toml::Value::Float(_) => raw.parse().ok().map(toml::Value::Float),
        toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
        _ => None,
    };

    match parsed {
        Some(new_value) => {
            if let Some(table) = current.as_table_mut() {
                table.insert(leaf.to_string(), new_value);
                true
            } else {
                false
            }
        }
        None => {
            warn!("value '{}' does not match the type of '{}'", raw, key);
            false
        }
    }
}
