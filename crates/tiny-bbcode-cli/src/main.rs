use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tiny_bbcode_config::Config;
use tiny_bbcode_engine::{convert, render, wrap_preview};

/// Convert BBCode to HTML
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input is already HTML-escaped; convert tags only
    #[arg(long, action = ArgAction::SetTrue)]
    escaped: bool,

    /// Wrap the output in a <div> with this class
    #[arg(long, value_name = "CLASS")]
    wrap: Option<String>,

    /// Config file (default: ~/.config/tiny-bbcode/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

/// Settings after merging command-line flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    escape_input: bool,
    container_class: Option<String>,
    output: Option<PathBuf>,
}

impl Settings {
    fn merge(cli: &Cli, config: &Config) -> Self {
        Self {
            escape_input: config.escape_input && !cli.escaped,
            container_class: cli.wrap.clone().or_else(|| config.container_class.clone()),
            output: cli
                .output
                .as_deref()
                .map(|output| config.resolve_output(output)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if cli.init_config {
        return init_config(cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::merge(&cli, &config);
    log::debug!("settings: {settings:?}");

    let text = read_input(cli.input.as_deref())?;
    let html = convert_text(&text, &settings);

    match &settings.output {
        Some(path) => {
            log::info!("writing {}", path.display());
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let config = Config::default();
    match path {
        Some(path) => {
            config.save_to_path(path)?;
            log::info!("wrote default config to {}", path.display());
        }
        None => {
            config.save()?;
            log::info!("wrote default config to {}", Config::config_path().display());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match loaded {
        Some(config) => Ok(config),
        None => {
            log::info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            log::info!("reading {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            log::info!("reading stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn convert_text(text: &str, settings: &Settings) -> String {
    let body = if settings.escape_input {
        render(text)
    } else {
        convert(text)
    };
    match &settings.container_class {
        Some(class) => wrap_preview(&body, Some(class)),
        None => body,
    }
}
