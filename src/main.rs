//! Movable Dashboard - CLI entry point
//!
//! Launches the terminal dashboard (the default), dumps the startup state as
//! JSON, or manages the configuration file.

use clap::{Parser, Subcommand};
use movable_dashboard::config::schema::LogLevel;
use movable_dashboard::config::{default, xdg, Config, ConfigError, ConfigLoader};
use movable_dashboard::dashboard::Dashboard;
use movable_dashboard::layout::Breakpoint;
use movable_dashboard::logging::{self, LogTarget};
use movable_dashboard::tui::app::App;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Terminal dashboard with movable cards and user-defined charts
#[derive(Parser)]
#[command(name = "mdash")]
#[command(version, about = "Terminal dashboard with movable cards and user-defined charts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the mdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui {
        /// Configuration file (defaults to the XDG location)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Force a breakpoint instead of following the terminal width
        #[arg(long)]
        breakpoint: Option<Breakpoint>,
    },

    /// Print the startup dashboard state (layouts, charts, cards) as JSON
    Dump {
        /// Configuration file (defaults to the XDG location)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate a configuration file (defaults to the XDG location)
    Validate {
        /// File to validate
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Tui {
        config: None,
        breakpoint: None,
    }) {
        Commands::Tui { config, breakpoint } => run_tui(config.as_deref(), breakpoint),
        Commands::Dump { config } => {
            init_cli_logging();
            run_dump(config.as_deref())
        }
        Commands::Config { action } => {
            init_cli_logging();
            let result = match action {
                ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
                    println!("Created configuration at {}", path.display());
                }),
                ConfigAction::Path => {
                    println!("{}", xdg::config_path().display());
                    Ok(())
                }
                ConfigAction::Validate { path } => run_validate(path.as_deref()),
            };
            if let Err(e) = result {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}

/// Non-TUI subcommands log warnings and errors to stderr.
fn init_cli_logging() {
    if let Err(e) = logging::init(LogLevel::Warn, LogTarget::Stderr) {
        eprintln!("Warning: logging disabled: {e}");
    }
}

/// Loads and checks the configuration.
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = ConfigLoader::load(path)?;
    config.validate()?;
    Ok(config)
}

fn run_tui(config_path: Option<&Path>, breakpoint: Option<Breakpoint>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(
        config.tui.log_level,
        LogTarget::for_tui(&config.tui.log_file),
    ) {
        eprintln!("Error: cannot open log file {}: {e}", config.tui.log_file);
        return ExitCode::FAILURE;
    }

    let (dashboard, tick_rate) = match Dashboard::from_config(&config)
        .and_then(|dashboard| Ok((dashboard, config.tick_rate()?)))
    {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(?breakpoint, "starting tui");
    let mut app = App::new(dashboard, tick_rate, breakpoint);
    if let Err(e) = rt.block_on(app.run()) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_dump(config_path: Option<&Path>) -> ExitCode {
    let dashboard = match load_config(config_path).and_then(|c| Dashboard::from_config(&c)) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&dashboard.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize dashboard: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_validate(path: Option<&Path>) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    let dashboard = Dashboard::from_config(&config)?;
    let shown = path.map_or_else(xdg::config_path, Path::to_path_buf);
    println!("Configuration is valid: {}", shown.display());
    println!(
        "  {} cards, {} charts, {} unsupported",
        dashboard.widgets().cards().len(),
        dashboard.charts().len(),
        dashboard.widgets().unsupported().len()
    );
    for warning in dashboard.warnings() {
        println!("  warning: {warning}");
    }
    Ok(())
}
