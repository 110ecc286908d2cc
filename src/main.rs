use anyhow::Result;
use clap::{Parser, Subcommand};
use modtranslate::config::Paths;
use modtranslate::{App, Config, APP_VERSION};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "modtranslate")]
#[command(
    author,
    version = APP_VERSION,
    about = "Track and reconcile translations of Bethesda game mods"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Mods directory override for this invocation
    #[arg(long)]
    mods_dir: Option<String>,

    /// Target language override for this invocation
    #[arg(long)]
    language: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan installed mods for translation status
    Scan {
        /// Also look for translations online
        #[arg(long)]
        online: bool,
    },

    /// Check installed translations against the current mod files
    DeepScan,

    /// Manage translations
    Translation {
        #[command(subcommand)]
        action: TranslationCommands,
    },

    /// Manage the masterlist
    Masterlist {
        #[command(subcommand)]
        action: MasterlistCommands,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TranslationCommands {
    /// List installed translations
    List,
    /// Show translation details
    Show { name: String },
    /// Create a translation for a mod from database strings
    Create {
        /// Mod name
        name: String,
        /// Only include files the database covers completely
        #[arg(long)]
        complete_only: bool,
    },
    /// Delete a translation
    Delete { name: String },
    /// Rename a translation
    Rename { old_name: String, new_name: String },
    /// Reset one string of a translation to untranslated
    ResetString {
        name: String,
        /// Covered file, relative to the mod root
        file: String,
        /// Position of the string within the file
        index: usize,
    },
}

#[derive(Subcommand)]
enum MasterlistCommands {
    /// Download the masterlist for the configured language
    Update,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "modtranslate=info",
        1 => "modtranslate=debug",
        2 => "modtranslate=trace",
        _ => "trace",
    };

    let paths = Paths::new();
    std::fs::create_dir_all(paths.data_dir()).ok();

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file());

    match file {
        Ok(file) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Arc::new(file)),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
            tracing::warn!("Logging to stderr only: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Load configuration
    let mut config = Config::load().await?;
    if let Some(mods_dir) = cli.mods_dir.as_deref() {
        let trimmed = mods_dir.trim();
        if trimmed.is_empty() {
            anyhow::bail!("--mods-dir cannot be empty");
        }
        config.mods_dir = Some(trimmed.to_string());
    }
    if let Some(language) = cli.language.as_deref() {
        config.language = language.trim().to_string();
    }

    // Initialize app
    let mut app = App::new(config).await?;

    match cli.command {
        Commands::Scan { online } => app.cmd_scan(online).await?,
        Commands::DeepScan => app.cmd_deep_scan().await?,
        Commands::Translation { action } => match action {
            TranslationCommands::List => app.cmd_translation_list().await?,
            TranslationCommands::Show { name } => app.cmd_translation_show(&name).await?,
            TranslationCommands::Create {
                name,
                complete_only,
            } => app.cmd_translation_create(&name, complete_only).await?,
            TranslationCommands::Delete { name } => app.cmd_translation_delete(&name).await?,
            TranslationCommands::Rename { old_name, new_name } => {
                app.cmd_translation_rename(&old_name, &new_name).await?
            }
            TranslationCommands::ResetString { name, file, index } => {
                app.cmd_translation_reset_string(&name, &file, index)
                    .await?
            }
        },
        Commands::Masterlist { action } => match action {
            MasterlistCommands::Update => app.cmd_masterlist_update().await?,
        },
        Commands::Config { action } => match action {
            ConfigCommands::Show => app.cmd_config_show().await?,
        },
    }

    Ok(())
}
