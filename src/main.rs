use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hwpx_spell::{
    Config, ProxyClient, Session, UpstreamSpeller, ViewFormat,
    server::{ProxyState, start_server},
    spell_check::{Corrector, check_paragraphs},
    view::{parse_html, parse_text, render_view},
};

#[derive(Parser)]
#[command(name = "hwpx-spell")]
#[command(version)]
#[command(about = "Spell-check and edit the body text of .hwpx documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the editable view of a document
    Extract {
        /// Input .hwpx file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ViewFormat,
    },

    /// Spell-check every paragraph and save the corrected document
    Check {
        /// Input .hwpx file
        file: PathBuf,

        /// Output file (defaults to the configured file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spell-check endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Call the remote speller directly instead of the endpoint
        #[arg(long)]
        direct: bool,
    },

    /// Write an edited view back into the document
    Apply {
        /// Input .hwpx file
        file: PathBuf,

        /// Edited view: .html/.htm is read as <p> blocks, anything else as one line per paragraph
        #[arg(short, long)]
        edited: PathBuf,

        /// Output file (defaults to the configured file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the HTTP spell-check proxy
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<String>,

        /// Remote speller URL
        #[arg(long)]
        upstream: Option<String>,
    },

    /// Manage the configuration file
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Print the configuration file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to read configuration")?;

    match cli.command {
        Commands::Extract { file, format } => {
            let session = load_session(&file).await?;
            print!("{}", render_view(session.view(), &format)?);
        }
        Commands::Check {
            file,
            output,
            endpoint,
            direct,
        } => {
            let mut session = load_session(&file).await?;
            let settings = &config.spell_check;

            let summary = if direct {
                let url = endpoint.unwrap_or_else(|| settings.upstream_url.clone());
                let speller = UpstreamSpeller::new(url, settings.timeout())?;
                spell_check(&mut session, &speller, settings.max_chars).await?
            } else {
                let url = endpoint.unwrap_or_else(|| settings.endpoint.clone());
                let client = ProxyClient::new(url, settings.timeout())?;
                spell_check(&mut session, &client, settings.max_chars).await?
            };
            println!("{summary}");

            let output = output_path(output, &config);
            save_session(&session, &output).await?;
        }
        Commands::Apply {
            file,
            edited,
            output,
        } => {
            let mut session = load_session(&file).await?;
            let content = tokio::fs::read_to_string(&edited)
                .await
                .with_context(|| format!("Failed to read {}", edited.display()))?;

            let view = if is_html(&edited) {
                parse_html(&content)
            } else {
                parse_text(&content)
            };
            if view.len() != session.view().len() {
                eprintln!(
                    "Warning: the edited view has {} paragraphs, the document has {}. \
                    Paragraphs are matched by position.",
                    view.len(),
                    session.view().len()
                );
            }
            session.set_view(view);

            let output = output_path(output, &config);
            save_session(&session, &output).await?;
        }
        Commands::Serve { bind, upstream } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let upstream = upstream.unwrap_or_else(|| config.spell_check.upstream_url.clone());
            let speller = UpstreamSpeller::new(upstream, config.spell_check.timeout())?;
            start_server(&bind, ProxyState::new(speller))
                .await
                .with_context(|| format!("Failed to serve on {bind}"))?;
        }
        Commands::Config { init, path } => {
            if path {
                match Config::get_config_path() {
                    Some(config_path) => println!("{}", config_path.display()),
                    None => bail!("No configuration directory on this platform"),
                }
            }
            if init {
                let written = Config::init_default()?;
                println!("Default configuration written to {}", written.display());
            }
            if !path && !init {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_session(file: &Path) -> Result<Session> {
    Session::load(file)
        .await
        .with_context(|| format!("Failed to load {}", file.display()))
}

async fn spell_check<C: Corrector>(
    session: &mut Session,
    corrector: &C,
    max_chars: usize,
) -> Result<String> {
    let report = check_paragraphs(corrector, session.view(), max_chars).await?;
    let summary = report.summary();
    session.set_view(report.view);
    Ok(summary)
}

async fn save_session(session: &Session, output: &Path) -> Result<()> {
    session
        .save_to(output)
        .await
        .with_context(|| format!("Failed to save {}", output.display()))?;
    info!("Document written to {}", output.display());
    println!("Saved {}", output.display());
    Ok(())
}

fn output_path(output: Option<PathBuf>, config: &Config) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(&config.output.file_name))
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref(),
        Some("html" | "htm")
    )
}
