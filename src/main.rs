use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mercalike::connector::tui;
use mercalike::{AdvisoryBackend, Commands, Container, ContainerConfig, Router};

/// Delay applied to the mock backend in the TUI so the waiting indicator shows.
const MOCK_TUI_LATENCY: Duration = Duration::from_millis(1200);

#[derive(Parser)]
#[command(name = "mercalike")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Advisory backend answering the questions
    #[arg(long, global = true, value_enum, default_value = "gemini")]
    provider: AdvisoryBackend,

    /// Shorthand for `--provider mock`
    #[arg(long, global = true)]
    mock_advisor: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn backend(&self) -> AdvisoryBackend {
        if self.mock_advisor {
            AdvisoryBackend::Mock
        } else {
            self.provider
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, Commands::Tui);

    // Log lines would corrupt the alternate screen, so the TUI only logs on request.
    if !is_tui || cli.verbose {
        init_logging(cli.verbose)?;
    }

    let backend = cli.backend();
    let container = Container::new(ContainerConfig {
        backend,
        mock_latency: if is_tui {
            MOCK_TUI_LATENCY
        } else {
            Duration::ZERO
        },
    })?;
    debug!("Advisory backend: {}", container.backend());

    if is_tui {
        return tui::run(container.consultation_widget()).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
