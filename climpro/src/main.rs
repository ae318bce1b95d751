use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use climpro::{
    commands::{email::EmailCommand, serve::serve},
    telemetry,
};
use climpro_config::Config;
use climpro_utils::climpro_version;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    telemetry::init_tracing();

    let config = climpro_config::load().context("Failed to load config")?;
    let _sentry_guard = telemetry::init_sentry(config.sentry.as_ref());

    cli.command.invoke(config).await
}

#[derive(Debug, Parser)]
#[command(version = climpro_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server to receive contact form submissions
    #[command(aliases(["run", "start", "s"]))]
    Serve,
    /// Test email deliverability
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Serve => serve(config).await,
            Self::Email { command } => command.invoke(config).await,
            Self::CheckConfig { verbose } => {
                if verbose {
                    println!("{config:#?}");
                }
                Ok(())
            }
            Self::Completion { .. } => Ok(()),
        }
    }
}
