use std::net::IpAddr;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use climpro_testing::resend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Resend { listen, api_key } => {
            resend::start_server(listen.host, listen.port, api_key).await
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Fake third party services for local development and tests
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a fake resend api which records every accepted email
    Resend {
        #[command(flatten)]
        listen: Listen,
        /// The only api key accepted by the server
        #[arg(long, env = "RESEND_API_KEY", default_value = "re_test")]
        api_key: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
struct Listen {
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    #[arg(long, default_value = "8003")]
    port: u16,
}
