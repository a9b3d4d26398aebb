use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "affinity",
    about = "runner-affinity: deterministic job-to-worker scoring for cluster schedulers",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Plugin config (affinity.toml). Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the eligible worker pool resolved from a node inventory
    Pool {
        /// JSON file holding an array of nodes
        #[arg(short, long)]
        nodes: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Dry-run one scoring cycle for a job across every node in an inventory.
    ///
    /// Each node is scored on its own, then the score vector is normalized
    /// once, as the host scheduler would do it.
    Score {
        /// JSON file holding an array of nodes
        #[arg(short, long)]
        nodes: String,
        /// JSON file holding the job (name and annotations)
        #[arg(short, long)]
        job: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Manage affinity.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        #[arg(short, long, default_value = "affinity.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a configuration file and print the effective settings
    Check {
        #[arg(short, long, default_value = "affinity.toml")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("affinity=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Pool { nodes, format } => commands::pool::pool(config, &nodes, &format),
        Commands::Score { nodes, job, format } => {
            commands::score::score(config, &nodes, &job, &format)
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => commands::config::init(&path, force),
            ConfigAction::Check { path } => commands::config::check(&path),
        },
    }
}
