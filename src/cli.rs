use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Honeypot attack feed from Cloud Firestore")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch every event once and print it (the default).
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Record one event and print the id the store assigned.
    Add {
        #[arg(long)]
        source_ip: String,
        #[arg(long)]
        service: String,
        #[arg(long)]
        action: String,
        /// Epoch milliseconds; defaults to now.
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List {
            format: OutputFormat::Table,
        })
    }
}
