use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use honeypot_dashboard::{
    access::EventAccess,
    app,
    cli::{Args, Command, OutputFormat},
    config::settings::Config,
    controller::FetchState,
    domain::events::{NewHoneypotEvent, Timestamp},
    ui::{self, TableView},
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays pipeable.
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    info!("Loaded config: {:?}", config);

    let storage = app::build_store(&config)?;
    let access = EventAccess::new(storage, config.collection.clone());

    match args.command() {
        Command::List { format } => {
            let state = app::run_dashboard(access, shutdown_signal()).await;

            match format {
                OutputFormat::Table => print!("{}", TableView::from_state(&state, &Local).render()),
                // Failures reach stderr through the log; stdout stays empty.
                OutputFormat::Json => {
                    if let Some(json) = ui::events_json(&state)? {
                        println!("{json}");
                    }
                }
            }

            Ok(match state {
                FetchState::Loaded(_) => ExitCode::SUCCESS,
                FetchState::Failed(_) => ExitCode::FAILURE,
                FetchState::Loading => ExitCode::from(130),
            })
        }
        Command::Add {
            source_ip,
            service,
            action,
            timestamp,
        } => {
            let mut event = NewHoneypotEvent::new(source_ip, service, action);
            if let Some(millis) = timestamp {
                event = event.with_timestamp(Timestamp::from_millis(millis));
            }

            // Failures are already logged by the access layer.
            match access.create_event(event).await {
                Ok(id) => {
                    println!("{id}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
