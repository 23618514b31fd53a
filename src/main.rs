use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod session;
mod state;
mod utils;

use api::receipt_processor::ReceiptProcessorClient;
use commands::Flow;
use config::Config;
use session::ReceiptSession;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout belongs to the shell
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("receipt_client=info".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🧾 Starting receipt client...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = Arc::new(ReceiptProcessorClient::new(&config.api_url));
    if client.base_url().is_empty() {
        warn!("{} is not set, requests will use bare paths like /receipts", config::API_URL_VAR);
    } else {
        info!("Using receipt service at {}", client.base_url());
    }
    let session = Arc::new(ReceiptSession::new(client, config.max_in_flight_lookups));

    // Initial load runs in the background while the shell starts up
    {
        let session = session.clone();
        tokio::spawn(async move {
            session.refresh().await;
        });
    }

    println!("{}", commands::help::HELP_TEXT);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        if commands::handle_line(&*session, &line, &mut input).await == Flow::Quit {
            break;
        }
    }

    session.close();
    info!("Goodbye");
}
