use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod chat;
mod config;
mod extract;
mod gateway;
mod itinerary;
mod persona;
mod prompt;
mod server;
mod session;
mod trip;

use chat::ChatOrchestrator;
use gateway::{ChatModel, CohereGateway};
use itinerary::ItineraryOrchestrator;
use session::SessionStore;

#[derive(Debug, Parser)]
#[command(name = "itinerary_backend")]
#[command(about = "AI travel itinerary and chat backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Start {
        #[arg(long, default_value = "127.0.0.1:5001")]
        listen: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Start { listen } => {
            let addr: SocketAddr = listen.parse()?;
            let config = config::Config::from_env()?;
            let model: Arc<dyn ChatModel> = Arc::new(CohereGateway::new(&config)?);
            let state = server::AppState {
                chat: ChatOrchestrator::new(
                    model.clone(),
                    SessionStore::new(),
                    config.chat_params,
                ),
                itinerary: ItineraryOrchestrator::new(model, config.itinerary_params),
            };
            server::serve(addr, state).await?;
        }
    }
    Ok(())
}
