use parking_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, configuration, logging)
    let config = setup_environment()?;

    print_banner();

    tracing::info!("Parking server starting...");

    // 2. State (database, migrations, default office, services)
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server (starts background tasks itself)
    let server = Server::new(state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
