use claims_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    claims_api::setup::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (readiness gate, migrations, storage, routes)
    let (_state, router) = claims_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    claims_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
