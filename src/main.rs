use adcraft::{
    logger::{self, LoggerConfig},
    server, Config, GeminiClient, GenerationDispatcher, ModelSelection,
};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();

    log::info!("🔄 Creating Gemini client...");
    let provider = match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let dispatcher =
        GenerationDispatcher::new(Arc::new(provider), ModelSelection::from(&config.gemini));

    server::run(config, dispatcher).await?;
    Ok(())
}
