use adcraft::{ClientConfig, GenerationClient, GenerationInputs, GenerationOutput, ToolType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    adcraft::logger::init()?;

    let config = ClientConfig::from_env();
    let client = match GenerationClient::from_config(config.clone()) {
        Ok(client) => client,
        Err(_) => GenerationClient::new(config, "demo-user"),
    };

    let inputs = GenerationInputs::new("Acme Coffee")
        .with_brand("Specialty coffee", "Busy commuters")
        .with_tone("Bold and friendly")
        .with_offer("Weekly cold brew subscription delivered to your door");

    let page = client.generate(ToolType::LandingPage, inputs.clone()).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    let refined = client
        .refine(ToolType::LandingPage, &page, "Make the CTA more urgent", inputs)
        .await?;
    if let GenerationOutput::LandingPage(copy) = &refined {
        println!("Refined CTA: {}", copy.cta_text);
    }

    Ok(())
}
