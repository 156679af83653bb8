use storyreel_interface::StoryProvider;
use storyreel_models::{EnvCredentials, GeminiSettings, GeminiStoryClient};

fn live_client() -> Result<GeminiStoryClient, Box<dyn std::error::Error>> {
    require_api_key()?;
    Ok(GeminiStoryClient::new(
        GeminiSettings::default(),
        EnvCredentials::default(),
    )?)
}

fn require_api_key() -> Result<(), Box<dyn std::error::Error>> {
    std::env::var("GEMINI_API_KEY").map_err(|_| "GEMINI_API_KEY must be set for API tests")?;
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_script_generation() -> Result<(), Box<dyn std::error::Error>> {
    let client = live_client()?;

    let scenes = client.generate_script().await?;

    assert!(!scenes.is_empty());
    assert!(scenes.iter().all(|s| !s.description_english().is_empty()));
    println!("Generated {} scenes", scenes.len());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_image_generation() -> Result<(), Box<dyn std::error::Error>> {
    let client = live_client()?;

    let image = client
        .generate_image("A farmer resting beside a tall bamboo stalk")
        .await?;

    assert!(!image.is_empty());
    println!("Image: {} bytes, {}", image.len(), image.mime_type());
    Ok(())
}
