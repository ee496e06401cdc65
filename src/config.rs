use std::time::Duration;

// Fixed per route; never computed at request time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub itinerary_params: DecodingParams,
    pub chat_params: DecodingParams,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("COHERE_API_KEY")
            .map_err(|_| anyhow::anyhow!("COHERE_API_KEY is not set"))?;
        let base_url = std::env::var("COHERE_API_URL")
            .unwrap_or_else(|_| "https://api.cohere.ai".into());
        let model = std::env::var("COHERE_MODEL").unwrap_or_else(|_| "command-r-plus".into());
        let timeout_secs: u64 = env_parsed("LLM_TIMEOUT_SECS", 60)?;

        Ok(Self {
            base_url,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
            itinerary_params: DecodingParams {
                temperature: env_parsed("ITINERARY_TEMPERATURE", 0.8)?,
                max_tokens: env_parsed("ITINERARY_MAX_TOKENS", 1000)?,
            },
            chat_params: DecodingParams {
                temperature: env_parsed("CHAT_TEMPERATURE", 0.7)?,
                max_tokens: env_parsed("CHAT_MAX_TOKENS", 300)?,
            },
        })
    }
}

fn env_parsed<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
