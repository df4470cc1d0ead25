use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub media_root: String,
    pub aws_region: String,
    pub tts_voice_id: String,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            media_root: env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            tts_voice_id: env::var("TTS_VOICE_ID").unwrap_or_else(|_| "Zeina".to_string()),
            environment: Environment::parse(
                &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            ),
            log_format: LogFormat::parse(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl Environment {
    /// Unknown values fall back to development.
    fn parse(value: &str) -> Self {
        match value {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}
