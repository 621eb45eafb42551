//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub adapters: AdaptersConfig,
    pub google_drive: GoogleDriveConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub port: u16,
    pub webhook_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub whatsapp: Option<WhatsAppConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WhatsAppConfig {
    pub enabled: bool,
    /// Bearer token for the Cloud API
    pub access_token: Option<String>,
    /// Business phone number id the bot sends from
    pub phone_number_id: Option<String>,
    /// Token echoed back during the webhook subscription handshake
    pub verify_token: Option<String>,
    /// App secret for X-Hub-Signature-256 verification; unset disables it
    pub app_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleDriveConfig {
    /// Path to the service account JSON key file
    pub service_account_key: Option<PathBuf>,
    /// Inline service account JSON (takes precedence over the file)
    pub service_account_json: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig { name: "arsip-bot".to_string() },
            server: ServerConfig {
                port: 5000,
                webhook_path: "/webhook".to_string(),
            },
            adapters: AdaptersConfig {
                whatsapp: Some(WhatsAppConfig {
                    enabled: false,
                    access_token: None,
                    phone_number_id: None,
                    verify_token: None,
                    app_secret: None,
                }),
                console: Some(ConsoleConfig { enabled: true }),
            },
            google_drive: GoogleDriveConfig {
                service_account_key: Some(PathBuf::from("credentials.json")),
                service_account_json: None,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)
            .map_err(|e| ConfigError::Parse(format!("Failed to write config: {}", e)))
    }

    /// Build a config from environment variables alone.
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                config.server.port = p;
            }
        }

        if let Some(ref mut wa) = config.adapters.whatsapp {
            if let Ok(token) = std::env::var("WHATSAPP_TOKEN") {
                wa.access_token = Some(token);
                wa.enabled = true;
            }
            if let Ok(id) = std::env::var("WHATSAPP_PHONE_NUMBER_ID") {
                wa.phone_number_id = Some(id);
            }
            if let Ok(token) = std::env::var("WHATSAPP_VERIFY_TOKEN") {
                wa.verify_token = Some(token);
            }
            if let Ok(secret) = std::env::var("WHATSAPP_APP_SECRET") {
                wa.app_secret = Some(secret);
            }
        }

        if let Ok(path) = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY") {
            config.google_drive.service_account_key = Some(PathBuf::from(path));
        }
        if let Ok(json) = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
            config.google_drive.service_account_json = Some(json);
        }

        config
    }

    /// Whether the WhatsApp adapter has everything it needs to run.
    pub fn whatsapp_ready(&self) -> Option<&WhatsAppConfig> {
        self.adapters
            .whatsapp
            .as_ref()
            .filter(|wa| wa.enabled && wa.access_token.is_some() && wa.phone_number_id.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serves_console_mode() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.webhook_path, "/webhook");
        assert!(config.whatsapp_ready().is_none());
    }

    #[test]
    fn yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.bot.name, "arsip-bot");
        assert_eq!(parsed.server.port, config.server.port);
    }

    #[test]
    fn whatsapp_ready_requires_token_and_phone_number() {
        let mut config = Config::default();
        {
            let wa = config.adapters.whatsapp.as_mut().unwrap();
            wa.enabled = true;
            wa.access_token = Some("token".to_string());
        }
        assert!(config.whatsapp_ready().is_none());

        config.adapters.whatsapp.as_mut().unwrap().phone_number_id = Some("123".to_string());
        assert!(config.whatsapp_ready().is_some());
    }
}
