//! Secret configuration domain model.
//!
//! Both secrets (the shared passcode and the OpenAI credential) are read
//! once at startup; there is no runtime reconfiguration.

use serde::{Deserialize, Serialize};

/// Root of the secret configuration file (secret.json).
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    /// Shared passcode guarding access to the application.
    #[serde(default)]
    pub passcode: Option<String>,
    /// OpenAI credentials for the image endpoints.
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Model override; defaults to gpt-image-1 when absent.
    #[serde(default)]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_deserializes() {
        let config: SecretConfig = serde_json::from_str("{}").unwrap();
        assert!(config.passcode.is_none());
        assert!(config.openai.is_none());
    }

    #[test]
    fn test_full_config_round_trip() {
        let config = SecretConfig {
            passcode: Some("hunter2".to_string()),
            openai: Some(OpenAiConfig {
                api_key: "sk-test".to_string(),
                model_name: None,
            }),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SecretConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.passcode.as_deref(), Some("hunter2"));
        assert_eq!(back.openai.unwrap().api_key, "sk-test");
    }
}
