use serde::Deserialize;

use crate::parser::Template;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key; requests fail with a configuration error when unset
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat completion model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Upper bound on completion length
    #[serde(default = "default_openai_max_tokens")]
    pub openai_max_tokens: u32,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL; metadata lookups are not cached when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Line template requested from the completion provider when the caller doesn't pick one
    #[serde(default)]
    pub default_template: Template,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_max_tokens() -> u32 {
    200
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_env() {
        let vars = vec![("TMDB_API_KEY".to_string(), "tmdb-key".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key, "tmdb-key");
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.openai_max_tokens, 200);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.default_template, Template::Dash3);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_template_from_env() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "tmdb-key".to_string()),
            ("DEFAULT_TEMPLATE".to_string(), "colon2".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.default_template, Template::Colon2);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_tmdb_key_is_an_error() {
        let vars: Vec<(String, String)> = vec![];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
