use serde::Deserialize;

use crate::services::store::DuplicateTitlePolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized catalog + similarity bundle
    #[serde(default = "default_movie_data_path")]
    pub movie_data_path: String,

    /// How repeated titles are folded into the title index
    #[serde(default)]
    pub duplicate_titles: DuplicateTitlePolicy,

    /// Number of recommendations when the request does not say
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Upper bound on the requested number of recommendations
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Image host prefix joined with each poster path
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Image shown for movies without a poster
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movie_data_path() -> String {
    "movie_data.json".to_string()
}

fn default_count() -> usize {
    5
}

fn default_max_count() -> usize {
    50
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/500x750.png?text=No+Poster".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movie_data_path: default_movie_data_path(),
            duplicate_titles: DuplicateTitlePolicy::default(),
            default_count: default_count(),
            max_count: default_max_count(),
            poster_base_url: default_poster_base_url(),
            placeholder_poster_url: default_placeholder_poster_url(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_count == 0 || config.default_count > config.max_count {
            anyhow::bail!(
                "Failed to load config: DEFAULT_COUNT must be between 1 and MAX_COUNT ({})",
                config.max_count
            );
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_apply_to_empty_environment() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.movie_data_path, "movie_data.json");
        assert_eq!(config.duplicate_titles, DuplicateTitlePolicy::First);
        assert_eq!(config.default_count, 5);
        assert_eq!(config.poster_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_vars(vars(&[
            ("MOVIE_DATA_PATH", "/data/bundle.json"),
            ("DUPLICATE_TITLES", "reject"),
            ("DEFAULT_COUNT", "10"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.movie_data_path, "/data/bundle.json");
        assert_eq!(config.duplicate_titles, DuplicateTitlePolicy::Reject);
        assert_eq!(config.default_count, 10);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_default_count_above_max_is_rejected() {
        let result = Config::from_vars(vars(&[("DEFAULT_COUNT", "60"), ("MAX_COUNT", "50")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_duplicate_policy_is_rejected() {
        let result = Config::from_vars(vars(&[("DUPLICATE_TITLES", "newest")]));
        assert!(result.is_err());
    }
}
