use crate::config::Config;

/// Turns poster paths into image URLs
#[derive(Debug, Clone)]
pub struct PosterUrls {
    base_url: String,
    placeholder_url: String,
}

impl PosterUrls {
    pub fn new(base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.poster_base_url, &config.placeholder_poster_url)
    }

    /// Full image URL, or the placeholder when the path is missing or empty
    ///
    /// Paths are appended verbatim; TMDB paths already start with `/`.
    pub fn url_for(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            Some(path) if !path.is_empty() => format!("{}{}", self.base_url, path),
            _ => self.placeholder_url.clone(),
        }
    }
}

impl Default for PosterUrls {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
