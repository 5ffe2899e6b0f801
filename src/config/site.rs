//! Public site configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Public identity of the site, used for canonical URLs and share metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public origin (e.g., "https://aqaargate.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Site name used when the message bundle has none
    #[serde(default = "default_name")]
    pub name: String,

    /// Absolute URL of the default social-share image
    pub default_share_image: Option<String>,
}

impl SiteConfig {
    /// Origin without trailing slash
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The configured share image, or `/og-image.png` on the site
    pub fn share_image(&self) -> String {
        self.default_share_image
            .clone()
            .unwrap_or_else(|| format!("{}/og-image.png", self.origin()))
    }

    /// Validate site configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl {
                field: "site.base_url",
                value: self.base_url.clone(),
            });
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("site.base_url"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SITE__NAME"));
        }
        if let Some(image) = &self.default_share_image {
            if !is_http_url(image) {
                return Err(ValidationError::InvalidUrl {
                    field: "site.default_share_image",
                    value: image.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_name(),
            default_share_image: None,
        }
    }
}

pub(super) fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_name() -> String {
    "AqaarGate".to_string()
}
