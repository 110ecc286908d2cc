//! HTTP client for the per-language masterlist

use super::Masterlist;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Fetches `<base url>/<language>.json` and caches it locally
#[derive(Clone)]
pub struct MasterlistClient {
    client: reqwest::Client,
    base_url: Url,
}

impl MasterlistClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim()).context("Invalid masterlist URL")?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("modtranslate/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Masterlist URL for one language
    pub fn url_for(&self, language: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}.json", language.to_lowercase()))
            .context("Failed to build masterlist URL")
    }

    /// Download, validate and cache the masterlist for `language`
    pub async fn fetch(&self, language: &str, cache_path: &Path) -> Result<Masterlist> {
        let url = self.url_for(language)?;
        tracing::info!("Fetching masterlist from {}", url);

        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?
            .error_for_status()
            .with_context(|| format!("Masterlist request to {} failed", url))?
            .text()
            .await
            .context("Failed to read masterlist response")?;

        let masterlist = Masterlist::from_json(&body)?;

        if let Some(parent) = cache_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create masterlist cache directory")?;
        }
        tokio::fs::write(cache_path, &body)
            .await
            .with_context(|| format!("Failed to cache masterlist to {}", cache_path.display()))?;

        tracing::info!("Cached masterlist with {} entries", masterlist.len());
        Ok(masterlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_language() {
        let client = MasterlistClient::new("https://example.com/masterlists").unwrap();
        assert_eq!(
            client.url_for("German").unwrap().as_str(),
            "https://example.com/masterlists/german.json"
        );

        let client = MasterlistClient::new("https://example.com/masterlists/").unwrap();
        assert_eq!(
            client.url_for("French").unwrap().as_str(),
            "https://example.com/masterlists/french.json"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(MasterlistClient::new("not a url").is_err());
    }
}
