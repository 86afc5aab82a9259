use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Catalog, CommitJson, TreeJson};

/// Where the catalog and template bodies come from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Resolves every template currently available.
    async fn fetch_catalog(&self) -> Result<Catalog>;

    /// Returns the raw body of one template, addressed by canonical name.
    async fn fetch_template(&self, name: &str) -> Result<String>;
}

/// Responsible for all communication with GitHub.
pub struct ApiClient {
    client: reqwest::Client,
    config: Config,
}

impl ApiClient {
    /// Initializes a new ApiClient for the repository described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Config(format!("user_agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// GETs a GitHub API endpoint and decodes the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::Catalog(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Catalog(format!("GitHub API error: {} ({})", status, url)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Catalog(format!("unexpected response from {}: {}", url, e)))
    }
}

#[async_trait]
impl TemplateSource for ApiClient {
    /// Resolves the branch to a commit, then lists that commit's tree.
    ///
    /// GitHub only lists files per tree object, hence the two requests.
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let commit: CommitJson = self.get_json(&self.config.commit_url()).await?;
        log::debug!("{} is at {}", self.config.branch, commit.sha);

        let tree: TreeJson = self.get_json(&self.config.tree_url(&commit.sha)).await?;
        let catalog = Catalog::from_tree(&tree.tree, &self.config.suffix);
        if catalog.is_empty() {
            log::warn!("no templates found in {}/{}", self.config.owner, self.config.repo);
        } else {
            log::info!("catalog has {} templates", catalog.len());
        }

        Ok(catalog)
    }

    async fn fetch_template(&self, name: &str) -> Result<String> {
        let url = self.config.template_url(name);
        log::debug!("GET {}", url);

        let failed = |reason: String| Error::Download {
            name: name.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| failed(e.to_string()))
    }
}
