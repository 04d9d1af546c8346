use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::cache::GalleryCache;
use super::photo::{is_image_file, Photo};
use crate::config::GalleryConfig;
use crate::{Error, Result};

const GITHUB_API: &str = "https://api.github.com";
const GITHUB_RAW: &str = "https://raw.githubusercontent.com";
const CLIENT_USER_AGENT: &str = concat!("sectionsnap/", env!("CARGO_PKG_VERSION"));

/// One entry of a remote directory listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl RemoteFile {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "file".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

/// Remote listing of gallery images
#[async_trait::async_trait]
pub trait GallerySource: Send + Sync {
    /// Revision identifier of the latest change to the gallery directory
    async fn latest_revision(&self) -> Result<String>;

    /// Entries of the gallery directory
    async fn list_files(&self) -> Result<Vec<RemoteFile>>;

    /// Direct download URL for a listed file
    fn raw_url(&self, name: &str) -> String;
}

/// Gallery stored in a GitHub repository
pub struct GithubSource {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    path: String,
    branch: String,
}

impl GithubSource {
    pub fn new(config: &GalleryConfig) -> Result<Self> {
        Ok(Self {
            client: Self::build_client(config.request_timeout_secs)?,
            api_base: GITHUB_API.to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            path: config.path.trim_matches('/').to_string(),
            branch: config.branch.clone(),
        })
    }

    fn build_client(timeout_secs: u64) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(Error::Http)
    }

    fn commits_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/repos/{}/{}/commits",
            self.api_base, self.owner, self.repo
        ))?;
        url.query_pairs_mut()
            .append_pair("sha", &self.branch)
            .append_pair("path", &self.path)
            .append_pair("per_page", "1");
        Ok(url)
    }

    fn contents_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, self.path
        ))?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl GallerySource for GithubSource {
    async fn latest_revision(&self) -> Result<String> {
        let response = self.client.get(self.commits_url()?).send().await?;
        if !response.status().is_success() {
            return Err(Error::Gallery(format!(
                "Failed to fetch commit SHA: {}",
                response.status()
            )));
        }
        let commits: Vec<CommitRef> = response.json().await?;
        Ok(commits.into_iter().next().map(|c| c.sha).unwrap_or_default())
    }

    async fn list_files(&self) -> Result<Vec<RemoteFile>> {
        let response = self.client.get(self.contents_url()?).send().await?;
        if !response.status().is_success() {
            return Err(Error::Gallery(format!(
                "GitHub API error: {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    fn raw_url(&self, name: &str) -> String {
        if self.path.is_empty() {
            format!("{}/{}/{}/{}/{}", GITHUB_RAW, self.owner, self.repo, self.branch, name)
        } else {
            format!(
                "{}/{}/{}/{}/{}/{}",
                GITHUB_RAW, self.owner, self.repo, self.branch, self.path, name
            )
        }
    }
}

/// Read-through gallery loader
pub struct GalleryFetcher<S> {
    source: S,
    cache: GalleryCache,
}

impl<S: GallerySource> GalleryFetcher<S> {
    pub fn new(source: S, cache: GalleryCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &GalleryCache {
        &self.cache
    }

    /// Photos for the latest revision
    ///
    /// Served from the cache when its revision matches. On any failure the
    /// cached photos are returned if present, whatever their revision.
    pub async fn fetch(&self) -> Result<Vec<Photo>> {
        match self.fetch_fresh().await {
            Ok(photos) => Ok(photos),
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching gallery data");
                match self.cache.load() {
                    Some(cached) => {
                        tracing::info!(revision = %cached.revision, "Using cached gallery data as fallback");
                        Ok(cached.photos)
                    }
                    None => Err(e),
                }
            }
        }
    }

    async fn fetch_fresh(&self) -> Result<Vec<Photo>> {
        let cached = self.cache.load();
        let revision = self.source.latest_revision().await?;

        if let Some(cached) = cached {
            if cached.revision == revision {
                tracing::info!(revision = %revision, "Using cached gallery data");
                return Ok(cached.photos);
            }
        }

        tracing::info!(revision = %revision, "Fetching fresh gallery data");
        let mut files: Vec<RemoteFile> = self
            .source
            .list_files()
            .await?
            .into_iter()
            .filter(|f| f.kind == "file" && is_image_file(&f.name))
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let photos: Vec<Photo> = files
            .iter()
            .map(|f| Photo::from_file_name(&f.name, &self.source.raw_url(&f.name)))
            .collect();

        if let Err(e) = self.cache.store(&revision, &photos) {
            tracing::warn!(error = %e, "Error caching gallery data");
        }

        Ok(photos)
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }
}
