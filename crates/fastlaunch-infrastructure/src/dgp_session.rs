//! DgpSession - reqwest implementation of the vendor launch API.
//!
//! Every request carries the account's cookie jar, and cookies the server
//! sets are merged back into it. The product table lives in the vendor
//! client's own config document, which this session reads and writes
//! directly.

use async_trait::async_trait;
use fastlaunch_core::config::AppConfig;
use fastlaunch_core::cookie::CookieJar;
use fastlaunch_core::dgp::{
    DgpApi, DgpConfig, DgpSessionFactory, DownloadProgress, DownloadStream, LaunchResponse,
};
use fastlaunch_core::error::{LaunchError, Result};
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{COOKIE, HeaderValue, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const LAUNCH_PATH: &str = "/v5/launch/cl";

/// Where the session sends requests and keeps the product table.
#[derive(Debug, Clone)]
pub struct DgpEndpoints {
    pub api_base_url: String,
    pub config_file: PathBuf,
}

impl DgpEndpoints {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            config_file: config.dmm_game_player_config_file.clone(),
        }
    }

    fn launch_url(&self) -> String {
        format!("{}{}", self.api_base_url, LAUNCH_PATH)
    }
}

#[derive(Debug, Serialize)]
struct LaunchRequest<'a> {
    product_id: &'a str,
    game_type: &'a str,
    game_os: &'a str,
    launch_type: &'a str,
    user_os: &'a str,
}

#[derive(Debug, Deserialize)]
struct FileListResponse {
    data: FileList,
}

#[derive(Debug, Deserialize)]
struct FileList {
    domain: String,
    #[serde(default)]
    file_list: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    /// Install-relative destination.
    local_path: String,
    /// Path on the download domain.
    path: String,
}

/// Renders the jar's cookies that are in scope for `url`.
fn cookie_header(jar: &CookieJar, url: &Url) -> Option<String> {
    jar.header_value(url.host_str()?, url.path())
}

/// An authenticated session for one account.
pub struct DgpSession {
    client: Client,
    jar: Mutex<CookieJar>,
    endpoints: DgpEndpoints,
}

impl DgpSession {
    pub fn new(client: Client, jar: CookieJar, endpoints: DgpEndpoints) -> Self {
        Self {
            client,
            jar: Mutex::new(jar),
            endpoints,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let mut request = request.build()?;
        let header = cookie_header(&*self.jar.lock().await, request.url());
        if let Some(value) = header {
            let value = HeaderValue::from_str(&value)
                .map_err(|e| LaunchError::http(format!("Invalid cookie header: {}", e)))?;
            request.headers_mut().insert(COOKIE, value);
        }

        let response = self.client.execute(request).await?;

        if let Some(origin) = response.url().host_str() {
            let mut jar = self.jar.lock().await;
            for value in response.headers().get_all(SET_COOKIE) {
                if let Ok(value) = value.to_str() {
                    jar.merge_set_cookie(value, origin);
                }
            }
        }

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            return Err(LaunchError::http(format!("{} returned {}", url, status)));
        }
        Ok(response)
    }

    async fn fetch_file_list(&self, url: &str) -> Result<FileList> {
        let response = self
            .send(self.client.get(url).timeout(Duration::from_secs(30)))
            .await?;
        let list: FileListResponse = response.json().await?;
        tracing::info!("Update has {} files", list.data.file_list.len());
        Ok(list.data)
    }

    async fn fetch_file(&self, domain: &str, entry: &FileEntry, dest: &Path) -> Result<()> {
        let url = format!(
            "{}/{}",
            domain.trim_end_matches('/'),
            entry.path.trim_start_matches('/')
        );
        let bytes = self.send(self.client.get(&url)).await?.bytes().await?;

        let target = dest.join(entry.local_path.trim_start_matches(['/', '\\']));
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        tracing::debug!("Downloaded {} ({} bytes)", entry.local_path, bytes.len());
        Ok(())
    }
}

#[async_trait]
impl DgpApi for DgpSession {
    async fn get_config(&self) -> Result<DgpConfig> {
        let path = &self.endpoints.config_file;
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LaunchError::not_found(
                    "DMMGamePlayer config",
                    path.display().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&content)?)
    }

    async fn set_config(&self, config: &DgpConfig) -> Result<()> {
        let json = serde_json::to_vec_pretty(config)?;
        tokio::fs::write(&self.endpoints.config_file, json).await?;
        tracing::debug!("Saved {}", self.endpoints.config_file.display());
        Ok(())
    }

    async fn launch(&self, product_id: &str, game_type: &str) -> Result<LaunchResponse> {
        let body = LaunchRequest {
            product_id,
            game_type,
            game_os: "win",
            launch_type: "LIB",
            user_os: "win",
        };
        tracing::info!("Requesting launch for {} ({})", product_id, game_type);

        let response = self
            .send(
                self.client
                    .post(self.endpoints.launch_url())
                    .json(&body)
                    .timeout(Duration::from_secs(30)),
            )
            .await?;
        Ok(response.json().await?)
    }

    fn download<'a>(&'a self, url: &'a str, dest: &'a Path) -> DownloadStream<'a> {
        futures::stream::once(self.fetch_file_list(url))
            .map_ok(move |list| {
                let total = list.file_list.len();
                let domain = list.domain;
                futures::stream::iter(list.file_list.into_iter().enumerate()).then(
                    move |(index, entry)| {
                        let domain = domain.clone();
                        async move {
                            self.fetch_file(&domain, &entry, dest).await?;
                            Ok::<_, LaunchError>(DownloadProgress {
                                fraction: (index + 1) as f64 / total as f64,
                                file: entry.local_path,
                            })
                        }
                    },
                )
            })
            .try_flatten()
            .boxed()
    }
}

/// Opens [`DgpSession`]s sharing one HTTP client.
#[derive(Clone)]
pub struct ReqwestSessionFactory {
    client: Client,
    endpoints: DgpEndpoints,
}

impl ReqwestSessionFactory {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            client,
            endpoints: DgpEndpoints::from_config(config),
        })
    }
}

impl DgpSessionFactory for ReqwestSessionFactory {
    fn open(&self, jar: CookieJar) -> Result<Arc<dyn DgpApi>> {
        Ok(Arc::new(DgpSession::new(
            self.client.clone(),
            jar,
            self.endpoints.clone(),
        )))
    }
}
