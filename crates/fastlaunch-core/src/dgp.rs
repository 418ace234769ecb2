//! Vendor client config, launch API wire types, and the session traits.

use crate::cookie::CookieJar;
use crate::error::{LaunchError, Result};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// The vendor client's product table (`dgp_config`).
///
/// Fields this crate does not use are carried in `extra` so a read-modify-write
/// through [`DgpApi::set_config`] does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DgpConfig {
    #[serde(default)]
    pub contents: Vec<ProductEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DgpConfig {
    /// Finds the single entry for a product id.
    ///
    /// # Errors
    ///
    /// `NotFound { entity_type: "product" }` when no entry matches.
    pub fn find_product(&self, product_id: &str) -> Result<&ProductEntry> {
        self.contents
            .iter()
            .find(|entry| entry.product_id == product_id)
            .ok_or_else(|| LaunchError::not_found("product", product_id))
    }

    /// Mutable variant of [`DgpConfig::find_product`].
    pub fn find_product_mut(&mut self, product_id: &str) -> Result<&mut ProductEntry> {
        self.contents
            .iter_mut()
            .find(|entry| entry.product_id == product_id)
            .ok_or_else(|| LaunchError::not_found("product", product_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    pub product_id: String,
    pub game_type: String,
    pub detail: ProductDetail,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Install location and the version the vendor client last installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub path: String,
    pub version: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result code the launch API returns on success.
pub const RESULT_CODE_OK: i64 = 100;

/// Response of the launch-authorization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchResponse {
    pub result_code: i64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<LaunchData>,
}

impl LaunchResponse {
    /// Returns the launch data of an accepted response.
    ///
    /// # Errors
    ///
    /// `Authorization` carrying the remote `error` text when `result_code` is
    /// not [`RESULT_CODE_OK`]; `Internal` when an accepted response has no data.
    pub fn into_data(self) -> Result<LaunchData> {
        if self.result_code != RESULT_CODE_OK {
            return Err(LaunchError::Authorization(self.error.unwrap_or_default()));
        }
        self.data
            .ok_or_else(|| LaunchError::internal("launch response has no data"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchData {
    #[serde(default)]
    pub drm_auth_token: Option<String>,
    #[serde(default)]
    pub is_administrator: bool,
    pub exec_file_name: String,
    pub latest_version: String,
    #[serde(default)]
    pub execute_args: String,
    #[serde(default)]
    pub file_list_url: Option<String>,
}

/// One step of an update download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Completed share of the file list, in `0.0..=1.0`.
    pub fraction: f64,
    /// Install-relative path of the file just written.
    pub file: String,
}

/// Lazy sequence of download steps. Polling drives the download.
pub type DownloadStream<'a> = BoxStream<'a, Result<DownloadProgress>>;

/// An authenticated session against the vendor's launch service.
#[async_trait::async_trait]
pub trait DgpApi: Send + Sync {
    /// Reads the product table.
    async fn get_config(&self) -> Result<DgpConfig>;

    /// Writes the product table back. No concurrency check is made, a
    /// concurrent writer's changes are overwritten.
    async fn set_config(&self, config: &DgpConfig) -> Result<()>;

    /// Requests launch authorization for one product.
    async fn launch(&self, product_id: &str, game_type: &str) -> Result<LaunchResponse>;

    /// Downloads the files listed at `url` into `dest`.
    fn download<'a>(&'a self, url: &'a str, dest: &'a Path) -> DownloadStream<'a>;
}

/// Opens API sessions from stored cookies.
pub trait DgpSessionFactory: Send + Sync {
    fn open(&self, jar: CookieJar) -> Result<Arc<dyn DgpApi>>;
}
