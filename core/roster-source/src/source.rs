//! FILENAME: core/roster-source/src/source.rs
//! Record sources: the remote JSON endpoint and local JSON files.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use roster_engine::ScheduleRecord;

use crate::error::SourceError;
use crate::payload::parse_payload;
use crate::window::FetchWindow;

/// Default request timeout for the remote endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Apps Script web apps redirect once or twice before answering.
const MAX_REDIRECTS: usize = 10;

/// Anything that can produce the record list for a window.
pub trait ScheduleSource {
    fn describe(&self) -> String;

    fn fetch(
        &self,
        window: &FetchWindow,
    ) -> impl Future<Output = Result<Vec<ScheduleRecord>, SourceError>> + Send;
}

// ============================================================================
// REMOTE SOURCE
// ============================================================================

/// POSTs the window to a JSON endpoint and expects an array back.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let url = reqwest::Url::parse(url).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", url, e)))?;
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()?;
        Ok(RemoteSource { url, client })
    }
}

impl ScheduleSource for RemoteSource {
    fn describe(&self) -> String {
        format!("remote {}", self.url)
    }

    async fn fetch(&self, window: &FetchWindow) -> Result<Vec<ScheduleRecord>, SourceError> {
        let body = serde_json::to_string(window)?;
        info!("POST {} {}", self.url, body);

        // text/plain keeps the request "simple" for Apps Script endpoints.
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        debug!("received {} bytes", bytes.len());
        parse_payload(&bytes)
    }
}

// ============================================================================
// FILE SOURCE
// ============================================================================

/// Reads the same payload shape from a local file. The window is ignored;
/// the file is taken as already scoped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl ScheduleSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self, _window: &FetchWindow) -> Result<Vec<ScheduleRecord>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("read {} bytes from {:?}", bytes.len(), self.path);
        parse_payload(&bytes)
    }
}

/// Writes records in the source payload shape (used for `--dump`).
pub fn save_records(path: &Path, records: &[ScheduleRecord]) -> Result<(), SourceError> {
    let json = serde_json::to_vec_pretty(records)?;
    std::fs::write(path, json).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
