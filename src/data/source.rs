use std::path::PathBuf;
use std::time::Duration;

use super::error::FetchError;
use super::loader::{self, LoadReport};

/// Something that can produce a complete dataset in one call.
///
/// Implementations block; the app runs them off the UI thread.
pub trait RecordSource: Send {
    /// Short description for logs and the status bar.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<LoadReport, FetchError>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// One GET against an endpoint returning a JSON array. No retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        HttpSource {
            url: url.into(),
            timeout,
        }
    }
}

impl RecordSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<LoadReport, FetchError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        log::info!("Fetching records from {}", self.url);
        let response = agent.get(&self.url).call()?;
        let body = response
            .into_body()
            .with_config()
            .limit(64 * 1024 * 1024)
            .read_to_string()
            .map_err(|err| FetchError::Body(err.to_string()))?;

        loader::records_from_str(&body)
    }
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

/// A `.json`, `.csv` or `.parquet` file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<LoadReport, FetchError> {
        loader::load_file(&self.path).map_err(FetchError::File)
    }
}
