/// Errors that can occur talking to the metadata service or download hosts.
#[derive(Debug, thiserror::Error)]
pub enum DemozooError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error (HTTP {status}) for {url}")]
    Status { status: u16, url: String },

    #[error("No usable download link")]
    NoUsableLink,

    #[error("Download failed: {0}")]
    Download(String),
}

impl DemozooError {
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }
}
