use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required word or page id was not supplied.
    #[error("missing required parameter: {0}")]
    MissingInput(&'static str),

    /// Network failure, timeout or non-2xx answer from the upstream wiki.
    #[error("upstream request failed: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
        status_text: Option<String>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status();
        Error::Upstream {
            message: err.to_string(),
            status: status.map(|s| s.as_u16()),
            status_text: status.and_then(|s| s.canonical_reason()).map(str::to_string),
            source: Some(err),
        }
    }
}

impl Error {
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. })
    }
}
