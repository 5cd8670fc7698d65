use scraper::error::SelectorErrorKind;

/// All errors that can occur during vlr.gg scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum VlrError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Upstream returned a non-success HTTP status code.
    #[error("upstream returned status {status} for {url}")]
    Upstream {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A required structural element was missing, or appeared with
    /// unexpected cardinality, while extracting a record.
    #[error("missing required field `{field}` in item {index}")]
    Extraction { field: &'static str, index: usize },

    /// Supposedly numeric content failed to parse.
    #[error("malformed {field} in item {index}: {value:?}")]
    MalformedData {
        field: &'static str,
        index: usize,
        value: String,
    },
}

impl<'a> From<SelectorErrorKind<'a>> for VlrError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        VlrError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VlrError>;
