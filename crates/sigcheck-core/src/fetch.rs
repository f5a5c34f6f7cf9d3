//! Detached signature download.
//!
//! One blocking GET per signature via the curl crate (libcurl). The body is
//! streamed into a uniquely named temp file that is removed when the returned
//! [`SignatureFile`] is dropped, whichever way the caller exits.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;
use thiserror::Error;
use url::Url;

/// Prefix of temp files holding downloaded signatures.
pub const TEMP_PREFIX: &str = "sigcheck-sig-";

/// Transfer limits for a signature download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound on the whole transfer.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(30),
            max_redirects: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("{0}")]
    Curl(#[from] curl::Error),
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    #[error("write signature temp file: {0}")]
    TempFile(#[from] io::Error),
}

/// A downloaded signature on disk. The file is deleted on drop.
#[derive(Debug)]
pub struct SignatureFile {
    file: NamedTempFile,
    len: u64,
}

impl SignatureFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of body bytes written.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Blocking HTTP(S) downloader for signature files.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    opts: FetchOptions,
}

impl Fetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }

    /// Downloads `url` into a fresh temp file and returns its guard.
    pub fn fetch_to_temp(&self, url: &str) -> Result<SignatureFile, FetchError> {
        let url = validate_url(url)?;
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".asc")
            .tempfile()?;
        let len = self.download(url.as_str(), file.as_file_mut())?;
        file.as_file_mut().flush()?;
        tracing::debug!(
            url = %url,
            bytes = len,
            path = %file.path().display(),
            "signature downloaded"
        );
        Ok(SignatureFile { file, len })
    }

    /// Single GET of `url`, writing the body sequentially to `out`.
    /// Returns the number of bytes written.
    fn download(&self, url: &str, out: &mut File) -> Result<u64, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirects)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        easy.useragent(concat!("sigcheck/", env!("CARGO_PKG_VERSION")))?;

        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(FetchError::TempFile(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        Ok(written)
    }
}

/// Parses `url` and accepts only absolute http/https URLs.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}
