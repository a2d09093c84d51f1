//! The HTTP boundary of the client.
//!
//! Everything above this module works on service queries such as
//! `getServerItem?ItemStart=1&ItemCount=18`, relative to the gateway's
//! base URL. A [`Transport`] performs one GET for such a query and hands
//! back the raw response body.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::error::Error;

/// The default base URL of the gateway's JSON web services.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8888/baos/";

/// Performs single GET requests against the gateway.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Sync + Send {
    /// Issue a GET for the given service query and return the raw response
    /// body.
    fn get(&self, query: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// A [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The base url of the gateway's web services. Always ends with a `/`.
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new transport for the gateway at the given base URL.
    ///
    /// A trailing `/` is appended to the path of `base_url` if it is
    /// missing, so that service queries resolve below it. Without a
    /// `timeout` requests wait as long as the HTTP client does by default.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::CannotBeABase(base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpClientBuild)?;

        Ok(Self {
            base_url: normalize_base_url(base_url),
            client,
        })
    }

    /// Parse the given base URL and create a transport for it. An empty
    /// string selects [`DEFAULT_GATEWAY_URL`].
    pub fn from_url_str(base_url: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let base_url = if base_url.is_empty() {
            DEFAULT_GATEWAY_URL
        } else {
            base_url
        };
        let url = Url::parse(base_url).map_err(|err| Error::InvalidUrl(err, base_url.to_string()))?;
        Self::new(url, timeout)
    }

    /// The base URL that service queries are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    #[tracing::instrument(skip(self))]
    async fn get(&self, query: &str) -> Result<Vec<u8>, Error> {
        let url = self
            .base_url
            .join(query)
            .map_err(|err| Error::InvalidUrl(err, query.to_string()))?;

        tracing::debug!(%url, "Sending request to the gateway");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| Error::Request(err, query.to_string()))?;

        tracing::debug!(status = %response.status(), "Received response from the gateway");

        // The gateway reports failures inside the envelope, so only an
        // authorisation failure is taken from the HTTP status.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized(query.to_string()));
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|err| Error::Request(err, query.to_string()))
    }
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
