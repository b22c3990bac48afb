use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::error::FetchError;

/// Site the catalogue was originally harvested from.
pub const DEFAULT_ORIGIN: &str = "https://www.matthewfregnan.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; asset-extractor/1.0)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by page and asset requests.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub origin: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Something that can turn a page path (or absolute URL) into HTML text.
pub trait PageFetcher {
    /// Fetch `target`, resolving relative paths against the origin.
    ///
    /// Non-2xx responses are [`FetchError::Status`]. No retries.
    fn fetch(&self, target: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP client for the origin site and its image CDN.
///
/// Pages are fetched with reqwest's default redirect handling. Assets use a
/// second client with redirects disabled so the downloader can follow them
/// itself and bound the hop count.
pub struct HttpClient {
    pages: reqwest::Client,
    assets: reqwest::Client,
    origin: Url,
}

impl HttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let origin = Url::parse(&options.origin).map_err(|e| FetchError::InvalidUrl {
            url: options.origin.clone(),
            reason: e.to_string(),
        })?;

        let pages = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()?;
        let assets = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            pages,
            assets,
            origin,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a page path against the origin. Absolute URLs pass through.
    pub fn resolve(&self, target: &str) -> Result<Url, FetchError> {
        self.origin.join(target).map_err(|e| FetchError::InvalidUrl {
            url: target.to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) fn assets(&self) -> &reqwest::Client {
        &self.assets
    }
}

impl PageFetcher for HttpClient {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let url = self.resolve(target)?;
        log::debug!("Fetching {url}");

        let resp = self.pages.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_paths_onto_origin() {
        let client = HttpClient::new(&ClientOptions::default()).unwrap();
        assert_eq!(
            client.resolve("/wic-tvc").unwrap().as_str(),
            "https://www.matthewfregnan.com/wic-tvc"
        );
        assert_eq!(
            client
                .resolve("https://images.squarespace-cdn.com/a.png")
                .unwrap()
                .as_str(),
            "https://images.squarespace-cdn.com/a.png"
        );
    }

    #[test]
    fn bad_origin_is_rejected() {
        let options = ClientOptions {
            origin: "not a url".to_string(),
            ..ClientOptions::default()
        };
        assert!(matches!(
            HttpClient::new(&options),
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
