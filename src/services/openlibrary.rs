use crate::config::ProxyConfig;
use crate::models::responses::UpstreamResponse;
use async_trait::async_trait;
use tracing::{error, info};

/// Status reported when no usable HTTP response came back at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 502;

#[async_trait]
pub trait UpstreamClient {
    /// Runs the search for an already encoded query string.
    ///
    /// Never fails: transport problems come back as [`TRANSPORT_FAILURE_STATUS`]
    /// with the error text as body.
    async fn fetch(&self, query: &str) -> UpstreamResponse;
}

pub struct OpenLibraryClient {
    client: reqwest::Client,
    search_url: String,
}

impl OpenLibraryClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            search_url: config.search_url.clone(),
        })
    }

    pub fn request_url(&self, query: &str) -> String {
        format!("{}?{}", self.search_url, query)
    }

    async fn send(&self, url: &str) -> Result<UpstreamResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}

#[async_trait]
impl UpstreamClient for OpenLibraryClient {
    async fn fetch(&self, query: &str) -> UpstreamResponse {
        let url = self.request_url(query);
        info!("Requesting: {}", url);

        match self.send(&url).await {
            Ok(response) => {
                info!("{} GET {}", response.status, url);
                response
            }
            Err(e) => {
                error!("Request to {} failed: {}", url, e);
                UpstreamResponse {
                    status: TRANSPORT_FAILURE_STATUS,
                    body: e.to_string(),
                }
            }
        }
    }
}
