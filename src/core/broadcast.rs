use crate::core::headers;
use crate::domain::model::{InboundRequest, RelayedResponse};
use crate::domain::ports::{ConfigProvider, Resolver};
use crate::utils::error::{BroadcastError, Result};
use reqwest::Client;
use std::net::Ipv4Addr;
use url::Url;

/// Replays one request to every backend of the domain, one after another,
/// and keeps the first response that came back.
pub struct Broadcaster<R: Resolver> {
    resolver: R,
    domain: String,
    target_port: u16,
    client: Client,
}

impl<R: Resolver> Broadcaster<R> {
    pub fn new<C: ConfigProvider>(resolver: R, config: &C) -> Result<Self> {
        // Backends are dialed by IP; an environment proxy would hide them.
        let client = Client::builder()
            .no_proxy()
            .connect_timeout(config.dial_timeout())
            .build()?;

        Ok(Self {
            resolver,
            domain: config.domain().to_string(),
            target_port: config.target_port(),
            client,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub async fn broadcast(&self, request: InboundRequest) -> Result<RelayedResponse> {
        let ips = self.resolver.resolve(&self.domain).await?;
        if ips.is_empty() {
            tracing::warn!("Domain {} has no IPv4 addresses", self.domain);
        }

        let forwarded = headers::forward_headers(&request.headers);
        let mut responses = Vec::with_capacity(ips.len());

        for ip in ips {
            match self.forward(ip, &request, &forwarded).await {
                Ok(response) => {
                    tracing::debug!("{} answered {}", ip, response.status());
                    responses.push(response);
                }
                Err(e) => tracing::error!("{}", e),
            }
        }

        // Later responses are dropped unread.
        let Some(first) = responses.into_iter().next() else {
            return Err(BroadcastError::NoSuccessfulResponse);
        };

        let status = first.status();
        let relayed_headers = headers::relay_headers(first.headers());
        let body = first
            .bytes()
            .await
            .map_err(|e| BroadcastError::BodyReadError {
                what: "response",
                reason: e.to_string(),
            })?;

        tracing::info!("Sending first response to the original request");
        Ok(RelayedResponse {
            status,
            headers: relayed_headers,
            body,
        })
    }

    async fn forward(
        &self,
        ip: Ipv4Addr,
        request: &InboundRequest,
        headers: &reqwest::header::HeaderMap,
    ) -> Result<reqwest::Response> {
        let url = target_url(ip, self.target_port, &request.path_and_query)?;

        tracing::info!("Forwarding request to {}", ip);
        self.client
            .request(request.method.clone(), url)
            .headers(headers.clone())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|source| BroadcastError::ForwardError { addr: ip, source })
    }
}

/// `http://<ip>[:port]<path>?<query>` for one backend.
pub fn target_url(ip: Ipv4Addr, port: u16, path_and_query: &str) -> Result<Url> {
    let path_and_query = if path_and_query.starts_with('/') {
        path_and_query.to_string()
    } else {
        format!("/{}", path_and_query)
    };

    Url::parse(&format!("http://{}:{}{}", ip, port, path_and_query)).map_err(|e| {
        BroadcastError::RequestBuildError {
            addr: ip,
            reason: e.to_string(),
        }
    })
}
