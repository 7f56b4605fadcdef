use crate::{Error, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request is a single request to a virtual-queue resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub resource: Resource,
    pub method: Method,
    pub url: url::Url,
    /// Bearer token to authorize the request with, if any.
    pub access_token: Option<String>,
    /// JSON request body, if any.
    pub body: Option<serde_json::Value>,
}

/// Reply is the status and JSON body returned for a Request.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: reqwest::StatusCode,
    pub body: serde_json::Value,
}

/// Transport sends Requests to the virtual-queue service.
///
/// Transports report failures to send a request or to read its reply
/// (including aborted requests) as errors. Any status which was actually
/// returned by the service is a Reply, and is interpreted by the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request,
    ) -> impl std::future::Future<Output = Result<Reply, Error>> + Send;
}

/// HttpTransport is a Transport of HTTPS requests.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Build an HttpTransport which identifies itself with `user_agent`.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::ClientBuilder::new()
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http_client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Reply, Error> {
        let Request {
            resource,
            method,
            url,
            access_token,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.http_client.get(url),
            Method::Post => self.http_client.post(url),
        };
        if let Some(token) = access_token {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("BEARER {token}"));
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let map_err = |source: reqwest::Error| Error::Request {
            resource: resource.as_str(),
            source: source.into(),
        };
        let response = builder.send().await.map_err(map_err)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_err)?;

        // Error pages are frequently not JSON. Keep a prefix of them as a
        // JSON string so they may still be surfaced.
        let body = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) => serde_json::Value::String(
                String::from_utf8_lossy(&bytes[..(bytes.len().min(512))]).into_owned(),
            ),
        };

        Ok(Reply { status, body })
    }
}
