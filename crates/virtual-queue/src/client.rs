use crate::{
    sort_guests,
    transport::{Method, Reply, Request, Transport},
    Error, Guest, Queue, TokenProvider,
};
use serde::Deserialize;

lazy_static::lazy_static! {
    pub static ref WDW_ORIGIN: url::Url = url::Url::parse("https://vqguest-svc-wdw.wdprapps.disney.com").unwrap();
    pub static ref DL_ORIGIN: url::Url = url::Url::parse("https://vqguest-svc.wdprapps.disney.com").unwrap();
}

/// Resort operating a virtual-queue service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resort {
    /// Walt Disney World.
    Wdw,
    /// Disneyland.
    Dl,
}

impl Resort {
    pub fn origin(&self) -> &'static url::Url {
        match self {
            Self::Wdw => &WDW_ORIGIN,
            Self::Dl => &DL_ORIGIN,
        }
    }

    /// Map a service origin, like `https://vqguest-svc.wdprapps.disney.com`,
    /// to its Resort. Returns None if `origin` isn't a virtual-queue origin.
    pub fn from_origin(origin: &str) -> Option<Self> {
        let origin = url::Url::parse(origin).ok()?;

        [Self::Wdw, Self::Dl]
            .into_iter()
            .find(|resort| resort.origin() == &origin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wdw => "WDW",
            Self::Dl => "DL",
        }
    }
}

impl std::fmt::Display for Resort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WDW" => Ok(Self::Wdw),
            "DL" => Ok(Self::Dl),
            _ => Err(format!("unknown resort {s:?} (expected WDW or DL)")),
        }
    }
}

/// Resource of the virtual-queue guest API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    GetQueues,
    GetLinkedGuests,
    JoinQueue,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetQueues => "getQueues",
            Self::GetLinkedGuests => "getLinkedGuests",
            Self::JoinQueue => "joinQueue",
        }
    }
}

/// Client of the virtual-queue guest API of a single origin.
#[derive(Debug, Clone)]
pub struct Client<T, P> {
    // Base URL of the service, always having a trailing slash.
    origin: url::Url,
    transport: T,
    tokens: P,
}

impl<T: Transport, P: TokenProvider> Client<T, P> {
    /// Build a Client of the `resort` service.
    pub fn new(resort: Resort, transport: T, tokens: P) -> Self {
        Self::with_origin(resort.origin().clone(), transport, tokens)
    }

    /// Build a Client of a service at an arbitrary `origin`.
    pub fn with_origin(mut origin: url::Url, transport: T, tokens: P) -> Self {
        if !origin.path().ends_with('/') {
            let path = format!("{}/", origin.path());
            origin.set_path(&path);
        }
        Self {
            origin,
            transport,
            tokens,
        }
    }

    /// Resort of this Client, or None if it uses a non-resort origin.
    pub fn resort(&self) -> Option<Resort> {
        Resort::from_origin(self.origin.as_str())
    }

    pub fn url(&self, resource: Resource) -> Result<url::Url, Error> {
        Ok(self
            .origin
            .join(&format!("application/v1/guest/{}", resource.as_str()))?)
    }

    /// Fetch all queues of the service. This request is not authorized.
    #[tracing::instrument(skip(self), err)]
    pub async fn get_queues(&self) -> Result<Vec<Queue>, Error> {
        #[derive(Deserialize)]
        struct Response {
            queues: Vec<Queue>,
        }
        let body = self
            .execute(Request {
                resource: Resource::GetQueues,
                method: Method::Get,
                url: self.url(Resource::GetQueues)?,
                access_token: None,
                body: None,
            })
            .await?;

        let Response { queues } = decode(Resource::GetQueues, body)?;
        Ok(queues)
    }

    /// Fetch the queue having `queue_id`.
    pub async fn get_queue(&self, queue_id: &str) -> Result<Queue, Error> {
        self.get_queues()
            .await?
            .into_iter()
            .find(|queue| queue.queue_id == queue_id)
            .ok_or_else(|| Error::QueueNotFound(queue_id.to_string()))
    }

    /// Fetch the guests which may be joined to `queue_id` by the authorized
    /// user, in their canonical display order.
    #[tracing::instrument(skip(self), err)]
    pub async fn get_linked_guests(&self, queue_id: &str) -> Result<Vec<Guest>, Error> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct LinkedGuestsRequest<'a> {
            queue_id: &'a str,
        }
        #[derive(Deserialize)]
        struct Response {
            guests: Vec<Guest>,
        }

        let body = self
            .post(Resource::GetLinkedGuests, &LinkedGuestsRequest { queue_id })
            .await?;
        let Response { mut guests } = decode(Resource::GetLinkedGuests, body)?;

        sort_guests(&mut guests);
        Ok(guests)
    }

    /// POST an authorized `request` to `resource`, returning its response body.
    pub(crate) async fn post<R>(
        &self,
        resource: Resource,
        request: &R,
    ) -> Result<serde_json::Value, Error>
    where
        R: serde::Serialize + Sync,
    {
        let body = serde_json::to_value(request).map_err(|source| Error::Encode {
            resource: resource.as_str(),
            source,
        })?;
        let access_token = self.tokens.access_token().await.map_err(Error::Token)?;

        self.execute(Request {
            resource,
            method: Method::Post,
            url: self.url(resource)?,
            access_token: Some(access_token),
            body: Some(body),
        })
        .await
    }

    async fn execute(&self, request: Request) -> Result<serde_json::Value, Error> {
        let resource = request.resource;
        tracing::debug!(url = %request.url, method = ?request.method, "sending request");

        let Reply { status, body } = self.transport.send(request).await?;

        // Statuses beyond 599 are nonstandard, and are also server errors.
        if status.as_u16() >= 500 {
            tracing::warn!(%status, resource = resource.as_str(), "request failed with server error");

            return Err(Error::Server {
                resource: resource.as_str(),
                status,
                response: body,
            });
        }
        tracing::trace!(%status, %body, "got response");

        Ok(body)
    }
}

fn decode<D>(resource: Resource, body: serde_json::Value) -> Result<D, Error>
where
    D: serde::de::DeserializeOwned,
{
    match D::deserialize(&body) {
        Ok(decoded) => Ok(decoded),
        Err(source) => Err(Error::MalformedResponse {
            resource: resource.as_str(),
            response: body,
            source,
        }),
    }
}
