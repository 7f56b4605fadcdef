use std::future::Future;

/// TokenProvider produces the access token which authorizes requests.
///
/// It's consulted before every authorized request, and is responsible
/// for any caching or refreshing of the token it returns.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Fixed is a TokenProvider of a constant token.
#[derive(Clone)]
pub struct Fixed(String);

/// Build a TokenProvider which always returns `token`.
pub fn fixed(token: impl Into<String>) -> Fixed {
    Fixed(token.into())
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Fixed").field(&"<redacted>").finish()
    }
}

impl TokenProvider for Fixed {
    fn access_token(&self) -> impl Future<Output = anyhow::Result<String>> + Send {
        std::future::ready(Ok(self.0.clone()))
    }
}

impl<F, Fut> TokenProvider for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<String>> + Send,
{
    fn access_token(&self) -> impl Future<Output = anyhow::Result<String>> + Send {
        self()
    }
}
