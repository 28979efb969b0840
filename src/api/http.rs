use futures::{
    future::BoxFuture,
    FutureExt,
};
use reqwest::{
    Client,
    Url,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    types::{
        DishEnvelope,
        FeedbackEnvelope,
        ProfileEnvelope,
        ResetEnvelope,
    },
    DishApi,
};
use crate::core::{
    errors::{
        DishSwipeError,
        FetchError,
    },
    models::{
        DishFetch,
        Feedback,
        Profile,
        ResetOutcome,
    },
};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Talks to the dish service over HTTP.
///
/// The server remembers liked dishes in its session cookie, so the client
/// keeps a cookie store for its whole lifetime.
#[derive(Clone)]
pub struct HttpDishApi {
    client: Client,
    base: Url,
}

impl HttpDishApi {
    pub fn new(server_url: &str) -> Result<Self, DishSwipeError> {
        let invalid = |reason: String| DishSwipeError::InvalidServerUrl {
            url: server_url.to_string(),
            reason,
        };

        let base = Url::parse(server_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        let client = Client::builder().cookie_store(true).build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // The body is read whatever the status code: errors come back as JSON too.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        Ok(response.json::<T>().await?)
    }
}

impl DishApi for HttpDishApi {
    fn random_dish(&self) -> BoxFuture<'_, Result<DishFetch, FetchError>> {
        async move {
            let envelope: DishEnvelope = self.get_json(self.endpoint(&["random-dish"])).await?;
            envelope.into_fetch()
        }
        .boxed()
    }

    fn like<'a>(&'a self, dish_name: &'a str) -> BoxFuture<'a, Result<Feedback, FetchError>> {
        async move {
            let envelope: FeedbackEnvelope =
                self.get_json(self.endpoint(&["like", dish_name])).await?;
            Ok(envelope.into_feedback())
        }
        .boxed()
    }

    fn profile(&self) -> BoxFuture<'_, Result<Profile, FetchError>> {
        async move {
            let envelope: ProfileEnvelope = self.get_json(self.endpoint(&["profile"])).await?;
            Ok(envelope.into_profile())
        }
        .boxed()
    }

    fn reset_session(&self) -> BoxFuture<'_, Result<ResetOutcome, FetchError>> {
        async move {
            let envelope: ResetEnvelope = self.get_json(self.endpoint(&["reset-session"])).await?;
            Ok(envelope.into_outcome())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_encoded() {
        let api = HttpDishApi::new("http://localhost:5000").unwrap();

        assert_eq!(api.endpoint(&["random-dish"]).as_str(), "http://localhost:5000/random-dish");
        assert_eq!(
            api.endpoint(&["like", "Pad Thai"]).as_str(),
            "http://localhost:5000/like/Pad%20Thai"
        );
        assert_eq!(
            api.endpoint(&["like", "Salt/Pepper Squid"]).as_str(),
            "http://localhost:5000/like/Salt%2FPepper%20Squid"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let api = HttpDishApi::new("http://example.com/food/").unwrap();
        assert_eq!(api.endpoint(&["profile"]).as_str(), "http://example.com/food/profile");
    }

    #[test]
    fn test_invalid_server_url() {
        assert!(matches!(
            HttpDishApi::new("not a url"),
            Err(DishSwipeError::InvalidServerUrl { .. })
        ));
        assert!(matches!(
            HttpDishApi::new("mailto:chef@example.com"),
            Err(DishSwipeError::InvalidServerUrl { .. })
        ));
    }
}
