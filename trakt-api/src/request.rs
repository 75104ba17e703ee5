use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

pub use reqwest::Method;

/// A single Trakt endpoint: where it lives, what it sends and what it returns.
pub trait Request {
    type Data: Serialize;
    type Response: DeserializeOwned;

    const METHOD: Method = Method::GET;

    /// Whether the endpoint needs an OAuth bearer token.
    const AUTHENTICATED: bool = false;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// Response type for endpoints that answer with an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse;
