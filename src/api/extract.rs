use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Login-style input taken from wherever the client put it.
///
/// - `application/x-www-form-urlencoded` body: parsed as a form.
/// - No `Content-Type` but a query string: parsed from the query.
/// - Anything else: parsed as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormOrQuery<T>(pub T);

enum Source {
    Json,
    Form,
    Query,
}

fn source(req: &Request) -> Source {
    match req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => Source::Form,
        None if req.uri().query().is_some_and(|q| !q.is_empty()) => Source::Query,
        _ => Source::Json,
    }
}

impl<S, T> FromRequest<S> for JsonFormOrQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match source(&req) {
            Source::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
            Source::Query => {
                let Query(value) = Query::<T>::try_from_uri(req.uri())?;
                Ok(Self(value))
            }
            Source::Json => {
                let Json(value) = Json::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
        }
    }
}
