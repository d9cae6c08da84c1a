use axum::extract::{FromRequest, Query, Request};
use axum::http::{header, Method, StatusCode};
use axum::Form;
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Management parameters read from the query string and, on a POST with a
/// url-encoded body, from the body as well. Body fields win over query
/// fields of the same name.
#[derive(Debug)]
pub struct Params<T>(pub T);

impl<T, S> FromRequest<S> for Params<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut fields) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| (StatusCode::BAD_REQUEST, e.body_text()))?;

        if req.method() == Method::POST && has_form_body(&req) {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.body_text()))?;
            fields.extend(body);
        }

        T::deserialize(MapDeserializer::<_, ValueError>::new(fields.into_iter()))
            .map(Params)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid parameters: {}", e)))
    }
}

fn has_form_body(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}
