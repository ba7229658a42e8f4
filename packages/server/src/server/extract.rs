//! Request body extraction.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::domains::research::ValidationError;
use crate::server::error::ApiError;

/// JSON body where an empty body reads as `T::default()`.
///
/// A blank body is the same as `{}`, so it reaches validation instead of
/// failing as malformed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content_type = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        // No JSON body at all, so there is no query either
        if !json_content_type {
            return Err(ValidationError::MissingQuery.into());
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    use crate::domains::research::ResearchRequest;

    async fn extract(content_type: Option<&str>, body: &str) -> Result<ResearchRequest, ApiError> {
        let mut builder = Request::post("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        JsonBody::<ResearchRequest>::from_request(request, &())
            .await
            .map(|JsonBody(value)| value)
    }

    #[tokio::test]
    async fn empty_body_reads_as_default() {
        for body in ["", "  \n"] {
            let request = extract(Some("application/json"), body).await.unwrap();
            assert!(request.query.is_none());
            assert_eq!(
                request.validate(),
                Err(ValidationError::MissingQuery)
            );
        }
    }

    #[tokio::test]
    async fn json_body_is_parsed() {
        let request = extract(Some("application/json; charset=utf-8"), r#"{"query":"rust","depth":2}"#)
            .await
            .unwrap();
        assert_eq!(request.query.as_deref(), Some("rust"));
        assert_eq!(request.depth, Some(2));
    }

    #[tokio::test]
    async fn non_json_body_has_no_query() {
        let err = extract(Some("text/plain"), "query=rust").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::MissingQuery)
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn json_suffix_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(is_json(&headers));
        assert!(!is_json(&HeaderMap::new()));
    }
}
