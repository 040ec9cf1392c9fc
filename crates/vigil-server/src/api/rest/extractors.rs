//! Custom extractors
//!
//! Wraps `axum::Json` so body rejections come back in the standard
//! error envelope instead of axum's plain-text default.

use super::types::{ApiResponse, ErrorBody, ResponseMeta};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

/// JSON extractor producing enveloped 400s on malformed bodies
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<serde_json::Value>>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("JSON syntax error: {}", err)
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection),
                };

                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::failure(
                        ErrorBody {
                            code: "VALIDATION_ERROR".to_string(),
                            message,
                            details: None,
                        },
                        ResponseMeta::now(),
                    )),
                ))
            }
        }
    }
}
