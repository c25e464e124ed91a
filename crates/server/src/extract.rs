use axum::extract::FromRequest;

use crate::errors::JsonApiError;

/// `Json` whose rejections answer with the API's JSON error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);
