use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::types::Message;
use service::customer::{Customer, CustomerInput, CustomerPatch};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

/// List all customers
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    Ok(Json(state.customers.list().await?))
}

/// Fetch one customer
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.get(id).await?))
}

/// Create a customer; answers 201 with a `Location` header
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CustomerInput>,
) -> Result<Response, JsonApiError> {
    let created = state.customers.insert(input).await?;
    let location = format!("/api/customers/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

/// Full update
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    ApiJson(input): ApiJson<CustomerInput>,
) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.replace(id, input).await?))
}

/// Partial update
pub async fn merge(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    ApiJson(patch): ApiJson<CustomerPatch>,
) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.merge(id, patch).await?))
}

/// Delete; the body is the removed customer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, JsonApiError> {
    Ok(Json(state.customers.delete(id).await?))
}

/// Upload the raw request body as the customer's picture
pub async fn put_picture(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<Message>, JsonApiError> {
    state.customers.set_picture(id, body.to_vec()).await?;
    Ok(Json(Message { message: "customer picture uploaded successfully".into() }))
}

/// Download the picture as `image/jpeg`
pub async fn get_picture(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Response, JsonApiError> {
    match state.customers.get_picture(id).await? {
        Some(bytes) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("this customer does not have a picture".into()),
        )),
    }
}

/// Remove the picture, keeping the customer
pub async fn delete_picture(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, JsonApiError> {
    state.customers.clear_picture(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
