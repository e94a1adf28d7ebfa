use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use service::customer::domain::{Customer, CustomerInput};
use tracing::info;

use crate::{errors::ApiError, metrics::observe, routes::ServerState};

#[utoipa::path(
    get, path = "/api/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let res = state.customers.list().await.map_err(ApiError::from);
    observe("list", res).map(|all| {
        info!(count = all.len(), "list customers");
        Json(all)
    })
}

#[utoipa::path(
    post, path = "/api/customers", tag = "customers",
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ValidationErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let res = match payload {
        Ok(Json(input)) => state.customers.create(input).await.map_err(ApiError::from),
        Err(rejection) => Err(rejection.into()),
    };
    observe("create", res).map(Json)
}

#[utoipa::path(
    get, path = "/api/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, ApiError> {
    let res = match id {
        Ok(Path(id)) => match state.customers.get(id).await {
            Ok(Some(c)) => Ok(c),
            Ok(None) => Err(ApiError::NotFound),
            Err(e) => Err(e.into()),
        },
        Err(rejection) => Err(rejection.into()),
    };
    observe("get", res).map(Json)
}

#[utoipa::path(
    put, path = "/api/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let res = match (id, payload) {
        (Ok(Path(id)), Ok(Json(input))) => state.customers.update(id, input).await.map_err(ApiError::from),
        (Err(rejection), _) => Err(rejection.into()),
        (_, Err(rejection)) => Err(rejection.into()),
    };
    observe("update", res).map(Json)
}

#[utoipa::path(
    delete, path = "/api/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let res = match id {
        Ok(Path(id)) => state.customers.delete(id).await.map_err(ApiError::from),
        Err(rejection) => Err(rejection.into()),
    };
    observe("delete", res).map(|()| StatusCode::OK)
}
