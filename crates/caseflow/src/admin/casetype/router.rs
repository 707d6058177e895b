use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use uuid::Uuid;

use super::payload::{ConfigurationPayload, ConfigurationView};
use super::service::{AdminServiceError, ConfigurationAdminService};
use super::store::{ConfigurationStore, StoreError};
use crate::admin::masterdata::MasterDataCatalog;

/// Shared state for the admin endpoints: the service plus the catalog used
/// to resolve master-data references on inbound payloads.
pub struct AdminState<S> {
    pub service: Arc<ConfigurationAdminService<S>>,
    pub catalog: Arc<dyn MasterDataCatalog>,
}

impl<S> Clone for AdminState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

/// Router builder exposing the case-type configuration admin endpoints.
pub fn admin_router<S>(
    service: Arc<ConfigurationAdminService<S>>,
    catalog: Arc<dyn MasterDataCatalog>,
) -> Router
where
    S: ConfigurationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/configurations",
            get(list_handler::<S>).put(upsert_handler::<S>),
        )
        .route(
            "/api/v1/admin/configurations/:case_type_id",
            get(read_handler::<S>),
        )
        .with_state(AdminState { service, catalog })
}

pub(crate) async fn list_handler<S>(State(state): State<AdminState<S>>) -> Response
where
    S: ConfigurationStore + 'static,
{
    match state.service.list() {
        Ok(configurations) => {
            let views: Vec<ConfigurationView> = configurations
                .iter()
                .map(ConfigurationView::from_configuration)
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn read_handler<S>(
    State(state): State<AdminState<S>>,
    Path(case_type_id): Path<Uuid>,
) -> Response
where
    S: ConfigurationStore + 'static,
{
    match state.service.find(case_type_id) {
        Ok(Some(configuration)) => {
            let view = ConfigurationView::from_configuration(&configuration);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "error": format!("no configuration for case type '{case_type_id}'"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn upsert_handler<S>(
    State(state): State<AdminState<S>>,
    axum::Json(payload): axum::Json<ConfigurationPayload>,
) -> Response
where
    S: ConfigurationStore + 'static,
{
    let mut configuration =
        match state
            .service
            .read_or_new(payload.case_type_id, &payload.case_type_name)
        {
            Ok(configuration) => configuration,
            Err(error) => return internal_error(error),
        };

    if let Err(error) = payload.apply_to(&mut configuration, state.catalog.as_ref()) {
        let body = json!({
            "error": error.to_string(),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    }

    match state.service.store(configuration) {
        Ok(stored) => {
            let view = ConfigurationView::from_configuration(&stored);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AdminServiceError::Store(StoreError::Conflict)) => {
            let body = json!({
                "error": "configuration was updated concurrently",
            });
            (StatusCode::CONFLICT, axum::Json(body)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: AdminServiceError) -> Response {
    let body = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}
