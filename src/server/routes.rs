//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::address::{Address, AddressInput};
use crate::coord::Coordinates;
use crate::error::Error;
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/addresses", get(within_radius_handler))
        .route("/addresses/", get(within_radius_handler))
        .route("/addresses/:distance", get(pairs_handler))
        .route("/:id", put(update_handler).delete(delete_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    /// HTTP status matching the error code
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_COORDINATES" => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::NotFound => "NOT_FOUND",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            other => {
                error!("Request failed: {}", other);
                "INTERNAL_ERROR"
            }
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Body returned by create, update and delete
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Always "Successful"
    pub transaction: String,
    /// Id of the affected address
    pub id: i64,
}

impl TransactionResponse {
    fn successful(status: StatusCode, id: i64) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                status: status.as_u16(),
                transaction: "Successful".to_string(),
                id,
            }),
        )
    }
}

/// List every stored address
///
/// GET /
async fn list_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Address>>, ApiError> {
    let mut session = state.session().await?;
    let addresses = session.all().await?;

    Ok(Json(addresses))
}

/// Radius query parameters
#[derive(Debug, Deserialize)]
pub struct RadiusQuery {
    /// Latitude of a stored address
    #[serde(alias = "loc_lat")]
    pub lat: f64,
    /// Longitude of a stored address
    #[serde(alias = "loc_lon")]
    pub lon: f64,
    /// Maximum distance in kilometers
    pub distance: f64,
}

/// Addresses within `distance` km of the stored address at (`lat`, `lon`)
///
/// GET /addresses/?lat=..&lon=..&distance=..
///
/// The center must match a stored address exactly. Addresses sharing the
/// center's exact coordinates are left out of the result.
async fn within_radius_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RadiusQuery>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let requested = Coordinates::new(query.lat, query.lon);
    requested.validate()?;

    let mut session = state.session().await?;
    let nearby = session.within_radius(requested, query.distance).await?;

    Ok(Json(nearby))
}

/// Every pair of addresses at most `distance` km apart
///
/// GET /addresses/:distance
async fn pairs_handler(
    State(state): State<Arc<AppState>>,
    Path(distance): Path<f64>,
) -> Result<Json<Vec<(Address, Address)>>, ApiError> {
    let mut session = state.session().await?;
    let pairs = session.pairs_within(distance).await?;

    Ok(Json(pairs))
}

/// Create an address
///
/// POST /
async fn create_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    input.validate()?;

    let mut session = state.session().await?;
    let address = session.insert(&input).await?;

    info!("Created address {}", address);
    Ok(TransactionResponse::successful(StatusCode::CREATED, address.id))
}

/// Overwrite an address
///
/// PUT /:id
async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    input.validate()?;

    let mut session = state.session().await?;
    let address = session.update(id, &input).await?;

    info!("Updated address {}", address);
    Ok(TransactionResponse::successful(StatusCode::OK, address.id))
}

/// Delete an address
///
/// DELETE /:id
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<TransactionResponse>), ApiError> {
    let mut session = state.session().await?;
    session.delete(id).await?;

    info!("Deleted address #{}", id);
    Ok(TransactionResponse::successful(StatusCode::OK, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use axum::body::{Body, Bytes};
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn create_test_app() -> Router {
        let database = Database::in_memory().await.unwrap();
        create_router(Arc::new(AppState::new(database)))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Bytes) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    async fn create(app: &Router, name: &str, lat: f64, lon: f64) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/",
            Some(serde_json::json!({ "name": name, "lat": lat, "lon": lon })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let created: TransactionResponse = serde_json::from_slice(&body).unwrap();
        created.id
    }

    async fn list(app: &Router) -> Vec<Address> {
        let (status, body) = send(app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = create_test_app().await;
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let app = create_test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/",
            Some(serde_json::json!({ "name": "Home", "loc_lat": 40.7128, "loc_lon": -74.006 })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let created: TransactionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.status, 201);
        assert_eq!(created.transaction, "Successful");

        let addresses = list(&app).await;
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].id, created.id);
        assert_eq!(addresses[0].name.as_deref(), Some("Home"));
        assert_eq!(addresses[0].lat, 40.7128);
    }

    #[tokio::test]
    async fn test_create_invalid_coordinates() {
        let app = create_test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/",
            Some(serde_json::json!({ "name": "Nowhere", "lat": 91.0, "lon": 0.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let app = create_test_app().await;
        let id = create(&app, "Old", 1.0, 1.0).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/{}", id),
            Some(serde_json::json!({ "lat": 2.0, "lon": 3.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let updated: TransactionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.status, 200);
        assert_eq!(updated.id, id);

        let addresses = list(&app).await;
        assert_eq!(
            addresses,
            vec![Address {
                id,
                name: None,
                lat: 2.0,
                lon: 3.0
            }]
        );
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let app = create_test_app().await;

        let (status, body) = send(
            &app,
            "PUT",
            "/999",
            Some(serde_json::json!({ "name": "Ghost", "lat": 0.0, "lon": 0.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.error, "Address not found");
    }

    #[tokio::test]
    async fn test_update_invalid_coordinates() {
        let app = create_test_app().await;
        let id = create(&app, "Home", 1.0, 1.0).await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/{}", id),
            Some(serde_json::json!({ "lat": 0.0, "lon": -200.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(list(&app).await[0].lon, 1.0);
    }

    #[tokio::test]
    async fn test_delete() {
        let app = create_test_app().await;
        let id = create(&app, "Home", 1.0, 1.0).await;

        let (status, _) = send(&app, "DELETE", &format!("/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list(&app).await.is_empty());

        let (status, body) = send(&app, "DELETE", &format!("/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_within_radius() {
        let app = create_test_app().await;
        create(&app, "Origin", 0.0, 0.0).await;
        let twin = create(&app, "Twin", 0.0, 0.0).await;
        let near = create(&app, "Near", 0.0, 0.5).await;
        create(&app, "Far", 0.0, 5.0).await;

        let (status, body) = send(&app, "GET", "/addresses/?lat=0&lon=0&distance=100", None).await;

        assert_eq!(status, StatusCode::OK);
        let found: Vec<Address> = serde_json::from_slice(&body).unwrap();
        let ids: Vec<i64> = found.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![near]);
        assert!(!ids.contains(&twin));
    }

    #[tokio::test]
    async fn test_within_radius_legacy_params() {
        let app = create_test_app().await;
        create(&app, "Origin", 10.0, 10.0).await;
        let near = create(&app, "Near", 10.1, 10.0).await;

        let (status, body) = send(
            &app,
            "GET",
            "/addresses/?loc_lat=10&loc_lon=10&distance=50",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let found: Vec<Address> = serde_json::from_slice(&body).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, near);
    }

    #[tokio::test]
    async fn test_within_radius_unknown_center() {
        let app = create_test_app().await;
        create(&app, "Origin", 0.0, 0.0).await;

        let (status, body) = send(&app, "GET", "/addresses/?lat=1&lon=1&distance=100", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_within_radius_invalid_center() {
        let app = create_test_app().await;

        let (status, body) = send(&app, "GET", "/addresses/?lat=95&lon=0&distance=100", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_pairs() {
        let app = create_test_app().await;
        let a = create(&app, "A", 0.0, 0.0).await;
        let b = create(&app, "B", 0.0, 0.5).await;
        let c = create(&app, "C", 0.0, 1.0).await;
        create(&app, "D", 30.0, 30.0).await;

        // a-b and b-c are ~56 km apart, a-c ~111 km
        let (status, body) = send(&app, "GET", "/addresses/60", None).await;

        assert_eq!(status, StatusCode::OK);
        let pairs: Vec<(Address, Address)> = serde_json::from_slice(&body).unwrap();
        let ids: Vec<(i64, i64)> = pairs.iter().map(|(x, y)| (x.id, y.id)).collect();
        assert_eq!(ids, vec![(a, b), (b, c)]);
    }

    #[tokio::test]
    async fn test_pairs_empty() {
        let app = create_test_app().await;
        create(&app, "Lonely", 0.0, 0.0).await;

        let (status, body) = send(&app, "GET", "/addresses/1000", None).await;

        assert_eq!(status, StatusCode::OK);
        let pairs: Vec<(Address, Address)> = serde_json::from_slice(&body).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_api_error_status() {
        let not_found = ApiError::from(Error::NotFound);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(Error::InvalidCoordinates("lat".to_string()));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal = ApiError::from(Error::Server("boom".to_string()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.code, "INTERNAL_ERROR");
    }
}
