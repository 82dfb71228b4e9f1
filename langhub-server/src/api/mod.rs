//! HTTP API
//!
//! One module per resource, each exposing a `router()`. `build_app` stacks
//! the HTTP middleware on the merged router.

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::AppState;

pub mod auth;
pub mod frameworks;
pub mod health;
pub mod languages;
pub mod reviews;
pub mod roles;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(roles::router())
        .merge(users::router())
        .merge(languages::router())
        .merge(frameworks::router())
        .merge(reviews::router())
        .merge(health::router())
}

/// The fully configured application.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
