use std::sync::Arc;

use axum::Router;

use crate::config::API_PREFIX;
use crate::{DataStore, create_farm_router, create_reading_router, create_sensor_router};

/// Builds the full API router over one shared store, mounted under `/api`.
pub fn create_router(store: Arc<dyn DataStore>) -> Router {
    let api = Router::new()
        .merge(create_farm_router(store.clone()))
        .merge(create_sensor_router(store.clone()))
        .merge(create_reading_router(store));

    Router::new().nest(API_PREFIX, api)
}
