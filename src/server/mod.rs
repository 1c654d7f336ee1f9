mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{API, DynAPI};
use crate::server::handlers::{offers, quotes};

pub async fn serve<T: API + Sync + Send + 'static>(api: T, port: u16) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/quotes", post(quotes::create))
        .route("/offert/:id", get(offers::view))
        .route("/offert/:id/link", post(offers::create_link))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
