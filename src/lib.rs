pub mod api;
pub mod authoring;
pub mod charts;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod quiz;
pub mod rejections;
pub mod statics;
pub mod utils;
pub mod views;

use axum::{http::StatusCode, response::IntoResponse, Router};
use maud::html;

#[derive(Clone)]
pub struct AppState {
    pub api: api::ApiClient,
    pub sessions: quiz::SessionStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::dashboard::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::admin::routes())
        .nest("/static", statics::routes())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    let page = views::page(
        "Not Found",
        html! {
            h1 { "NOT_FOUND" }
        },
    );
    (StatusCode::NOT_FOUND, page)
}
