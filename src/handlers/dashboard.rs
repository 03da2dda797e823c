use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    charts::{self, TrendFeature},
    extractors::IsHtmx,
    models::EventType,
    names,
    rejections::AppError,
    views,
    views::dashboard as dashboard_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::DASHBOARD_URL, get(dashboard_page))
        .route(names::CHART_CONTROLS_URL, get(chart_controls))
        .route(names::TREND_CHART_URL, get(trend_chart))
        .route(names::GENDER_CHART_URL, get(gender_chart))
        .route(names::LOCATIONS_CHART_URL, get(locations_chart))
}

async fn dashboard_page(IsHtmx(is_htmx): IsHtmx) -> Markup {
    views::render(is_htmx, "Dashboard", dashboard_views::dashboard())
}

#[derive(Deserialize)]
struct ControlsQuery {
    #[serde(default)]
    chart: String,
}

/// Secondary controls for the chosen chart; switching charts also clears
/// the chart area and any state the previous chart's controls held.
async fn chart_controls(Query(query): Query<ControlsQuery>) -> Markup {
    match query.chart.as_str() {
        "trends" => dashboard_views::trend_controls(),
        "gender" => dashboard_views::gender_controls(),
        "locations" => dashboard_views::locations_controls(),
        _ => dashboard_views::no_controls(),
    }
}

#[derive(Deserialize)]
struct TrendQuery {
    feature: String,
}

async fn trend_chart(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Markup, AppError> {
    // An unknown feature means a broken caller, not a user mistake
    let feature: TrendFeature = query.feature.parse().map_err(|e| {
        tracing::error!("trend chart requested with bad feature: {e}");
        AppError::Input("invalid trend feature")
    })?;

    let rows = match state.api.games().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("could not load games data: {e}");
            return Ok(dashboard_views::unable_to_load(&e.to_string()));
        }
    };

    Ok(dashboard_views::trend_chart(
        feature,
        &charts::trend(&rows, feature),
    ))
}

#[derive(Deserialize)]
struct GenderQuery {
    #[serde(default)]
    event_type: Vec<String>,
}

async fn gender_chart(
    State(state): State<AppState>,
    // axum-extra Query: the checkbox group submits `event_type` repeatedly
    axum_extra::extract::Query(query): axum_extra::extract::Query<GenderQuery>,
) -> Result<Markup, AppError> {
    let mut selected = Vec::new();
    for raw in &query.event_type {
        let event_type: EventType = raw.parse().map_err(|e| {
            tracing::error!("gender chart requested with bad event type: {e}");
            AppError::Input("invalid event type")
        })?;
        selected.push(event_type);
    }

    let rows = match state.api.games().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("could not load games data: {e}");
            return Ok(dashboard_views::unable_to_load(&e.to_string()));
        }
    };

    let per_type: Vec<_> = selected
        .into_iter()
        .map(|event_type| (event_type, charts::gender_ratio(&rows, event_type)))
        .collect();

    Ok(dashboard_views::gender_charts(&per_type))
}

async fn locations_chart(State(state): State<AppState>) -> Markup {
    let rows = match state.api.games().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("could not load games data: {e}");
            return dashboard_views::unable_to_load(&e.to_string());
        }
    };

    dashboard_views::locations_chart(&charts::locations(&rows))
}
