//! Dashboard markup: the chart chooser, the per-chart controls and the
//! chart fragments themselves. Actual drawing is plotly.js's job; the
//! fragments only carry the projected point sets as inline JSON.

use maud::{html, Markup, PreEscaped};
use serde_json::{json, Value};

use crate::charts::{GenderRatioPoint, GeoPoint, TrendFeature, TrendPoint};
use crate::models::EventType;
use crate::names;

pub fn dashboard() -> Markup {
    html! {
        p { "Use the charts to explore the data and then answer the questions below." }

        div."grid dashboard-grid" {
            div."chart-chooser" {
                label for="chart-choice" { "Choose a chart:" }
                select id="chart-choice" name="chart"
                       hx-get=(names::CHART_CONTROLS_URL)
                       hx-target="#chart-controls"
                       hx-include="this" {
                    option value="" selected disabled { "Select chart to view..." }
                    option value="trends" { "Trends" }
                    option value="gender" { "Participants by gender" }
                    option value="locations" { "Paralympics locations" }
                }
                div id="chart-controls" {}
            }
            div id="chart-area" {}
        }

        hr;

        div id="quiz" hx-get=(names::QUIZ_URL) hx-trigger="load" hx-swap="innerHTML" {
            article aria-busy="true" { "Loading questions..." }
        }
    }
}

/// Cleared chart area, swapped out-of-band whenever the chart choice
/// changes so stale charts never linger next to new controls.
fn cleared_chart_area() -> Markup {
    html! {
        div id="chart-area" hx-swap-oob="true" {}
    }
}

pub fn trend_controls() -> Markup {
    html! {
        label for="trend-feature" { "Choose feature:" }
        select id="trend-feature" name="feature"
               hx-get=(names::TREND_CHART_URL)
               hx-target="#chart-area"
               hx-include="this"
               hx-trigger="load, change" {
            @for feature in TrendFeature::ALL {
                option value=(feature) { (capitalize(&feature.to_string())) }
            }
        }
        (cleared_chart_area())
    }
}

pub fn gender_controls() -> Markup {
    html! {
        fieldset id="gender-pills" {
            legend { "Choose the type of Paralympics:" }
            @for event_type in EventType::ALL {
                label {
                    input type="checkbox" name="event_type" value=(event_type)
                          hx-get=(names::GENDER_CHART_URL)
                          hx-target="#chart-area"
                          hx-include="#gender-pills"
                          hx-trigger="change";
                    (event_type)
                }
            }
        }
        (cleared_chart_area())
    }
}

pub fn locations_controls() -> Markup {
    html! {
        div hx-get=(names::LOCATIONS_CHART_URL)
            hx-target="#chart-area"
            hx-trigger="load" {}
        (cleared_chart_area())
    }
}

pub fn no_controls() -> Markup {
    cleared_chart_area()
}

pub fn trend_chart(feature: TrendFeature, points: &[TrendPoint]) -> Markup {
    let traces: Vec<Value> = EventType::ALL
        .iter()
        .map(|&event_type| {
            let series: Vec<&TrendPoint> =
                points.iter().filter(|p| p.event_type == event_type).collect();
            json!({
                "type": "scatter",
                "mode": "lines",
                "name": event_type.to_string(),
                "x": series.iter().map(|p| p.year).collect::<Vec<_>>(),
                "y": series.iter().map(|p| p.value).collect::<Vec<_>>(),
            })
        })
        .collect();

    let layout = json!({
        "title": { "text": format!("How has the number of {feature} changed over time?") },
        "xaxis": { "title": { "text": "year" } },
        "yaxis": { "title": { "text": feature.to_string() } },
        "template": "simple_white",
    });

    plot("trend-plot", &Value::Array(traces), &layout)
}

pub fn gender_chart(event_type: EventType, points: &[GenderRatioPoint]) -> Markup {
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    let traces = json!([
        {
            "type": "bar",
            "name": "Male",
            "x": labels,
            "y": points.iter().map(|p| p.male_ratio).collect::<Vec<_>>(),
        },
        {
            "type": "bar",
            "name": "Female",
            "x": labels,
            "y": points.iter().map(|p| p.female_ratio).collect::<Vec<_>>(),
        },
    ]);

    let layout = json!({
        "title": {
            "text": format!(
                "How has the ratio of female:male participants changed in the {event_type} paralympics?"
            )
        },
        "barmode": "stack",
        "xaxis": { "ticklen": 0 },
        "yaxis": { "tickformat": ".0%" },
    });

    plot(&format!("gender-plot-{event_type}"), &traces, &layout)
}

pub fn gender_charts(charts: &[(EventType, Vec<GenderRatioPoint>)]) -> Markup {
    html! {
        @if charts.is_empty() {
            p { "Choose the type of Paralympics to display." }
        }
        @for (event_type, points) in charts {
            (gender_chart(*event_type, points))
        }
    }
}

pub fn locations_chart(points: &[GeoPoint]) -> Markup {
    let traces = json!([{
        "type": "scattergeo",
        "mode": "markers",
        "lat": points.iter().map(|p| p.latitude).collect::<Vec<_>>(),
        "lon": points.iter().map(|p| p.longitude).collect::<Vec<_>>(),
        "text": points.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
        "hoverinfo": "text",
    }]);

    let layout = json!({
        "title": { "text": "Where have the paralympics been held?" },
        "geo": { "showland": true, "fitbounds": "locations" },
    });

    plot("locations-plot", &traces, &layout)
}

pub fn unable_to_load(detail: &str) -> Markup {
    html! {
        p."error" { "Unable to load data. " (detail) }
    }
}

/// A div for plotly to draw into plus the `newPlot` call with the data
/// inlined. htmx evaluates the script when it swaps the fragment in.
fn plot(id: &str, data: &Value, layout: &Value) -> Markup {
    let call = format!(
        "Plotly.newPlot({}, {data}, {layout}, {{\"responsive\": true}});",
        serde_json::to_string(id).expect("plot id is valid json"),
    );
    html! {
        div id=(id) class="plot" {}
        script { (PreEscaped(call)) }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
