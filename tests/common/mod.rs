//! In-process stub of the Paralympics REST API, with per-route hit
//! counters so tests can assert exactly which calls reached the backend.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Default)]
pub struct Backend {
    pub games: Vec<Value>,
    pub questions: Vec<Value>,
    pub responses: Vec<Value>,

    pub all_hits: u32,
    pub question_list_hits: u32,
    pub question_writes: u32,
    pub response_writes: u32,

    /// When set, every read route answers 500.
    pub fail_reads: bool,
    /// Fail response writes once this many have succeeded.
    pub fail_responses_after: Option<u32>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub async fn spawn_backend(backend: Backend) -> (String, SharedBackend) {
    let shared: SharedBackend = Arc::new(Mutex::new(backend));

    let app = Router::new()
        .route("/all", get(all))
        .route("/question", get(question_list).post(create_question))
        .route("/question/{id}", get(question_by_id))
        .route("/response/search", get(search_responses))
        .route("/response", post(create_response))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub backend");
    });

    (format!("http://{addr}"), shared)
}

/// A small table in the shape of `GET /all`, including the warts the real
/// data has: a junk longitude and a zero participants total.
pub fn sample_games() -> Vec<Value> {
    vec![
        json!({
            "event_type": "summer", "year": 1960, "place_name": "Rome",
            "sports": 8, "events": 113, "countries": 23,
            "participants": 209, "participants_m": 178, "participants_f": 31,
            "latitude": 41.9, "longitude": 12.5
        }),
        json!({
            "event_type": "summer", "year": 1964, "place_name": "Tokyo",
            "sports": 9, "events": 144, "countries": 21,
            "participants": 0, "participants_m": 0, "participants_f": 0,
            "latitude": "35.68", "longitude": "N/A"
        }),
        json!({
            "event_type": "winter", "year": 1976, "place_name": "Ornskoldsvik",
            "sports": 2, "events": 53, "countries": 16,
            "participants": 198, "participants_m": 161, "participants_f": 37,
            "latitude": 63.29, "longitude": 18.72
        }),
    ]
}

/// `n` questions, each with four responses of which the first is correct.
pub fn seed_quiz(backend: &mut Backend, n: u32) {
    for qid in 1..=n {
        backend.questions.push(json!({
            "id": qid,
            "question_text": format!("Question {qid}?")
        }));
        for option in 1..=4u32 {
            let id = (qid - 1) * 4 + option;
            backend.responses.push(json!({
                "id": id,
                "question_id": qid,
                "response_text": format!("Answer {option} to question {qid}"),
                "is_correct": option == 1
            }));
        }
    }
}

/// The response id the stub marks correct for a question.
pub fn correct_option_id(qid: u32) -> u32 {
    (qid - 1) * 4 + 1
}

async fn all(State(backend): State<SharedBackend>) -> Result<Json<Value>, StatusCode> {
    let mut backend = backend.lock().unwrap();
    if backend.fail_reads {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    backend.all_hits += 1;
    Ok(Json(Value::Array(backend.games.clone())))
}

async fn question_list(State(backend): State<SharedBackend>) -> Result<Json<Value>, StatusCode> {
    let mut backend = backend.lock().unwrap();
    if backend.fail_reads {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    backend.question_list_hits += 1;
    Ok(Json(Value::Array(backend.questions.clone())))
}

async fn question_by_id(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let backend = backend.lock().unwrap();
    if backend.fail_reads {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    backend
        .questions
        .iter()
        .find(|q| q["id"] == json!(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
struct SearchQuery {
    question_id: i64,
}

async fn search_responses(
    State(backend): State<SharedBackend>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, StatusCode> {
    let backend = backend.lock().unwrap();
    if backend.fail_reads {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let matches: Vec<Value> = backend
        .responses
        .iter()
        .filter(|r| r["question_id"] == json!(query.question_id))
        .cloned()
        .collect();
    Ok(Json(Value::Array(matches)))
}

async fn create_question(
    State(backend): State<SharedBackend>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = backend.lock().unwrap();
    backend.question_writes += 1;

    let id = backend.questions.len() as i64 + 1;
    let created = json!({
        "id": id,
        "question_text": body["question_text"]
    });
    backend.questions.push(created.clone());
    Ok(Json(created))
}

async fn create_response(
    State(backend): State<SharedBackend>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = backend.lock().unwrap();

    if let Some(limit) = backend.fail_responses_after {
        if backend.response_writes >= limit {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
    backend.response_writes += 1;

    let id = backend.responses.len() as i64 + 1;
    let mut created = body;
    created["id"] = json!(id);
    backend.responses.push(created.clone());
    Ok(Json(created))
}
