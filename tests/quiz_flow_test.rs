mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{correct_option_id, sample_games, seed_quiz, spawn_backend, Backend};
use http_body_util::BodyExt;
use paradash::{api::ApiClient, names, quiz::SessionStore, router, AppState};
use tower::ServiceExt;

async fn app_with_backend(backend: Backend) -> (axum::Router, common::SharedBackend) {
    let (base, shared) = spawn_backend(backend).await;
    let api = ApiClient::new(&base).expect("build api client");
    let app = router(AppState {
        api,
        sessions: SessionStore::new(),
    });
    (app, shared)
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

/// First `Set-Cookie` value up to the attributes, e.g. "quiz_session=01ABC".
fn session_cookie(resp: &axum::response::Response) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("cookie is ascii")
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request build should succeed")
}

fn submit(cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(names::SUBMIT_ANSWER_URL)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

#[tokio::test]
async fn quiz_runs_from_first_question_to_completion() {
    let mut backend = Backend::default();
    seed_quiz(&mut backend, 2);
    let (app, _shared) = app_with_backend(backend).await;

    // First render mints the session and shows question 1
    let resp = app.clone().oneshot(get(names::QUIZ_URL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    let body = body_text(resp).await;
    assert!(body.contains("Question 1?"));
    assert!(body.contains("Submit answer"));

    // Submitting nothing re-prompts without advancing
    let resp = app.clone().oneshot(submit(&cookie, "")).await.unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Please select an answer."));
    assert!(body.contains("Question 1?"));

    // A wrong answer stays on the same question
    let wrong = correct_option_id(1) + 1;
    let resp = app
        .clone()
        .oneshot(submit(&cookie, &format!("option={wrong}")))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Please try again!"));
    assert!(body.contains("Question 1?"));

    // Correct answer advances to question 2
    let right = correct_option_id(1);
    let resp = app
        .clone()
        .oneshot(submit(&cookie, &format!("option={right}")))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Question 2?"));

    // Correct answer on the final question completes the quiz and drops
    // the session cookie
    let right = correct_option_id(2);
    let resp = app
        .clone()
        .oneshot(submit(&cookie, &format!("option={right}")))
        .await
        .unwrap();
    let removal = session_cookie(&resp);
    assert_eq!(removal, format!("{}=", names::QUIZ_SESSION_COOKIE_NAME));
    let body = body_text(resp).await;
    assert!(body.contains("Questions complete, well done!"));
}

#[tokio::test]
async fn quiz_degrades_when_the_backend_is_down() {
    let mut backend = Backend::default();
    seed_quiz(&mut backend, 1);
    backend.fail_reads = true;
    let (app, _shared) = app_with_backend(backend).await;

    let resp = app.oneshot(get(names::QUIZ_URL)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Unable to load questions."));
}

#[tokio::test]
async fn question_without_responses_shows_a_notice() {
    let mut backend = Backend::default();
    backend.questions.push(serde_json::json!({
        "id": 1,
        "question_text": "An orphaned question?"
    }));
    let (app, _shared) = app_with_backend(backend).await;

    let resp = app.oneshot(get(names::QUIZ_URL)).await.unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("No responses available for this question."));
}

#[tokio::test]
async fn chart_fragments_render_plotly_calls() {
    let backend = Backend {
        games: sample_games(),
        ..Default::default()
    };
    let (app, _shared) = app_with_backend(backend).await;

    let resp = app
        .clone()
        .oneshot(get("/chart/trend?feature=sports"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Plotly.newPlot"));
    assert!(body.contains("sports"));

    let resp = app
        .clone()
        .oneshot(get("/chart/gender?event_type=Winter"))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Ornskoldsvik 1976"));

    // Tokyo 1964 has an "N/A" longitude, so the map omits it
    let resp = app.clone().oneshot(get("/chart/locations")).await.unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Rome 1960"));
    assert!(!body.contains("Tokyo 1964"));
}

#[tokio::test]
async fn unknown_trend_feature_is_a_bad_request() {
    let backend = Backend {
        games: sample_games(),
        ..Default::default()
    };
    let (app, _shared) = app_with_backend(backend).await;

    let resp = app
        .oneshot(get("/chart/trend?feature=medals"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_form_saves_a_valid_question() {
    let mut backend = Backend::default();
    seed_quiz(&mut backend, 1);
    let (app, shared) = app_with_backend(backend).await;

    let form = "question_text=Where+were+the+1960+Games%3F\
                &response_text_1=Rome&is_correct_1=on\
                &response_text_2=Tokyo&response_text_3=Seoul&response_text_4=Atlanta";
    let req = Request::builder()
        .method(Method::POST)
        .uri(names::CREATE_QUESTION_URL)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Question saved successfully."));

    let backend = shared.lock().unwrap();
    assert_eq!(backend.question_writes, 1);
    assert_eq!(backend.response_writes, 4);
}

#[tokio::test]
async fn admin_form_reports_every_violation() {
    let (app, shared) = app_with_backend(Backend::default()).await;

    // Empty question, empty option 2, no correct flag
    let form = "question_text=&response_text_1=Rome\
                &response_text_2=&response_text_3=Seoul&response_text_4=Atlanta";
    let req = Request::builder()
        .method(Method::POST)
        .uri(names::CREATE_QUESTION_URL)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.unwrap();
    let body = body_text(resp).await;
    assert!(body.contains("Question text is required."));
    assert!(body.contains("Option 2 must have text."));
    assert!(body.contains("Please select exactly one correct response (none selected)."));

    // Nothing reached the backend
    let backend = shared.lock().unwrap();
    assert_eq!(backend.question_writes, 0);
    assert_eq!(backend.response_writes, 0);
}
