use axum::{
    extract::State,
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use maud::Markup;
use serde::Deserialize;

use crate::{
    names,
    quiz::{QuizState, SubmitOutcome},
    rejections::{AppError, ResultExt},
    views::quiz as quiz_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZ_URL, get(question_block))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
}

/// Render the session's current quiz step, minting the session (and its
/// cookie) on first contact.
async fn question_block(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Markup) {
    let token = jar
        .get(names::QUIZ_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string());
    let (token, quiz) = state.sessions.get_or_create(token.as_deref());

    let step = render_step(&state, quiz, None).await;
    (jar.add(session_cookie(&token)), step)
}

#[derive(Deserialize)]
struct SubmitAnswerBody {
    #[serde(default)]
    option: Option<String>,
}

async fn submit_answer(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(body): Form<SubmitAnswerBody>,
) -> Result<(CookieJar, Markup), AppError> {
    let token = jar
        .get(names::QUIZ_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string());
    let (token, mut quiz) = state.sessions.get_or_create(token.as_deref());
    let jar = jar.add(session_cookie(&token));

    let total = match state.api.questions_count().await {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("could not count questions: {e}");
            return Ok((jar, quiz_views::unable_to_load("questions", &e.to_string())));
        }
    };

    // Resolve the submitted option id against the current question's
    // responses; correctness lives with the backend, not the form.
    let selection = match (&body.option, quiz.current(total)) {
        (Some(option), Some(index)) => {
            let option_id: i32 = option.parse().reject_input("failed to parse option id")?;

            let responses = match state.api.responses(index).await {
                Ok(responses) => responses,
                Err(e) => {
                    tracing::warn!("could not load responses for question {index}: {e}");
                    return Ok((jar, quiz_views::no_responses()));
                }
            };

            let is_correct = responses
                .iter()
                .find(|r| r.id == option_id)
                .is_some_and(|r| r.is_correct);
            Some(is_correct)
        }
        _ => None,
    };

    let outcome = quiz.submit(selection, total);
    state.sessions.update(&token, quiz);

    Ok(match outcome {
        SubmitOutcome::SelectionRequired => {
            let step = render_step(&state, quiz, Some("Please select an answer.")).await;
            (jar, step)
        }
        SubmitOutcome::TryAgain => {
            let step = render_step(&state, quiz, Some("Please try again!")).await;
            (jar, step)
        }
        SubmitOutcome::Advanced { .. } => {
            let step = render_step(&state, quiz, None).await;
            (jar, step)
        }
        SubmitOutcome::Finished => {
            state.sessions.remove(&token);
            let jar = jar.remove(Cookie::build(names::QUIZ_SESSION_COOKIE_NAME).path("/"));
            (jar, quiz_views::complete())
        }
    })
}

/// Fetch and render whatever the state machine says is current. A failed
/// question fetch ends the render with an error message; failed responses
/// degrade to "no responses available".
async fn render_step(state: &AppState, quiz: QuizState, notice: Option<&str>) -> Markup {
    let total = match state.api.questions_count().await {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("could not count questions: {e}");
            return quiz_views::unable_to_load("questions", &e.to_string());
        }
    };

    let Some(index) = quiz.current(total) else {
        return quiz_views::complete();
    };

    let question = match state.api.question(index).await {
        Ok(question) => question,
        Err(e) => {
            tracing::error!("could not load question {index}: {e}");
            return quiz_views::unable_to_load("question", &e.to_string());
        }
    };

    let responses = match state.api.responses(index).await {
        Ok(responses) => responses,
        Err(e) => {
            tracing::warn!("could not load responses for question {index}: {e}");
            Vec::new()
        }
    };
    let responses: Vec<_> = responses
        .into_iter()
        .filter(|r| !r.response_text.is_empty())
        .collect();

    if responses.is_empty() {
        return quiz_views::no_responses();
    }

    quiz_views::question_block(quiz_views::QuestionData {
        question: &question,
        responses: &responses,
        index,
        total,
        notice,
    })
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((names::QUIZ_SESSION_COOKIE_NAME, token.to_string()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Strict)
        .build()
}
