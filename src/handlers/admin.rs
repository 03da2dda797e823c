use axum::{
    extract::State,
    routing::{get, post},
    Form, Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    authoring::{self, ResponseDraft},
    extractors::IsHtmx,
    names, views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(admin_page))
        .route(names::CREATE_QUESTION_URL, post(create_question))
}

async fn admin_page(IsHtmx(is_htmx): IsHtmx) -> Markup {
    views::render(
        is_htmx,
        "Teacher Admin",
        admin_views::create_question(admin_views::FormData::default()),
    )
}

#[derive(Deserialize)]
struct QuestionForm {
    #[serde(default)]
    question_text: String,
    #[serde(default)]
    response_text_1: String,
    #[serde(default)]
    response_text_2: String,
    #[serde(default)]
    response_text_3: String,
    #[serde(default)]
    response_text_4: String,
    // Checkboxes only post a value when ticked
    #[serde(default)]
    is_correct_1: Option<String>,
    #[serde(default)]
    is_correct_2: Option<String>,
    #[serde(default)]
    is_correct_3: Option<String>,
    #[serde(default)]
    is_correct_4: Option<String>,
}

impl QuestionForm {
    fn drafts(&self) -> Vec<ResponseDraft> {
        let fields = [
            (&self.response_text_1, &self.is_correct_1),
            (&self.response_text_2, &self.is_correct_2),
            (&self.response_text_3, &self.is_correct_3),
            (&self.response_text_4, &self.is_correct_4),
        ];
        fields
            .into_iter()
            .map(|(text, correct)| ResponseDraft {
                response_text: text.clone(),
                is_correct: correct.is_some(),
            })
            .collect()
    }
}

/// Validate the draft; re-render the form with all violations, or save the
/// question plus its four responses and confirm.
async fn create_question(
    State(state): State<AppState>,
    Form(form): Form<QuestionForm>,
) -> Markup {
    let drafts = form.drafts();

    let errors = authoring::validate(&form.question_text, &drafts);
    if !errors.is_empty() {
        return admin_views::create_question(admin_views::FormData {
            question_text: &form.question_text,
            responses: &drafts,
            errors: &errors,
            saved: false,
        });
    }

    match authoring::save(&state.api, &form.question_text, &drafts).await {
        Ok(()) => admin_views::create_question(admin_views::FormData {
            saved: true,
            ..Default::default()
        }),
        Err(e) => {
            let errors = vec![format!("Error saving question: {e}")];
            admin_views::create_question(admin_views::FormData {
                question_text: &form.question_text,
                responses: &drafts,
                errors: &errors,
                saved: false,
            })
        }
    }
}
