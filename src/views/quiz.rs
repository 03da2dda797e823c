use maud::{html, Markup};

use crate::models::{Question, QuizResponse};
use crate::names;

pub struct QuestionData<'a> {
    pub question: &'a Question,
    pub responses: &'a [QuizResponse],
    pub index: u32,
    pub total: u32,
    pub notice: Option<&'a str>,
}

pub fn question_block(data: QuestionData<'_>) -> Markup {
    html! {
        h2 { "Questions" }
        article style="width: fit-content;" {
            p style="color: #666; font-size: 0.9rem; margin-bottom: 0;" {
                "Question " strong { (data.index) } " of " (data.total)
            }

            h3 { (data.question.question_text) }

            form hx-post=(names::SUBMIT_ANSWER_URL)
                 hx-target="#quiz"
                 hx-swap="innerHTML"
                 id="question-form" {
                fieldset {
                    legend { "Select one answer:" }
                    @for response in data.responses {
                        label {
                            input type="radio" name="option" value=(response.id);
                            (response.response_text)
                        }
                    }
                }
                button type="submit" { "Submit answer" }
            }

            @if let Some(notice) = data.notice {
                p."notice" { (notice) }
            }
        }
    }
}

pub fn complete() -> Markup {
    html! {
        h2 { "Questions" }
        article."success" {
            p { "Questions complete, well done!" }
        }
    }
}

pub fn no_responses() -> Markup {
    html! {
        h2 { "Questions" }
        p."notice" { "No responses available for this question." }
    }
}

pub fn unable_to_load(what: &str, detail: &str) -> Markup {
    html! {
        h2 { "Questions" }
        p."error" { "Unable to load " (what) ". " (detail) }
    }
}
