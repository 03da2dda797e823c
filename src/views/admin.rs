use maud::{html, Markup};

use crate::authoring::ResponseDraft;
use crate::names;

pub struct FormData<'a> {
    pub question_text: &'a str,
    pub responses: &'a [ResponseDraft],
    pub errors: &'a [String],
    pub saved: bool,
}

impl Default for FormData<'_> {
    fn default() -> Self {
        FormData {
            question_text: "",
            responses: &[],
            errors: &[],
            saved: false,
        }
    }
}

pub fn create_question(data: FormData<'_>) -> Markup {
    html! {
        form id="question-form"
             hx-post=(names::CREATE_QUESTION_URL)
             hx-target="#question-form"
             hx-swap="outerHTML" {
            h2 { "Create Question" }

            @for error in data.errors {
                p."error" { (error) }
            }
            @if data.saved {
                p."success" { "Question saved successfully." }
            }

            label {
                "Enter the question"
                input type="text" name="question_text" value=(data.question_text);
            }

            p { "Enter the multiple choice options and mark the correct answer." }

            @for idx in 1..=4usize {
                @let draft = data.responses.get(idx - 1);
                div."grid option-row" {
                    label {
                        (format!("Text for option {idx}"))
                        input type="text" name=(format!("response_text_{idx}"))
                              value=(draft.map(|d| d.response_text.as_str()).unwrap_or(""));
                    }
                    label {
                        @if draft.is_some_and(|d| d.is_correct) {
                            input type="checkbox" name=(format!("is_correct_{idx}")) checked;
                        } @else {
                            input type="checkbox" name=(format!("is_correct_{idx}"));
                        }
                        "Correct?"
                    }
                }
            }

            button type="submit" { "Save Question" }
        }
    }
}
