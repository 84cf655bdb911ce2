use dioxus::prelude::*;
use dioxus_router::Link;
use services::reflection::{
    AnswerFeedback, ReflectionField, ReflectionSubmission, SUBMIT_FAILED, rating_label,
};
use services::{ReflectionFlow, ReflectionStage};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::Alert;
use crate::views::{ViewError, ViewState, load_snapshot, view_state_from_resource};
use crate::vm::quiz_verdict;

const TEXT_PROMPTS: [(ReflectionField, &str); 4] = [
    (
        ReflectionField::JugglingChallenges,
        "What challenges did you face with the juggling techniques?",
    ),
    (
        ReflectionField::TechChallenges,
        "What challenges did you face with the technology concepts?",
    ),
    (
        ReflectionField::Connections,
        "What connections did you notice between juggling and the technology?",
    ),
    (ReflectionField::NextSteps, "What are your next steps?"),
];

#[component]
pub fn ReflectionView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let latency = ctx.latency();
    let mut flow = use_signal(|| None::<ReflectionFlow>);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    let resource = {
        let progress = progress.clone();
        use_resource(use_reactive!(|(id,)| {
            let progress = progress.clone();
            async move {
                load_snapshot(progress.clone()).await?;
                let opened = ReflectionFlow::open(&progress, &id, latency)
                    .map_err(|_| ViewError::NotFound)?;
                flow.set(Some(opened));
                Ok::<_, ViewError>(())
            }
        }))
    };

    let on_submit = move |_| {
        let Some(mut current) = flow() else {
            return;
        };
        let progress = progress.clone();
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match current.submit(&progress).await {
                Ok(_) => flow.set(Some(current)),
                Err(_) => error.set(Some(SUBMIT_FAILED)),
            }
            submitting.set(false);
        });
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page reflection-page",
            match (state, flow()) {
                (ViewState::Error(err), _) => rsx! {
                    Alert { message: err.message().to_string() }
                    Link { to: Route::Modules {}, "Back to modules" }
                },
                (ViewState::Ready(()), Some(current)) => {
                    let module = current.module().clone();
                    let stage = current.stage();
                    rsx! {
                        header { class: "view-header",
                            p { class: "muted", "Module {module.order()} · {module.prop().label()}" }
                            h2 { class: "view-title", "Reflect on {module.name()}" }
                        }
                        ol { class: "stepper",
                            for candidate in ReflectionStage::ALL {
                                li {
                                    key: "{candidate.title()}",
                                    class: if candidate == stage { "step step--current" } else { "step" },
                                    "{candidate.title()}"
                                }
                            }
                        }
                        if let Some(message) = error() {
                            Alert { message: message.to_string() }
                        }
                        match stage {
                            ReflectionStage::Reflection => rsx! {
                                ReflectionStep { flow }
                            },
                            ReflectionStage::KnowledgeCheck => rsx! {
                                QuizStep { flow }
                                div { class: "step-actions",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        disabled: submitting(),
                                        onclick: move |_| update(flow, ReflectionFlow::back),
                                        "Back"
                                    }
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        disabled: submitting(),
                                        onclick: on_submit,
                                        if submitting() { "Submitting..." } else { "Submit Reflection" }
                                    }
                                }
                            },
                            ReflectionStage::Complete => rsx! {
                                CompleteStep { flow }
                            },
                        }
                    }
                }
                _ => rsx! {
                    p { "Loading reflection..." }
                },
            }
        }
    }
}

fn update(mut flow: Signal<Option<ReflectionFlow>>, apply: impl FnOnce(&mut ReflectionFlow)) {
    if let Some(current) = flow.write().as_mut() {
        apply(current);
    }
}

#[component]
fn ReflectionStep(flow: Signal<Option<ReflectionFlow>>) -> Element {
    let Some(current) = flow() else {
        return rsx! {};
    };
    let submission = current.submission().clone();
    let prompt = current.module().info().reflection_prompt.clone();

    rsx! {
        section { class: "card",
            if let Some(prompt) = prompt {
                blockquote { "{prompt}" }
            }
            RatingInput {
                label: "Juggling progress",
                value: submission.juggling_progress,
                on_change: move |rating| update(flow, |f| {
                    let _ = f.set_juggling_progress(rating);
                }),
            }
            RatingInput {
                label: "Technology progress",
                value: submission.tech_progress,
                on_change: move |rating| update(flow, |f| {
                    let _ = f.set_tech_progress(rating);
                }),
            }
            for (field, prompt_text) in TEXT_PROMPTS {
                label { key: "{prompt_text}", class: "field",
                    span { "{prompt_text}" }
                    textarea {
                        class: "input",
                        value: field_value(&submission, field),
                        oninput: move |evt| update(flow, |f| f.set_text(field, evt.value())),
                    }
                }
            }
        }
        div { class: "step-actions",
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| update(flow, ReflectionFlow::next),
                "Next: Knowledge Check"
            }
        }
    }
}

fn field_value(submission: &ReflectionSubmission, field: ReflectionField) -> String {
    match field {
        ReflectionField::JugglingChallenges => submission.juggling_challenges.clone(),
        ReflectionField::TechChallenges => submission.tech_challenges.clone(),
        ReflectionField::Connections => submission.connections.clone(),
        ReflectionField::NextSteps => submission.next_steps.clone(),
    }
}

#[component]
fn RatingInput(label: &'static str, value: u8, on_change: EventHandler<u8>) -> Element {
    rsx! {
        div { class: "field rating-field",
            span { "{label}" }
            div { class: "rating-options",
                for rating in 1..=5u8 {
                    button {
                        key: "{rating}",
                        class: if rating == value { "rating rating--selected" } else { "rating" },
                        r#type: "button",
                        onclick: move |_| on_change.call(rating),
                        "{rating}"
                    }
                }
            }
            span { class: "muted", "{rating_label(value)}" }
        }
    }
}

#[component]
fn QuizStep(flow: Signal<Option<ReflectionFlow>>) -> Element {
    let Some(current) = flow() else {
        return rsx! {};
    };
    let questions = current.question_set().questions();
    let answers = current.submission().quiz_answers.clone();

    rsx! {
        section { class: "card quiz",
            for question in questions {
                fieldset { key: "{question.id}", class: "quiz-question",
                    legend { "{question.prompt}" }
                    for option in question.options {
                        label { key: "{option}", class: "quiz-option",
                            input {
                                r#type: "radio",
                                name: "{question.id}",
                                checked: answers.get(question.id).is_some_and(|a| a == option),
                                onchange: move |_| update(flow, |f| {
                                    let _ = f.answer(question.id, option);
                                }),
                            }
                            span { "{option}" }
                        }
                    }
                    if let Some(feedback) = current.feedback(question.id) {
                        if let Some(message) = feedback.message() {
                            p { class: feedback_class(feedback), "{message}" }
                        }
                    }
                }
            }
        }
    }
}

fn feedback_class(feedback: AnswerFeedback) -> &'static str {
    match feedback {
        AnswerFeedback::Correct(_) => "feedback feedback--correct",
        _ => "feedback feedback--incorrect",
    }
}

#[component]
fn CompleteStep(flow: Signal<Option<ReflectionFlow>>) -> Element {
    let Some(outcome) = flow().and_then(|f| f.outcome().cloned()) else {
        return rsx! {};
    };
    let score = outcome.score;
    let (verdict, verdict_class) = quiz_verdict(score);

    rsx! {
        section { class: "card complete",
            h3 { "Reflection submitted" }
            p { "Knowledge check: {score.correct} of {score.total} correct ({score.percent}%)" }
            p { class: verdict_class, "{verdict}" }
            if outcome.achievement_unlocked {
                p { class: "achievement-unlocked", "🏆 Achievement unlocked!" }
            }
            div { class: "step-actions",
                Link { class: "btn btn-primary", to: Route::Dashboard {}, "Back to Dashboard" }
                Link { class: "btn btn-secondary", to: Route::Modules {}, "Browse Modules" }
            }
        }
    }
}
