use std::time::Duration;

use dioxus::prelude::*;

use services::session::{LoadState, PracticeSession};

use crate::context::AppContext;
use crate::vm::{FeedbackCue, ai_markdown_to_html, format_elapsed, statement_html};

/// The single practice page: one problem at a time, an answer box, and an
/// optional solution panel.
#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let practice = ctx.practice();

    let session = use_signal(PracticeSession::new);
    let mut answer_input = use_signal(String::new);
    let mut elapsed_secs = use_signal(|| 0_i64);
    let mut did_init = use_signal(|| false);

    let load_problem = {
        let practice = practice.clone();
        use_callback(move |()| {
            let practice = practice.clone();
            let mut session = session;
            let mut answer_input = answer_input;
            let mut elapsed_secs = elapsed_secs;
            spawn(async move {
                let generation = session.write().begin_load();
                answer_input.set(String::new());
                elapsed_secs.set(0);
                let outcome = practice.fetch_problem().await;
                let now = practice.clock().now();
                session.write().apply_load(generation, outcome, now);
            });
        })
    };

    let submit_answer = {
        let practice = practice.clone();
        use_callback(move |()| {
            let practice = practice.clone();
            let mut session = session;
            let answer = answer_input();
            spawn(async move {
                let now = practice.clock().now();
                let verdict = {
                    let mut guard = session.write();
                    match guard.submit_answer(&answer, now) {
                        Ok(verdict) => verdict,
                        Err(_) => return,
                    }
                };
                if verdict {
                    return;
                }

                // Incorrect: ask for the automatic explanation. The result
                // is applied only if this problem is still current.
                let (generation, problem) = {
                    let guard = session.read();
                    let Some(problem) = guard.problem().cloned() else {
                        return;
                    };
                    (guard.generation(), problem)
                };
                if let Some(response) = practice.explain_incorrect(&problem, &answer).await {
                    session.write().apply_explanation(generation, response);
                }
            });
        })
    };

    let request_solution = {
        let practice = practice.clone();
        use_callback(move |()| {
            let practice = practice.clone();
            let mut session = session;
            spawn(async move {
                let (generation, problem, difficulty) = {
                    let mut guard = session.write();
                    let generation = match guard.begin_solution_request() {
                        Ok(generation) => generation,
                        Err(_) => return,
                    };
                    let Some(problem) = guard.problem().cloned() else {
                        return;
                    };
                    let difficulty = guard
                        .solution()
                        .selected_difficulty()
                        .map(ToString::to_string);
                    (generation, problem, difficulty)
                };
                let bundle = practice
                    .fetch_solution_bundle(&problem, difficulty.as_deref())
                    .await;
                session.write().apply_solution(generation, bundle);
            });
        })
    };

    use_effect(move || {
        if !did_init() {
            did_init.set(true);
            load_problem.call(());
        }
    });

    // Attempt timer: ticks while an answer is still open.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let attempting = {
                let guard = session.read();
                *guard.state() == LoadState::Loaded && guard.attempt().verdict().is_none()
            };
            if attempting {
                elapsed_secs.set(elapsed_secs() + 1);
            }
        }
    });

    let statement = use_memo(move || {
        let guard = session.read();
        guard.problem().map(|problem| statement_html(problem))
    });
    let explanation_html = use_memo(move || {
        let guard = session.read();
        guard.solution().explanation().map(ai_markdown_to_html)
    });
    let canonical_html = use_memo(move || {
        let guard = session.read();
        guard.solution().canonical().map(ai_markdown_to_html)
    });
    let followup_html = use_memo(move || {
        let guard = session.read();
        guard.solution().followup().map(ai_markdown_to_html)
    });

    let guard = session.read();
    let state = guard.state().clone();
    let title = guard
        .problem()
        .map(|problem| problem.title().to_string())
        .unwrap_or_default();
    let choices: Vec<(String, String)> = guard
        .problem()
        .map(|problem| {
            problem
                .answer_choices()
                .iter()
                .enumerate()
                .map(|(index, image)| {
                    (
                        image.as_str().to_string(),
                        format!("Answer choice {}", index + 1),
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    let verdict = guard.attempt().verdict();
    let time_to_answer = guard
        .attempt()
        .time_to_answer()
        .map(|duration| format_elapsed(duration.num_seconds()));
    let solution_pending = guard.solution_pending();
    let solution_shown = guard.solution().has_content();
    drop(guard);

    let elapsed_label = format_elapsed(elapsed_secs());

    let statement_read = statement.read();
    let explanation_read = explanation_html.read();
    let canonical_read = canonical_html.read();
    let followup_read = followup_html.read();

    rsx! {
        div { class: "page practice-page",
            match state {
                LoadState::Idle | LoadState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                LoadState::Failed { message } => rsx! {
                    p { class: "load-error", "{message}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| load_problem.call(()),
                        "Retry"
                    }
                },
                LoadState::Loaded => rsx! {
                    header { class: "problem-header",
                        h1 { "{title}" }
                        span { class: "attempt-timer", "Time: {elapsed_label}" }
                    }
                    if let Some(html) = statement_read.as_deref() {
                        div { class: "problem-statement", dangerous_inner_html: "{html}" }
                    }
                    if !choices.is_empty() {
                        section { class: "answer-choices",
                            h2 { "Answer Choices" }
                            for (src, alt) in choices.iter() {
                                img {
                                    class: "answer-choice",
                                    src: "{src}",
                                    alt: "{alt}",
                                }
                            }
                        }
                    }
                    div { class: "answer-row",
                        input {
                            class: "answer-input",
                            r#type: "text",
                            placeholder: "Your answer (A-E or a number)",
                            value: "{answer_input}",
                            oninput: move |evt| answer_input.set(evt.value()),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: solution_shown,
                            onclick: move |_| submit_answer.call(()),
                            "Submit"
                        }
                    }
                    if let Some(verdict) = verdict {
                        FeedbackBanner { verdict, time_to_answer }
                    }
                    section { class: "solution-section",
                        div { class: "btn-row",
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: solution_pending,
                                onclick: move |_| request_solution.call(()),
                                "Show Solution"
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| load_problem.call(()),
                                "Next Problem"
                            }
                        }
                        if solution_pending {
                            p { class: "solution-loading", "Loading solution..." }
                        }
                        if let Some(html) = explanation_read.as_deref() {
                            div { class: "solution-panel",
                                h2 { "Explanation" }
                                div { class: "solution-text", dangerous_inner_html: "{html}" }
                            }
                        }
                        if let Some(html) = canonical_read.as_deref() {
                            div { class: "solution-panel",
                                h2 { "Solution" }
                                div { class: "solution-text", dangerous_inner_html: "{html}" }
                            }
                        }
                        if let Some(html) = followup_read.as_deref() {
                            div { class: "solution-panel",
                                h2 { "Follow-up Problem" }
                                div { class: "solution-text", dangerous_inner_html: "{html}" }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn FeedbackBanner(verdict: bool, time_to_answer: Option<String>) -> Element {
    let cue = FeedbackCue::from_verdict(verdict);
    let class = cue.css_class();
    let label = cue.label();
    let sound = cue.sound_src();
    rsx! {
        div { class: "{class}",
            span { class: "feedback-label", "{label}" }
            if let Some(elapsed) = time_to_answer {
                span { class: "feedback-elapsed", "Answered in {elapsed}" }
            }
            audio { src: "{sound}", autoplay: true }
        }
    }
}
