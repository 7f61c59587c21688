use std::collections::BTreeMap;

use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement};

use crate::dom::{
    add_listener, element_by_id, encode_component, fetch_json, fetch_ok, reload_page,
    trigger_click, web_document,
};

const STALE_HISTORY_WARNING: &str = "You've recently made a manual change! This change will be \
                                     reverted first. Refresh the page to see it!";

/// One proposed assignment switch between two TAs, as served by the
/// scheduling backend. The response maps candidate token -> record.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchCandidate {
    #[serde(rename = "TA1")]
    pub ta1: String,
    pub lab1: String,
    pub section1: String,
    pub score1: f64,
    #[serde(rename = "TA2")]
    pub ta2: String,
    pub lab2: String,
    pub section2: String,
    pub score2: f64,
}

pub type SwitchCandidates = BTreeMap<String, SwitchCandidate>;

pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score:.1}")
    }
}

pub fn switch_sides(candidate: &SwitchCandidate) -> (String, String) {
    (
        format!(
            "{} ({}-{}) Score: {}",
            candidate.ta1,
            candidate.lab1,
            candidate.section1,
            format_score(candidate.score1)
        ),
        format!(
            "{} ({}-{}) Score: {}",
            candidate.ta2,
            candidate.lab2,
            candidate.section2,
            format_score(candidate.score2)
        ),
    )
}

fn create_switch_fragment(token: &str, candidate: &SwitchCandidate) -> Option<Element> {
    let doc = web_document()?;
    let anchor = doc.create_element("a").ok()?;
    anchor.set_class_name("switch");
    let _ = anchor.set_attribute("href", "#");
    let _ = anchor.set_attribute("data-switch-key", token);

    let (first, second) = switch_sides(candidate);
    for (class_name, text) in [
        ("switch-side", first.as_str()),
        ("switch-arrow", "\u{21c4}"),
        ("switch-side", second.as_str()),
    ] {
        let Ok(line) = doc.create_element("div") else {
            continue;
        };
        line.set_class_name(class_name);
        line.set_text_content(Some(text));
        let _ = anchor.append_child(&line);
    }
    Some(anchor)
}

fn append_candidates(candidates: &SwitchCandidates) {
    let Some(list) = element_by_id("switches-list") else {
        return;
    };
    for (token, candidate) in candidates {
        let Some(fragment) = create_switch_fragment(token, candidate) else {
            continue;
        };
        let _ = list.append_child(&fragment);
    }
}

fn request_switch_candidates(lab_name: String) {
    spawn_local(async move {
        let url = format!("?lab_name={}", encode_component(&lab_name));
        let Some(candidates) = fetch_json::<SwitchCandidates>(&url).await else {
            return;
        };
        leptos::logging::log!(
            "{} switch candidates for {lab_name}",
            candidates.len()
        );
        append_candidates(&candidates);
    });
}

fn confirm_switch(token: String) {
    spawn_local(async move {
        let url = format!("?swap={}", encode_component(&token));
        if fetch_ok(&url).await {
            trigger_click(".close-switches");
            reload_page();
        }
    });
}

fn request_undo(entry: String) {
    spawn_local(async move {
        let url = format!("?undo={}", encode_component(&entry));
        if fetch_ok(&url).await {
            trigger_click(".close-history");
            reload_page();
        }
    });
}

fn clear_switch_list() {
    if let Some(list) = element_by_id("switches-list") {
        list.set_inner_html("");
    }
}

#[derive(Debug, Clone)]
struct TemplateAssignment {
    student_id: String,
    course_id: String,
    time: String,
    year: String,
    version: String,
}

impl TemplateAssignment {
    fn from_element(button: &Element) -> Option<Self> {
        Some(Self {
            student_id: button.get_attribute("data-student-id")?,
            course_id: button.get_attribute("data-course-id")?,
            time: button.get_attribute("data-time")?,
            year: button.get_attribute("data-year")?,
            version: button.get_attribute("data-version")?,
        })
    }

    fn query(&self) -> String {
        format!(
            "assign_to_template?student_id={}&course_id={}&time={}&year={}&version={}",
            encode_component(&self.student_id),
            encode_component(&self.course_id),
            encode_component(&self.time),
            encode_component(&self.year),
            encode_component(&self.version),
        )
    }
}

fn request_template_assignment(assignment: TemplateAssignment) {
    // Fire-and-forget: the page keeps showing stale data until a refresh,
    // which is what the history warning is for.
    spawn_local(async move {
        let _ = fetch_ok(&assignment.query()).await;
    });
    mark_history_stale();
}

fn mark_history_stale() {
    let Some(doc) = web_document() else {
        return;
    };
    let Some(list) = doc.get_element_by_id("history-list") else {
        return;
    };
    if doc.get_element_by_id("history-stale-warning").is_some() {
        return;
    }
    let Ok(warning) = doc.create_element("div") else {
        return;
    };
    warning.set_id("history-stale-warning");
    warning.set_class_name("history-warning");
    warning.set_text_content(Some(STALE_HISTORY_WARNING));
    let _ = list.insert_before(&warning, list.first_child().as_ref());
}

pub fn init_switch_panel() {
    let Some(doc) = web_document() else {
        return;
    };
    if doc.get_element_by_id("switches-list").is_none() {
        return;
    }

    let buttons = doc.get_elements_by_class_name("switch-btn");
    for idx in 0..buttons.length() {
        let Some(button) = buttons.item(idx) else {
            continue;
        };
        let lab_name = button.id();
        add_listener(&button, "click", move |_event| {
            request_switch_candidates(lab_name.clone());
        });
    }

    let closers = doc.get_elements_by_class_name("close-switches");
    for idx in 0..closers.length() {
        let Some(button) = closers.item(idx) else {
            continue;
        };
        add_listener(&button, "click", |_event| clear_switch_list());
    }

    // Switch fragments and undo buttons come and go after load, so their
    // clicks are resolved at the document level.
    add_listener(&doc, "click", |event| {
        let Some(target) = event
            .target()
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            return;
        };

        if let Some(fragment) = target.closest("a.switch").ok().flatten() {
            event.prevent_default();
            if let Some(token) = fragment.get_attribute("data-switch-key") {
                confirm_switch(token);
            }
            return;
        }

        if let Some(undo) = target
            .closest("button.undo")
            .ok()
            .flatten()
            .and_then(|node| node.dyn_into::<HtmlButtonElement>().ok())
        {
            request_undo(undo.value());
        }
    });
}

pub fn init_template_assign() {
    let Some(doc) = web_document() else {
        return;
    };
    let buttons = doc.get_elements_by_class_name("assign-template");
    for idx in 0..buttons.length() {
        let Some(button) = buttons.item(idx) else {
            continue;
        };
        let Some(assignment) = TemplateAssignment::from_element(&button) else {
            continue;
        };
        add_listener(&button, "click", move |_event| {
            request_template_assignment(assignment.clone());
        });
    }
}
