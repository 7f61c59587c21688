use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

pub fn web_document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

pub fn element_by_id(id: &str) -> Option<Element> {
    web_document().and_then(|doc| doc.get_element_by_id(id))
}

pub fn input_value(id: &str) -> Option<String> {
    element_by_id(id)
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

pub fn set_text(id: &str, value: impl AsRef<str>) {
    let Some(node) = element_by_id(id) else {
        return;
    };
    let next = value.as_ref();
    if node.text_content().as_deref() == Some(next) {
        return;
    }
    node.set_text_content(Some(next));
}

pub fn set_visible(element: &Element, visible: bool) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    if visible {
        let _ = element.style().remove_property("display");
    } else {
        let _ = element.style().set_property("display", "none");
    }
}

pub fn add_listener(target: &EventTarget, kind: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    let _ = target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
    callback.forget();
}

pub fn trigger_click(selector: &str) {
    let Some(doc) = web_document() else {
        return;
    };
    if let Some(element) = doc
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    {
        element.click();
    }
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

pub fn encode_component(input: &str) -> String {
    js_sys::encode_uri_component(input)
        .as_string()
        .unwrap_or_else(|| input.to_string())
}

pub async fn fetch_json<T>(url: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let response = Request::get(url).send().await.ok()?;
    if !response.ok() {
        return None;
    }
    response.json::<T>().await.ok()
}

pub async fn fetch_ok(url: &str) -> bool {
    Request::get(url)
        .send()
        .await
        .map(|response| response.ok())
        .unwrap_or(false)
}

/// Column roles for the lab table, read from `data-*` attributes on the
/// table element so the markup stays the single source of truth.
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    pub choice_col: u32,
    pub count_col: u32,
}

impl TableLayout {
    pub fn from_table(table: &Element) -> Self {
        let read = |name: &str, fallback: u32| {
            table
                .get_attribute(name)
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(fallback)
        };
        Self {
            choice_col: read("data-choice-col", 8),
            count_col: read("data-count-col", 9),
        }
    }
}

pub fn table_rows(table: &Element) -> Vec<Element> {
    let Ok(list) = table.query_selector_all("tbody > tr") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| {
            list.item(idx)
                .and_then(|node| node.dyn_into::<Element>().ok())
        })
        .collect()
}

pub fn selected_option_label(select: &HtmlSelectElement) -> String {
    let index = select.selected_index();
    if index < 0 {
        return String::new();
    }
    select
        .options()
        .item(index as u32)
        .and_then(|node| node.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.text())
        .unwrap_or_default()
}

pub fn choice_label(row: &Element, choice_col: u32) -> String {
    row.get_elements_by_tag_name("td")
        .item(choice_col)
        .and_then(|cell| cell.query_selector("select").ok().flatten())
        .and_then(|node| node.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| selected_option_label(&select))
        .unwrap_or_default()
}
