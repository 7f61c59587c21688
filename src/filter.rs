use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::dom::{
    add_listener, element_by_id, input_value, selected_option_label, set_visible, table_rows,
    web_document, TableLayout,
};

/// Case-insensitive substring match, returning the byte range of the first
/// occurrence in `haystack`. ASCII folding keeps byte offsets valid for
/// slicing the original text.
pub fn match_range(haystack: &str, query: &str) -> Option<(usize, usize)> {
    let folded: String = haystack.chars().map(|c| c.to_ascii_lowercase()).collect();
    let needle: String = query.chars().map(|c| c.to_ascii_lowercase()).collect();
    let start = folded.find(&needle)?;
    Some((start, start + needle.len()))
}

fn clear_highlight(cell: &Element) {
    if cell.query_selector("span.highlight").ok().flatten().is_none() {
        return;
    }
    let text = cell.text_content().unwrap_or_default();
    cell.set_text_content(Some(&text));
}

fn apply_highlight(cell: &Element, text: &str, range: (usize, usize)) {
    let Some(doc) = web_document() else {
        return;
    };
    let (start, end) = range;
    cell.set_inner_html("");
    if start > 0 {
        let _ = cell.append_child(&doc.create_text_node(&text[..start]));
    }
    if let Ok(span) = doc.create_element("span") {
        span.set_class_name("highlight");
        span.set_text_content(Some(&text[start..end]));
        let _ = cell.append_child(&span);
    }
    if end < text.len() {
        let _ = cell.append_child(&doc.create_text_node(&text[end..]));
    }
}

fn mark_cell(cell: &Element, query: &str) -> bool {
    let text = cell.text_content().unwrap_or_default();
    match match_range(&text, query) {
        Some(range) if range.0 < range.1 => {
            apply_highlight(cell, &text, range);
            true
        }
        Some(_) => {
            // Zero-length match: the row stays visible, the cell unmarked.
            clear_highlight(cell);
            true
        }
        None => {
            clear_highlight(cell);
            false
        }
    }
}

pub fn apply_table_filter() {
    let Some(table) = element_by_id("lab-table") else {
        return;
    };
    let Some(query) = input_value("table-filter") else {
        return;
    };
    let layout = TableLayout::from_table(&table);

    for row in table_rows(&table) {
        let cells = row.get_elements_by_tag_name("td");
        let mut found = false;
        for idx in 0..cells.length() {
            if idx == layout.count_col {
                continue;
            }
            let Some(cell) = cells.item(idx) else {
                continue;
            };
            if idx == layout.choice_col {
                // The dropdown cell matches on its selected label; there is
                // no text node inside the select to wrap in a highlight.
                let label = cell
                    .query_selector("select")
                    .ok()
                    .flatten()
                    .and_then(|node| node.dyn_into::<HtmlSelectElement>().ok())
                    .map(|select| selected_option_label(&select))
                    .unwrap_or_default();
                if match_range(&label, &query).is_some() {
                    found = true;
                }
                continue;
            }
            if mark_cell(&cell, &query) {
                found = true;
            }
        }
        set_visible(&row, found);
    }
}

pub fn apply_roster_filter() {
    let Some(doc) = web_document() else {
        return;
    };
    let Some(query) = input_value("roster-filter") else {
        return;
    };

    let cards = doc.get_elements_by_class_name("roster-card");
    for idx in 0..cards.length() {
        let Some(card) = cards.item(idx) else {
            continue;
        };
        let Some(label) = card.query_selector(".roster-card-name").ok().flatten() else {
            continue;
        };
        let found = mark_cell(&label, &query);
        set_visible(&card, found);
    }
}

fn bind_debounced(input: &HtmlInputElement, run: fn()) {
    let debounce = Rc::new(RefCell::new(None::<Timeout>));
    add_listener(input, "input", move |_event| {
        if let Some(timeout) = debounce.borrow_mut().take() {
            timeout.cancel();
        }
        *debounce.borrow_mut() = Some(Timeout::new(150, run));
    });
}

pub fn init_filters() {
    let Some(doc) = web_document() else {
        return;
    };

    if let Some(input) = doc
        .get_element_by_id("table-filter")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
    {
        bind_debounced(&input, apply_table_filter);
    }

    if let Some(input) = doc
        .get_element_by_id("roster-filter")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
    {
        bind_debounced(&input, apply_roster_filter);
    }
}
