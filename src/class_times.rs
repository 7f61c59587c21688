use std::cell::Cell;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{add_listener, element_by_id, web_document};

pub const CLASS_DAYS: [(&str, &str); 5] = [
    ("monday", "M"),
    ("tuesday", "T"),
    ("wednesday", "W"),
    ("thursday", "Th"),
    ("friday", "F"),
];

thread_local! {
    static CLASS_TIME_SEQ: Cell<u32> = const { Cell::new(0) };
}

fn next_class_time_row() -> u32 {
    CLASS_TIME_SEQ.with(|seq| {
        let next = seq.get().saturating_add(1);
        seq.set(next);
        next
    })
}

/// All inputs of one conceptual row share this name so the server can group
/// the submitted fields back together.
pub fn class_time_field_name(row: u32) -> String {
    format!("ta_class_time_{row}")
}

pub fn class_semester_field_name(row: u32) -> String {
    format!("ta_class_semester_{row}")
}

fn create_time_input(name: &str) -> Option<HtmlInputElement> {
    let doc = web_document()?;
    let input = doc
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.set_type("time");
    input.set_name(name);
    input.set_value("12:00");
    input.set_required(true);
    Some(input)
}

fn create_day_checkbox(row: u32, day: &str, short: &str) -> Option<Element> {
    let doc = web_document()?;
    let wrapper = doc.create_element("div").ok()?;
    wrapper.set_class_name("day-check");

    let input = doc
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    let input_id = format!("{day}-check-{row}");
    input.set_type("checkbox");
    input.set_name(&class_time_field_name(row));
    input.set_value(short);
    input.set_id(&input_id);

    let label = doc.create_element("label").ok()?;
    let _ = label.set_attribute("for", &input_id);
    label.set_text_content(Some(short));

    let _ = wrapper.append_child(&input);
    let _ = wrapper.append_child(&label);
    Some(wrapper)
}

fn create_class_time_block(row: u32) -> Option<Element> {
    let doc = web_document()?;
    let block = doc.create_element("div").ok()?;
    block.set_class_name("class-time-block");
    let _ = block.set_attribute("data-class-time-row", &row.to_string());

    let times = doc.create_element("div").ok()?;
    times.set_class_name("class-time-inputs");
    let caption = doc.create_element("span").ok()?;
    caption.set_text_content(Some("Start and end time"));
    let _ = times.append_child(&caption);
    let time_name = class_time_field_name(row);
    for _ in 0..2 {
        let input = create_time_input(&time_name)?;
        let _ = times.append_child(&input);
    }
    let _ = block.append_child(&times);

    let semester = doc
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    semester.set_type("text");
    semester.set_name(&class_semester_field_name(row));
    semester.set_placeholder("e.g. SPR2022");
    semester.set_required(true);
    let _ = block.append_child(&semester);

    let days = doc.create_element("div").ok()?;
    days.set_class_name("class-time-days");
    for (day, short) in CLASS_DAYS {
        let Some(checkbox) = create_day_checkbox(row, day, short) else {
            continue;
        };
        let _ = days.append_child(&checkbox);
    }
    let _ = block.append_child(&days);

    Some(block)
}

pub fn append_class_time_block() {
    let Some(rows) = element_by_id("class-time-rows") else {
        return;
    };
    let row = next_class_time_row();

    if let Some(count) = element_by_id("class-time-count")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
    {
        count.set_value(&row.to_string());
    }

    let Some(block) = create_class_time_block(row) else {
        return;
    };
    let _ = rows.append_child(&block);
}

pub fn init_class_time_form() {
    let Some(button) = element_by_id("class-time-add") else {
        return;
    };
    add_listener(&button, "click", |event| {
        event.prevent_default();
        append_class_time_block();
    });
}
