#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use quicksched_frontend::class_times::append_class_time_block;
use quicksched_frontend::counts::{refresh_assignment_counts, refresh_lab_tally};
use quicksched_frontend::filter::{apply_roster_filter, apply_table_filter};
use quicksched_frontend::sort::sort_table_column;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().expect("window").document().expect("document")
}

fn install_fixture(html: &str) -> Element {
    let doc = document();
    let container = doc.create_element("div").expect("container");
    container.set_inner_html(html);
    doc.body().expect("body").append_child(&container).expect("append");
    container
}

fn display_of(element: &Element) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .map(|element| element.style().get_property_value("display").unwrap_or_default())
        .unwrap_or_default()
}

fn column_texts(selector: &str) -> Vec<String> {
    let list = document().query_selector_all(selector).expect("query");
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .map(|node| node.text_content().unwrap_or_default())
        .collect()
}

const LAB_TABLE: &str = r#"
    <input id="table-filter" value="">
    <table id="lab-table" data-choice-col="1" data-count-col="2">
      <thead>
        <tr>
          <th data-sort-col="-1">#</th>
          <th data-sort-col="0">Course</th>
          <th data-sort-col="1">TA</th>
          <th data-sort-col="2">Assigned</th>
        </tr>
      </thead>
      <tbody>
        <tr><th>1</th><td>CS210</td><td><select><option>Noether, Emmy</option></select></td><td></td></tr>
        <tr><th>2</th><td>CS101</td><td><select><option>Galois, Evariste</option></select></td><td></td></tr>
        <tr><th>3</th><td>CS150</td><td><select><option>Noether, Emmy</option></select></td><td></td></tr>
      </tbody>
    </table>
"#;

#[wasm_bindgen_test]
fn table_filter_hides_and_highlights() {
    let fixture = install_fixture(LAB_TABLE);
    let input = document()
        .get_element_by_id("table-filter")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .expect("filter input");

    input.set_value("cs101");
    apply_table_filter();

    let rows = document().query_selector_all("#lab-table tbody tr").expect("rows");
    let shown: Vec<String> = (0..rows.length())
        .filter_map(|idx| rows.item(idx))
        .map(|node| {
            node.dyn_into::<Element>()
                .map(|row| display_of(&row))
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(shown, vec!["none", "", "none"]);

    let highlight = document()
        .query_selector("#lab-table span.highlight")
        .expect("query")
        .expect("highlight span");
    assert_eq!(highlight.text_content().as_deref(), Some("CS101"));

    input.set_value("zzz");
    apply_table_filter();
    let rows = document().query_selector_all("#lab-table tbody tr").expect("rows");
    for idx in 0..rows.length() {
        let row = rows.item(idx).and_then(|node| node.dyn_into::<Element>().ok()).expect("row");
        assert_eq!(display_of(&row), "none");
    }

    input.set_value("");
    apply_table_filter();
    let rows = document().query_selector_all("#lab-table tbody tr").expect("rows");
    for idx in 0..rows.length() {
        let row = rows.item(idx).and_then(|node| node.dyn_into::<Element>().ok()).expect("row");
        assert_eq!(display_of(&row), "");
    }
    assert!(document()
        .query_selector("#lab-table span.highlight")
        .expect("query")
        .is_none());

    fixture.remove();
}

#[wasm_bindgen_test]
fn filter_matches_the_selected_dropdown_label() {
    let fixture = install_fixture(LAB_TABLE);
    let input = document()
        .get_element_by_id("table-filter")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .expect("filter input");

    input.set_value("galois");
    apply_table_filter();

    let rows = document().query_selector_all("#lab-table tbody tr").expect("rows");
    let shown: Vec<String> = (0..rows.length())
        .filter_map(|idx| rows.item(idx))
        .map(|node| {
            node.dyn_into::<Element>()
                .map(|row| display_of(&row))
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(shown, vec!["none", "", "none"]);

    fixture.remove();
}

#[wasm_bindgen_test]
fn sorting_a_text_column_then_resorting_flips_direction() {
    let fixture = install_fixture(LAB_TABLE);

    sort_table_column(0);
    assert_eq!(
        column_texts("#lab-table tbody tr td:first-of-type"),
        vec!["CS101", "CS150", "CS210"]
    );

    sort_table_column(0);
    assert_eq!(
        column_texts("#lab-table tbody tr td:first-of-type"),
        vec!["CS210", "CS150", "CS101"]
    );

    fixture.remove();
}

#[wasm_bindgen_test]
fn sorting_the_row_header_column_is_numeric() {
    let fixture = install_fixture(LAB_TABLE);

    // Already ascending, so the single invocation flips to descending.
    sort_table_column(-1);
    assert_eq!(column_texts("#lab-table tbody tr th"), vec!["3", "2", "1"]);

    sort_table_column(-1);
    assert_eq!(column_texts("#lab-table tbody tr th"), vec!["1", "2", "3"]);

    fixture.remove();
}

#[wasm_bindgen_test]
fn assignment_counts_land_in_the_count_column() {
    let fixture = install_fixture(LAB_TABLE);

    refresh_assignment_counts();
    assert_eq!(
        column_texts("#lab-table tbody tr td:nth-of-type(3)"),
        vec!["2", "1", "2"]
    );

    fixture.remove();
}

#[wasm_bindgen_test]
fn lab_tally_counts_lab_elements() {
    let fixture = install_fixture(
        r#"
        <input id="lab-count" value="">
        <div class="lab"></div>
        <div class="lab"></div>
        <div class="lab"></div>
        "#,
    );

    refresh_lab_tally();
    let input = document()
        .get_element_by_id("lab-count")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .expect("tally input");
    assert_eq!(input.value(), "3");

    fixture.remove();
}

#[wasm_bindgen_test]
fn roster_filter_hides_cards_without_a_match() {
    let fixture = install_fixture(
        r#"
        <input id="roster-filter" value="noe">
        <div id="ta-roster">
          <div class="roster-card"><div class="roster-card-name">Noether, Emmy</div></div>
          <div class="roster-card"><div class="roster-card-name">Galois, Evariste</div></div>
        </div>
        "#,
    );

    apply_roster_filter();
    let cards = document().get_elements_by_class_name("roster-card");
    let first = cards.item(0).expect("first card");
    let second = cards.item(1).expect("second card");
    assert_eq!(display_of(&first), "");
    assert_eq!(display_of(&second), "none");

    fixture.remove();
}

#[wasm_bindgen_test]
fn class_time_blocks_get_unique_grouped_names() {
    let fixture = install_fixture(
        r#"
        <form>
          <input id="class-time-count" type="hidden" value="0">
          <div id="class-time-rows"></div>
        </form>
        "#,
    );

    append_class_time_block();
    append_class_time_block();

    let blocks = document().query_selector_all("#class-time-rows .class-time-block").expect("blocks");
    assert_eq!(blocks.length(), 2);

    let first_row = blocks
        .item(0)
        .and_then(|node| node.dyn_into::<Element>().ok())
        .and_then(|block| block.get_attribute("data-class-time-row"))
        .and_then(|value| value.parse::<u32>().ok())
        .expect("row attr");
    let second_row = blocks
        .item(1)
        .and_then(|node| node.dyn_into::<Element>().ok())
        .and_then(|block| block.get_attribute("data-class-time-row"))
        .and_then(|value| value.parse::<u32>().ok())
        .expect("row attr");
    assert_eq!(second_row, first_row + 1);

    let grouped = document()
        .query_selector_all(&format!("[name='ta_class_time_{first_row}']"))
        .expect("grouped");
    // Two time inputs plus five day checkboxes share the row's name.
    assert_eq!(grouped.length(), 7);

    let counter = document()
        .get_element_by_id("class-time-count")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .expect("counter input");
    assert_eq!(counter.value(), second_row.to_string());

    fixture.remove();
}
