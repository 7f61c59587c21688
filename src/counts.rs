use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::dom::{choice_label, element_by_id, table_rows, web_document, TableLayout};

/// For every label, how many entries share it. Quadratic by design: the
/// table is small and the tally runs once per page load.
pub fn assignment_counts(labels: &[String]) -> Vec<usize> {
    labels
        .iter()
        .map(|label| labels.iter().filter(|other| *other == label).count())
        .collect()
}

pub fn refresh_assignment_counts() {
    let Some(table) = element_by_id("lab-table") else {
        return;
    };
    let layout = TableLayout::from_table(&table);
    let rows = table_rows(&table);
    let labels: Vec<String> = rows
        .iter()
        .map(|row| choice_label(row, layout.choice_col))
        .collect();
    let counts = assignment_counts(&labels);

    for (row, count) in rows.iter().zip(counts) {
        if let Some(cell) = row.get_elements_by_tag_name("td").item(layout.count_col) {
            cell.set_text_content(Some(&count.to_string()));
        }
    }
}

pub fn refresh_lab_tally() {
    let Some(doc) = web_document() else {
        return;
    };
    let Some(input) = doc
        .get_element_by_id("lab-count")
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let total = doc.get_elements_by_class_name("lab").length();
    input.set_value(&total.to_string());
}
