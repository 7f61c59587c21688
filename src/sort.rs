use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};

use crate::dom::{
    add_listener, element_by_id, selected_option_label, table_rows, web_document, TableLayout,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(Option<i64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Leading-integer parse with the leniency of the page's old behavior:
/// surrounding whitespace and trailing junk are ignored, anything without a
/// leading digit yields no key at all.
pub fn parse_int_key(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn out_of_order(left: &SortValue, right: &SortValue, direction: Direction) -> bool {
    match (left, right) {
        (SortValue::Text(a), SortValue::Text(b)) => match direction {
            Direction::Ascending => a > b,
            Direction::Descending => a < b,
        },
        (SortValue::Number(Some(a)), SortValue::Number(Some(b))) => match direction {
            Direction::Ascending => a > b,
            Direction::Descending => a < b,
        },
        // A row without a numeric key never swaps, same as a NaN comparison.
        _ => false,
    }
}

/// Adjacent-swap sort over `keys`. Each pass scans from the top for the
/// first out-of-order pair, swaps it (mirrored into the caller via
/// `swap_rows`), and rescans. Starts ascending; if the data never needed a
/// swap in that direction, flips to descending and keeps going. Returns the
/// direction the data ended up sorted in.
pub fn sort_adjacent(keys: &mut [SortValue], mut swap_rows: impl FnMut(usize)) -> Direction {
    let mut direction = Direction::Ascending;
    let mut swap_count = 0usize;
    loop {
        let mut switched = false;
        for idx in 0..keys.len().saturating_sub(1) {
            if out_of_order(&keys[idx], &keys[idx + 1], direction) {
                keys.swap(idx, idx + 1);
                swap_rows(idx);
                swap_count += 1;
                switched = true;
                break;
            }
        }
        if switched {
            continue;
        }
        if swap_count == 0 && direction == Direction::Ascending {
            direction = Direction::Descending;
            continue;
        }
        break;
    }
    direction
}

fn extract_key(row: &Element, column: i32, layout: &TableLayout) -> SortValue {
    if column < 0 {
        let text = row
            .query_selector("th")
            .ok()
            .flatten()
            .and_then(|cell| cell.text_content())
            .unwrap_or_default();
        return SortValue::Number(parse_int_key(&text));
    }

    let column = column as u32;
    let Some(cell) = row.get_elements_by_tag_name("td").item(column) else {
        return SortValue::Text(String::new());
    };
    if column == layout.count_col {
        SortValue::Number(parse_int_key(&cell.text_content().unwrap_or_default()))
    } else if column == layout.choice_col {
        let label = cell
            .query_selector("select")
            .ok()
            .flatten()
            .and_then(|node| node.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| selected_option_label(&select))
            .unwrap_or_default();
        SortValue::Text(label)
    } else {
        SortValue::Text(cell.text_content().unwrap_or_default().to_lowercase())
    }
}

pub fn sort_table_column(column: i32) {
    let Some(table) = element_by_id("lab-table") else {
        return;
    };
    let layout = TableLayout::from_table(&table);
    let mut elements = table_rows(&table);
    let mut keys: Vec<SortValue> = elements
        .iter()
        .map(|row| extract_key(row, column, &layout))
        .collect();

    sort_adjacent(&mut keys, |idx| {
        if let Some(parent) = elements[idx].parent_element() {
            let _ = parent.insert_before(&elements[idx + 1], Some(&elements[idx]));
        }
        elements.swap(idx, idx + 1);
    });
}

pub fn init_sort_handlers() {
    let Some(doc) = web_document() else {
        return;
    };
    let Ok(headers) = doc.query_selector_all("#lab-table th[data-sort-col]") else {
        return;
    };

    for idx in 0..headers.length() {
        let Some(header) = headers
            .item(idx)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let Some(column) = header
            .get_attribute("data-sort-col")
            .and_then(|value| value.parse::<i32>().ok())
        else {
            continue;
        };
        add_listener(&header, "click", move |_event| sort_table_column(column));
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_int_key, sort_adjacent, Direction, SortValue};

    fn numbers(values: &[i64]) -> Vec<SortValue> {
        values
            .iter()
            .map(|value| SortValue::Number(Some(*value)))
            .collect()
    }

    fn texts(values: &[&str]) -> Vec<SortValue> {
        values
            .iter()
            .map(|value| SortValue::Text(value.to_string()))
            .collect()
    }

    #[test]
    fn unsorted_input_sorts_ascending() {
        let mut keys = numbers(&[3, 1, 2]);
        let direction = sort_adjacent(&mut keys, |_| {});
        assert_eq!(keys, numbers(&[1, 2, 3]));
        assert_eq!(direction, Direction::Ascending);
    }

    #[test]
    fn ascending_input_flips_to_descending() {
        let mut keys = numbers(&[1, 2, 3]);
        let direction = sort_adjacent(&mut keys, |_| {});
        assert_eq!(keys, numbers(&[3, 2, 1]));
        assert_eq!(direction, Direction::Descending);
    }

    #[test]
    fn double_invoke_restores_descending_input() {
        let mut keys = numbers(&[3, 2, 1]);
        sort_adjacent(&mut keys, |_| {});
        assert_eq!(keys, numbers(&[1, 2, 3]));
        sort_adjacent(&mut keys, |_| {});
        assert_eq!(keys, numbers(&[3, 2, 1]));
    }

    #[test]
    fn double_invoke_does_not_restore_unsorted_input() {
        let mut keys = numbers(&[3, 1, 2]);
        sort_adjacent(&mut keys, |_| {});
        sort_adjacent(&mut keys, |_| {});
        assert_ne!(keys, numbers(&[3, 1, 2]));
    }

    #[test]
    fn text_keys_sort_lexicographically() {
        let mut keys = texts(&["cs 210", "cs 101", "cs 150"]);
        sort_adjacent(&mut keys, |_| {});
        assert_eq!(keys, texts(&["cs 101", "cs 150", "cs 210"]));
    }

    #[test]
    fn missing_numeric_keys_never_move() {
        let mut keys = vec![
            SortValue::Number(None),
            SortValue::Number(Some(2)),
            SortValue::Number(Some(1)),
        ];
        let mut swaps = Vec::new();
        sort_adjacent(&mut keys, |idx| swaps.push(idx));
        assert_eq!(swaps, vec![1]);
        assert_eq!(keys[0], SortValue::Number(None));
    }

    #[test]
    fn swap_callback_mirrors_key_swaps() {
        let mut keys = numbers(&[2, 1]);
        let mut swaps = Vec::new();
        sort_adjacent(&mut keys, |idx| swaps.push(idx));
        assert_eq!(swaps, vec![0]);
    }

    #[test]
    fn parses_leading_integers_leniently() {
        assert_eq!(parse_int_key("12"), Some(12));
        assert_eq!(parse_int_key("  7 labs "), Some(7));
        assert_eq!(parse_int_key("-3"), Some(-3));
        assert_eq!(parse_int_key("+4"), Some(4));
        assert_eq!(parse_int_key("lab 9"), None);
        assert_eq!(parse_int_key(""), None);
    }
}
