pub mod class_times;
pub mod counts;
pub mod dom;
pub mod filter;
pub mod sort;
pub mod switches;

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom::web_document;

#[component]
fn App() -> impl IntoView {
    view! {
        <div
            id="runtime-marker"
            data-runtime="quicksched-frontend"
            style="display:none;"
        ></div>
    }
}

/// Mount the runtime marker and wire up every widget whose hooks exist on
/// the current page. Pages without a given hook skip that widget silently.
pub fn start() {
    console_error_panic_hook::set_once();

    if let Some(root) = web_document()
        .and_then(|doc| doc.get_element_by_id("runtime-root"))
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    {
        mount_to(root, || view! { <App /> });
    } else {
        mount_to_body(|| view! { <App /> });
    }

    apply_build_stamp();
    filter::init_filters();
    sort::init_sort_handlers();
    counts::refresh_assignment_counts();
    counts::refresh_lab_tally();
    switches::init_switch_panel();
    switches::init_template_assign();
    class_times::init_class_time_form();
    leptos::logging::log!("quicksched frontend ready");
}

fn apply_build_stamp() {
    if let Some(badge) = dom::element_by_id("build-version") {
        let _ = badge.set_attribute("title", concat!("built at epoch ", env!("BUILD_EPOCH")));
    }
    dom::set_text("build-version", concat!("build ", env!("BUILD_HASH")));
}
