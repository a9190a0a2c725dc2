//! Page scan and script injection for game elements

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlScriptElement};

use crate::loader::{ScriptRequest, plan_injections};

/// Scan the page for `ki-games-*` tags and request each game's script.
/// Waits for `DOMContentLoaded` if the document is still parsing.
#[wasm_bindgen(js_name = loadGames)]
pub fn load_games() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("[KI Games Loader] No document available");
        return;
    };

    if document.ready_state() == "loading" {
        let closure = Closure::once(move |_event: web_sys::Event| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                discover_and_load(&document);
            }
        });
        let _ = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    } else {
        discover_and_load(&document);
    }
}

fn discover_and_load(document: &Document) {
    let elements = document.get_elements_by_tag_name("*");
    let tag_names: Vec<String> = (0..elements.length())
        .filter_map(|i| elements.item(i))
        .map(|el| el.tag_name())
        .collect();

    let scripts = document.get_elements_by_tag_name("script");
    let existing_srcs: Vec<String> = (0..scripts.length())
        .filter_map(|i| scripts.item(i))
        .filter_map(|el| el.get_attribute("src"))
        .collect();

    let requests = plan_injections(tag_names.iter().map(String::as_str), &existing_srcs);
    for request in &requests {
        inject(document, request);
    }
}

fn inject(document: &Document, request: &ScriptRequest) {
    let Some(head) = document.head() else {
        log::error!("[KI Games Loader] Document has no <head>");
        return;
    };
    let script: HtmlScriptElement = match document
        .create_element("script")
        .ok()
        .and_then(|el| el.dyn_into().ok())
    {
        Some(script) => script,
        None => return,
    };

    log::info!(
        "[KI Games Loader] Found <{}>. Dynamically loading {}",
        request.tag,
        request.src
    );

    script.set_src(&request.src);
    script.set_type("text/javascript");
    script.set_async(true);
    let _ = head.append_child(&script);
}
