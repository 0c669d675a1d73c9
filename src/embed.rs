//! Social embeds: loads `posts.json` and hands each post to the third-party
//! widget once it reports ready.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;

use js_sys::{Array, Function, Object, Reflect};
use regex::Regex;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Response};

use crate::error::EmbedError;

#[derive(Deserialize, Debug, Default)]
struct PostList {
    #[serde(default)]
    tweets: Option<Vec<String>>,
}

/// Options passed to `twttr.widgets.createTweet`.
#[derive(Serialize)]
struct EmbedOptions {
    theme: &'static str,
    lang: &'static str,
    dnt: bool,
    conversation: &'static str,
}

const EMBED_OPTIONS: EmbedOptions = EmbedOptions {
    theme: "light",
    lang: "tr",
    dnt: true,
    conversation: "none",
};

/// Parses the static post list. A missing or `null` `tweets` field is an empty list.
pub fn parse_post_list(raw: &str) -> Result<Vec<String>, EmbedError> {
    let list: PostList = serde_json::from_str(raw)?;
    Ok(list.tweets.unwrap_or_default())
}

fn status_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"status/([0-9]+)").expect("static regex"))
}

/// Numeric post id from a `.../status/<digits>` URL.
pub fn extract_post_id(url: &str) -> Option<&str> {
    status_pattern()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A continuation that runs at most once, whenever (or if ever) it is fired.
pub struct OneShot {
    continuation: Cell<Option<Box<dyn FnOnce()>>>,
}

impl OneShot {
    pub fn new(f: impl FnOnce() + 'static) -> Rc<Self> {
        Rc::new(Self {
            continuation: Cell::new(Some(Box::new(f))),
        })
    }

    /// Runs the continuation. Returns `false` if it already ran.
    pub fn fire(&self) -> bool {
        match self.continuation.take() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn is_spent(&self) -> bool {
        // `Cell<Option<Box<_>>>` is not `Copy`; swap out and back to peek.
        let current = self.continuation.take();
        let spent = current.is_none();
        self.continuation.set(current);
        spent
    }
}

/// Fetches and parses `url`. Single attempt, no timeout.
pub async fn fetch_post_list(url: &str) -> Result<Vec<String>, EmbedError> {
    let window = web_sys::window().ok_or_else(|| EmbedError::Fetch("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| EmbedError::Fetch(format!("{:?}", e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| EmbedError::Fetch("fetch did not return a Response".into()))?;
    if !resp.ok() {
        return Err(EmbedError::Status(resp.status()));
    }
    let text_promise = resp
        .text()
        .map_err(|e| EmbedError::Fetch(format!("{:?}", e)))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| EmbedError::Fetch(format!("{:?}", e)))?
        .as_string()
        .unwrap_or_default();
    parse_post_list(&body)
}

fn twttr() -> Option<JsValue> {
    let window = web_sys::window()?;
    Reflect::get(&window, &"twttr".into())
        .ok()
        .filter(|v| v.is_object())
}

fn widgets() -> Option<JsValue> {
    Reflect::get(&twttr()?, &"widgets".into())
        .ok()
        .filter(|v| v.is_object())
}

/// Subscribes `hook` to widget readiness. Fires right away if the widget
/// script has already loaded, otherwise queues on `twttr.ready`.
pub fn when_widget_ready(hook: Rc<OneShot>) {
    if widgets().is_some() {
        hook.fire();
        return;
    }
    if let Err(e) = queue_on_ready(hook) {
        log::warn!("Could not subscribe to embed widget readiness: {:?}", e);
    }
}

fn queue_on_ready(hook: Rc<OneShot>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let twttr = match twttr() {
        Some(t) => t,
        None => {
            let t: JsValue = Object::new().into();
            Reflect::set(&window, &"twttr".into(), &t)?;
            t
        }
    };
    let callback = Closure::once_into_js(move || {
        hook.fire();
    });

    let ready = Reflect::get(&twttr, &"ready".into())?;
    if let Some(f) = ready.dyn_ref::<Function>() {
        // widgets.js loader snippet: `twttr.ready(fn)`.
        f.call1(&twttr, &callback)?;
    } else if let Some(queue) = ready.dyn_ref::<Array>() {
        queue.push(&callback);
    } else {
        let queue = Array::new();
        queue.push(&callback);
        Reflect::set(&twttr, &"ready".into(), &queue)?;
    }
    Ok(())
}

/// Appends one embed per URL with a recognizable post id. Returns how many were requested.
pub fn render_posts(container: &Element, urls: &[String]) -> usize {
    let Some(widgets) = widgets() else {
        log::warn!("Embed widget is not loaded, skipping {} posts", urls.len());
        return 0;
    };
    let create: Function = match Reflect::get(&widgets, &"createTweet".into()) {
        Ok(f) if f.is_function() => f.unchecked_into(),
        _ => {
            log::warn!("Embed widget has no createTweet");
            return 0;
        }
    };
    let options = match serde_wasm_bindgen::to_value(&EMBED_OPTIONS) {
        Ok(o) => o,
        Err(e) => {
            log::error!("Failed to convert embed options: {}", e);
            return 0;
        }
    };
    let Some(document) = container.owner_document() else {
        return 0;
    };

    let mut rendered = 0;
    for id in urls.iter().filter_map(|u| extract_post_id(u)) {
        let slot = match document.create_element("div") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("Failed to create embed slot: {:?}", e);
                continue;
            }
        };
        slot.set_class_name("tweet-embed");
        if container.append_child(&slot).is_err() {
            continue;
        }
        let args = Array::of3(&JsValue::from_str(id), &slot, &options);
        match create.apply(&widgets, &args) {
            Ok(_) => rendered += 1,
            Err(e) => log::warn!("createTweet failed for {}: {:?}", id, e),
        }
    }
    rendered
}


// Browser tests: exercise the `window.twttr` handshake for real.
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn reset_twttr(value: Option<&JsValue>) {
        let window = web_sys::window().unwrap();
        match value {
            Some(v) => {
                Reflect::set(&window, &"twttr".into(), v).unwrap();
            }
            None => {
                Reflect::delete_property(&window, &"twttr".into()).unwrap();
            }
        }
    }

    fn counting_hook() -> (Rc<Cell<u32>>, Rc<OneShot>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let hook = OneShot::new(move || counter.set(counter.get() + 1));
        (calls, hook)
    }

    fn ready_queue() -> Array {
        let twttr = twttr().expect("twttr object");
        Reflect::get(&twttr, &"ready".into())
            .unwrap()
            .dyn_into::<Array>()
            .expect("ready queue")
    }

    /// Calls every queued callback twice, the way a misbehaving loader might.
    fn drain_twice(queue: &Array) {
        for _ in 0..2 {
            for cb in queue.iter() {
                let f: Function = cb.unchecked_into();
                let _ = f.call0(&JsValue::NULL);
            }
        }
    }

    #[wasm_bindgen_test]
    fn fires_immediately_when_widgets_are_loaded() {
        let twttr = Object::new();
        Reflect::set(&twttr, &"widgets".into(), &Object::new()).unwrap();
        reset_twttr(Some(&twttr));

        let (calls, hook) = counting_hook();
        when_widget_ready(hook.clone());
        assert_eq!(calls.get(), 1);
        assert!(hook.is_spent());
        reset_twttr(None);
    }

    #[wasm_bindgen_test]
    fn creates_queue_when_twttr_is_absent() {
        reset_twttr(None);

        let (calls, hook) = counting_hook();
        when_widget_ready(hook);
        assert_eq!(calls.get(), 0);

        let queue = ready_queue();
        assert_eq!(queue.length(), 1);
        drain_twice(&queue);
        assert_eq!(calls.get(), 1);
        reset_twttr(None);
    }

    #[wasm_bindgen_test]
    fn appends_to_existing_ready_array() {
        let twttr = Object::new();
        let existing = Array::new();
        existing.push(&Function::new_no_args(""));
        Reflect::set(&twttr, &"ready".into(), &existing).unwrap();
        reset_twttr(Some(&twttr));

        let (calls, hook) = counting_hook();
        when_widget_ready(hook);
        assert_eq!(calls.get(), 0);

        let queue = ready_queue();
        assert_eq!(queue.length(), 2);
        drain_twice(&queue);
        assert_eq!(calls.get(), 1);
        reset_twttr(None);
    }

    #[wasm_bindgen_test]
    fn passes_continuation_to_ready_function() {
        let twttr = Object::new();
        let ready = Function::new_with_args("f", "this._queued = f;");
        Reflect::set(&twttr, &"ready".into(), &ready).unwrap();
        reset_twttr(Some(&twttr));

        let (calls, hook) = counting_hook();
        when_widget_ready(hook);
        assert_eq!(calls.get(), 0);

        let queued: Function = Reflect::get(&twttr, &"_queued".into())
            .unwrap()
            .dyn_into()
            .expect("continuation handed to twttr.ready");
        let _ = queued.call0(&JsValue::NULL);
        let _ = queued.call0(&JsValue::NULL);
        assert_eq!(calls.get(), 1);
        reset_twttr(None);
    }
}
