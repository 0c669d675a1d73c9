use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

/// Which mechanism, if any, put the text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Fallback,
    Failed,
}

impl CopyOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, CopyOutcome::Failed)
    }

    /// Prompt shown to the user after a copy attempt.
    pub fn message(self) -> &'static str {
        if self.is_success() {
            "Dilekçe panoya kopyalandı!"
        } else {
            "Dilekçe kopyalanamadı. Lütfen metni seçip elle kopyalayın."
        }
    }
}

/// Copies `text`, trying the async Clipboard API first and a hidden
/// `<textarea>` + `execCommand("copy")` second.
pub async fn copy_text(text: &str) -> CopyOutcome {
    match write_with_clipboard_api(text).await {
        Ok(()) => return CopyOutcome::Clipboard,
        Err(e) => log::error!("Clipboard API write failed: {:?}", e),
    }
    match write_with_exec_command(text) {
        Ok(true) => CopyOutcome::Fallback,
        Ok(false) => {
            log::error!("execCommand(\"copy\") was refused");
            CopyOutcome::Failed
        }
        Err(e) => {
            log::error!("Fallback copy failed: {:?}", e);
            CopyOutcome::Failed
        }
    }
}

async fn write_with_clipboard_api(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &"clipboard".into())?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("navigator.clipboard is unavailable"));
    }
    let write_text: Function = Reflect::get(&clipboard, &"writeText".into())?.dyn_into()?;
    let promise: Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn write_with_exec_command(text: &str) -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    let style = textarea.style();
    style.set_property("position", "fixed")?;
    style.set_property("opacity", "0")?;
    body.append_child(&textarea)?;
    textarea.select();

    let copied = document.dyn_into::<HtmlDocument>()?.exec_command("copy");
    body.remove_child(&textarea)?;
    copied
}

/// Opens the browser print dialog; print CSS limits the page to the petition.
pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            log::warn!("Print failed: {:?}", e);
        }
    }
}
