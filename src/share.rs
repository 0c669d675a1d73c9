use url::Url;

use crate::config::SHARE_INTENT_BASE;

/// Post-composer deep link carrying `text` as its only parameter.
pub fn share_intent_url(text: &str) -> String {
    match Url::parse_with_params(SHARE_INTENT_BASE, &[("text", text)]) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::error!("Invalid share intent base {}: {}", SHARE_INTENT_BASE, e);
            SHARE_INTENT_BASE.to_string()
        }
    }
}

/// Opens the composer in a new tab.
pub fn open_share_intent(text: &str) {
    let target = share_intent_url(text);
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) =
        window.open_with_url_and_target_and_features(&target, "_blank", "noopener,noreferrer")
    {
        log::warn!("Failed to open share intent: {:?}", e);
    }
}
