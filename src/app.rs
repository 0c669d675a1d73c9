use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

use crate::banner;
use crate::checklist::ChecklistStore;
use crate::clipboard;
use crate::config::{
    CHECKLIST_STEPS, HASHTAG, LEGAL_BANNER_KEY, POSTS_URL, SEARCH_FALLBACK_URL, STORAGE_KEY,
    TWEET_TEMPLATE,
};
use crate::embed::{self, OneShot};
use crate::petition::{FormField, InputKind, PetitionFormData, PetitionGenerator, PetitionKind};
use crate::share;
use crate::storage::LocalStore;

#[derive(Clone, Copy, PartialEq)]
enum EmbedStatus {
    Loading,
    Empty,
    Loaded,
    Failed,
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

fn set_body_overflow(value: &str) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        if let Err(e) = body.style().set_property("overflow", value) {
            log::warn!("Failed to set body overflow: {:?}", e);
        }
    }
}

/// Today's date as `YYYY-MM-DD`, the value format of `<input type="date">`.
fn today_iso() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.split('T').next().unwrap_or_default().to_string()
}

#[derive(Properties, PartialEq)]
struct FieldProps {
    field: FormField,
    value: String,
    on_input: Callback<(FormField, String)>,
}

#[function_component(FormFieldInput)]
fn form_field_input(props: &FieldProps) -> Html {
    let field = props.field;
    let id = field.id();

    let input = match field.input_kind() {
        InputKind::TextArea => {
            let on_input = props.on_input.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                on_input.emit((field, value));
            });
            html! {
                <textarea id={id} name={id} rows="3" required={true}
                    value={props.value.clone()} {oninput} />
            }
        }
        kind => {
            let on_input = props.on_input.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let value = e.target_unchecked_into::<HtmlInputElement>().value();
                on_input.emit((field, value));
            });
            let input_type = if kind == InputKind::Date { "date" } else { "text" };
            if field == FormField::Tckn {
                html! {
                    <input type="text" id={id} name={id} required={true}
                        inputmode="numeric"
                        value={props.value.clone()} {oninput} />
                }
            } else {
                html! {
                    <input type={input_type} id={id} name={id} required={true}
                        value={props.value.clone()} {oninput} />
                }
            }
        }
    };

    html! {
        <div class="form-group">
            <label for={id}>{ field.label() }</label>
            { input }
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let storage = use_memo((), |_| LocalStore::new());

    // --- yasal uyarı ---
    let banner_hidden = {
        let storage = storage.clone();
        use_state(move || banner::is_dismissed(&*storage, LEGAL_BANNER_KEY))
    };
    let on_close_banner = {
        let storage = storage.clone();
        let banner_hidden = banner_hidden.clone();
        Callback::from(move |_: MouseEvent| {
            banner::dismiss(&*storage, LEGAL_BANNER_KEY);
            banner_hidden.set(true);
        })
    };

    // --- kontrol listesi ---
    let checklist = {
        let storage = storage.clone();
        use_mut_ref(move || ChecklistStore::open((*storage).clone(), STORAGE_KEY))
    };
    let redraw = use_force_update();
    let toggle_step = {
        let checklist = checklist.clone();
        Callback::from(move |step_id: &'static str| {
            let stats = {
                let mut store = checklist.borrow_mut();
                store.toggle(step_id);
                store.stats(CHECKLIST_STEPS.len())
            };
            log::info!(
                "Checklist progress: {}/{} ({}%)",
                stats.completed,
                stats.total,
                stats.percentage.unwrap_or(0)
            );
            redraw.force_update();
        })
    };

    // --- paylaşım ---
    let on_tweet = Callback::from(|_: MouseEvent| share::open_share_intent(TWEET_TEMPLATE));

    // --- gönderiler ---
    let embed_status = use_state(|| EmbedStatus::Loading);
    let tweets_container = use_node_ref();
    {
        let embed_status = embed_status.clone();
        let tweets_container = tweets_container.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match embed::fetch_post_list(POSTS_URL).await {
                    Ok(urls) if urls.is_empty() => embed_status.set(EmbedStatus::Empty),
                    Ok(urls) => {
                        embed_status.set(EmbedStatus::Loaded);
                        let hook = OneShot::new(move || {
                            if let Some(container) = tweets_container.cast::<Element>() {
                                let count = embed::render_posts(&container, &urls);
                                log::info!("Rendered {} of {} posts", count, urls.len());
                            }
                        });
                        embed::when_widget_ready(hook);
                    }
                    Err(e) => {
                        log::warn!("Failed to load tweets: {}", e);
                        embed_status.set(EmbedStatus::Failed);
                    }
                }
            });
            || {}
        });
    }

    // --- dilekçe ---
    let generator = use_mut_ref(PetitionGenerator::new);
    let form_data = use_state(PetitionFormData::default);
    let petition_text = use_state(String::new);
    let form_open = use_state(|| false);
    let result_open = use_state(|| false);
    let form_ref = use_node_ref();

    {
        let locked = *form_open || *result_open;
        use_effect_with(locked, |locked| {
            set_body_overflow(if *locked { "hidden" } else { "" });
            || {}
        });
    }

    {
        let form_open = form_open.clone();
        let result_open = result_open.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                if e.key() == "Escape" {
                    form_open.set(false);
                    result_open.set(false);
                }
            });
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(doc) = &document {
                if let Err(e) = doc
                    .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                {
                    log::warn!("Failed to register Escape handler: {:?}", e);
                }
            }
            move || {
                if let Some(doc) = &document {
                    if let Err(e) = doc.remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    ) {
                        log::warn!("Failed to remove Escape handler: {:?}", e);
                    }
                }
                drop(listener);
            }
        });
    }

    let on_field_input = {
        let form_data = form_data.clone();
        Callback::from(move |(field, value): (FormField, String)| {
            let mut next = (*form_data).clone();
            next.set(field, value);
            form_data.set(next);
        })
    };

    let open_petition = {
        let generator = generator.clone();
        let form_data = form_data.clone();
        let form_open = form_open.clone();
        Callback::from(move |kind: &'static str| {
            generator.borrow_mut().select(PetitionKind::from_name(kind));
            if form_data.petition_date.is_empty() {
                let mut next = (*form_data).clone();
                next.petition_date = today_iso();
                form_data.set(next);
            }
            form_open.set(true);
        })
    };

    let close_form = {
        let form_open = form_open.clone();
        Callback::from(move |_: MouseEvent| form_open.set(false))
    };
    let close_result = {
        let result_open = result_open.clone();
        Callback::from(move |_: MouseEvent| result_open.set(false))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_generate = {
        let generator = generator.clone();
        let form_data = form_data.clone();
        let form_ref = form_ref.clone();
        let petition_text = petition_text.clone();
        let form_open = form_open.clone();
        let result_open = result_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                if !form.check_validity() {
                    form.report_validity();
                    return;
                }
            }

            let kind = generator.borrow().current_kind();
            let outcome = generator
                .borrow_mut()
                .generate(kind, &form_data)
                .map(str::to_string);
            match outcome {
                Ok(text) => {
                    petition_text.set(text);
                    form_open.set(false);
                    result_open.set(true);
                }
                Err(err) => {
                    log::debug!("Petition form rejected: {:?}", err);
                    alert(&err.to_string());
                }
            }
        })
    };

    let on_copy = {
        let generator = generator.clone();
        Callback::from(move |_: MouseEvent| {
            let text = generator.borrow().generated_text().to_string();
            spawn_local(async move {
                let outcome = clipboard::copy_text(&text).await;
                alert(outcome.message());
            });
        })
    };
    let on_print = Callback::from(|_: MouseEvent| clipboard::print_page());

    // --- görünüm ---
    let stats = checklist.borrow().stats(CHECKLIST_STEPS.len());
    let steps = CHECKLIST_STEPS.iter().map(|step| {
        let completed = checklist.borrow().is_completed(step.id);
        let step_id = step.id;
        let onchange = {
            let toggle_step = toggle_step.clone();
            Callback::from(move |_: Event| toggle_step.emit(step_id))
        };
        let onkeydown = {
            let toggle_step = toggle_step.clone();
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Enter" || e.key() == " " {
                    e.prevent_default();
                    toggle_step.emit(step_id);
                }
            })
        };
        html! {
            <li key={step.id} class={classes!("checklist-item", completed.then_some("completed"))}
                data-step={step.id}>
                <label class="checklist-item__checkbox" tabindex="0" {onkeydown}>
                    <input type="checkbox" checked={completed} {onchange} />
                    <span class="checklist-item__title">{ step.title }</span>
                </label>
                <p class="checklist-item__desc">{ step.description }</p>
            </li>
        }
    });

    let embed_notice = match *embed_status {
        EmbedStatus::Loading => html! {
            <div id="twitter-loading" class="social-embed__loading"><p>{ "Gönderiler yükleniyor..." }</p></div>
        },
        EmbedStatus::Empty => html! {
            <div id="twitter-loading" class="social-embed__loading"><p>{ "Henüz paylaşılan gönderi yok." }</p></div>
        },
        EmbedStatus::Loaded => html! {},
        EmbedStatus::Failed => html! {
            <div id="twitter-loading" class="social-embed__loading">
                <p>{ "Gönderiler yüklenemedi." }</p>
                <a href={SEARCH_FALLBACK_URL} target="_blank" rel="noopener noreferrer"
                    class="social-embed__link">{ "X'te Ara →" }</a>
            </div>
        },
    };

    let fields = FormField::ALL.iter().map(|&field| {
        html! {
            <FormFieldInput key={field.id()} {field}
                value={form_data.get(field).to_string()}
                on_input={on_field_input.clone()} />
        }
    });

    let open_sgk = {
        let open_petition = open_petition.clone();
        Callback::from(move |_: MouseEvent| open_petition.emit("sgk"))
    };

    html! {
        <main class="container">
            if !*banner_hidden {
                <div id="legalBanner" class="legal-banner">
                    <p>{ "Bu site bilgilendirme amaçlıdır ve hukuki danışmanlık yerine geçmez. Dilekçenizi göndermeden önce bir avukata danışmanız önerilir." }</p>
                    <button class="legal-banner__close" aria-label="Kapat" onclick={on_close_banner}>{ "×" }</button>
                </div>
            }

            <section class="checklist">
                <h2>{ "Neler Yapabilirsiniz?" }</h2>
                <p class="checklist__progress">
                    { format!("{}/{} adım tamamlandı", stats.completed, stats.total) }
                    if let Some(p) = stats.percentage {
                        { format!(" (%{})", p) }
                    }
                </p>
                <ul class="checklist__items">{ for steps }</ul>
            </section>

            <section class="petition-cta">
                <h2>{ "İtiraz Dilekçesi" }</h2>
                <p>{ "Bilgilerinizi girin, SGK'ya sunabileceğiniz dilekçe metni hazırlansın." }</p>
                <button class="btn btn--primary" onclick={open_sgk}>{ "Dilekçe Oluştur" }</button>
            </section>

            <section class="share">
                <h2>{ format!("#{}", HASHTAG) }</h2>
                <button id="tweetBtn" class="btn btn--share" onclick={on_tweet}>{ "X'te Paylaş" }</button>
            </section>

            <section class="social-embed">
                { embed_notice }
                <div id="tweets-container" class="social-embed__grid" ref={tweets_container}></div>
            </section>

            <div id="petitionModal" class={classes!("modal-overlay", form_open.then_some("active"))}
                onclick={close_form.clone()}>
                <div class="modal" onclick={keep_open.clone()}>
                    <div class="modal__header">
                        <h3>{ "Dilekçe Bilgileri" }</h3>
                        <button class="modal__close" aria-label="Kapat" onclick={close_form}>{ "×" }</button>
                    </div>
                    <form id="petitionForm" ref={form_ref} class="petition-form">
                        { for fields }
                        <button type="submit" class="btn btn--primary" onclick={on_generate}>
                            { "Dilekçeyi Oluştur" }
                        </button>
                    </form>
                </div>
            </div>

            <div id="petitionResultModal" class={classes!("modal-overlay", result_open.then_some("active"))}
                onclick={close_result.clone()}>
                <div class="modal modal--result" onclick={keep_open}>
                    <div class="modal__header">
                        <h3>{ "Dilekçeniz Hazır" }</h3>
                        <button class="modal__close" aria-label="Kapat" onclick={close_result}>{ "×" }</button>
                    </div>
                    <pre id="petitionPreview" class="petition-preview">{ (*petition_text).clone() }</pre>
                    <div class="modal__actions">
                        <button class="btn btn--primary" onclick={on_copy}>{ "Kopyala" }</button>
                        <button class="btn" onclick={on_print}>{ "Yazdır" }</button>
                    </div>
                </div>
            </div>
        </main>
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn next_tick() {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }

    async fn render_field(field: FormField) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        yew::Renderer::<FormFieldInput>::with_root_and_props(
            root.clone(),
            FieldProps {
                field,
                value: String::new(),
                on_input: Callback::noop(),
            },
        )
        .render();
        next_tick().await;
        root
    }

    #[wasm_bindgen_test]
    async fn id_number_input_leaves_format_check_to_validation() {
        let root = render_field(FormField::Tckn).await;
        let input = root
            .query_selector("input#tckn")
            .unwrap()
            .expect("rendered id number input");
        assert_eq!(input.get_attribute("inputmode").as_deref(), Some("numeric"));
        assert_eq!(input.get_attribute("type").as_deref(), Some("text"));
        assert!(!input.has_attribute("pattern"));
        assert!(!input.has_attribute("maxlength"));
        assert!(input.has_attribute("required"));
    }

    #[wasm_bindgen_test]
    async fn start_date_renders_as_date_input() {
        let root = render_field(FormField::StartDate).await;
        let input = root
            .query_selector("input[type=date]")
            .unwrap()
            .expect("rendered date input");
        assert_eq!(input.id(), FormField::StartDate.id());
    }
}
