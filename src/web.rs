//! Browser mounting
//!
//! Everything that touches the DOM: reading the page location, appending
//! stylesheets, rendering the widget, wiring its buttons and printing
//! through a popup window.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlImageElement,
    Response, Window,
};

use crate::app::{BingoApp, CardPrinter};
use crate::capabilities::{CapabilityDetector, UserAgentDetector};
use crate::config::{BingoOptions, Deployment};
use crate::consts::{CARD_LOADING_CLASS, MANIFEST_PATH, PROCESSED_CLASS};
use crate::error::{Error, Result};
use crate::manifest::AssetManifest;
use crate::paths::{PathResolver, page_base};
use crate::query::{determine_deployment, parse_query_string};
use crate::view::{print_markup, widget_markup};

/// Install the panic hook and console logger. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount with default options, as the page does on load.
///
/// Pages without the default container are left alone so they can call
/// `mountBingo` with their own options.
pub async fn run() {
    init_logging();
    log::info!("State fair bingo starting...");

    let options = BingoOptions::default();
    let has_container = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(&options.el).ok().flatten())
        .is_some();
    if !has_container {
        log::info!("No {} on page, waiting for mountBingo", options.el);
        return;
    }

    match mount(options, &UserAgentDetector).await {
        Ok(_) => {}
        Err(Error::AlreadyMounted(el)) => log::info!("Bingo widget already on {}", el),
        Err(e) => log::error!("Failed to mount bingo widget: {}", e),
    }
}

/// Mount a widget with options from JS. `undefined`/`null` means defaults.
#[wasm_bindgen(js_name = mountBingo)]
pub async fn mount_bingo(options: JsValue) -> std::result::Result<(), JsValue> {
    init_logging();

    let options = if options.is_undefined() || options.is_null() {
        BingoOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    match mount(options, &UserAgentDetector).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to mount bingo widget: {}", e);
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}

/// Resolve paths, load assets and render the widget into `options.el`.
///
/// A container that already holds a widget is refused.
pub async fn mount(
    options: BingoOptions,
    detector: &dyn CapabilityDetector,
) -> Result<Rc<RefCell<BingoApp>>> {
    options.validate()?;

    let window = web_sys::window().ok_or_else(|| Error::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Dom("no document".into()))?;

    let container = document
        .query_selector(&options.el)?
        .ok_or_else(|| Error::MountNotFound(options.el.clone()))?;
    // Claim the container before any await so a concurrent mount backs off
    if container.class_list().contains(PROCESSED_CLASS) {
        return Err(Error::AlreadyMounted(options.el.clone()));
    }
    container.class_list().add_1(PROCESSED_CLASS)?;

    // Deployment and device, read once
    let location = window.location();
    let host = location.host()?;
    let query = parse_query_string(&location.search()?);
    let deployment = determine_deployment(&host, &query);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let capabilities = detector.detect(&user_agent);
    let base = page_base(&location.protocol()?, &host, &location.pathname()?);
    let resolver =
        PathResolver::from_options(&options, deployment, capabilities).with_page_base(base);

    log::info!(
        "Deployment: {}, small images: {}",
        deployment.as_str(),
        capabilities.cannot_load_large_images
    );

    let manifest = if deployment == Deployment::Local {
        load_manifest(&window, &options).await
    } else {
        None
    };
    append_stylesheets(&document, &resolver.stylesheets(manifest.as_ref()))?;

    let seed = js_sys::Date::now() as u64;
    let app = BingoApp::new(options, resolver, Box::new(WindowPrinter), seed)?;
    let app = attach(&container, app)?;

    log::info!("Bingo widget mounted on {}", app.borrow().options().el);
    Ok(app)
}

/// Render `app` into `container` and wire up its buttons
pub fn attach(container: &Element, app: BingoApp) -> Result<Rc<RefCell<BingoApp>>> {
    container.set_inner_html(&widget_markup(&app.current_image_url()));

    let app = Rc::new(RefCell::new(app));
    let card = CardView::find(container)?;
    setup_image_loading(&card)?;
    setup_refresh_button(container, &card, app.clone())?;
    setup_print_button(container, app.clone())?;
    Ok(app)
}

/// Fetch and parse `bower.json`. Failures only cost the extra stylesheets.
async fn load_manifest(window: &Window, options: &BingoOptions) -> Option<AssetManifest> {
    let url = options.proxied_url(MANIFEST_PATH);
    let manifest = match fetch_text(window, &url).await {
        Ok(json) => AssetManifest::from_json(&json),
        Err(e) => Err(e),
    };
    match manifest {
        Ok(manifest) => {
            log::info!("Loaded asset manifest ({} entries)", manifest.dependency_map.len());
            Some(manifest)
        }
        Err(e) => {
            log::warn!("Skipping asset manifest {}: {}", url, e);
            None
        }
    }
}

async fn fetch_text(window: &Window, url: &str) -> Result<String> {
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()
        .map_err(|_| Error::Dom("fetch did not resolve to a Response".into()))?;
    if !response.ok() {
        return Err(Error::Dom(format!("HTTP {}", response.status())));
    }
    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| Error::Dom("response body is not text".into()))
}

fn append_stylesheets(document: &Document, hrefs: &[String]) -> Result<()> {
    let head = document
        .head()
        .ok_or_else(|| Error::Dom("document has no <head>".into()))?;
    for href in hrefs {
        let link = document.create_element("link")?;
        link.set_attribute("rel", "stylesheet")?;
        link.set_attribute("type", "text/css")?;
        link.set_attribute("href", href)?;
        head.append_child(&link)?;
    }
    log::debug!("Appended {} stylesheets", hrefs.len());
    Ok(())
}

fn find(container: &Element, selector: &str) -> Result<Element> {
    container
        .query_selector(selector)?
        .ok_or_else(|| Error::Dom(format!("widget markup is missing {}", selector)))
}

fn find_as<T: JsCast>(container: &Element, selector: &str) -> Result<T> {
    find(container, selector)?
        .dyn_into::<T>()
        .map_err(|_| Error::Dom(format!("{} has an unexpected element type", selector)))
}

/// The card block: image plus the notice shown while it loads
#[derive(Clone)]
struct CardView {
    card: Element,
    img: HtmlImageElement,
    notice: HtmlElement,
}

impl CardView {
    fn find(container: &Element) -> Result<Self> {
        Ok(Self {
            card: find(container, ".card")?,
            img: find_as(container, ".card img")?,
            notice: find_as(container, ".card .loading-container")?,
        })
    }

    /// Hide the image and show the notice, or the other way round
    fn set_loading(&self, loading: bool) {
        self.img.set_hidden(loading);
        self.notice.set_hidden(!loading);
        let classes = self.card.class_list();
        let _ = if loading {
            classes.add_1(CARD_LOADING_CLASS)
        } else {
            classes.remove_1(CARD_LOADING_CLASS)
        };
    }

    fn is_loading(&self) -> bool {
        self.img.hidden()
    }
}

/// Reveal the card once its image has loaded (or failed to)
fn setup_image_loading(card: &CardView) -> Result<()> {
    for event in ["load", "error"] {
        let view = card.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            view.set_loading(false);
        });
        card.img
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn setup_refresh_button(
    container: &Element,
    card: &CardView,
    app: Rc<RefCell<BingoApp>>,
) -> Result<()> {
    let button = find(container, ".pick .refresh")?;
    let manual_link: HtmlAnchorElement = find_as(container, ".manual-print")?;

    let card = card.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
        event.prevent_default();
        let url = app.borrow_mut().refresh();
        // Same image again would never fire `load`, so only swap on change
        if let Some(url) = url {
            card.set_loading(true);
            card.img.set_src(&url);
            manual_link.set_href(&url);
        }
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_print_button(container: &Element, app: Rc<RefCell<BingoApp>>) -> Result<()> {
    let button: HtmlButtonElement = find_as(container, ".pick .print")?;

    let button_clone = button.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
        event.prevent_default();
        let mut app = app.borrow_mut();
        if app.print().is_err() && !app.print_enabled() {
            button_clone.set_disabled(true);
        }
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Prints through a blank popup window holding only the card image
pub struct WindowPrinter;

impl CardPrinter for WindowPrinter {
    fn print_card(&self, image_url: &str) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| Error::Dom("no window".into()))?;
        let popup = window
            .open_with_url_and_target("about:blank", "_new")?
            .ok_or(Error::PopupBlocked)?;
        let document = popup
            .document()
            .ok_or_else(|| Error::Dom("print window has no document".into()))?;
        let root = document
            .document_element()
            .ok_or_else(|| Error::Dom("print window has no root element".into()))?;
        root.set_inner_html(&print_markup(image_url));

        let img: HtmlImageElement = find_as(&root, "img")?;
        let ready = {
            let popup = popup.clone();
            move || print_and_close(&popup)
        };
        let url = image_url.to_string();
        when_image_ready(&img, ready, move || abandon_print(&popup, &url))
    }
}

/// Run `ready` once `img` has loaded, or `failed` if it never will
fn when_image_ready(
    img: &HtmlImageElement,
    ready: impl FnOnce() + 'static,
    failed: impl FnOnce() + 'static,
) -> Result<()> {
    if img.complete() {
        // `complete` is also true for an image that failed to decode
        if img.natural_width() > 0 {
            ready();
        } else {
            failed();
        }
        return Ok(());
    }

    // Each side fires at most once even if the event repeats
    let mut ready = Some(ready);
    let on_load = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Some(ready) = ready.take() {
            ready();
        }
    });
    let mut failed = Some(failed);
    let on_error = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Some(failed) = failed.take() {
            failed();
        }
    });
    img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_load.forget();
    on_error.forget();
    Ok(())
}

fn print_and_close(popup: &Window) {
    if let Err(e) = popup.print() {
        log::warn!("Print dialog failed: {:?}", e);
    }
    let _ = popup.close();
}

fn abandon_print(popup: &Window, image_url: &str) {
    log::warn!("Card image failed to load for printing: {}", image_url);
    let _ = popup.close();
}
