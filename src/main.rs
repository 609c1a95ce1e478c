//! State fair bingo entry point
//!
//! In the browser this mounts the widget once the module loads. Natively it
//! walks through a few cards and logs what would be shown and printed.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    state_fair_bingo::web::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("State fair bingo (native) starting...");
    log::info!("The widget itself needs a browser - build for wasm32 and serve the page");

    if let Err(e) = preview() {
        log::error!("Preview failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Logs instead of printing
#[cfg(not(target_arch = "wasm32"))]
struct LogPrinter;

#[cfg(not(target_arch = "wasm32"))]
impl state_fair_bingo::CardPrinter for LogPrinter {
    fn print_card(&self, image_url: &str) -> state_fair_bingo::Result<()> {
        println!("print: {}", image_url);
        Ok(())
    }
}

/// Resolve a handful of cards for every deployment
#[cfg(not(target_arch = "wasm32"))]
fn preview() -> state_fair_bingo::Result<()> {
    use state_fair_bingo::{BingoApp, BingoOptions, Capabilities, Deployment, PathResolver};

    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Reading options from {}", path);
            let json = std::fs::read_to_string(&path)?;
            BingoOptions::from_json(&json)?
        }
        None => BingoOptions::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    for deployment in [Deployment::Local, Deployment::Build, Deployment::Deploy] {
        let resolver =
            PathResolver::from_options(&options, deployment, Capabilities::default());
        let mut app = BingoApp::new(options.clone(), resolver, Box::new(LogPrinter), seed)?;

        println!("[{}]", deployment.as_str());
        for href in app.resolver().stylesheets(None) {
            println!("  css: {}", href);
        }
        println!("  card: {}", app.current_image_url());
        if let Some(url) = app.refresh() {
            println!("  card: {}", url);
        }
        app.print()?;
    }
    Ok(())
}
