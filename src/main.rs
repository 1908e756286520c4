// src/main.rs
//
// Lanceur de l’atelier algébrique.
// - natif : env_logger (RUST_LOG=debug pour suivre jetons / RPN / forme) + run_native
// - wasm32 : WebRunner sur <canvas id="the_canvas_id">
// Le noyau est dans la bibliothèque ; ce binaire ne fait que l’interface.

mod app;

use app::AppAlgebre;

const TITRE: &str = "Algèbre exacte";

type ErreurCreation = Box<dyn std::error::Error + Send + Sync>;

fn creer_app(_cc: &eframe::CreationContext<'_>) -> Result<Box<dyn eframe::App>, ErreurCreation> {
    Ok(Box::new(AppAlgebre::default()))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("lancement: {TITRE}");

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(TITRE)
        .with_inner_size([640.0, 720.0])
        .with_min_inner_size([480.0, 420.0]);

    eframe::run_native(
        TITRE,
        eframe::NativeOptions {
            viewport,
            ..Default::default()
        },
        Box::new(creer_app),
    )
}

// wasm32 : rien à faire ici, `web::start` est appelé au chargement du module
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::wasm_bindgen;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    const CANVAS: &str = "the_canvas_id";

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("pas de document"))?;
        document.set_title(super::TITRE);

        let canvas = document
            .get_element_by_id(CANVAS)
            .ok_or_else(|| JsValue::from_str("canvas absent"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("l’élément n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(canvas, eframe::WebOptions::default(), Box::new(super::creer_app))
            .await
    }
}
