//! Helix landing entry point
//!
//! On the web: mounts the particle background and, on the verification page,
//! the verification form. Natively: runs a headless field preview and the
//! verification puzzle on stdin.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use helix_landing::Settings;
    use helix_landing::platform::{self, web};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Helix landing starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(platform::entropy_seed);

        let mut field = document
            .get_element_by_id(web::ids::CANVAS)
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .and_then(|canvas| web::mount_field(&window, canvas, settings.field.clone(), seed));

        let mut gate = web::mount_gate(&window, &document, &settings.gate, platform::gate_seed(seed));

        if field.is_none() && gate.is_none() {
            log::info!("Nothing to mount on this page");
            return;
        }

        // Tear both down before the page goes away
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(field) = field.as_mut() {
                field.stop();
            }
            if let Some(gate) = gate.as_mut() {
                gate.stop();
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::time::Duration;

    use helix_landing::field::FieldAnimator;
    use helix_landing::gate::{Gate, GateView, Navigator, Verdict, sanitize_answer};
    use helix_landing::platform;
    use helix_landing::renderer::RecordingSurface;
    use helix_landing::{GateError, Settings};

    /// Frames simulated for the preview (ten seconds at 60 Hz)
    const PREVIEW_FRAMES: usize = 600;
    const PREVIEW_VIEWPORT: (u32, u32) = (1280, 720);

    /// Prints the destination instead of navigating
    struct StdoutNavigator;

    impl Navigator for StdoutNavigator {
        fn navigate(&mut self, target: &str) {
            println!("Verified. Continuing to {target}");
        }
    }

    /// Run the field headlessly and report what it would draw
    pub fn preview_field(settings: &Settings, seed: u64) {
        let surface = RecordingSurface::default();
        let mut animator =
            match FieldAnimator::start(surface, PREVIEW_VIEWPORT, settings.field.clone(), seed) {
                Ok(animator) => animator,
                Err(e) => {
                    log::error!("Field preview failed: {}", e);
                    return;
                }
            };

        let mut total_links = 0;
        let mut peak_links = 0;
        for _ in 0..PREVIEW_FRAMES {
            animator.frame();
            let links = animator.surface().line_count();
            total_links += links;
            peak_links = peak_links.max(links);
            // Keep one frame of commands at a time
            animator.surface_mut().clear();
        }
        animator.stop();

        println!(
            "Field preview: {} particles, {} frames, {:.1} links/frame (peak {})",
            animator.field().len(),
            PREVIEW_FRAMES,
            total_links as f64 / PREVIEW_FRAMES as f64,
            peak_links
        );
    }

    /// Interactive verification on stdin
    pub fn run_gate(settings: &Settings, seed: u64) -> io::Result<()> {
        let redirect = std::env::var("LANDING_REDIRECT").ok();
        let mut gate = match Gate::new(&settings.gate, redirect.as_deref(), platform::gate_seed(seed)) {
            Ok(gate) => gate,
            Err(e) => {
                log::error!("Verification gate disabled: {}", e);
                return Ok(());
            }
        };
        let mut navigator = StdoutNavigator;
        let delay = Duration::from_millis(settings.gate.verify_delay_ms as u64);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut line = String::new();

        loop {
            let view = GateView::from(&gate);
            println!("{}    ({})", view.challenge, view.attempts);
            print!("> ");
            stdout.flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(());
            }
            gate.set_answer(&sanitize_answer(&line));

            let pending = match gate.begin_submit() {
                Ok(pending) => pending,
                Err(GateError::EmptyAnswer) => continue,
                Err(e) => {
                    println!("{e}");
                    return Ok(());
                }
            };

            println!("Verifying...");
            std::thread::sleep(delay);

            let verdict = gate.finish_submit(pending);
            if let Some(message) = gate.message() {
                println!("{}", message.text());
            }
            match verdict {
                Verdict::Passed { target } => {
                    navigator.navigate(&target);
                    return Ok(());
                }
                Verdict::Retry { .. } => {}
                Verdict::Locked => return Ok(()),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use helix_landing::{Settings, platform};

    env_logger::init();
    log::info!("Helix landing (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_file(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::load(),
    };
    let seed = settings.seed.unwrap_or_else(platform::entropy_seed);
    log::info!("Session seed: {}", seed);

    native::preview_field(&settings, seed);

    if let Err(e) = native::run_gate(&settings, seed) {
        log::error!("Verification aborted: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
