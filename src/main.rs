//! Bubble Hit entry point
//!
//! In the browser: WebGPU canvas, Hit/Reset buttons, keyboard shortcuts and
//! click-to-move, with ticks paced by `requestAnimationFrame`.
//! Natively: a headless run against a recording surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bubble_hit::renderer::RenderState;
    use bubble_hit::sim::TickHandle;
    use bubble_hit::{Command, FrameScheduler, Scene, SceneConfig, StartupError};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type WebScene = Scene<RenderState, RafScheduler>;

    /// Schedules ticks with `requestAnimationFrame`
    struct RafScheduler {
        callback: FrameCallback,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> Option<TickHandle> {
            let window = web_sys::window()?;
            let callback = self.callback.borrow();
            let closure = callback.as_ref()?;
            match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                Ok(id) => Some(TickHandle(id)),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }
    }

    fn element<T: JsCast>(document: &Document, id: &'static str) -> Result<T, StartupError> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<T>().ok())
            .ok_or(StartupError::MissingElement(id))
    }

    /// Hit button is disabled while the arrow is moving
    fn sync_controls(scene: &WebScene, hit_btn: &HtmlButtonElement) {
        hit_btn.set_disabled(scene.is_running());
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Bubble Hit starting...");

        match start().await {
            Ok(()) => log::info!("Bubble Hit running!"),
            Err(e) => log::error!("Startup failed: {e}"),
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(StartupError::MissingElement("document"))?;

        let canvas: HtmlCanvasElement = element(&document, "canvas")?;
        let hit_btn: HtmlButtonElement = element(&document, "hitBtn")?;
        let reset_btn: HtmlButtonElement = element(&document, "resetBtn")?;

        let width = canvas.width();
        let height = canvas.height();
        let config = SceneConfig::default();

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Gpu(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Gpu(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, config.background).await?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: callback.clone(),
        };
        let seed = js_sys::Date::now() as u64;
        let scene = Rc::new(RefCell::new(Scene::new(
            width,
            height,
            &config,
            seed,
            render_state,
            scheduler,
        )?));
        log::info!("Scene initialized with seed: {}", seed);

        // Tick callback
        {
            let scene = scene.clone();
            let hit_btn = hit_btn.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let mut scene = scene.borrow_mut();
                scene.on_frame();
                sync_controls(&scene, &hit_btn);
            }));
        }

        // Hit button
        {
            let scene = scene.clone();
            let hit = hit_btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut scene = scene.borrow_mut();
                scene.activate();
                sync_controls(&scene, &hit);
            });
            let _ = hit_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset button
        {
            let scene = scene.clone();
            let hit = hit_btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut scene = scene.borrow_mut();
                scene.reset();
                sync_controls(&scene, &hit);
            });
            let _ = reset_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Canvas click - move the disc to the pointer's height
        {
            let scene = scene.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                // CSS pixels to canvas pixels
                let scale = if rect.height() > 0.0 {
                    canvas_clone.height() as f64 / rect.height()
                } else {
                    1.0
                };
                let y = (event.client_y() as f64 - rect.top()) * scale;
                scene.borrow_mut().reposition_disc(y as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let scene = scene.clone();
            let hit = hit_btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if Command::from_key(&key) == Some(Command::Activate) {
                    event.prevent_default();
                }
                let mut scene = scene.borrow_mut();
                if scene.handle_key(&key) {
                    sync_controls(&scene, &hit);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        sync_controls(&scene.borrow(), &hit_btn);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_host::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bubble Hit (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the canvas version");

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use bubble_hit::renderer::RecordingSurface;
    use bubble_hit::{Command, ConfigError, ManualScheduler, Scene, SceneConfig, StartupError};

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;

    /// Play one straight run (hit) and one with the disc moved aside (miss)
    pub fn run(config_path: Option<String>) -> Result<(), StartupError> {
        let config = match config_path {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Read(format!("{path}: {e}")))?;
                log::info!("Loaded config from {}", path);
                SceneConfig::from_json(&json)?
            }
            None => SceneConfig::default(),
        };

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut scene = Scene::new(
            WIDTH,
            HEIGHT,
            &config,
            seed,
            RecordingSurface::new(),
            ManualScheduler::new(),
        )?;

        scene.apply(Command::Activate);
        let outcome = scene.run_until_idle();
        println!(
            "straight run: {:?}, arrow at x={}, disc {}",
            outcome,
            scene.state().arrow.pos.x,
            scene.state().disc.color
        );

        scene.apply(Command::Reset);
        scene.apply(Command::RepositionDisc(0.0));
        scene.apply(Command::Activate);
        let outcome = scene.run_until_idle();
        println!(
            "disc moved to y={}: {:?}, arrow at x={}",
            scene.state().disc.pos.y,
            outcome,
            scene.state().arrow.pos.x
        );

        println!(
            "{} frames drawn, {} ticks requested",
            scene.surface().frames(),
            scene.scheduler().requested()
        );
        Ok(())
    }
}
