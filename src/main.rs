//! Hill Climb entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use hill_climb::persistence::LocalStorageStore;
    use hill_climb::platform::InputAction;
    use hill_climb::renderer::{Viewport, build_frame, css_color};
    use hill_climb::sim::GamePhase;
    use hill_climb::{Game, HudState, Tuning};

    /// Browser host: the game plus everything needed to show it
    struct App {
        game: Game<LocalStorageStore>,
        ctx: CanvasRenderingContext2d,
        document: Document,
        viewport: Viewport,
        /// Pending requestAnimationFrame handle
        raf_handle: Option<i32>,
    }

    type Shared = Rc<RefCell<App>>;

    impl App {
        /// Fill every triangle of the current frame
        fn draw(&self) {
            let mesh = build_frame(&self.game.snapshot(), &self.viewport);
            let ctx = &self.ctx;
            ctx.clear_rect(
                0.0,
                0.0,
                self.viewport.width as f64,
                self.viewport.height as f64,
            );

            let mut current = None;
            for tri in mesh.triangles() {
                if current != Some(tri[0].color) {
                    ctx.set_fill_style_str(&css_color(tri[0].color));
                    current = Some(tri[0].color);
                }
                ctx.begin_path();
                ctx.move_to(tri[0].position[0] as f64, tri[0].position[1] as f64);
                ctx.line_to(tri[1].position[0] as f64, tri[1].position[1] as f64);
                ctx.line_to(tri[2].position[0] as f64, tri[2].position[1] as f64);
                ctx.close_path();
                ctx.fill();
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements and phase overlays in the DOM
        fn update_hud(&self, hud: &HudState) {
            self.set_text("hud-distance", &format!("{} m", hud.distance));
            self.set_text("hud-speed", &format!("{} km/h", hud.speed));
            self.set_text("hud-fuel", &format!("{}%", hud.fuel_pct));
            self.set_text("hud-rpm", &format!("{}%", hud.rpm_pct));
            self.set_text("hud-boost", &format!("{}%", hud.boost_pct));
            self.set_text("hud-coins", &hud.coins.to_string());
            self.set_text("hud-best", &format!("{} m", hud.best_record));
            self.set_visible("new-record", hud.new_record);

            self.set_visible("start-screen", hud.phase == GamePhase::Start);
            self.set_visible("pause-menu", hud.paused);
            self.set_visible("game-over", hud.phase == GamePhase::GameOver);
            self.set_visible("finished", hud.phase == GamePhase::Finished);
            if hud.phase.is_terminal() {
                self.set_text("final-distance", &format!("{} m", hud.distance));
                self.set_text("final-coins", &hud.coins.to_string());
            }
        }

        /// Drop the queued callback when the game stopped its loop
        fn cancel_if_stopped(&mut self) {
            if self.game.is_running() {
                return;
            }
            if let Some(handle) = self.raf_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }
    }

    /// Queue one frame for `epoch`
    fn schedule(app: Shared, epoch: u64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(old) = app.borrow_mut().raf_handle.take() {
            let _ = window.cancel_animation_frame(old);
        }
        let app_cb = app.clone();
        let closure = Closure::once(move |time: f64| game_loop(app_cb, epoch, time));
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => app.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(app: Shared, epoch: u64, time: f64) {
        let next = {
            let mut a = app.borrow_mut();
            a.raf_handle = None;
            let result = a.game.frame(epoch, time);
            for event in &result.events {
                log::debug!("{:?}", event);
            }
            a.draw();
            if let Some(hud) = &result.hud {
                a.update_hud(hud);
            }
            result.continue_loop.then(|| a.game.loop_epoch())
        };
        if let Some(epoch) = next {
            schedule(app, epoch);
        }
    }

    /// Re-render and re-publish after an action taken outside the loop
    fn after_action(app: &Shared, armed: Option<u64>) {
        {
            let mut a = app.borrow_mut();
            a.cancel_if_stopped();
            a.draw();
            let hud = a.game.hud();
            a.update_hud(&hud);
        }
        if let Some(epoch) = armed {
            schedule(app.clone(), epoch);
        }
    }

    fn setup_keyboard(app: &Shared) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let code = event.code();
                let (armed, changed) = {
                    let mut a = app.borrow_mut();
                    if !a.game.handles_key(&code) {
                        return;
                    }
                    let before = a.game.phase();
                    let armed = a.game.press_key(&code);
                    (armed, a.game.phase() != before)
                };
                event.prevent_default();
                // Pedal presses are picked up by the next frame
                if armed.is_some() || changed {
                    after_action(&app, armed);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.release_key(&event.code()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// On-screen pedals and buttons (touch devices)
    fn setup_buttons(app: &Shared, document: &Document) -> Result<(), JsValue> {
        for (id, action) in [("gas-btn", InputAction::Gas), ("brake-btn", InputAction::Brake)] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (event_name, down) in [
                ("pointerdown", true),
                ("pointerup", false),
                ("pointerleave", false),
            ] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let mut a = app.borrow_mut();
                    if down {
                        a.game.press(action);
                    } else {
                        a.game.release(action);
                    }
                });
                btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        for (id, action) in [
            ("start-btn", InputAction::Start),
            ("retry-btn", InputAction::Start),
            ("pause-btn", InputAction::Pause),
            ("resume-btn", InputAction::Pause),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let armed = app.borrow_mut().game.press(action);
                after_action(&app, armed);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("new-track-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let seed = js_sys::Date::now() as u64;
                app.borrow_mut().game.new_track(seed);
                after_action(&app, None);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Auto-pause on tab switch, window blur and navigation
    fn setup_auto_pause(app: &Shared, document: &Document) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.suspend("tab hidden");
                    after_action(&app, None);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.suspend("window blur");
                after_action(&app, None);
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Navigating away
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.game.leave();
                a.cancel_if_stopped();
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Hill Climb starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let mut tuning = Tuning::default();
        tuning.viewport_width = width as f32;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning, LocalStorageStore);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            ctx,
            document: document.clone(),
            viewport: Viewport::new(width as f32, height as f32),
            raf_handle: None,
        }));

        setup_keyboard(&app)?;
        setup_buttons(&app, &document)?;
        setup_auto_pause(&app, &document)?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Title screen; the loop is armed by the first start action
        after_action(&app, None);

        log::info!("Hill Climb running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use hill_climb::persistence::JsonFileStore;
    use hill_climb::platform::InputAction;
    use hill_climb::{Game, Tuning};

    /// Simulated display rate for the autopilot
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: usize = 60 * 60 * 10;

    pub struct Args {
        pub seed: u64,
        pub tuning: Option<PathBuf>,
        pub records: PathBuf,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Self {
                seed: 1,
                tuning: None,
                records: PathBuf::from("hill_climb_records.json"),
            };
            while let Some(arg) = args.next() {
                let mut value = || args.next().ok_or(format!("{arg} needs a value"));
                match arg.as_str() {
                    "--seed" => {
                        let raw = value()?;
                        parsed.seed = raw.parse().map_err(|_| format!("invalid seed: {raw}"))?;
                    }
                    "--tuning" => parsed.tuning = Some(PathBuf::from(value()?)),
                    "--records" => parsed.records = PathBuf::from(value()?),
                    other => return Err(format!("unknown argument: {other}")),
                }
            }
            Ok(parsed)
        }
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let tuning = Tuning::from_json(&raw)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Hold the gas from the start line until the run ends
    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        let store = JsonFileStore::open(&args.records);
        let mut game = Game::new(args.seed, tuning, store);
        log::info!(
            "Headless run: seed={}, best so far {} m",
            args.seed,
            game.best_record()
        );

        let mut epoch = game.start().ok_or("run did not start")?;
        game.press(InputAction::Gas);

        let mut now = 0.0;
        for _ in 0..MAX_FRAMES {
            let result = game.frame(epoch, now);
            for event in &result.events {
                log::debug!("{:?}", event);
            }
            if !result.continue_loop {
                break;
            }
            epoch = game.loop_epoch();
            now += FRAME_MS;
        }

        let hud = game.hud();
        log::info!(
            "Run ended in {:?} at {} m ({} coins)",
            hud.phase,
            hud.distance,
            hud.coins
        );
        println!("{}", serde_json::to_string_pretty(&hud)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Hill Climb (native headless) starting...");

    let args = match headless::Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: hill-climb [--seed N] [--tuning path.json] [--records path.json]");
            return std::process::ExitCode::from(2);
        }
    };
    match headless::run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
