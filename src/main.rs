//! Festive Canvas entry point
//!
//! On the web this wires both canvases, pointer input, the control buttons and
//! the animation-frame loop. Natively it runs a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use festive_canvas::audio::AudioManager;
    use festive_canvas::renderer::DrawContext;
    use festive_canvas::renderer::canvas::CanvasSurface;
    use festive_canvas::sim::{CatchGame, FireworkColor, FireworksShow, SimEvent};
    use festive_canvas::{FrameLoop, Settings, Simulation};

    const SKY_CANVAS: &str = "fireworksCanvas";
    const ARENA_CANVAS: &str = "redPacketCanvas";

    /// Everything the page owns, shared with event handlers
    struct App {
        show: FireworksShow,
        game: CatchGame,
        sky: CanvasSurface,
        arena: CanvasSurface,
        audio: AudioManager,
        settings: Settings,
        frame_loop: FrameLoop,
        /// An animation frame callback is scheduled
        frame_pending: bool,
    }

    impl App {
        fn resize(&mut self) {
            let sky = self.sky.fit_to_client();
            self.show.resize(sky.x, sky.y);
            let arena = self.arena.fit_to_client();
            self.game.resize(arena.x, arena.y);
        }

        fn route_events(&mut self) {
            let events = self.show.drain_events();
            self.audio.handle_events(&events);

            let events = self.game.drain_events();
            self.audio.handle_events(&events);
            for event in events {
                match event {
                    SimEvent::ScoreChanged { score, lives } => update_score_display(score, lives),
                    SimEvent::GameOver { score } => log::info!("Final score: {}", score),
                    SimEvent::Sound(_) => {}
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", id)))
    }

    fn update_score_display(score: u64, lives: u8) {
        let Some(document) = document() else { return };
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("lives") {
            el.set_text_content(Some(&lives.to_string()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Festive Canvas starting...");

        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let sky = CanvasSurface::new(canvas_by_id(&document, SKY_CANVAS)?)?;
        let arena = CanvasSurface::new(canvas_by_id(&document, ARENA_CANVAS)?)?;

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        log::info!("Seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            show: FireworksShow::new(seed, 0.0, 0.0),
            game: CatchGame::new(seed.wrapping_add(1), 0.0, 0.0),
            sky,
            arena,
            audio: AudioManager::from_settings(&settings),
            settings,
            frame_loop: FrameLoop::new(),
            frame_pending: true,
        }));
        app.borrow_mut().resize();
        {
            let app = app.borrow();
            update_score_display(app.game.session.score, app.game.session.lives);
        }

        setup_resize(app.clone());
        setup_pointer(app.clone());
        setup_buttons(&document, app.clone());

        request_animation_frame(app);
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(app: Rc<RefCell<App>>) {
        // Click the sky to launch a random firework there
        {
            let app_ref = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app_ref.borrow_mut();
                app.audio.resume();
                let at = app.sky.local_point(event.client_x(), event.client_y());
                app.show.launch_random_firework(at.x, at.y);
            });
            let _ = app
                .borrow()
                .sky
                .canvas()
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Paddle follows the pointer
        {
            let app_ref = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app_ref.borrow_mut();
                let at = app.arena.local_point(event.client_x(), event.client_y());
                app.game.move_paddle(at.x);
            });
            let _ = app
                .borrow()
                .arena
                .canvas()
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Attach a click handler to `#id` if the page has it
    fn on_click(document: &Document, id: &str, app: Rc<RefCell<App>>, action: impl Fn(&mut App) + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::debug!("No #{} button on page", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut app = app.borrow_mut();
            app.audio.resume();
            action(&mut app);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        for (id, name) in [
            ("launchRed", "red"),
            ("launchGold", "gold"),
            ("launchOrange", "orange"),
            ("launchPink", "pink"),
            ("launchBlue", "blue"),
        ] {
            let color = FireworkColor::from_name(name);
            on_click(document, id, app.clone(), move |app| app.show.launch_from_ground(color));
        }
        on_click(document, "launchSalvo", app.clone(), |app| app.show.launch_salvo());
        on_click(document, "clearFireworks", app.clone(), |app| app.show.clear_fireworks());

        on_click(document, "startGame", app.clone(), |app| app.game.start());
        on_click(document, "pauseGame", app.clone(), |app| app.game.pause());
        on_click(document, "resetGame", app.clone(), |app| app.game.restart());

        on_click(document, "toggleMute", app.clone(), |app| {
            app.settings.muted = !app.settings.muted;
            app.audio.set_muted(app.settings.muted);
            app.settings.save();
        });

        // Stop/resume the whole animation. Once the loop has wound down it
        // has to be re-armed.
        let app_ref = app.clone();
        on_click(document, "toggleAnimation", app, move |app| {
            let handle = app.frame_loop.handle();
            if handle.is_running() {
                handle.stop();
                log::info!("Animation stopped");
            } else {
                handle.resume();
                log::info!("Animation resumed");
                if !app.frame_pending {
                    app.frame_pending = true;
                    request_animation_frame(app_ref.clone());
                }
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            animation_frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut guard = app.borrow_mut();
            guard.frame_pending = false;
            let App {
                show,
                game,
                sky,
                arena,
                settings,
                frame_loop,
                ..
            } = &mut *guard;

            let stepped = frame_loop.frame(time, |info| {
                let ctx = DrawContext::new(info.time_ms, settings);
                show.step(sky, &ctx);
                game.step(arena, &ctx);
            });
            if stepped {
                guard.route_events();
                guard.frame_pending = true;
            }
            stepped
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Festive Canvas (native) starting...");
    log::info!("Browser build wires the canvases - run with `trunk serve` for the web version");

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(headless::DEFAULT_FRAMES);
    headless::run(frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use festive_canvas::audio::AudioManager;
    use festive_canvas::renderer::DrawContext;
    use festive_canvas::renderer::mesh::MeshSurface;
    use festive_canvas::sim::{CatchGame, FireworksShow, ItemKind, SimEvent};
    use festive_canvas::{FixedClock, FrameLoop, Settings, Simulation};

    pub const DEFAULT_FRAMES: u64 = 600;
    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    /// Run both simulations on a fake clock, with the paddle chasing the
    /// nearest collectible
    pub fn run(frames: u64) {
        let settings = Settings::load();
        let seed = settings.seed_or(2024);

        let mut show = FireworksShow::new(seed, WIDTH, HEIGHT);
        show.launch_salvo();
        let mut game = CatchGame::new(seed, WIDTH, HEIGHT);
        game.start();

        let mut audio = AudioManager::from_settings(&settings);
        let mut mesh = MeshSurface::new();
        let mut peak_triangles = 0;
        let mut peak_particles = 0;
        let mut final_score = None;

        let mut frame_loop = FrameLoop::new();
        let handle = frame_loop.handle();
        let mut clock = FixedClock::new().limited(frames);

        frame_loop.run(&mut clock, |info| {
            // Lowest collectible on screen
            let target = game
                .falling_items()
                .filter(|(kind, _)| *kind == ItemKind::Collectible)
                .max_by(|(_, a), (_, b)| a.pos.y.total_cmp(&b.pos.y))
                .map(|(_, item)| item.pos.x);
            if let Some(x) = target {
                game.move_paddle(x);
            }

            mesh.clear();
            let ctx = DrawContext::new(info.time_ms, &settings);
            show.step(&mut mesh, &ctx);
            game.step(&mut mesh, &ctx);
            peak_triangles = peak_triangles.max(mesh.triangle_count());
            peak_particles = peak_particles.max(show.particle_count());

            audio.handle_events(&show.drain_events());
            let events = game.drain_events();
            audio.handle_events(&events);
            for event in events {
                if let SimEvent::GameOver { score } = event {
                    final_score = Some(score);
                    handle.stop();
                }
            }
        });

        log::info!(
            "Ran {} frames: peak {} particles, peak {} triangles, {} sounds",
            frame_loop.frames(),
            peak_particles,
            peak_triangles,
            audio.played()
        );
        match final_score {
            Some(score) => log::info!("Catch game over with score {}", score),
            None => log::info!(
                "Catch game still running: score {}, lives {}",
                game.session.score,
                game.session.lives
            ),
        }
    }
}
