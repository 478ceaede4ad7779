//! Hoop Toss entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
        MouseEvent, Request, RequestInit, RequestMode, Response, TouchEvent,
    };

    use hoop_toss::coach::{self, CoachGate, CoachPrompt};
    use hoop_toss::consts::{COACH_BUBBLE_MS, TOAST_MS};
    use hoop_toss::renderer::{RenderState, build_scene};
    use hoop_toss::sim::{Command, CommandQueue, GameEvent, GameState, Viewport, tick};
    use hoop_toss::{BALL_THEMES, CoachSettings, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        commands: CommandQueue,
        render_state: Option<RenderState>,
        coach: CoachSettings,
    }

    impl Game {
        fn new(viewport: Viewport, settings: &Settings) -> Self {
            Self {
                state: GameState::new(viewport, settings),
                commands: CommandQueue::new(),
                render_state: None,
                coach: settings.coach.clone(),
            }
        }

        /// Run one frame of simulation and hand back what happened
        fn update(&mut self) -> Vec<GameEvent> {
            tick(&mut self.state, &mut self.commands);
            self.state.drain_events()
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(id: &str) -> Option<T> {
        document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        let _ = el.style().set_property(property, value);
    }

    /// Run `f` once after `ms` milliseconds
    fn after(ms: i32, f: impl FnOnce() + 'static) {
        if let Some(window) = web_sys::window() {
            let cb = Closure::once_into_js(f);
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
        }
    }

    /// Flash a short message in the centre of the screen
    fn show_toast(text: &str) {
        let Some(toast) = element::<HtmlElement>("toast") else {
            return;
        };
        toast.set_inner_text(text);
        set_style(&toast, "opacity", "1");
        set_style(&toast, "transform", "translate(-50%, -50%) scale(1.1)");
        after(TOAST_MS, move || {
            set_style(&toast, "opacity", "0");
            set_style(&toast, "transform", "translate(-50%, -50%) scale(1)");
        });
    }

    fn show_coach_bubble(text: &str) {
        let Some(bubble) = element::<HtmlElement>("ai-bubble") else {
            return;
        };
        bubble.set_inner_text(text);
        set_style(&bubble, "opacity", "1");
        after(COACH_BUBBLE_MS, move || set_style(&bubble, "opacity", "0"));
    }

    /// Reflect simulation events in the DOM
    fn apply_events(state: &GameState, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Scored { score } => {
                    set_text("score-val", &score.to_string());
                    show_toast("SWISH!");
                }
                GameEvent::Missed { misses } => set_text("miss-val", &misses.to_string()),
                GameEvent::Restarted => {
                    set_text("score-val", &state.score.to_string());
                    set_text("miss-val", &state.misses.to_string());
                    show_toast("RESTARTED");
                }
                GameEvent::SkinChanged { .. } => populate_ball_grid(state.skin, None),
                GameEvent::Launched { .. } => {}
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Hoop Toss starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(canvas) = element::<HtmlCanvasElement>("gameCanvas") else {
            log::error!("No #gameCanvas element");
            return;
        };

        let settings = load_settings();
        let (logical, physical) = fit_canvas(&window, &canvas);
        let game = Rc::new(RefCell::new(Game::new(
            Viewport::new(logical.0, logical.1),
            &settings,
        )));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, physical.0, physical.1, logical).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        populate_ball_grid(game.borrow().state.skin, Some(game.clone()));
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hoop Toss running!");
    }

    /// Settings JSON from an optional `<script id="game-settings">` element
    fn load_settings() -> Settings {
        match document().and_then(|d| d.get_element_by_id("game-settings")) {
            Some(el) => Settings::from_json_or_default(&el.text_content().unwrap_or_default()),
            None => {
                log::info!("Using default settings");
                Settings::default()
            }
        }
    }

    /// Size the canvas to the window. Returns (logical, physical) size.
    fn fit_canvas(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
    ) -> ((f32, f32), (u32, u32)) {
        let dpr = window.device_pixel_ratio();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        let physical = ((w * dpr) as u32, (h * dpr) as u32);
        canvas.set_width(physical.0);
        canvas.set_height(physical.1);
        ((w as f32, h as f32), physical)
    }

    fn push(game: &Rc<RefCell<Game>>, command: Command) {
        game.borrow_mut().commands.push(command);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse down on the canvas starts a drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                push(&game, Command::PointerDown(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move and release are tracked on the window so drags can leave the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                push(&game, Command::PointerMove(pos));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                push(&game, Command::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start must not scroll the page
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    push(&game, Command::PointerDown(pos));
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    push(&game, Command::PointerMove(pos));
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                push(&game, Command::PointerUp);
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (logical, physical) = fit_canvas(&window, &canvas);
            let mut g = game.borrow_mut();
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(physical.0, physical.1, logical);
            }
            g.commands.push(Command::Resize {
                width: logical.0,
                height: logical.1,
            });
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_modal_visible(visible: bool) {
        if let Some(modal) = element::<HtmlElement>("modal-overlay") {
            set_style(&modal, "display", if visible { "flex" } else { "none" });
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("restart-btn", move |_| push(&game, Command::Restart));
        }

        {
            let game = game.clone();
            on_click("ball-select-btn", move |_| {
                set_modal_visible(true);
                push(&game, Command::SetModalOpen(true));
            });
        }

        {
            let game = game.clone();
            on_click("close-modal-btn", move |_| {
                set_modal_visible(false);
                push(&game, Command::SetModalOpen(false));
            });
        }

        let gate = CoachGate::new();
        on_click("ai-tip-btn", move |_| request_coach_tip(&game, &gate));
    }

    fn option_class(active: bool) -> &'static str {
        if active { "ball-option active" } else { "ball-option" }
    }

    /// Fill the skin picker. Handlers are attached only when `game` is given;
    /// later calls just refresh the highlighted option.
    fn populate_ball_grid(active: usize, game: Option<Rc<RefCell<Game>>>) {
        let Some(document) = document() else {
            return;
        };
        let Some(grid) = document.get_element_by_id("ball-grid") else {
            return;
        };

        if game.is_none() {
            let options = grid.children();
            for i in 0..options.length() {
                if let Some(option) = options.item(i) {
                    option.set_class_name(option_class(i as usize == active));
                }
            }
            return;
        }

        grid.set_inner_html("");
        for (index, theme) in BALL_THEMES.iter().enumerate() {
            let Ok(option) = document.create_element("div") else {
                continue;
            };
            option.set_class_name(option_class(index == active));

            if let Ok(preview) = document.create_element("div") {
                preview.set_class_name("ball-preview");
                let _ = preview.set_attribute(
                    "style",
                    &format!(
                        "background: radial-gradient(circle at 30% 30%, {}, {})",
                        theme.primary, theme.secondary
                    ),
                );
                let _ = option.append_child(&preview);
            }
            if let Ok(name) = document.create_element("div") {
                name.set_class_name("ball-name");
                name.set_text_content(Some(theme.name));
                let _ = option.append_child(&name);
            }

            if let Some(game) = game.clone() {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    push(&game, Command::SelectSkin(index));
                });
                let _ = option
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            let _ = grid.append_child(&option);
        }
    }

    /// Restores the coach button when dropped, however the request ended
    struct ButtonRestore {
        button: HtmlButtonElement,
        label: String,
    }

    impl Drop for ButtonRestore {
        fn drop(&mut self) {
            self.button.set_inner_html(&self.label);
            self.button.set_disabled(false);
        }
    }

    fn request_coach_tip(game: &Rc<RefCell<Game>>, gate: &CoachGate) {
        let Some(ticket) = gate.try_begin() else {
            return;
        };
        let restore = element::<HtmlButtonElement>("ai-tip-btn").map(|button| {
            let label = button.inner_html();
            button.set_disabled(true);
            button.set_inner_html(coach::THINKING_LABEL);
            ButtonRestore { button, label }
        });

        let (prompt, settings) = {
            let g = game.borrow();
            (CoachPrompt::for_state(&g.state), g.coach.clone())
        };

        wasm_bindgen_futures::spawn_local(async move {
            let _restore = restore;
            let _ticket = ticket;
            let tip = if settings.enabled() {
                coach::tip_from_response(fetch_tip(&settings, &prompt).await)
            } else {
                coach::FALLBACK_TIP.to_string()
            };
            show_coach_bubble(&tip);
        });
    }

    fn js_err(value: JsValue) -> String {
        format!("{value:?}")
    }

    async fn fetch_tip(settings: &CoachSettings, prompt: &CoachPrompt) -> Result<String, String> {
        let window = web_sys::window().ok_or("no window")?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&prompt.request_body().to_string()));

        let request = Request::new_with_str_and_init(&settings.url(), &opts).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            return Err(format!("HTTP {}", response.status()));
        }

        let body = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        body.as_string().ok_or_else(|| "response body is not text".to_string())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let events = g.update();
            apply_events(&g.state, &events);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hoop Toss (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => hoop_toss::Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings {path}: {e}");
                hoop_toss::Settings::default()
            }
        },
        None => hoop_toss::Settings::default(),
    };

    headless::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted throws for a quick sanity run without a browser
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use hoop_toss::Settings;
    use hoop_toss::sim::{Command, CommandQueue, GameState, ResetKind, Viewport, tick};

    /// Give up on a throw that never lands
    const MAX_FRAMES_PER_THROW: u32 = 5_000;

    pub fn run(settings: &Settings) {
        let mut state = GameState::new(Viewport::new(1280.0, 720.0), settings);
        let mut queue = CommandQueue::new();

        // Sweep drag vectors up and to the right
        for dx in (60..=160).step_by(20) {
            for dy in (-180..=-80).step_by(20) {
                let drag = Vec2::new(dx as f32, dy as f32);
                let frames = throw(&mut state, &mut queue, drag);
                log::info!(
                    "drag ({:>4}, {:>5}) -> {} frames, score {} misses {}",
                    dx,
                    dy,
                    frames,
                    state.score,
                    state.misses
                );
            }
        }

        match state.snapshot() {
            Ok(json) => log::debug!("Final session: {json}"),
            Err(e) => log::warn!("Could not serialize session: {e}"),
        }
        println!("Final: {} scored, {} missed", state.score, state.misses);
    }

    /// Grab the ball, pull by `drag`, release, and run until it is racked again
    fn throw(state: &mut GameState, queue: &mut CommandQueue, drag: Vec2) -> u32 {
        let rack = state.ball.pos;
        queue.push(Command::PointerDown(rack));
        queue.push(Command::PointerMove(rack + drag));
        queue.push(Command::PointerUp);
        tick(state, queue);

        let mut frames = 1;
        while state.ball.is_flying() && frames < MAX_FRAMES_PER_THROW {
            tick(state, queue);
            frames += 1;
        }
        if state.ball.is_flying() {
            log::warn!("Throw never landed, racking the ball");
            state.reset_ball(ResetKind::Manual);
        }
        state.drain_events();
        frames
    }
}
