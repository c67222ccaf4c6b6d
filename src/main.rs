//! Sky Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use sky_hop::input::{ControlScheme, DeviceClass};
    use sky_hop::renderer::{RenderState, build_scene};
    use sky_hop::settings::Settings;
    use sky_hop::sim::{GamePhase, TickEvents, TickInput, World, tick};

    /// Game instance holding all state
    struct Game {
        world: World,
        scheme: ControlScheme,
        settings: Settings,
        render_state: Option<RenderState>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(world: World, scheme: ControlScheme, settings: Settings) -> Self {
            Self {
                world,
                scheme,
                settings,
                render_state: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation frame from the current input state
        fn update(&mut self) -> TickEvents {
            let input = TickInput {
                steer: self.scheme.steer(),
            };
            tick(&mut self.world, &input)
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.world, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud") {
                let height = self.world.player.max_height.floor() as i64;
                el.set_text_content(Some(&format!("Height: {height}")));
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }

        /// Game over: report the final score, clear held input, reset
        fn finish_run(&mut self, final_score: u32) {
            log::info!("Game over with score {final_score}");

            // Deliberate synchronization point: the alert blocks until the
            // player dismisses it, then the world resets for the next run
            if let Some(window) = web_sys::window() {
                let _ = window
                    .alert_with_message(&format!("Game Over! Score: {final_score}"));
            }

            self.scheme.clear();
            self.world.acknowledge_game_over();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the drawing surface to the viewport once; no resize handling
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Device class decided once at load
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let device = DeviceClass::detect(&user_agent);
        log::info!("Device class: {device:?}");

        let seed = js_sys::Date::now() as u64;
        let world = World::new(client_w as f32, client_h as f32, device, seed);
        let scheme = ControlScheme::for_device(device);
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(world, scheme, settings)));

        log::info!("World initialized with seed: {seed}");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (client_w as f32, client_h as f32),
        )
        .await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(device, game.clone());
        setup_start_overlay(game.clone());
        setup_store_button();

        // Start the frame loop; ticks are no-ops until the overlay is
        // dismissed
        request_animation_frame(game);

        log::info!("Sky Hop running!");
    }

    fn setup_input_handlers(device: DeviceClass, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        match device {
            DeviceClass::Desktop => {
                // Keyboard press/release feed the held-key set
                {
                    let game = game.clone();
                    let closure =
                        Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                            let mut g = game.borrow_mut();
                            if let Some(keys) = g.scheme.keys_mut() {
                                keys.press(&event.key());
                            }
                        });
                    let _ = window.add_event_listener_with_callback(
                        "keydown",
                        closure.as_ref().unchecked_ref(),
                    );
                    closure.forget();
                }
                {
                    let game = game.clone();
                    let closure =
                        Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                            let mut g = game.borrow_mut();
                            if let Some(keys) = g.scheme.keys_mut() {
                                keys.release(&event.key());
                            }
                        });
                    let _ = window.add_event_listener_with_callback(
                        "keyup",
                        closure.as_ref().unchecked_ref(),
                    );
                    closure.forget();
                }
            }
            DeviceClass::Mobile => {
                // Device tilt supplies the continuous steer value
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(
                    move |event: web_sys::DeviceOrientationEvent| {
                        let mut g = game.borrow_mut();
                        if let Some(tilt) = g.scheme.tilt_mut() {
                            tilt.set_gamma(event.gamma().unwrap_or(0.0) as f32);
                        }
                    },
                );
                let _ = window.add_event_listener_with_callback(
                    "deviceorientation",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }

    fn setup_start_overlay(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(overlay) = document.get_element_by_id("start-screen") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.world.phase != GamePhase::NotStarted {
                    return;
                }

                let document = web_sys::window().unwrap().document().unwrap();
                if let Some(el) = document.get_element_by_id("start-screen") {
                    let _ = el.set_attribute("class", "hidden");
                }

                g.world.start();
                log::info!("Run started");
            });
            let _ =
                overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_store_button() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Placeholder only - there is no store
        if let Some(btn) = document.get_element_by_id("store-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message("Store coming soon!");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.track_fps(time);

            let events = g.update();
            if let Some(final_score) = events.game_over {
                g.finish_run(final_score);
            }

            g.render();
            g.update_hud();
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
    log::info!("Sky Hop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning simulation smoke check...");
    smoke_sim();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Deterministic headless run: fall onto the start platform, climb a while,
/// and make sure the pool invariants hold
#[cfg(not(target_arch = "wasm32"))]
fn smoke_sim() {
    use sky_hop::consts::{BOUNCE_VELOCITY, PLATFORM_COUNT};
    use sky_hop::input::DeviceClass;
    use sky_hop::sim::{TickInput, World, tick};

    let mut world = World::new(800.0, 600.0, DeviceClass::Desktop, 42);
    world.start();

    let mut landings = 0;
    let mut bounced = false;
    for _ in 0..600 {
        let events = tick(&mut world, &TickInput::default());
        if events.landings > 0 && !bounced {
            bounced = true;
            assert_eq!(world.player.vel.y, BOUNCE_VELOCITY);
        }
        landings += events.landings;
        if events.game_over.is_some() {
            world.acknowledge_game_over();
        }
        assert_eq!(world.platforms.len(), PLATFORM_COUNT);
    }

    assert!(landings > 0, "player never landed");
    println!("✓ Simulation smoke check passed ({landings} landings)");
}
