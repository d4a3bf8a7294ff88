//! VCS Pong entry point
//!
//! Wasm glue: canvas setup, gamepad connect/disconnect plumbing and the
//! animation-frame loop that drives the round state machine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{GamepadButton, GamepadMappingType, HtmlCanvasElement};

    use vcs_pong::audio::{AudioManager, SoundEffect};
    use vcs_pong::consts::IDLE_POLL_MS;
    use vcs_pong::input::{ButtonState, ControllerRegistry, GamepadSnapshot, MappingKind};
    use vcs_pong::render::CanvasRenderer;
    use vcs_pong::sim::TickEvent;
    use vcs_pong::{Round, RoundPhase};

    /// Game instance holding all state
    struct Game {
        registry: ControllerRegistry,
        phase: RoundPhase,
        round: Option<Round>,
        rng: Pcg32,
        renderer: CanvasRenderer,
        audio: AudioManager,
        events: Vec<TickEvent>,
        /// Last time the start button was polled while idle
        last_poll: f64,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, seed: u64) -> Self {
            Self {
                registry: ControllerRegistry::new(),
                phase: RoundPhase::WaitingForStart,
                round: None,
                rng: Pcg32::seed_from_u64(seed),
                renderer: CanvasRenderer::new(canvas),
                audio: AudioManager::new(),
                events: Vec::new(),
                last_poll: 0.0,
            }
        }

        /// One animation frame
        fn frame(&mut self, time: f64) {
            match self.phase {
                RoundPhase::WaitingForStart => {
                    self.renderer.draw_start_screen();
                    // Busy-polling every frame is wasteful while idle;
                    // check the devices at a ~100ms cadence instead
                    if time - self.last_poll >= IDLE_POLL_MS {
                        self.last_poll = time;
                        if let Some(index) = self.poll_start_button(time) {
                            // Starting counts as the user gesture browsers
                            // want before audio may play
                            self.audio.resume();
                            self.round = Some(Round::new(index, &mut self.rng));
                            self.phase = RoundPhase::Playing;
                        }
                    }
                }
                RoundPhase::Playing => self.play_frame(time),
                RoundPhase::Finished => {
                    // Terminal state immediately re-arms the start screen
                    self.phase = RoundPhase::WaitingForStart;
                }
            }
        }

        fn play_frame(&mut self, time: f64) {
            let Some(round) = self.round.as_mut() else {
                self.phase = RoundPhase::WaitingForStart;
                return;
            };

            let controls = find_gamepad(round.controller())
                .map(|pad| snapshot_gamepad(&pad))
                .and_then(|snap| self.registry.read(&snap, time));

            match round.frame(time, controls.as_ref(), &mut self.rng, &mut self.events) {
                Ok(outcome) => {
                    for event in self.events.drain(..) {
                        self.audio.play(SoundEffect::for_event(event));
                    }
                    self.renderer.draw(round.state());
                    if outcome.is_some() {
                        self.round = None;
                        self.phase = RoundPhase::Finished;
                    }
                }
                Err(err) => {
                    log::warn!("{err}; abandoning round");
                    self.events.clear();
                    self.round = None;
                    self.phase = RoundPhase::WaitingForStart;
                }
            }
        }

        /// Look for the A button on any connected, classifiable device
        fn poll_start_button(&mut self, time: f64) -> Option<u32> {
            for index in self.registry.indices() {
                let Some(pad) = find_gamepad(index) else {
                    continue;
                };
                let snap = snapshot_gamepad(&pad);
                if let Some(state) = self.registry.read(&snap, time)
                    && state.buttons.a
                {
                    return Some(index);
                }
            }
            None
        }
    }

    /// Copy a live gamepad handle into a plain-data snapshot
    fn snapshot_gamepad(pad: &web_sys::Gamepad) -> GamepadSnapshot {
        let mapping = if pad.mapping() == GamepadMappingType::Standard {
            MappingKind::Standard
        } else {
            MappingKind::NonStandard
        };

        let buttons = pad
            .buttons()
            .iter()
            .map(|b| {
                let b: GamepadButton = b.unchecked_into();
                ButtonState {
                    pressed: b.pressed(),
                    value: b.value() as f32,
                }
            })
            .collect();

        let axes = pad
            .axes()
            .iter()
            .map(|a| a.as_f64().unwrap_or(0.0) as f32)
            .collect();

        GamepadSnapshot {
            index: pad.index(),
            id: pad.id(),
            mapping,
            buttons,
            axes,
        }
    }

    /// Find a live gamepad by connection index, `None` once it is gone
    fn find_gamepad(index: u32) -> Option<web_sys::Gamepad> {
        let pads = web_sys::window()?.navigator().get_gamepads().ok()?;
        for pad in pads.iter() {
            if pad.is_null() {
                continue;
            }
            let pad: web_sys::Gamepad = pad.unchecked_into();
            if pad.index() == index && pad.connected() {
                return Some(pad);
            }
        }
        None
    }

    fn setup_gamepad_listeners(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    game.borrow_mut().registry.connect(pad.index());
                }
            });
            let _ = window.add_event_listener_with_callback(
                "gamepadconnected",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    game.borrow_mut().registry.disconnect(pad.index());
                }
            });
            let _ = window.add_event_listener_with_callback(
                "gamepaddisconnected",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("VCS Pong starting...");

        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pong")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(canvas, seed)));

        setup_gamepad_listeners(game.clone());
        request_animation_frame(game);

        log::info!("VCS Pong running (seed {seed})");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: play one round with an idle human at a fixed 60 Hz and
/// report the winner. The browser build is the real game.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use vcs_pong::Round;
    use vcs_pong::input::ControlState;

    env_logger::init();
    log::info!("VCS Pong (native) - running one headless round");

    let mut rng = Pcg32::seed_from_u64(std::time::UNIX_EPOCH.elapsed().map_or(0, |d| d.as_secs()));
    let mut round = Round::new(0, &mut rng);
    let mut events = Vec::new();
    let controls = ControlState::default();

    for frame in 0..500_000u64 {
        let now = frame as f64 * (1000.0 / 60.0);
        match round.frame(now, Some(&controls), &mut rng, &mut events) {
            Ok(Some(outcome)) => {
                println!(
                    "round over after {:.1}s: {} wins",
                    frame as f64 / 60.0,
                    outcome.winner.as_str()
                );
                return;
            }
            Ok(None) => events.clear(),
            Err(err) => {
                eprintln!("round aborted: {err}");
                return;
            }
        }
    }
    eprintln!("round did not finish within the frame budget");
}
