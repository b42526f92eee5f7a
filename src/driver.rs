//! Game-state driver
//!
//! A two-screen state machine: the title menu and the gameplay session.
//! Each screen owns its own frame loop against the frontend seams; screens
//! hand control back by returning the next screen. A `FrameClock` caps the
//! total frame count for headless runs and doubles as the frame-rate
//! heartbeat.

use crate::GameError;
use crate::platform::assets::{AssetStore, ModelHandle};
use crate::platform::input::{EdgeTracker, InputSource, button};
use crate::platform::present::{Color, Presenter};
use crate::sim::fixed::Vec3Fp;
use crate::sim::level::build_level;
use crate::sim::{Session, TickInput, advance_frame, fire_ball};
use crate::view::camera::compute_view;
use crate::view::placement::FramePlacer;

const WHITE: Color = [255, 255, 255];
const DIMMED: Color = [64, 64, 64];
const HIGHLIGHT: Color = [128, 128, 128];

const CONNECT_PROMPT: &str = "PLEASE CONNECT A CONTROLLER";
const MENU_ITEMS: [&str; 2] = ["Start Game", "Quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Gameplay,
    Quit,
}

/// The three external seams the driver runs against
pub struct Frontend<'a> {
    pub assets: &'a mut dyn AssetStore,
    pub input: &'a mut dyn InputSource,
    pub presenter: &'a mut dyn Presenter,
}

/// Frame counter with an optional cap; logs a heartbeat for frame-rate
/// diagnostics
pub struct FrameClock {
    frames: u64,
    budget: Option<u64>,
}

impl FrameClock {
    pub fn new(budget: Option<u64>) -> Self {
        Self { frames: 0, budget }
    }

    pub fn exhausted(&self) -> bool {
        self.budget.is_some_and(|cap| self.frames >= cap)
    }

    /// Account one frame; false once the budget is spent
    fn tick(&mut self) -> bool {
        if self.exhausted() {
            return false;
        }
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!("frame {}", self.frames);
        }
        true
    }
}

/// Run the state machine until quit or until the frame budget is spent
pub fn run(frontend: &mut Frontend, budget: Option<u64>) -> Result<(), GameError> {
    let mut clock = FrameClock::new(budget);
    let mut screen = Screen::Title;
    loop {
        screen = match screen {
            Screen::Title => title_screen(frontend, &mut clock)?,
            Screen::Gameplay => play_session(frontend, &mut clock)?,
            Screen::Quit => break,
        };
    }
    log::info!("shut down after {} frames", clock.frames);
    Ok(())
}

/// Pulsing text brightness, bouncing between near-black and near-white
struct Blink {
    value: u8,
    rising: bool,
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            value: 128,
            rising: true,
        }
    }
}

impl Blink {
    fn advance(&mut self) -> u8 {
        if self.rising {
            if self.value >= 253 {
                self.rising = false;
            } else {
                self.value += 2;
            }
        } else if self.value < 2 {
            self.rising = true;
        } else {
            self.value -= 2;
        }
        self.value
    }
}

fn title_screen(frontend: &mut Frontend, clock: &mut FrameClock) -> Result<Screen, GameError> {
    let title = frontend.assets.load_image("TITLE.TIM")?;
    let mut blink = Blink::default();
    let mut edges = EdgeTracker::default();
    let mut start_pressed = false;
    let mut selection = 0usize;

    while clock.tick() {
        let snap = frontend.input.poll();
        let pressed = edges.update(&snap);
        frontend.presenter.begin_frame();
        frontend.presenter.draw_sprite(title, 24, 0);

        if !snap.supported() {
            // Recoverable: hold here until a playable pad shows up
            frontend.presenter.draw_text(CONNECT_PROMPT, 72, 148, WHITE);
        } else if !start_pressed {
            let c = blink.advance();
            frontend.presenter.draw_text("PRESS START!", 110, 148, [c, c, c]);
            if pressed & button::START != 0 {
                start_pressed = true;
            }
        } else {
            if pressed & button::SELECT != 0 {
                start_pressed = false;
            } else {
                if pressed & button::DOWN != 0 {
                    selection = (selection + 1) % MENU_ITEMS.len();
                }
                if pressed & button::UP != 0 {
                    selection = (selection + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
                }
                if pressed & button::CROSS != 0 {
                    frontend.presenter.end_frame();
                    return Ok(if selection == 0 {
                        Screen::Gameplay
                    } else {
                        Screen::Quit
                    });
                }
            }
            for (i, item) in MENU_ITEMS.iter().enumerate() {
                let color = if selection == i { HIGHLIGHT } else { DIMMED };
                frontend
                    .presenter
                    .draw_text(item, 110, 120 + i as i32 * 16, color);
            }
        }

        frontend.presenter.end_frame();
    }
    Ok(Screen::Quit)
}

struct SceneModels {
    level: ModelHandle,
    paddle: ModelHandle,
    ball: ModelHandle,
    block: ModelHandle,
}

fn play_session(frontend: &mut Frontend, clock: &mut FrameClock) -> Result<Screen, GameError> {
    // All assets load up front; a miss is fatal before the loop starts
    let models = SceneModels {
        level: frontend.assets.load_model("LEVEL.TMD")?,
        paddle: frontend.assets.load_model("PADDLE.TMD")?,
        ball: frontend.assets.load_model("BALL.TMD")?,
        block: frontend.assets.load_model("BLOCK.TMD")?,
    };
    let _wood = frontend.assets.load_image("WOOD.TIM")?;
    let _border = frontend.assets.load_image("BORDER.TIM")?;

    let mut session = Session::new();
    let level = session.level;
    build_level(&mut session, level)?;
    let mut edges = EdgeTracker::default();
    let mut paused = false;

    while clock.tick() {
        let snap = frontend.input.poll();
        let pressed = edges.update(&snap);
        frontend.presenter.begin_frame();

        if !snap.supported() {
            frontend.presenter.draw_text(CONNECT_PROMPT, 72, 120, WHITE);
            frontend.presenter.end_frame();
            continue;
        }

        if pressed & button::SELECT != 0 {
            frontend.presenter.end_frame();
            if let Ok(json) = serde_json::to_string(&session) {
                log::debug!("session at quit: {json}");
            }
            return Ok(Screen::Title);
        }
        if pressed & button::START != 0 {
            paused = !paused;
        }

        if !paused && session.lives > 0 {
            if pressed & button::CROSS != 0 {
                fire_ball(&mut session);
            }
            let input = TickInput {
                left: snap.pressed(button::LEFT),
                right: snap.pressed(button::RIGHT),
                stick_x: snap.stick_x(),
            };
            let level_before = session.level;
            advance_frame(&mut session, &input);
            if session.level != level_before {
                let level = session.level;
                build_level(&mut session, level)?;
            }
        }

        let view = compute_view(&session.paddle, &session.balls);
        let mut placer = FramePlacer::new(view);
        placer.place(session.paddle.pos, session.paddle.rot, models.paddle);
        for block in session.blocks.iter().filter(|b| b.alive()) {
            placer.place(block.pos, Vec3Fp::ZERO, models.block);
        }
        for ball in session.balls.iter().filter(|b| b.enabled) {
            placer.place(ball.pos, Vec3Fp::ZERO, models.ball);
        }
        placer.place(Vec3Fp::ZERO, Vec3Fp::ZERO, models.level);
        placer.flush(frontend.presenter);

        frontend
            .presenter
            .draw_text(&format!("SCORE {:08}", session.score), 8, 8, WHITE);
        frontend
            .presenter
            .draw_text(&format!("LIVES {}", session.lives.max(0)), 8, 24, WHITE);
        frontend
            .presenter
            .draw_text(&format!("LEVEL {}", session.level + 1), 8, 40, WHITE);
        if paused {
            frontend.presenter.draw_text("PAUSE", 144, 112, WHITE);
        }
        if session.lives <= 0 {
            frontend.presenter.draw_text("GAME OVER", 128, 112, WHITE);
        }

        frontend.presenter.end_frame();
    }
    Ok(Screen::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::assets::NullAssets;
    use crate::platform::input::{ControllerClass, InputSnapshot};
    use crate::platform::present::NullPresenter;

    /// Replays a fixed snapshot sequence, then repeats the last one
    struct Script {
        steps: Vec<InputSnapshot>,
        at: usize,
    }

    impl Script {
        fn new(steps: Vec<InputSnapshot>) -> Self {
            Self { steps, at: 0 }
        }
    }

    impl InputSource for Script {
        fn poll(&mut self) -> InputSnapshot {
            let snap = self
                .steps
                .get(self.at)
                .or(self.steps.last())
                .copied()
                .unwrap_or_default();
            self.at += 1;
            snap
        }
    }

    fn held(buttons: u16) -> InputSnapshot {
        InputSnapshot {
            valid: true,
            class: ControllerClass::Digital,
            buttons,
            ..Default::default()
        }
    }

    fn idle() -> InputSnapshot {
        held(0)
    }

    #[test]
    fn title_leads_into_gameplay() {
        let mut assets = NullAssets::default();
        let mut input = Script::new(vec![idle(), held(button::START), idle(), held(button::CROSS)]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        run(&mut frontend, Some(30)).unwrap();
        assert!(assets.requested.iter().any(|n| n == "TITLE.TIM"));
        assert!(assets.requested.iter().any(|n| n == "PADDLE.TMD"));
        // The last rendered frames carry the gameplay HUD
        assert!(presenter.text.iter().any(|t| t.starts_with("SCORE")));
    }

    #[test]
    fn menu_quit_item_exits() {
        let mut assets = NullAssets::default();
        let mut input = Script::new(vec![
            held(button::START),
            idle(),
            held(button::DOWN),
            idle(),
            held(button::CROSS),
        ]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        run(&mut frontend, Some(100)).unwrap();
        // Quit fired well before the budget; no gameplay assets touched
        assert!(presenter.frames < 100);
        assert!(!assets.requested.iter().any(|n| n == "PADDLE.TMD"));
    }

    #[test]
    fn select_returns_gameplay_to_title() {
        let mut assets = NullAssets::default();
        let mut input = Script::new(vec![idle(), idle(), held(button::SELECT)]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        let mut clock = FrameClock::new(Some(20));
        let next = play_session(&mut frontend, &mut clock).unwrap();
        assert_eq!(next, Screen::Title);
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut assets = NullAssets::default();
        // Pause on frame 1, then hold steering input for the rest
        let mut steps = vec![held(button::START)];
        steps.extend(std::iter::repeat_n(held(button::RIGHT), 10));
        let mut input = Script::new(steps);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        let mut clock = FrameClock::new(Some(11));
        play_session(&mut frontend, &mut clock).unwrap();
        assert!(presenter.text.iter().any(|t| t == "PAUSE"));
        // Every frame still renders the full scene while paused
        assert!(!presenter.objects.is_empty());
    }

    #[test]
    fn unsupported_pad_shows_the_connect_prompt() {
        let mut assets = NullAssets::default();
        let mut input = Script::new(vec![InputSnapshot::default()]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        let mut clock = FrameClock::new(Some(5));
        play_session(&mut frontend, &mut clock).unwrap();
        assert!(presenter.text.iter().any(|t| t == CONNECT_PROMPT));
        // Nothing is simulated or placed without a pad
        assert!(presenter.objects.is_empty());
    }

    #[test]
    fn missing_asset_is_fatal() {
        struct Empty;
        impl AssetStore for Empty {
            fn load_model(&mut self, name: &str) -> Result<ModelHandle, GameError> {
                Err(GameError::AssetMissing {
                    name: name.to_owned(),
                })
            }
            fn load_image(
                &mut self,
                name: &str,
            ) -> Result<crate::platform::assets::ImageHandle, GameError> {
                Err(GameError::AssetMissing {
                    name: name.to_owned(),
                })
            }
        }
        let mut assets = Empty;
        let mut input = Script::new(vec![idle()]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        let err = run(&mut frontend, Some(10)).unwrap_err();
        assert!(matches!(err, GameError::AssetMissing { .. }));
    }

    #[test]
    fn clock_budget_terminates_the_loop() {
        let mut assets = NullAssets::default();
        let mut input = Script::new(vec![idle()]);
        let mut presenter = NullPresenter::default();
        let mut frontend = Frontend {
            assets: &mut assets,
            input: &mut input,
            presenter: &mut presenter,
        };
        run(&mut frontend, Some(7)).unwrap();
        assert_eq!(presenter.frames, 7);
    }
}
