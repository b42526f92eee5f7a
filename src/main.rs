//! Breakanoid entry point
//!
//! Runs the state machine headless against the null frontend with a
//! scripted pad, which exercises the whole stack without display hardware.

use breakanoid::driver::{Frontend, run};
use breakanoid::platform::assets::NullAssets;
use breakanoid::platform::input::{ControllerClass, InputSnapshot, InputSource, button};
use breakanoid::platform::present::NullPresenter;

/// Scripted pad for the headless demo: walks the title menu into a
/// session, steers back and forth, and fires a ball every few seconds.
struct DemoPad {
    frame: u64,
}

impl InputSource for DemoPad {
    fn poll(&mut self) -> InputSnapshot {
        let frame = self.frame;
        self.frame += 1;
        let buttons = match frame {
            0..10 => 0,
            10..12 => button::START,
            12..14 => 0,
            14..16 => button::CROSS,
            _ => {
                let mut held = if (frame / 120) % 2 == 0 {
                    button::RIGHT
                } else {
                    button::LEFT
                };
                if frame % 180 == 0 {
                    held |= button::CROSS;
                }
                held
            }
        };
        InputSnapshot {
            valid: true,
            class: ControllerClass::Digital,
            buttons,
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();

    let mut assets = NullAssets::default();
    let mut input = DemoPad { frame: 0 };
    let mut presenter = NullPresenter::default();
    let mut frontend = Frontend {
        assets: &mut assets,
        input: &mut input,
        presenter: &mut presenter,
    };

    // Roughly half a minute of frames at the display rate
    if let Err(err) = run(&mut frontend, Some(1800)) {
        log::error!("fatal: {err}");
        std::process::exit(1);
    }
    log::info!("demo complete: {} frames presented", presenter.frames);
}
