//! Dongle status display simulator for Windows/Desktop.
//!
//! Runs the status pipeline against a fake keyboard and shows the frame in an
//! `embedded-graphics-simulator` window. See [`keyboard`] for the key map.
//! Set `RUST_LOG=debug` to trace events.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod keyboard;
mod timing;

use std::thread;
use std::time::Instant;

use dongle_common::{Canvas, DisplayConfig, StatusDisplay, SurfaceId, build_screen};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::keyboard::SimKeyboard;
use crate::timing::FRAME_TIME;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DisplayConfig::DEFAULT;
    let mut keyboard = SimKeyboard::new();
    let mut status = StatusDisplay::new(config);
    status.init();

    let screen = match build_screen(&mut status, SurfaceId(0), &keyboard) {
        Ok(screen) => screen,
        Err(err) => {
            log::error!("cannot build status screen: {err}");
            return;
        }
    };

    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(config.frame_size());
    let output_settings = OutputSettingsBuilder::new()
        .scale(3)
        .theme(BinaryColorTheme::OledBlue)
        .build();
    let mut window = Window::new("Dongle Status Sim", &output_settings);

    if let Some(frame) = screen.frame(&status) {
        present(&mut display, frame);
    }

    loop {
        let frame_start = Instant::now();
        window.update(&display);

        let mut dirty = false;
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    for event in keyboard.press(keycode) {
                        let redrawn = status.dispatch(&event, &keyboard);
                        log::debug!("{:?} redrew {:?}", event.kind(), redrawn.as_slice());
                        dirty |= redrawn.contains(&screen.surface());
                    }
                }
                _ => {}
            }
        }

        if dirty && let Some(frame) = screen.frame(&status) {
            present(&mut display, frame);
        }

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

fn present(
    display: &mut SimulatorDisplay<BinaryColor>,
    frame: &Canvas,
) {
    display.draw_iter(frame.pixels()).ok();
}
