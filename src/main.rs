//! # Baby Tracker Application Entry Point
//!
//! This binary wires the core library to a desktop stand-in for the watch
//! host: persisted state lives in a JSON file, the phone link prints each
//! outbound event to stdout, and the three physical buttons become
//! one-letter console commands. The face is re-rendered in ASCII after
//! every input, mirroring the redraw-on-mutation contract of the device.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Result;
use chrono::Utc;
use std::io::{self, BufRead, Write};

use baby_watch_lib::app::{App, Button};
use baby_watch_lib::config::Config;
use baby_watch_lib::notify::{Notifier, OutboundEvent, SendError};
use baby_watch_lib::renderer::draw_ascii;
use baby_watch_lib::store::FilePersist;

/// Phone-link stand-in: prints the encoded event instead of queueing it on
/// a real outbound channel.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&mut self, event: &OutboundEvent) -> Result<(), SendError> {
        println!("-> phone: {}", event.encode());
        Ok(())
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}

fn print_help() {
    println!("commands: b=bottle  d=diaper  s=sleep toggle  t=tick  reset  q=quit");
}

/// Main application entry point.
fn main() -> Result<()> {
    let config = Config::load();
    let persist = FilePersist::open(&config.storage.state_path);
    let mut app = App::new(persist, ConsoleNotifier, config.clock.use_24h, now());

    print_help();
    draw_ascii(app.display());

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "b" | "bottle" => app.on_button(Button::Up, now()),
            "d" | "diaper" => app.on_button(Button::Select, now()),
            "s" | "sleep" => app.on_button(Button::Down, now()),
            "t" | "tick" => app.on_tick(now()),
            "reset" => app.on_message("reset"),
            "q" | "quit" => break,
            "" => {}
            other => {
                println!("unrecognized command: {}", other);
                print_help();
            }
        }
        draw_ascii(app.display());
        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
