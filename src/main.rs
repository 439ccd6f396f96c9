//! Entry point for the **winfocus** command.
//!
//! `winfocus <direction> [min_distance]` performs one focus move and exits.
//! An unknown or missing direction prints usage and exits successfully; a
//! display that cannot be opened exits with status 1.

use log::{error, info};
use winfocus::command::{usage, Invocation};
use winfocus::config::{config_path, Config};
use winfocus::focus::FocusNavigator;
use winfocus::x11::session::X11Session;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "winfocus".into());

    let Some(invocation) = Invocation::parse(args) else {
        println!("{}", usage(&program));
        return;
    };

    let config = Config::load_or_default(config_path().as_deref());
    let min_distance = invocation.min_distance.unwrap_or(config.min_distance);

    let session = match X11Session::connect(None) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut navigator = FocusNavigator::new(session);
    navigator.add_skip_states(config.skip_states);

    match navigator.focus(invocation.direction, min_distance) {
        Ok(Some(window)) => info!("focused {}", window),
        Ok(None) => info!("no window {}", invocation.direction),
        Err(e) => error!("{}", e),
    }
}
