#![allow(non_snake_case)]

mod app;
mod components;
mod dom;
mod site;
mod widgets;

use tracing::Level;

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // Only fails when a subscriber is already installed
    let _ = dioxus_logger::init(level);
    dioxus::launch(app::App);
}
