#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod gesture;
mod io;
mod model;
mod schedule;
mod store;
mod ui;

use app::BoardApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 560.0])
            .with_title("Housekeeping Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Housekeeping Board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc)))),
    )
}
