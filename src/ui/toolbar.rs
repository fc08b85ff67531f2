use egui::{RichText, Ui};

use crate::app::BoardApp;
use crate::ui::theme;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut BoardApp, ui: &mut Ui) {
    egui::menu::bar(ui, |ui| {
        ui.spacing_mut().item_spacing.x = 10.0;

        ui.menu_button(RichText::new("File").font(theme::font_menu()), |ui| {
            if ui.button("New Board").clicked() {
                app.new_board();
                ui.close_menu();
            }
            if ui.button("Open...").clicked() {
                app.open_board();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save        Ctrl+S").clicked() {
                app.save_board();
                ui.close_menu();
            }
            if ui.button("Save As...").clicked() {
                app.save_board_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("View").font(theme::font_menu()), |ui| {
            if ui.button("Previous Week").clicked() {
                app.viewport.scroll_days(-7);
                ui.close_menu();
            }
            if ui.button("Next Week").clicked() {
                app.viewport.scroll_days(7);
                ui.close_menu();
            }
            if ui.button("Jump to Today").clicked() {
                let today = chrono::Local::now().date_naive();
                app.viewport.jump_to(today - chrono::Duration::days(1));
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Days visible").size(10.5).color(theme::TEXT_DIM));
            for days in [7usize, 14, 31] {
                if ui
                    .radio(app.viewport.days == days, format!("{} days", days))
                    .clicked()
                {
                    app.viewport.days = days;
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("Zoom In").clicked() {
                app.viewport.zoom_in();
                ui.close_menu();
            }
            if ui.button("Zoom Out").clicked() {
                app.viewport.zoom_out();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("Help").font(theme::font_menu()), |ui| {
            if ui.button("Open Boards Folder").clicked() {
                if let Some(dir) = crate::io::file::boards_dir() {
                    let _ = std::fs::create_dir_all(&dir);
                    let _ = open::that(dir);
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Board name on the right, flagged while unsaved
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let name = if app.file_path.is_some() {
                app.board_name.clone()
            } else {
                format!("{} (unsaved)", app.board_name)
            };
            ui.label(
                RichText::new(name)
                    .font(theme::font_header())
                    .color(theme::TEXT_SECONDARY),
            );
        });
    });
}
