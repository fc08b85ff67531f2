use egui::{Color32, Context, RichText};

use crate::app::BoardApp;
use crate::model::{TaskPriority, TaskType};
use crate::ui::theme;

/// Modal dialog for creating a new task.
pub fn show_add_task_dialog(app: &mut BoardApp, ctx: &Context) {
    let mut open = app.show_add_task;
    let mut create_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new(
        RichText::new("Add Task")
            .strong()
            .color(theme::TEXT_PRIMARY),
    )
    .open(&mut open)
    .collapsible(false)
    .resizable(false)
    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
    .show(ctx, |ui| {
        ui.spacing_mut().item_spacing.y = 8.0;
        ui.set_min_width(280.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Type").size(11.0).color(theme::TEXT_DIM));
            egui::ComboBox::from_id_salt("add_task_type")
                .selected_text(format!(
                    "{} {}",
                    app.new_task_type.icon(),
                    app.new_task_type.label()
                ))
                .show_ui(ui, |ui| {
                    for t in TaskType::all() {
                        ui.selectable_value(
                            &mut app.new_task_type,
                            *t,
                            format!("{} {}", t.icon(), t.label()),
                        );
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new("Priority").size(11.0).color(theme::TEXT_DIM));
            egui::ComboBox::from_id_salt("add_task_priority")
                .selected_text(format!(
                    "{} {}",
                    app.new_task_priority.icon(),
                    app.new_task_priority.label()
                ))
                .show_ui(ui, |ui| {
                    for p in TaskPriority::all() {
                        ui.selectable_value(
                            &mut app.new_task_priority,
                            *p,
                            format!("{} {}", p.icon(), p.label()),
                        );
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new("Room").size(11.0).color(theme::TEXT_DIM));
            let label = app
                .new_task_room
                .and_then(|id| app.directory.room_number(id))
                .map(|n| format!("Room {}", n))
                .unwrap_or_else(|| "— none —".to_string());
            egui::ComboBox::from_id_salt("add_task_room")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(app.new_task_room.is_none(), "— none —")
                        .clicked()
                    {
                        app.new_task_room = None;
                    }
                    for room in app.directory.rooms() {
                        if ui
                            .selectable_label(
                                app.new_task_room == Some(room.id),
                                format!("Room {}", room.number),
                            )
                            .clicked()
                        {
                            app.new_task_room = Some(room.id);
                        }
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label(RichText::new("Staff").size(11.0).color(theme::TEXT_DIM));
            let label = app
                .new_task_staff
                .and_then(|id| app.directory.staff_name(id))
                .unwrap_or("— none —")
                .to_string();
            egui::ComboBox::from_id_salt("add_task_staff")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(app.new_task_staff.is_none(), "— none —")
                        .clicked()
                    {
                        app.new_task_staff = None;
                    }
                    for staff in app.directory.staff() {
                        if ui
                            .selectable_label(app.new_task_staff == Some(staff.id), &staff.name)
                            .clicked()
                        {
                            app.new_task_staff = Some(staff.id);
                        }
                    }
                });
        });

        ui.checkbox(&mut app.new_task_scheduled, "Schedule right away");
        if app.new_task_scheduled {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Start").size(11.0).color(theme::TEXT_DIM));
                ui.add(
                    egui_extras::DatePickerButton::new(&mut app.new_task_start)
                        .id_salt("add_task_start"),
                );
                ui.label(RichText::new("Days").size(11.0).color(theme::TEXT_DIM));
                ui.add(
                    egui::DragValue::new(&mut app.new_task_duration)
                        .range(1..=30)
                        .speed(0.1),
                );
            });
        }

        ui.label(RichText::new("Notes").size(11.0).color(theme::TEXT_DIM));
        ui.add_sized(
            [ui.available_width(), 44.0],
            egui::TextEdit::multiline(&mut app.new_task_notes)
                .font(egui::FontId::proportional(11.0)),
        );

        if let Some(err) = &app.add_task_error {
            ui.label(RichText::new(err).size(10.5).color(theme::DANGER));
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([84.0, 28.0], create_btn).clicked() {
                create_clicked = true;
            }
            if ui.add_sized([84.0, 28.0], egui::Button::new("Cancel")).clicked() {
                cancel_clicked = true;
            }
        });
    });

    if create_clicked && app.create_task_from_dialog() {
        open = false;
    }
    if cancel_clicked || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        open = false;
        app.add_task_error = None;
    }
    app.show_add_task = open;
}

/// Confirmation dialog for a staged move or placement. The pending move
/// stays on the drag controller until it is confirmed or cancelled, so a
/// failed commit leaves the dialog up for another try.
pub fn show_confirm_move_dialog(app: &mut BoardApp, ctx: &Context) {
    let Some(pending) = app.drag.pending().cloned() else {
        return;
    };
    let Some(task) = app.store.get(pending.task_id) else {
        // Task vanished under the staged move (deleted from the list)
        app.drag.cancel();
        return;
    };

    let room_label = pending
        .new_room_id
        .or(task.room_id)
        .and_then(|id| app.directory.room_number(id))
        .map(|n| format!("Room {}", n))
        .unwrap_or_else(|| "no room".to_string());

    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new(
        RichText::new("Confirm Move")
            .strong()
            .color(theme::TEXT_PRIMARY),
    )
    .collapsible(false)
    .resizable(false)
    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
    .show(ctx, |ui| {
        ui.spacing_mut().item_spacing.y = 8.0;
        ui.set_min_width(260.0);

        ui.label(
            RichText::new(format!(
                "{} {}",
                task.task_type.icon(),
                task.task_type.label()
            ))
            .size(13.0)
            .color(theme::type_color(task.task_type)),
        );

        match task.start_date {
            Some(from) if from != pending.to_date => {
                ui.label(
                    RichText::new(format!(
                        "{}  to  {}",
                        from.format("%a %b %d"),
                        pending.to_date.format("%a %b %d")
                    ))
                    .size(11.5)
                    .color(theme::TEXT_SECONDARY),
                );
            }
            _ => {
                ui.label(
                    RichText::new(format!("Schedule on {}", pending.to_date.format("%a %b %d")))
                        .size(11.5)
                        .color(theme::TEXT_SECONDARY),
                );
            }
        }
        ui.label(
            RichText::new(format!("Target: {}", room_label))
                .size(11.5)
                .color(theme::TEXT_SECONDARY),
        );

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let confirm_btn = egui::Button::new(RichText::new("Confirm").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([84.0, 28.0], confirm_btn).clicked() {
                confirm = true;
            }
            if ui.add_sized([84.0, 28.0], egui::Button::new("Cancel")).clicked() {
                cancel = true;
            }
        });
    });

    if confirm {
        app.confirm_pending_move();
    } else if cancel {
        app.cancel_pending_move();
    }
}

/// About window.
pub fn show_about_dialog(app: &mut BoardApp, ctx: &Context) {
    let mut open = app.show_about;
    egui::Window::new(
        RichText::new("About")
            .strong()
            .color(theme::TEXT_PRIMARY),
    )
    .open(&mut open)
    .collapsible(false)
    .resizable(false)
    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
    .show(ctx, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.label(
            RichText::new("Housekeeping Board")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
        ui.add_space(2.0);
        ui.label(
            RichText::new("Drag tasks between rooms and dates, resize them by their\nedges, and confirm each move before it lands.")
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        open = false;
    }
    app.show_about = open;
}
