use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Directory, Task, TaskStatus};
use crate::ui::theme;

/// Actions the task list can request.
pub enum TaskListAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Filters applied to the list via the store query.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub status: Option<TaskStatus>,
    pub staff_id: Option<Uuid>,
}

/// Render the left-side task list panel. `tasks` is the already-filtered
/// query result, newest first.
pub fn show_task_list(
    tasks: &[&Task],
    directory: &Directory,
    filters: &mut ListFilters,
    selected_task: Option<Uuid>,
    ui: &mut Ui,
) -> TaskListAction {
    let mut action = TaskListAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TaskListAction::Add;
    }

    ui.add_space(6.0);

    // Filter row: status and staff, ANDed into the store query.
    ui.horizontal(|ui| {
        let status_label = filters
            .status
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "All statuses".to_string());
        egui::ComboBox::from_id_salt("list_status_filter")
            .selected_text(RichText::new(status_label).size(11.0))
            .width(ui.available_width() * 0.5)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(filters.status.is_none(), "All statuses")
                    .clicked()
                {
                    filters.status = None;
                }
                for s in TaskStatus::all() {
                    if ui
                        .selectable_label(filters.status == Some(*s), s.label())
                        .clicked()
                    {
                        filters.status = Some(*s);
                    }
                }
            });

        let staff_label = filters
            .staff_id
            .and_then(|id| directory.staff_name(id))
            .unwrap_or("All staff")
            .to_string();
        egui::ComboBox::from_id_salt("list_staff_filter")
            .selected_text(RichText::new(staff_label).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(filters.staff_id.is_none(), "All staff")
                    .clicked()
                {
                    filters.staff_id = None;
                }
                for s in directory.staff() {
                    if ui
                        .selectable_label(filters.staff_id == Some(s.id), &s.name)
                        .clicked()
                    {
                        filters.staff_id = Some(s.id);
                    }
                }
            });
    });

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected_task == Some(task.id);
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            dot_rect.center(),
                            3.0,
                            theme::type_color(task.task_type),
                        );

                        let room = task
                            .room_id
                            .and_then(|id| directory.room_number(id))
                            .map(|n| format!("Room {}", n))
                            .unwrap_or_else(|| "Unassigned".to_string());
                        let title = format!("{} {}", task.task_type.icon(), room);
                        ui.add(
                            egui::Label::new(RichText::new(title).size(12.0).color(
                                if is_selected {
                                    Color32::WHITE
                                } else {
                                    theme::TEXT_PRIMARY
                                },
                            ))
                            .truncate(),
                        );

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;

                                let del_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new(egui_phosphor::regular::X)
                                            .size(10.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del_btn.on_hover_text("Delete task").clicked() {
                                    action = TaskListAction::Delete(task.id);
                                }

                                ui.label(
                                    RichText::new(task.status.icon())
                                        .size(11.0)
                                        .color(theme::status_color(task.status)),
                                );

                                match task.start_date {
                                    Some(start) => {
                                        let when = if task.is_multi_day() {
                                            format!("{} +{}d", start.format("%m/%d"), task.duration - 1)
                                        } else {
                                            start.format("%m/%d").to_string()
                                        };
                                        ui.label(
                                            RichText::new(when)
                                                .size(10.0)
                                                .color(theme::TEXT_SECONDARY),
                                        );
                                    }
                                    None => {
                                        ui.label(
                                            RichText::new("unscheduled")
                                                .size(10.0)
                                                .italics()
                                                .color(theme::TEXT_DIM),
                                        );
                                    }
                                }
                            },
                        );
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskListAction::Select(task.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}
