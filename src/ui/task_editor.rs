use chrono::NaiveDate;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Directory, Task, TaskPriority, TaskStatus, TaskType};
use crate::store::TaskPatch;
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Apply,
    Delete,
}

/// Draft of the selected task's fields. Edits accumulate here and are only
/// sent to the store as a patch when the user applies them, so store
/// validation can reject the whole draft without touching the record.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub task_id: Uuid,
    pub room_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub scheduled: bool,
    pub start_date: NaiveDate,
    pub duration: u32,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub notes: String,
    pub error: Option<String>,
}

impl EditorState {
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            room_id: task.room_id,
            staff_id: task.staff_id,
            scheduled: task.start_date.is_some(),
            start_date: task
                .start_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            duration: task.duration,
            task_type: task.task_type,
            priority: task.priority,
            status: task.status,
            notes: task.notes.clone(),
            error: None,
        }
    }

    /// Build a patch of only the fields that differ from the stored task.
    /// An unchanged draft yields an empty patch, which the store reports as
    /// "No fields to update".
    pub fn to_patch(&self, task: &Task) -> TaskPatch {
        let mut patch = TaskPatch::default();
        if self.room_id != task.room_id {
            patch.room_id = self.room_id;
        }
        if self.staff_id != task.staff_id {
            patch.staff_id = self.staff_id;
        }
        if self.scheduled && Some(self.start_date) != task.start_date {
            patch.start_date = Some(self.start_date);
        }
        if self.duration != task.duration {
            patch.duration = Some(self.duration);
        }
        if self.task_type != task.task_type {
            patch.task_type = Some(self.task_type);
        }
        if self.priority != task.priority {
            patch.priority = Some(self.priority);
        }
        if self.status != task.status {
            patch.status = Some(self.status);
        }
        if self.notes != task.notes {
            patch.notes = Some(self.notes.clone());
        }
        patch
    }
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Render the inline editor for the selected task.
pub fn show_task_editor(
    state: &mut EditorState,
    task: &Task,
    directory: &Directory,
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(5.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "Type");
        egui::ComboBox::from_id_salt("editor_type")
            .selected_text(
                RichText::new(format!(
                    "{} {}",
                    state.task_type.icon(),
                    state.task_type.label()
                ))
                .size(11.0),
            )
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for t in TaskType::all() {
                    ui.selectable_value(
                        &mut state.task_type,
                        *t,
                        format!("{} {}", t.icon(), t.label()),
                    );
                }
            });

        field_label(ui, "Priority");
        egui::ComboBox::from_id_salt("editor_priority")
            .selected_text(
                RichText::new(format!(
                    "{} {}",
                    state.priority.icon(),
                    state.priority.label()
                ))
                .size(11.0),
            )
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for p in TaskPriority::all() {
                    ui.selectable_value(
                        &mut state.priority,
                        *p,
                        format!("{} {}", p.icon(), p.label()),
                    );
                }
            });

        field_label(ui, "Status");
        egui::ComboBox::from_id_salt("editor_status")
            .selected_text(
                RichText::new(format!("{} {}", state.status.icon(), state.status.label()))
                    .size(11.0),
            )
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for s in TaskStatus::all() {
                    ui.selectable_value(
                        &mut state.status,
                        *s,
                        format!("{} {}", s.icon(), s.label()),
                    );
                }
            });

        field_label(ui, "Room");
        let room_label = state
            .room_id
            .and_then(|id| directory.room_number(id))
            .map(|n| format!("Room {}", n))
            .unwrap_or_else(|| "— Unassigned —".to_string());
        egui::ComboBox::from_id_salt("editor_room")
            .selected_text(RichText::new(room_label).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for room in directory.rooms() {
                    if ui
                        .selectable_label(
                            state.room_id == Some(room.id),
                            format!("Room {}", room.number),
                        )
                        .clicked()
                    {
                        state.room_id = Some(room.id);
                    }
                }
            });

        field_label(ui, "Assigned To");
        let staff_label = state
            .staff_id
            .and_then(|id| directory.staff_name(id))
            .unwrap_or("— Unassigned —")
            .to_string();
        egui::ComboBox::from_id_salt("editor_staff")
            .selected_text(RichText::new(staff_label).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for staff in directory.staff() {
                    if ui
                        .selectable_label(state.staff_id == Some(staff.id), &staff.name)
                        .clicked()
                    {
                        state.staff_id = Some(staff.id);
                    }
                }
            });

        // Unscheduled tasks opt in to a start date; scheduled tasks always
        // show their dates (there is no way to unschedule from here).
        if task.start_date.is_none() {
            ui.checkbox(&mut state.scheduled, "Schedule on the board");
        }
        if state.scheduled {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Start");
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut state.start_date)
                            .id_salt("editor_start_date"),
                    );
                });
                ui.vertical(|ui| {
                    field_label(ui, "Days");
                    ui.add(
                        egui::DragValue::new(&mut state.duration)
                            .range(1..=30)
                            .speed(0.1),
                    );
                });
            });
        }

        field_label(ui, "Notes");
        ui.add_sized(
            [ui.available_width(), 48.0],
            egui::TextEdit::multiline(&mut state.notes)
                .font(egui::FontId::proportional(11.0))
                .text_color(theme::TEXT_PRIMARY),
        );

        if let Some(err) = &state.error {
            ui.label(RichText::new(err).size(10.5).color(theme::DANGER));
        }

        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let apply_btn = egui::Button::new(RichText::new("Apply").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([72.0, 26.0], apply_btn).clicked() {
                action = EditorAction::Apply;
            }
            let delete_btn = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                .fill(theme::DANGER)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([72.0, 26.0], delete_btn).clicked() {
                action = EditorAction::Delete;
            }
        });
    });

    action
}
