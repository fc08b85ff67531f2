use egui::{Color32, FontId, Visuals};

use crate::model::{TaskPriority, TaskStatus, TaskType};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BLOCK: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const DANGER: Color32 = Color32::from_rgb(220, 80, 80);
pub const TODAY_TINT: Color32 = Color32::from_rgba_premultiplied(240, 75, 75, 14);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const PREVIEW_FILL: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 55);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 44.0;
pub const ROOM_COL_WIDTH: f32 = 96.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BLOCK_ROUNDING: f32 = 5.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_block() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.5)
}

// ── Task colors ──────────────────────────────────────────────────────────────

/// Block color per task type.
pub fn type_color(task_type: TaskType) -> Color32 {
    match task_type {
        TaskType::Cleaning => Color32::from_rgb(66, 133, 244),
        TaskType::Maintenance => Color32::from_rgb(251, 140, 0),
        TaskType::Inspection => Color32::from_rgb(171, 71, 188),
        TaskType::Turndown => Color32::from_rgb(38, 166, 154),
    }
}

pub fn priority_color(priority: TaskPriority) -> Color32 {
    match priority {
        TaskPriority::Low => TEXT_DIM,
        TaskPriority::Medium => TEXT_SECONDARY,
        TaskPriority::High => Color32::from_rgb(251, 192, 45),
        TaskPriority::Urgent => Color32::from_rgb(240, 75, 75),
    }
}

pub fn status_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::Pending => TEXT_SECONDARY,
        TaskStatus::InProgress => ACCENT,
        TaskStatus::Completed => Color32::from_rgb(52, 168, 83),
        TaskStatus::Cancelled => TEXT_DIM,
    }
}

/// Apply the dark board theme to the whole context.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = Color32::from_rgba_premultiplied(255, 255, 255, 6);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER_SUBTLE);
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    ctx.set_visuals(visuals);
}
