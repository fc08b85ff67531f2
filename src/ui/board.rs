use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::gesture::{DragController, ResizeController, ResizeEdge, ResizePreview};
use crate::model::{BoardViewport, Directory, Task};
use crate::schedule;
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const ROOM_COL_WIDTH: f32 = theme::ROOM_COL_WIDTH;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;
const BLOCK_INSET_X: f32 = 2.0;

/// Results of one frame of board interaction that the app must act on.
#[derive(Debug, Clone, Default)]
pub struct BoardAction {
    /// A resize gesture finished with a staged preview to commit.
    pub resize_committed: Option<ResizePreview>,
    /// A drag was dropped on a cell this frame (a pending move is staged
    /// on the controller, awaiting confirmation).
    pub dropped: bool,
    /// An unscheduled selected task was clicked onto a cell:
    /// (task, room, date).
    pub place_request: Option<(Uuid, Uuid, NaiveDate)>,
}

/// Render the rooms × dates grid and wire pointer gestures into the drag
/// and resize controllers.
pub fn show_board(
    tasks: &[Task],
    directory: &Directory,
    viewport: &mut BoardViewport,
    drag: &mut DragController,
    resize: &mut ResizeController,
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) -> BoardAction {
    let mut action = BoardAction::default();
    let rooms = directory.rooms();
    let dates = viewport.visible_dates();

    // Ctrl+scroll zooms the date columns.
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            viewport.zoom_in();
        } else if scroll_delta.y < 0.0 {
            viewport.zoom_out();
        }
    }

    let heights = schedule::row_heights(tasks, rooms, &dates);
    // Row layout: (room id, y offset from grid origin, height).
    let mut rows: Vec<(Uuid, f32, f32)> = Vec::with_capacity(rooms.len());
    let mut y_cursor = HEADER_HEIGHT;
    for room in rooms {
        let h = heights.get(&room.id).copied().unwrap_or(schedule::BASE_ROW_HEIGHT);
        rows.push((room.id, y_cursor, h));
        y_cursor += h;
    }

    let grid_width = ROOM_COL_WIDTH + viewport.total_width();
    let grid_height = y_cursor + 24.0;
    let available = ui.available_size();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(grid_width.max(available.x), grid_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_date_header(&painter, origin, viewport, &dates, grid_height);
            draw_room_rows(&painter, origin, directory, &rows, grid_width);

            // Task blocks, per room row.
            for &(room_id, row_y, _h) in &rows {
                for task in tasks.iter().filter(|t| t.room_id == Some(room_id)) {
                    let Some(geom) = block_geometry(task, resize, viewport) else {
                        continue;
                    };
                    let (block_start, block_duration) = geom;
                    let Some(rect) = block_rect(
                        origin,
                        viewport,
                        row_y + schedule::vertical_offset(tasks, task),
                        block_start,
                        block_duration,
                    ) else {
                        continue;
                    };

                    let is_selected = *selected_task == Some(task.id);
                    let is_lifted = drag.dragging_task() == Some(task.id);
                    draw_task_block(&painter, rect, task, directory, is_selected, is_lifted);

                    let bar_response = ui.interact(
                        rect,
                        ui.make_persistent_id(("task-block", task.id)),
                        Sense::click_and_drag(),
                    );
                    let left_handle = Rect::from_min_max(
                        Pos2::new(rect.left() - HANDLE_WIDTH * 0.5, rect.top()),
                        Pos2::new(rect.left() + HANDLE_WIDTH * 0.5, rect.bottom()),
                    );
                    let right_handle = Rect::from_min_max(
                        Pos2::new(rect.right() - HANDLE_WIDTH * 0.5, rect.top()),
                        Pos2::new(rect.right() + HANDLE_WIDTH * 0.5, rect.bottom()),
                    );
                    let left_response = ui.interact(
                        left_handle.expand(4.0),
                        ui.make_persistent_id(("block-resize-start", task.id)),
                        Sense::drag(),
                    );
                    let right_response = ui.interact(
                        right_handle.expand(4.0),
                        ui.make_persistent_id(("block-resize-end", task.id)),
                        Sense::drag(),
                    );

                    if bar_response.clicked() {
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }

                    // Resize gestures. Grabbing an edge wins over a move
                    // drag on the same block.
                    if left_response.drag_started() {
                        resize.begin(task, ResizeEdge::Start);
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }
                    if right_response.drag_started() {
                        resize.begin(task, ResizeEdge::End);
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }
                    if left_response.dragged() || right_response.dragged() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                        let ptr = left_response
                            .interact_pointer_pos()
                            .or_else(|| right_response.interact_pointer_pos());
                        if let Some(pos) = ptr {
                            if let Some(date) = date_at(origin, viewport, pos.x) {
                                resize.on_move(date);
                            }
                        }
                    }
                    if left_response.drag_stopped() || right_response.drag_stopped() {
                        action.resize_committed = resize.finish();
                    }

                    // Move gesture.
                    if bar_response.drag_started() && resize.resizing_task() != Some(task.id) {
                        if let Some(start) = task.start_date {
                            drag.begin(task, start);
                            *selected_task = Some(task.id);
                            consumed_click = true;
                        }
                    }
                    if bar_response.dragged() && drag.dragging_task() == Some(task.id) {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                        if let Some(pos) = bar_response.interact_pointer_pos() {
                            if let Some((cell_room, cell_date)) =
                                cell_at(origin, viewport, &rows, pos)
                            {
                                drag.enter_cell(cell_date, cell_room);
                            }
                        }
                    }
                    if bar_response.drag_stopped() && drag.dragging_task() == Some(task.id) {
                        let cell = bar_response
                            .interact_pointer_pos()
                            .and_then(|pos| cell_at(origin, viewport, &rows, pos));
                        match cell {
                            Some((_, cell_date)) => {
                                drag.drop_on(cell_date);
                                action.dropped = true;
                            }
                            None => drag.end(),
                        }
                    }

                    // Edge handle affordances.
                    if is_selected || left_response.hovered() || right_response.hovered() {
                        if left_response.hovered() || right_response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                        } else if bar_response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        let handle_h = rect.height() * 0.55;
                        let handle_y = rect.center().y - handle_h / 2.0;
                        for x in [rect.left() - 1.5, rect.right() - 2.5] {
                            painter.rect_filled(
                                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                                Rounding::same(2.0),
                                theme::HANDLE_COLOR,
                            );
                        }
                    }

                    if bar_response.hovered()
                        || left_response.hovered()
                        || right_response.hovered()
                    {
                        show_block_tooltip(ui, task, directory);
                    }
                }
            }

            // Ghost block under the pointer while dragging.
            if let Some(preview) = drag.preview().cloned() {
                if let Some(task) = tasks.iter().find(|t| t.id == preview.task_id) {
                    draw_cell_preview(
                        &painter,
                        origin,
                        viewport,
                        &rows,
                        preview.room_id,
                        preview.target_date,
                        task.duration,
                    );
                }
            }
            // Highlight the staged target while a move awaits confirmation.
            if let Some(pending) = drag.pending().cloned() {
                if let (Some(room_id), Some(task)) = (
                    pending.new_room_id,
                    tasks.iter().find(|t| t.id == pending.task_id),
                ) {
                    draw_cell_preview(
                        &painter,
                        origin,
                        viewport,
                        &rows,
                        room_id,
                        pending.to_date,
                        task.duration,
                    );
                }
            }

            // A click on empty grid: place an unscheduled selected task, or
            // clear the selection.
            if response.clicked() && !consumed_click {
                let cell = response
                    .interact_pointer_pos()
                    .and_then(|pos| cell_at(origin, viewport, &rows, pos));
                let unscheduled_selection = selected_task
                    .and_then(|id| tasks.iter().find(|t| t.id == id))
                    .filter(|t| !t.is_scheduled())
                    .map(|t| t.id);
                match (unscheduled_selection, cell) {
                    (Some(task_id), Some((room_id, date))) => {
                        action.place_request = Some((task_id, room_id, date));
                    }
                    _ => *selected_task = None,
                }
            }
        });

    action
}

/// Geometry override while this task has an in-flight resize preview.
fn block_geometry(
    task: &Task,
    resize: &ResizeController,
    viewport: &BoardViewport,
) -> Option<(NaiveDate, u32)> {
    let (start, duration) = match resize.preview() {
        Some(p) if p.task_id == task.id => (p.new_start, p.new_duration),
        _ => (task.start_date?, task.duration),
    };
    let end = start + chrono::Duration::days(duration.max(1) as i64 - 1);
    // Cull blocks entirely outside the visible window.
    if start > viewport.end() || end < viewport.start {
        return None;
    }
    Some((start, duration))
}

/// Pixel rect for a block, clipped to the visible date window.
fn block_rect(
    origin: Pos2,
    viewport: &BoardViewport,
    y: f32,
    start: NaiveDate,
    duration: u32,
) -> Option<Rect> {
    let end = start + chrono::Duration::days(duration.max(1) as i64 - 1);
    let draw_start = start.max(viewport.start);
    let draw_end = end.min(viewport.end());
    let visible_days = (draw_end - draw_start).num_days() + 1;
    if visible_days < 1 {
        return None;
    }
    let x = origin.x + ROOM_COL_WIDTH + viewport.date_to_x(draw_start) + BLOCK_INSET_X;
    let width = visible_days as f32 * viewport.column_width - BLOCK_INSET_X * 2.0;
    Some(Rect::from_min_size(
        Pos2::new(x, origin.y + y),
        Vec2::new(width.max(6.0), schedule::TASK_HEIGHT),
    ))
}

/// Date column under an absolute x coordinate.
fn date_at(origin: Pos2, viewport: &BoardViewport, x: f32) -> Option<NaiveDate> {
    viewport.date_at_x(x - origin.x - ROOM_COL_WIDTH)
}

/// Cell (room, date) under an absolute position.
fn cell_at(
    origin: Pos2,
    viewport: &BoardViewport,
    rows: &[(Uuid, f32, f32)],
    pos: Pos2,
) -> Option<(Uuid, NaiveDate)> {
    let date = date_at(origin, viewport, pos.x)?;
    let y = pos.y - origin.y;
    rows.iter()
        .find(|(_, row_y, h)| y >= *row_y && y < row_y + h)
        .map(|(room_id, _, _)| (*room_id, date))
}

fn draw_date_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &BoardViewport,
    dates: &[NaiveDate],
    grid_height: f32,
) {
    let width = ROOM_COL_WIDTH + viewport.total_width();
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    painter.text(
        Pos2::new(origin.x + 8.0, origin.y + HEADER_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        "Rooms",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );

    let today = chrono::Local::now().date_naive();
    for (i, &date) in dates.iter().enumerate() {
        let x = origin.x + ROOM_COL_WIDTH + viewport.date_to_x(date);

        // Today gets a soft column tint under everything else.
        if date == today {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Vec2::new(viewport.column_width, grid_height - HEADER_HEIGHT),
                ),
                0.0,
                theme::TODAY_TINT,
            );
        }

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + grid_height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let is_weekend = date.weekday().num_days_from_monday() >= 5;
        let day_color = if date == today {
            theme::TEXT_PRIMARY
        } else if is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x + 4.0, origin.y + 28.0),
            egui::Align2::LEFT_CENTER,
            date.format("%a %d").to_string(),
            theme::font_sub(),
            day_color,
        );
        if date.day() == 1 || i == 0 {
            painter.text(
                Pos2::new(x + 4.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_room_rows(
    painter: &egui::Painter,
    origin: Pos2,
    directory: &Directory,
    rows: &[(Uuid, f32, f32)],
    grid_width: f32,
) {
    for (i, &(room_id, y, h)) in rows.iter().enumerate() {
        let row_bg = if i % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(origin.x, origin.y + y), Vec2::new(grid_width, h)),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, origin.y + y + h),
                Pos2::new(origin.x + grid_width, origin.y + y + h),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );

        if let Some(number) = directory.room_number(room_id) {
            painter.text(
                Pos2::new(origin.x + 8.0, origin.y + y + h / 2.0),
                egui::Align2::LEFT_CENTER,
                number,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
    // Separator between the room column and the grid.
    if let Some(&(_, last_y, last_h)) = rows.last() {
        painter.line_segment(
            [
                Pos2::new(origin.x + ROOM_COL_WIDTH, origin.y + HEADER_HEIGHT),
                Pos2::new(origin.x + ROOM_COL_WIDTH, origin.y + last_y + last_h),
            ],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_task_block(
    painter: &egui::Painter,
    rect: Rect,
    task: &Task,
    directory: &Directory,
    is_selected: bool,
    is_lifted: bool,
) {
    let rounding = Rounding::same(theme::BLOCK_ROUNDING);
    let mut color = theme::type_color(task.task_type);
    if is_lifted {
        color = color.gamma_multiply(0.5);
    }

    let shadow_rect = rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(rect, rounding, color);

    // Priority strip along the left edge.
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(3.0, rect.height())),
        Rounding {
            nw: theme::BLOCK_ROUNDING,
            sw: theme::BLOCK_ROUNDING,
            ne: 0.0,
            se: 0.0,
        },
        theme::priority_color(task.priority),
    );

    if is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BLOCK_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if rect.width() > 30.0 {
        let staff = task
            .staff_id
            .and_then(|id| directory.staff_name(id))
            .unwrap_or("");
        let label = if staff.is_empty() {
            format!("{} {}", task.task_type.icon(), task.task_type.label())
        } else {
            format!("{} {}", task.task_type.icon(), staff)
        };
        let galley = painter.layout_no_wrap(label, theme::font_block(), theme::TEXT_ON_BLOCK);
        let clipped = painter.with_clip_rect(rect);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(rect.left() + 7.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_cell_preview(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &BoardViewport,
    rows: &[(Uuid, f32, f32)],
    room_id: Uuid,
    date: NaiveDate,
    duration: u32,
) {
    let Some(&(_, row_y, _)) = rows.iter().find(|(id, _, _)| *id == room_id) else {
        return;
    };
    let Some(rect) = block_rect(origin, viewport, row_y + 1.0, date, duration) else {
        return;
    };
    painter.rect_filled(rect, Rounding::same(theme::BLOCK_ROUNDING), theme::PREVIEW_FILL);
    painter.rect_stroke(
        rect,
        Rounding::same(theme::BLOCK_ROUNDING),
        Stroke::new(1.0, theme::BORDER_ACCENT),
    );
}

fn show_block_tooltip(ui: &Ui, task: &Task, directory: &Directory) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id)),
        |ui| {
            let room = task
                .room_id
                .and_then(|id| directory.room_number(id))
                .unwrap_or("—");
            ui.strong(format!("{} · Room {}", task.task_type.label(), room));
            if let (Some(start), Some(end)) = (task.start_date, task.end_date()) {
                ui.label(format!(
                    "{} → {} ({}d)",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d"),
                    task.duration
                ));
            }
            if let Some(name) = task.staff_id.and_then(|id| directory.staff_name(id)) {
                ui.label(name.to_string());
            }
            ui.label(format!(
                "{} {} · {} priority",
                task.status.icon(),
                task.status.label(),
                task.priority.label()
            ));
        },
    );
}
