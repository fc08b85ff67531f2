//! Resize gesture: drag a task block's start or end edge to a new date.
//! Produces an uncommitted preview; out-of-range moves are rejected
//! silently (the preview simply does not update), unlike store validation
//! which always reports.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// Staged result of a resize gesture, applied through the store on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizePreview {
    pub task_id: Uuid,
    pub new_start: NaiveDate,
    pub new_duration: u32,
}

#[derive(Debug, Clone)]
struct ActiveResize {
    task_id: Uuid,
    /// Start and duration as they were when the gesture began; the start
    /// edge is validated against this pre-resize end date, not against any
    /// in-flight preview.
    start: NaiveDate,
    duration: u32,
    edge: ResizeEdge,
}

#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    active: Option<ActiveResize>,
    preview: Option<ResizePreview>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Task currently being resized. The board must not start a move drag
    /// on this task while the resize is in flight.
    pub fn resizing_task(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.task_id)
    }

    pub fn preview(&self) -> Option<&ResizePreview> {
        self.preview.as_ref()
    }

    /// Grab an edge. Unscheduled tasks have no edges to grab.
    pub fn begin(&mut self, task: &Task, edge: ResizeEdge) {
        let Some(start) = task.start_date else {
            return;
        };
        self.active = Some(ActiveResize {
            task_id: task.id,
            start,
            duration: task.duration.max(1),
            edge,
        });
        self.preview = None;
    }

    /// Pointer crossed into a new date column.
    pub fn on_move(&mut self, date: NaiveDate) {
        let Some(active) = &self.active else {
            return;
        };
        match active.edge {
            ResizeEdge::End => {
                // Dragging the end edge left of the start clamps to one day.
                let days = (date - active.start).num_days();
                let new_duration = (days + 1).max(1) as u32;
                self.preview = Some(ResizePreview {
                    task_id: active.task_id,
                    new_start: active.start,
                    new_duration,
                });
            }
            ResizeEdge::Start => {
                let end = active.start + chrono::Duration::days(active.duration as i64 - 1);
                // Start may never cross past the current end.
                if date > end {
                    return;
                }
                let new_duration = (end - date).num_days() + 1;
                if new_duration < 1 {
                    return;
                }
                self.preview = Some(ResizePreview {
                    task_id: active.task_id,
                    new_start: date,
                    new_duration: new_duration as u32,
                });
            }
        }
    }

    /// Gesture released: hand the staged preview to the caller for commit
    /// and return to idle.
    pub fn finish(&mut self) -> Option<ResizePreview> {
        self.active = None;
        self.preview.take()
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scheduled(start: NaiveDate, duration: u32) -> Task {
        let mut t = Task::new(TaskType::Cleaning);
        t.room_id = Some(Uuid::new_v4());
        t.start_date = Some(start);
        t.duration = duration;
        t
    }

    #[test]
    fn end_edge_extends_duration() {
        let task = scheduled(d(2024, 3, 4), 1);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::End);
        resize.on_move(d(2024, 3, 7));

        let p = resize.preview().unwrap();
        assert_eq!(p.new_start, d(2024, 3, 4));
        assert_eq!(p.new_duration, 4);
    }

    #[test]
    fn end_edge_before_start_clamps_to_one_day() {
        let task = scheduled(d(2024, 3, 4), 3);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::End);
        resize.on_move(d(2024, 2, 20));

        assert_eq!(resize.preview().unwrap().new_duration, 1);
    }

    #[test]
    fn start_edge_moves_start_and_grows_duration() {
        // Occupies 6..=7; pulling the start back to the 4th gives 4 days.
        let task = scheduled(d(2024, 3, 6), 2);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::Start);
        resize.on_move(d(2024, 3, 4));

        let p = resize.preview().unwrap();
        assert_eq!(p.new_start, d(2024, 3, 4));
        assert_eq!(p.new_duration, 4);
    }

    #[test]
    fn start_edge_past_end_is_rejected_silently() {
        let task = scheduled(d(2024, 3, 4), 2); // ends Mar 5
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::Start);
        resize.on_move(d(2024, 3, 5)); // valid: shrink to the end day
        let before = resize.preview().cloned();
        resize.on_move(d(2024, 3, 10)); // past the end: no preview change

        assert_eq!(resize.preview().cloned(), before);
        assert_eq!(resize.preview().unwrap().new_duration, 1);
    }

    #[test]
    fn start_edge_validates_against_pre_resize_end() {
        // Occupies 4..=8. Shrink to start=8 (duration 1), then move to the
        // 6th: still measured against the original end (the 8th), so the
        // result is 3 days, not a rejection.
        let task = scheduled(d(2024, 3, 4), 5);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::Start);
        resize.on_move(d(2024, 3, 8));
        assert_eq!(resize.preview().unwrap().new_duration, 1);
        resize.on_move(d(2024, 3, 6));
        let p = resize.preview().unwrap();
        assert_eq!(p.new_start, d(2024, 3, 6));
        assert_eq!(p.new_duration, 3);
    }

    #[test]
    fn begin_on_unscheduled_task_is_a_no_op() {
        let task = Task::new(TaskType::Inspection);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::End);
        assert!(!resize.is_active());
        resize.on_move(d(2024, 3, 4));
        assert!(resize.preview().is_none());
    }

    #[test]
    fn finish_hands_over_the_preview_and_idles() {
        let task = scheduled(d(2024, 3, 4), 1);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::End);
        resize.on_move(d(2024, 3, 5));

        let p = resize.finish().unwrap();
        assert_eq!(p.new_duration, 2);
        assert!(!resize.is_active());
        assert!(resize.preview().is_none());
    }

    #[test]
    fn cancel_discards_everything() {
        let task = scheduled(d(2024, 3, 4), 1);
        let mut resize = ResizeController::new();
        resize.begin(&task, ResizeEdge::End);
        resize.on_move(d(2024, 3, 6));
        resize.cancel();
        assert!(resize.finish().is_none());
    }
}
