//! Move gesture: pick a task up from its cell, preview it over other
//! cells, and stage the drop as a pending move that is only applied to the
//! store once the user confirms it.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Task;

/// Transient hover feedback while a drag is in flight. Never mutates
/// anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPreview {
    pub task_id: Uuid,
    pub target_date: NaiveDate,
    pub room_id: Uuid,
}

/// A staged, uncommitted move. Duration is untouched by a move; only the
/// start date (and possibly the room) change when it is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: Uuid,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub new_room_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    task_id: Uuid,
    from_date: NaiveDate,
    /// Room the task was picked up from; the drop falls back to it when no
    /// cell was previewed.
    home_room: Option<Uuid>,
}

/// Session-scoped drag state machine:
/// idle -> dragging -> previewing* -> dropped (pending) -> committed/cancelled.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
    preview: Option<DragPreview>,
    pending: Option<PendingMove>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragging_task(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.task_id)
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.preview.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Pick a task up from the cell it was grabbed in. Ignored while a
    /// previous move still awaits confirmation.
    pub fn begin(&mut self, task: &Task, from_date: NaiveDate) {
        if self.pending.is_some() {
            return;
        }
        self.active = Some(ActiveDrag {
            task_id: task.id,
            from_date,
            home_room: task.room_id,
        });
        self.preview = None;
    }

    /// Update the hover preview as the pointer crosses a cell.
    pub fn enter_cell(&mut self, date: NaiveDate, room_id: Uuid) {
        if let Some(active) = &self.active {
            self.preview = Some(DragPreview {
                task_id: active.task_id,
                target_date: date,
                room_id,
            });
        }
    }

    /// Finish the gesture over a date column and stage the move. The target
    /// room comes from the last previewed cell, falling back to the room
    /// the task was picked up from.
    pub fn drop_on(&mut self, date: NaiveDate) {
        let Some(active) = self.active.take() else {
            return;
        };
        let new_room_id = self
            .preview
            .take()
            .map(|p| p.room_id)
            .or(active.home_room);
        self.pending = Some(PendingMove {
            task_id: active.task_id,
            from_date: active.from_date,
            to_date: date,
            new_room_id,
        });
    }

    /// Stage a move directly, without a drag gesture. Used to place an
    /// unscheduled task on a cell.
    pub fn stage(&mut self, task_id: Uuid, from_date: NaiveDate, to_date: NaiveDate, room_id: Uuid) {
        if self.pending.is_some() {
            return;
        }
        self.active = None;
        self.preview = None;
        self.pending = Some(PendingMove {
            task_id,
            from_date,
            to_date,
            new_room_id: Some(room_id),
        });
    }

    /// The gesture ended somewhere that is not a cell: drop the transient
    /// state but keep any already-staged move.
    pub fn end(&mut self) {
        self.active = None;
        self.preview = None;
    }

    /// Discard the staged move without mutating anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consume the staged move for commit. The caller applies it through
    /// the store; on a failed commit it can re-`stage` or simply report.
    pub fn take_pending(&mut self) -> Option<PendingMove> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scheduled(room: Uuid, start: NaiveDate) -> Task {
        let mut t = Task::new(TaskType::Cleaning);
        t.room_id = Some(room);
        t.start_date = Some(start);
        t
    }

    #[test]
    fn drop_uses_last_previewed_room() {
        let home = Uuid::new_v4();
        let other = Uuid::new_v4();
        let task = scheduled(home, d(2024, 3, 4));
        let mut drag = DragController::new();

        drag.begin(&task, d(2024, 3, 4));
        drag.enter_cell(d(2024, 3, 5), home);
        drag.enter_cell(d(2024, 3, 6), other);
        drag.drop_on(d(2024, 3, 6));

        let pending = drag.pending().unwrap();
        assert_eq!(pending.task_id, task.id);
        assert_eq!(pending.from_date, d(2024, 3, 4));
        assert_eq!(pending.to_date, d(2024, 3, 6));
        assert_eq!(pending.new_room_id, Some(other));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drop_without_preview_keeps_home_room() {
        let home = Uuid::new_v4();
        let task = scheduled(home, d(2024, 3, 4));
        let mut drag = DragController::new();

        drag.begin(&task, d(2024, 3, 4));
        drag.drop_on(d(2024, 3, 7));

        assert_eq!(drag.pending().unwrap().new_room_id, Some(home));
    }

    #[test]
    fn begin_is_ignored_while_a_move_is_pending() {
        let room = Uuid::new_v4();
        let first = scheduled(room, d(2024, 3, 4));
        let second = scheduled(room, d(2024, 3, 5));
        let mut drag = DragController::new();

        drag.begin(&first, d(2024, 3, 4));
        drag.drop_on(d(2024, 3, 6));
        drag.begin(&second, d(2024, 3, 5));

        assert!(!drag.is_dragging());
        assert_eq!(drag.pending().unwrap().task_id, first.id);
    }

    #[test]
    fn preview_requires_an_active_drag() {
        let mut drag = DragController::new();
        drag.enter_cell(d(2024, 3, 5), Uuid::new_v4());
        assert!(drag.preview().is_none());
    }

    #[test]
    fn end_without_drop_discards_transient_state_only() {
        let room = Uuid::new_v4();
        let task = scheduled(room, d(2024, 3, 4));
        let mut drag = DragController::new();

        drag.begin(&task, d(2024, 3, 4));
        drag.enter_cell(d(2024, 3, 5), room);
        drag.end();
        assert!(!drag.is_dragging());
        assert!(drag.preview().is_none());
        assert!(drag.pending().is_none());
    }

    #[test]
    fn cancel_discards_the_pending_move() {
        let room = Uuid::new_v4();
        let task = scheduled(room, d(2024, 3, 4));
        let mut drag = DragController::new();

        drag.begin(&task, d(2024, 3, 4));
        drag.drop_on(d(2024, 3, 6));
        drag.cancel();
        assert!(drag.pending().is_none());
    }

    #[test]
    fn stage_places_a_task_without_a_gesture() {
        let room = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mut drag = DragController::new();

        drag.stage(id, d(2024, 3, 6), d(2024, 3, 6), room);
        let pending = drag.pending().unwrap();
        assert_eq!(pending.task_id, id);
        assert_eq!(pending.new_room_id, Some(room));
    }
}
