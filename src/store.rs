use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Directory, Task, TaskPriority, TaskStatus, TaskType};

/// Per-operation failures. Nothing here is fatal: the store is left
/// untouched whenever an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("task not found")]
    NotFound,
}

/// Query filter for [`TaskStore::get_all`]. `date` and the
/// `start_date`/`end_date` pair are mutually exclusive; when both are set,
/// `date` wins (same precedence as the original service).
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Legacy single-day filter: exact match on `start_date`, deliberately
    /// NOT overlap-aware. A multi-day task crossing `date` but starting
    /// earlier does not match. Preserved as documented behavior.
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub staff_id: Option<Uuid>,
}

impl TaskFilter {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }
}

/// Fields for creating a task. Only the type is required; room, staff and
/// start date may be filled in later by placing the task on the board.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub room_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub duration: u32,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub notes: String,
}

impl NewTask {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            room_id: None,
            staff_id: None,
            start_date: None,
            duration: 1,
            task_type,
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            notes: String::new(),
        }
    }
}

/// Partial update. `None` fields are left untouched; a patch with no set
/// fields is rejected as a validation error rather than silently ignored.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub room_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub task_type: Option<TaskType>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub notes: Option<String>,
    /// Explicit timestamps always win over the status auto-timestamp rule.
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.room_id.is_none()
            && self.staff_id.is_none()
            && self.start_date.is_none()
            && self.duration.is_none()
            && self.task_type.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.started_at.is_none()
            && self.completed_at.is_none()
    }
}

/// A task with the directory display fields joined on. The names are
/// attached at query time and never persisted.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub task: Task,
    pub room_number: Option<String>,
    pub staff_name: Option<String>,
}

impl TaskView {
    pub fn join(task: Task, directory: &Directory) -> Self {
        let room_number = task
            .room_id
            .and_then(|id| directory.room_number(id))
            .map(str::to_owned);
        let staff_name = task
            .staff_id
            .and_then(|id| directory.staff_name(id))
            .map(str::to_owned);
        Self {
            task,
            room_number,
            staff_name,
        }
    }
}

/// Authoritative owner of the task collection. All mutation goes through
/// `create`/`update`/`delete`; an operation either fully succeeds or leaves
/// the stored record untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Raw snapshot for the scheduling engine and serialization.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_view(&self, id: Uuid, directory: &Directory) -> Option<TaskView> {
        self.get(id).map(|t| TaskView::join(t.clone(), directory))
    }

    /// Filtered retrieval, newest first (`created_at` descending).
    pub fn get_all(&self, filter: &TaskFilter) -> Vec<&Task> {
        let mut out: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| {
                if let Some(date) = filter.date {
                    if t.start_date != Some(date) {
                        return false;
                    }
                } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
                    if !t.overlaps_range(start, end) {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if t.status != status {
                        return false;
                    }
                }
                if let Some(staff_id) = filter.staff_id {
                    if t.staff_id != Some(staff_id) {
                        return false;
                    }
                }
                true
            })
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn create(
        &mut self,
        data: NewTask,
        directory: &Directory,
    ) -> Result<TaskView, StoreError> {
        validate_duration(data.duration)?;
        validate_refs(data.room_id, data.staff_id, directory)?;

        let mut task = Task::new(data.task_type);
        task.room_id = data.room_id;
        task.staff_id = data.staff_id;
        task.start_date = data.start_date;
        task.duration = data.duration;
        task.priority = data.priority;
        task.status = data.status;
        task.notes = data.notes;
        // Created directly in a terminal-ish state still gets the stamp.
        let now = Utc::now();
        if task.status == TaskStatus::InProgress {
            task.started_at = Some(now);
        }
        if task.status == TaskStatus::Completed {
            task.completed_at = Some(now);
        }

        let view = TaskView::join(task.clone(), directory);
        self.tasks.push(task);
        Ok(view)
    }

    pub fn update(
        &mut self,
        id: Uuid,
        patch: TaskPatch,
        directory: &Directory,
    ) -> Result<TaskView, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;

        if patch.is_empty() {
            return Err(StoreError::Validation("No fields to update".into()));
        }
        validate_refs(patch.room_id, patch.staff_id, directory)?;
        if let Some(duration) = patch.duration {
            validate_duration(duration)?;
        }

        // Build the full replacement record first so a late failure can
        // never leave a half-applied task behind.
        let prev = &self.tasks[idx];
        let mut next = prev.clone();
        let now = Utc::now();

        if let Some(room_id) = patch.room_id {
            next.room_id = Some(room_id);
        }
        if let Some(staff_id) = patch.staff_id {
            next.staff_id = Some(staff_id);
        }
        if let Some(start_date) = patch.start_date {
            next.start_date = Some(start_date);
        }
        if let Some(duration) = patch.duration {
            next.duration = duration;
        }
        if let Some(task_type) = patch.task_type {
            next.task_type = task_type;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(notes) = patch.notes {
            next.notes = notes;
        }
        if let Some(status) = patch.status {
            next.status = status;
            // One-way ratchets: only the first transition stamps.
            if status == TaskStatus::InProgress && prev.started_at.is_none() {
                next.started_at = Some(now);
            }
            if status == TaskStatus::Completed && prev.completed_at.is_none() {
                next.completed_at = Some(now);
            }
        }
        // Explicit caller timestamps take precedence over the auto rule.
        if let Some(started_at) = patch.started_at {
            next.started_at = Some(started_at);
        }
        if let Some(completed_at) = patch.completed_at {
            next.completed_at = Some(completed_at);
        }
        next.updated_at = now;

        let view = TaskView::join(next.clone(), directory);
        self.tasks[idx] = next;
        Ok(view)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(self.tasks.remove(idx))
    }
}

fn validate_duration(duration: u32) -> Result<(), StoreError> {
    if duration < 1 {
        return Err(StoreError::Validation(
            "Duration must be at least 1 day".into(),
        ));
    }
    Ok(())
}

fn validate_refs(
    room_id: Option<Uuid>,
    staff_id: Option<Uuid>,
    directory: &Directory,
) -> Result<(), StoreError> {
    if let Some(id) = room_id {
        if !directory.room_exists(id) {
            return Err(StoreError::Validation("Invalid room ID".into()));
        }
    }
    if let Some(id) = staff_id {
        if !directory.staff_exists(id) {
            return Err(StoreError::Validation("Invalid staff ID".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Room, Staff};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn directory() -> Directory {
        Directory::new(
            vec![Room::new("101", 1), Room::new("102", 1)],
            vec![Staff::new("Maria Santos", "Housekeeper")],
        )
    }

    fn scheduled_task(dir: &Directory, start: NaiveDate, duration: u32) -> NewTask {
        let mut data = NewTask::new(TaskType::Cleaning);
        data.room_id = Some(dir.rooms()[0].id);
        data.start_date = Some(start);
        data.duration = duration;
        data
    }

    #[test]
    fn create_joins_display_names() {
        let dir = directory();
        let mut store = TaskStore::new();
        let mut data = scheduled_task(&dir, d(2024, 3, 10), 2);
        data.staff_id = Some(dir.staff()[0].id);

        let view = store.create(data, &dir).unwrap();
        assert_eq!(view.room_number.as_deref(), Some("101"));
        assert_eq!(view.staff_name.as_deref(), Some("Maria Santos"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_rejects_unknown_room() {
        let dir = directory();
        let mut store = TaskStore::new();
        let mut data = NewTask::new(TaskType::Cleaning);
        data.room_id = Some(Uuid::new_v4());

        let err = store.create(data, &dir).unwrap_err();
        assert_eq!(err, StoreError::Validation("Invalid room ID".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn create_rejects_zero_duration() {
        let dir = directory();
        let mut store = TaskStore::new();
        let mut data = NewTask::new(TaskType::Cleaning);
        data.duration = 0;

        assert!(matches!(
            store.create(data, &dir),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn single_date_filter_is_exact_match_not_overlap() {
        let dir = directory();
        let mut store = TaskStore::new();
        // Occupies 10..=12 but starts on the 10th.
        let id = store
            .create(scheduled_task(&dir, d(2024, 3, 10), 3), &dir)
            .unwrap()
            .task
            .id;

        let on_start = store.get_all(&TaskFilter {
            date: Some(d(2024, 3, 10)),
            ..Default::default()
        });
        assert_eq!(on_start.len(), 1);
        assert_eq!(on_start[0].id, id);

        // The task covers the 11th, but the legacy filter only matches the
        // start date.
        let mid_span = store.get_all(&TaskFilter {
            date: Some(d(2024, 3, 11)),
            ..Default::default()
        });
        assert!(mid_span.is_empty());
    }

    #[test]
    fn range_filter_uses_overlap_predicate() {
        let dir = directory();
        let mut store = TaskStore::new();
        store
            .create(scheduled_task(&dir, d(2024, 3, 10), 3), &dir)
            .unwrap();

        assert_eq!(
            store
                .get_all(&TaskFilter::range(d(2024, 3, 12), d(2024, 3, 20)))
                .len(),
            1
        );
        assert!(store
            .get_all(&TaskFilter::range(d(2024, 3, 13), d(2024, 3, 20)))
            .is_empty());
    }

    #[test]
    fn status_and_staff_filters_are_anded_in() {
        let dir = directory();
        let staff_id = dir.staff()[0].id;
        let mut store = TaskStore::new();

        let mut a = scheduled_task(&dir, d(2024, 3, 10), 1);
        a.staff_id = Some(staff_id);
        let a_id = store.create(a, &dir).unwrap().task.id;
        store
            .create(scheduled_task(&dir, d(2024, 3, 10), 1), &dir)
            .unwrap();

        let filter = TaskFilter {
            start_date: Some(d(2024, 3, 9)),
            end_date: Some(d(2024, 3, 11)),
            status: Some(TaskStatus::Pending),
            staff_id: Some(staff_id),
            ..Default::default()
        };
        let got = store.get_all(&filter);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, a_id);
    }

    #[test]
    fn unfiltered_query_returns_newest_first() {
        let dir = directory();
        let mut store = TaskStore::new();
        let first = store
            .create(NewTask::new(TaskType::Cleaning), &dir)
            .unwrap()
            .task
            .id;
        // Force a strictly later created_at on the second record.
        let mut newer = Task::new(TaskType::Inspection);
        newer.created_at = Utc::now() + chrono::Duration::seconds(5);
        let second = newer.id;
        let mut tasks = store.tasks().to_vec();
        tasks.push(newer);
        let store = TaskStore::from_tasks(tasks);

        let all = store.get_all(&TaskFilter::default());
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
    }

    #[test]
    fn empty_patch_is_a_validation_error() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(NewTask::new(TaskType::Cleaning), &dir)
            .unwrap()
            .task
            .id;

        let err = store.update(id, TaskPatch::default(), &dir).unwrap_err();
        assert_eq!(err, StoreError::Validation("No fields to update".into()));
    }

    #[test]
    fn update_missing_task_is_not_found() {
        let dir = directory();
        let mut store = TaskStore::new();
        let patch = TaskPatch {
            notes: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(
            store.update(Uuid::new_v4(), patch, &dir).unwrap_err(),
            StoreError::NotFound
        );
    }

    #[test]
    fn update_is_atomic_on_validation_failure() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(scheduled_task(&dir, d(2024, 3, 10), 2), &dir)
            .unwrap()
            .task
            .id;

        // Valid notes change bundled with an invalid duration: nothing may
        // be applied.
        let patch = TaskPatch {
            notes: Some("deep clean".into()),
            duration: Some(0),
            ..Default::default()
        };
        assert!(store.update(id, patch, &dir).is_err());
        let task = store.get(id).unwrap();
        assert_eq!(task.duration, 2);
        assert!(task.notes.is_empty());
    }

    #[test]
    fn status_transition_stamps_started_at_once() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(NewTask::new(TaskType::Cleaning), &dir)
            .unwrap()
            .task
            .id;

        let in_progress = TaskPatch {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        store.update(id, in_progress.clone(), &dir).unwrap();
        let first_stamp = store.get(id).unwrap().started_at.unwrap();

        // Bounce through pending and back: the ratchet must not re-stamp.
        let pending = TaskPatch {
            status: Some(TaskStatus::Pending),
            ..Default::default()
        };
        store.update(id, pending, &dir).unwrap();
        store.update(id, in_progress, &dir).unwrap();
        assert_eq!(store.get(id).unwrap().started_at, Some(first_stamp));
    }

    #[test]
    fn completed_transition_stamps_completed_at() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(NewTask::new(TaskType::Turndown), &dir)
            .unwrap()
            .task
            .id;

        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        store.update(id, patch, &dir).unwrap();
        assert!(store.get(id).unwrap().completed_at.is_some());
    }

    #[test]
    fn explicit_timestamp_beats_auto_rule() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(NewTask::new(TaskType::Maintenance), &dir)
            .unwrap()
            .task
            .id;

        let explicit = Utc::now() - chrono::Duration::hours(3);
        let patch = TaskPatch {
            status: Some(TaskStatus::InProgress),
            started_at: Some(explicit),
            ..Default::default()
        };
        store.update(id, patch, &dir).unwrap();
        assert_eq!(store.get(id).unwrap().started_at, Some(explicit));
    }

    #[test]
    fn delete_returns_the_removed_task() {
        let dir = directory();
        let mut store = TaskStore::new();
        let id = store
            .create(NewTask::new(TaskType::Cleaning), &dir)
            .unwrap()
            .task
            .id;

        let removed = store.delete(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert_eq!(store.delete(id).unwrap_err(), StoreError::NotFound);
    }
}
