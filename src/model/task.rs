use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of work a housekeeping task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Cleaning,
    Maintenance,
    Inspection,
    Turndown,
}

impl TaskType {
    pub fn all() -> &'static [TaskType] {
        &[
            TaskType::Cleaning,
            TaskType::Maintenance,
            TaskType::Inspection,
            TaskType::Turndown,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Cleaning => "Cleaning",
            TaskType::Maintenance => "Maintenance",
            TaskType::Inspection => "Inspection",
            TaskType::Turndown => "Turndown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskType::Cleaning => egui_phosphor::regular::BROOM,
            TaskType::Maintenance => egui_phosphor::regular::WRENCH,
            TaskType::Inspection => egui_phosphor::regular::MAGNIFYING_GLASS,
            TaskType::Turndown => egui_phosphor::regular::MOON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn all() -> &'static [TaskPriority] {
        &[
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Urgent,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskPriority::Low => egui_phosphor::regular::ARROW_DOWN,
            TaskPriority::Medium => egui_phosphor::regular::MINUS,
            TaskPriority::High => egui_phosphor::regular::ARROW_UP,
            TaskPriority::Urgent => egui_phosphor::regular::WARNING,
        }
    }
}

/// Workflow state. Any state is reachable from any other by an explicit
/// update; the only transition side effect is the auto-timestamp rule in
/// the store (started_at / completed_at set on first entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => egui_phosphor::regular::CLOCK,
            TaskStatus::InProgress => egui_phosphor::regular::PLAY,
            TaskStatus::Completed => egui_phosphor::regular::CHECK_CIRCLE,
            TaskStatus::Cancelled => egui_phosphor::regular::X_CIRCLE,
        }
    }
}

/// A single housekeeping task. A task occupies `duration` consecutive days
/// on a room starting at `start_date`; room, staff and start date are all
/// optional so a task can exist unscheduled until it is placed on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub room_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    /// Days occupied, inclusive of the start date. Always >= 1.
    pub duration: u32,
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub notes: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new unscheduled task with sensible defaults.
    pub fn new(task_type: TaskType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            room_id: None,
            staff_id: None,
            start_date: None,
            duration: 1,
            task_type,
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            notes: String::new(),
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Last occupied date, `start + duration - 1`. None while unscheduled.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .map(|s| s + chrono::Duration::days(self.duration.max(1) as i64 - 1))
    }

    /// All dates the task occupies, in order. Empty while unscheduled.
    pub fn date_range(&self) -> Vec<NaiveDate> {
        let Some(start) = self.start_date else {
            return Vec::new();
        };
        (0..self.duration.max(1) as i64)
            .map(|i| start + chrono::Duration::days(i))
            .collect()
    }

    pub fn occupies_date(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date()) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Inclusive interval overlap: `start <= range_end && end >= range_start`.
    /// Every date-window query in the app goes through this predicate.
    pub fn overlaps_range(&self, range_start: NaiveDate, range_end: NaiveDate) -> bool {
        match (self.start_date, self.end_date()) {
            (Some(start), Some(end)) => start <= range_end && end >= range_start,
            _ => false,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() && self.room_id.is_some()
    }

    pub fn is_multi_day(&self) -> bool {
        self.duration > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scheduled(start: NaiveDate, duration: u32) -> Task {
        let mut t = Task::new(TaskType::Cleaning);
        t.start_date = Some(start);
        t.duration = duration;
        t
    }

    #[test]
    fn date_range_spans_duration() {
        let t = scheduled(d(2024, 3, 10), 3);
        assert_eq!(
            t.date_range(),
            vec![d(2024, 3, 10), d(2024, 3, 11), d(2024, 3, 12)]
        );
        assert_eq!(t.end_date(), Some(d(2024, 3, 12)));
    }

    #[test]
    fn unscheduled_task_has_empty_range() {
        let t = Task::new(TaskType::Inspection);
        assert!(t.date_range().is_empty());
        assert!(!t.occupies_date(d(2024, 3, 10)));
        assert!(!t.overlaps_range(d(2024, 1, 1), d(2024, 12, 31)));
    }

    #[test]
    fn occupies_date_is_inclusive_on_both_ends() {
        let t = scheduled(d(2024, 3, 10), 3);
        assert!(t.occupies_date(d(2024, 3, 10)));
        assert!(t.occupies_date(d(2024, 3, 12)));
        assert!(!t.occupies_date(d(2024, 3, 9)));
        assert!(!t.occupies_date(d(2024, 3, 13)));
    }

    #[test]
    fn overlap_matches_interval_intersection() {
        // Occupies 10..=12.
        let t = scheduled(d(2024, 3, 10), 3);
        assert!(t.overlaps_range(d(2024, 3, 12), d(2024, 3, 20)));
        assert!(!t.overlaps_range(d(2024, 3, 13), d(2024, 3, 20)));
        assert!(t.overlaps_range(d(2024, 3, 1), d(2024, 3, 10)));
        assert!(!t.overlaps_range(d(2024, 3, 1), d(2024, 3, 9)));
        // Range fully inside the task.
        assert!(t.overlaps_range(d(2024, 3, 11), d(2024, 3, 11)));
    }

    #[test]
    fn single_day_task_overlaps_only_its_own_date() {
        let t = scheduled(d(2024, 3, 10), 1);
        assert!(t.overlaps_range(d(2024, 3, 10), d(2024, 3, 10)));
        assert!(!t.overlaps_range(d(2024, 3, 11), d(2024, 3, 12)));
    }
}
