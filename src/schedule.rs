//! Cell occupancy, vertical track packing and row heights for the board
//! grid. Everything here is a pure function over a snapshot of the task
//! collection; tracks are recomputed per render and never persisted.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::{Room, Task};

/// Pixel height of one task block.
pub const TASK_HEIGHT: f32 = 30.0;
/// Vertical gap between stacked task blocks.
pub const TASK_SPACING: f32 = 2.0;
/// Row height while a room shows at most `TASKS_BEFORE_EXPAND` tracks.
pub const BASE_ROW_HEIGHT: f32 = 67.0;
/// How many tracks fit a base-height row before it has to grow.
pub const TASKS_BEFORE_EXPAND: usize = 2;

/// All tasks occupying the given room on the given date. This is the
/// occupancy primitive every other computation in this module builds on.
pub fn tasks_in_cell(tasks: &[Task], room_id: Uuid, date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.room_id == Some(room_id) && t.occupies_date(date))
        .collect()
}

/// Assign each task in a cell a vertical track index 0,1,2,...
///
/// Sort order is duration descending then start date ascending, with ties
/// resolved by stable input order. Longer tasks take the upper tracks so a
/// multi-day bar keeps its position while shorter tasks come and go around
/// it; the ordering is deterministic so repeated renders agree.
pub fn tracks_for_cell(cell_tasks: &[&Task]) -> HashMap<Uuid, usize> {
    let mut sorted: Vec<&Task> = cell_tasks.to_vec();
    sorted.sort_by(|a, b| {
        b.duration
            .cmp(&a.duration)
            .then(a.start_date.cmp(&b.start_date))
    });
    sorted
        .iter()
        .enumerate()
        .map(|(track, t)| (t.id, track))
        .collect()
}

/// Track index for one task, consistent across every date it occupies.
///
/// Per-cell track assignment alone would let a multi-day task jump between
/// tracks from one column to the next. Instead we gather every task sharing
/// *any* cell with this one across its full span, union them, and assign
/// tracks over that union. A task overlapping only one day of the span can
/// therefore influence the track on all days; that is intended.
pub fn track_for_task(tasks: &[Task], task: &Task) -> usize {
    let Some(room_id) = task.room_id else {
        return 0;
    };

    let mut overlapping: HashSet<Uuid> = HashSet::new();
    for date in task.date_range() {
        for t in tasks_in_cell(tasks, room_id, date) {
            overlapping.insert(t.id);
        }
    }

    // Re-filter from the snapshot so the union keeps stable input order.
    let union: Vec<&Task> = tasks.iter().filter(|t| overlapping.contains(&t.id)).collect();
    tracks_for_cell(&union).get(&task.id).copied().unwrap_or(0)
}

/// Pixel offset of a task block from the top of its room row.
pub fn vertical_offset(tasks: &[Task], task: &Task) -> f32 {
    track_for_task(tasks, task) as f32 * (TASK_HEIGHT + TASK_SPACING) + 1.0
}

/// Row height per room over the visible dates: base height until a cell
/// needs more than `TASKS_BEFORE_EXPAND` tracks, then one block per extra
/// track.
pub fn row_heights(
    tasks: &[Task],
    rooms: &[Room],
    dates: &[NaiveDate],
) -> HashMap<Uuid, f32> {
    let mut heights = HashMap::with_capacity(rooms.len());
    for room in rooms {
        let mut max_tracks = 0;
        for &date in dates {
            let cell = tasks_in_cell(tasks, room.id, date);
            if !cell.is_empty() {
                max_tracks = max_tracks.max(tracks_for_cell(&cell).len());
            }
        }
        let height = if max_tracks > TASKS_BEFORE_EXPAND {
            BASE_ROW_HEIGHT + (max_tracks - TASKS_BEFORE_EXPAND) as f32 * (TASK_HEIGHT + TASK_SPACING)
        } else {
            BASE_ROW_HEIGHT
        };
        heights.insert(room.id, height);
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskType, Room};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(room: Uuid, start: NaiveDate, duration: u32) -> Task {
        let mut t = Task::new(TaskType::Cleaning);
        t.room_id = Some(room);
        t.start_date = Some(start);
        t.duration = duration;
        t
    }

    #[test]
    fn cell_occupancy_excludes_ended_and_foreign_tasks() {
        let room = Uuid::new_v4();
        let other_room = Uuid::new_v4();
        let mon = d(2024, 3, 4);
        let wed = d(2024, 3, 6);

        let a = task(room, mon, 3); // Mon..Wed
        let b = task(room, mon + chrono::Duration::days(1), 1); // Tue only
        let c = task(room, wed, 1); // Wed
        let elsewhere = task(other_room, wed, 1);
        let tasks = vec![a.clone(), b.clone(), c.clone(), elsewhere];

        let cell: Vec<Uuid> = tasks_in_cell(&tasks, room, wed)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(cell, vec![a.id, c.id]);
    }

    #[test]
    fn tracks_sort_longest_first() {
        let room = Uuid::new_v4();
        let wed = d(2024, 3, 6);
        let long = task(room, d(2024, 3, 4), 3);
        let short = task(room, wed, 1);
        let tasks = vec![short.clone(), long.clone()];

        let cell = tasks_in_cell(&tasks, room, wed);
        let tracks = tracks_for_cell(&cell);
        assert_eq!(tracks[&long.id], 0);
        assert_eq!(tracks[&short.id], 1);
    }

    #[test]
    fn equal_duration_breaks_tie_on_start_date() {
        let room = Uuid::new_v4();
        let early = task(room, d(2024, 3, 4), 2);
        let late = task(room, d(2024, 3, 5), 2);
        let tasks = vec![late.clone(), early.clone()];

        let cell = tasks_in_cell(&tasks, room, d(2024, 3, 5));
        let tracks = tracks_for_cell(&cell);
        assert_eq!(tracks[&early.id], 0);
        assert_eq!(tracks[&late.id], 1);
    }

    #[test]
    fn tracks_are_deterministic_across_calls() {
        let room = Uuid::new_v4();
        let mon = d(2024, 3, 4);
        let tasks = vec![
            task(room, mon, 2),
            task(room, mon, 2),
            task(room, mon, 1),
        ];
        let cell = tasks_in_cell(&tasks, room, mon);
        let first = tracks_for_cell(&cell);
        for _ in 0..10 {
            assert_eq!(tracks_for_cell(&cell), first);
        }
        // Distinct tracks per concurrently displayed task.
        let mut seen: Vec<usize> = first.values().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn track_is_stable_across_a_multi_day_span() {
        let room = Uuid::new_v4();
        let mon = d(2024, 3, 4);
        // Long task Mon..Wed; a one-day task on Tue shares only that cell.
        let long = task(room, mon, 3);
        let tue_only = task(room, mon + chrono::Duration::days(1), 1);
        let tasks = vec![tue_only.clone(), long.clone()];

        // The union across the span puts the long task on track 0 on every
        // day it occupies, including days where it is alone in the cell.
        assert_eq!(track_for_task(&tasks, &long), 0);
        assert_eq!(track_for_task(&tasks, &tue_only), 1);
    }

    #[test]
    fn unassigned_task_defaults_to_track_zero() {
        let t = Task::new(TaskType::Inspection);
        assert_eq!(track_for_task(&[t.clone()], &t), 0);
        assert_eq!(vertical_offset(&[t.clone()], &t), 1.0);
    }

    #[test]
    fn monday_scenario_from_the_ops_board() {
        // Room R1: A(start=Mon,dur=3), B(start=Tue,dur=1), C(start=Wed,dur=1).
        let room = Room::new("R1", 1);
        let mon = d(2024, 3, 4);
        let tue = d(2024, 3, 5);
        let wed = d(2024, 3, 6);
        let a = task(room.id, mon, 3);
        let b = task(room.id, tue, 1);
        let c = task(room.id, wed, 1);
        let tasks = vec![a.clone(), b.clone(), c.clone()];

        // On Wed: B ended Tue, so the cell is {A, C}.
        let cell: Vec<Uuid> = tasks_in_cell(&tasks, room.id, wed)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(cell, vec![a.id, c.id]);

        let tracks = tracks_for_cell(&tasks_in_cell(&tasks, room.id, wed));
        assert_eq!(tracks[&a.id], 0);
        assert_eq!(tracks[&c.id], 1);
    }

    #[test]
    fn row_height_grows_past_the_expand_threshold() {
        let room = Room::new("201", 2);
        let quiet_room = Room::new("202", 2);
        let mon = d(2024, 3, 4);
        let tasks = vec![
            task(room.id, mon, 1),
            task(room.id, mon, 1),
            task(room.id, mon, 1),
        ];
        let rooms = vec![room.clone(), quiet_room.clone()];
        let heights = row_heights(&tasks, &rooms, &[mon]);

        assert_eq!(
            heights[&room.id],
            BASE_ROW_HEIGHT + (TASK_HEIGHT + TASK_SPACING)
        );
        assert_eq!(heights[&quiet_room.id], BASE_ROW_HEIGHT);
    }

    #[test]
    fn two_stacked_tasks_still_fit_the_base_row() {
        let room = Room::new("203", 2);
        let mon = d(2024, 3, 4);
        let tasks = vec![task(room.id, mon, 1), task(room.id, mon, 1)];
        let heights = row_heights(&tasks, &[room.clone()], &[mon]);
        assert_eq!(heights[&room.id], BASE_ROW_HEIGHT);
    }
}
