use std::path::Path;

use crate::model::{Directory, Task};

/// Export tasks to a semicolon-delimited CSV file.
///
/// Columns: Room ; Staff ; Type ; Priority ; Status ; Start ; Duration ; Notes
/// Room and staff columns carry the joined display names; unscheduled
/// fields are left blank. Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], directory: &Directory, path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record([
        "Room", "Staff", "Type", "Priority", "Status", "Start", "Duration", "Notes",
    ])
    .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        let room = task
            .room_id
            .and_then(|id| directory.room_number(id))
            .unwrap_or("");
        let staff = task
            .staff_id
            .and_then(|id| directory.staff_name(id))
            .unwrap_or("");
        let start = task
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        wtr.write_record([
            room,
            staff,
            task.task_type.label(),
            task.priority.label(),
            task.status.label(),
            &start,
            &task.duration.to_string(),
            &task.notes,
        ])
        .map_err(|e| format!("Failed to write task row: {}", e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(tasks.len())
}
