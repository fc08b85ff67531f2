use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::gesture::{DragController, ResizeController, ResizePreview};
use crate::model::{
    BoardViewport, Directory, Room, Staff, Task, TaskPriority, TaskStatus, TaskType,
};
use crate::store::{NewTask, TaskFilter, TaskPatch, TaskStore};
use crate::ui;
use crate::ui::task_editor::EditorState;
use crate::ui::task_list::ListFilters;

/// Main application state.
pub struct BoardApp {
    pub board_name: String,
    pub directory: Directory,
    pub store: TaskStore,
    pub viewport: BoardViewport,
    pub file_path: Option<PathBuf>,

    // Gesture controllers, one per UI session
    pub drag: DragController,
    pub resize: ResizeController,

    // Selection + editor
    pub selected_task: Option<Uuid>,
    pub editor: Option<EditorState>,
    pub list_filters: ListFilters,

    // Dialog state
    pub show_add_task: bool,
    pub show_about: bool,
    pub new_task_type: TaskType,
    pub new_task_priority: TaskPriority,
    pub new_task_room: Option<Uuid>,
    pub new_task_staff: Option<Uuid>,
    pub new_task_scheduled: bool,
    pub new_task_start: NaiveDate,
    pub new_task_duration: u32,
    pub new_task_notes: String,
    pub add_task_error: Option<String>,

    // Status message
    pub status_message: String,
}

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icons as a font fallback so they render inline
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let (directory, store) = Self::sample_board();
        let today = chrono::Local::now().date_naive();

        Self {
            board_name: "Sample Hotel".to_string(),
            directory,
            store,
            viewport: BoardViewport::new(today - chrono::Duration::days(1), 14),
            file_path: None,
            drag: DragController::new(),
            resize: ResizeController::new(),
            selected_task: None,
            editor: None,
            list_filters: ListFilters::default(),
            show_add_task: false,
            show_about: false,
            new_task_type: TaskType::Cleaning,
            new_task_priority: TaskPriority::Medium,
            new_task_room: None,
            new_task_staff: None,
            new_task_scheduled: false,
            new_task_start: today,
            new_task_duration: 1,
            new_task_notes: String::new(),
            add_task_error: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a small demo board so the grid has something to show.
    fn sample_board() -> (Directory, TaskStore) {
        let today = chrono::Local::now().date_naive();
        let rooms = vec![
            Room::new("101", 1),
            Room::new("102", 1),
            Room::new("103", 1),
            Room::new("201", 2),
            Room::new("202", 2),
        ];
        let staff = vec![
            Staff::new("Maria Santos", "Housekeeper"),
            Staff::new("Alex Chen", "Maintenance"),
            Staff::new("Priya Patel", "Housekeeper"),
            Staff::new("Jonas Weber", "Inspector"),
        ];

        let mut tasks = Vec::new();

        let mut t = Task::new(TaskType::Cleaning);
        t.room_id = Some(rooms[0].id);
        t.staff_id = Some(staff[0].id);
        t.start_date = Some(today);
        tasks.push(t);

        // Multi-day maintenance spanning the week, stacked with the
        // cleanings around it.
        let mut t = Task::new(TaskType::Maintenance);
        t.room_id = Some(rooms[0].id);
        t.staff_id = Some(staff[1].id);
        t.start_date = Some(today);
        t.duration = 3;
        t.priority = TaskPriority::High;
        t.notes = "Leaking radiator valve".to_string();
        tasks.push(t);

        let mut t = Task::new(TaskType::Inspection);
        t.room_id = Some(rooms[0].id);
        t.staff_id = Some(staff[3].id);
        t.start_date = Some(today + chrono::Duration::days(2));
        tasks.push(t);

        let mut t = Task::new(TaskType::Cleaning);
        t.room_id = Some(rooms[1].id);
        t.staff_id = Some(staff[2].id);
        t.start_date = Some(today + chrono::Duration::days(1));
        t.status = TaskStatus::Pending;
        tasks.push(t);

        let mut t = Task::new(TaskType::Turndown);
        t.room_id = Some(rooms[3].id);
        t.staff_id = Some(staff[0].id);
        t.start_date = Some(today + chrono::Duration::days(3));
        t.priority = TaskPriority::Low;
        tasks.push(t);

        // One unscheduled task waiting to be placed by clicking a cell.
        let mut t = Task::new(TaskType::Maintenance);
        t.staff_id = Some(staff[1].id);
        t.priority = TaskPriority::Urgent;
        t.notes = "Broken AC unit, room TBD".to_string();
        tasks.push(t);

        (Directory::new(rooms, staff), TaskStore::from_tasks(tasks))
    }

    // --- File operations ---

    pub fn new_board(&mut self) {
        self.board_name = "Untitled Board".to_string();
        self.store = TaskStore::new();
        self.file_path = None;
        self.clear_selection();
        self.drag = DragController::new();
        self.resize = ResizeController::new();
        self.status_message = "New board created".to_string();
    }

    pub fn open_board(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Board", &["board.json", "json"]);
        if let Some(dir) = crate::io::file::boards_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            match crate::io::load_board(&path) {
                Ok(board) => {
                    self.board_name = board.name;
                    self.directory = board.directory;
                    self.store = board.store;
                    self.file_path = Some(path);
                    self.clear_selection();
                    self.drag = DragController::new();
                    self.resize = ResizeController::new();
                    self.status_message = "Board loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_board(&mut self) {
        if let Some(path) = self.file_path.clone() {
            let mut board = crate::io::BoardFile::new(
                self.board_name.clone(),
                self.directory.clone(),
                self.store.clone(),
            );
            board.touch();
            match crate::io::save_board(&board, &path) {
                Ok(()) => self.status_message = "Board saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_board_as();
        }
    }

    pub fn save_board_as(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Board", &["board.json", "json"])
            .set_file_name(format!("{}.board.json", self.board_name));
        if let Some(dir) = crate::io::file::boards_dir() {
            let _ = std::fs::create_dir_all(&dir);
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.file_path = Some(path);
            self.save_board();
        }
    }

    pub fn export_csv(&mut self) {
        if self.store.is_empty() {
            self.status_message = "Nothing to export: the board has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.board_name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.store.tasks(), &self.directory, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Task operations ---

    pub fn create_task_from_dialog(&mut self) -> bool {
        let mut data = NewTask::new(self.new_task_type);
        data.priority = self.new_task_priority;
        data.room_id = self.new_task_room;
        data.staff_id = self.new_task_staff;
        data.notes = self.new_task_notes.clone();
        if self.new_task_scheduled {
            data.start_date = Some(self.new_task_start);
            data.duration = self.new_task_duration;
        }

        match self.store.create(data, &self.directory) {
            Ok(view) => {
                self.select_task(view.task.id);
                self.reset_dialog_fields();
                self.status_message = "Task added".to_string();
                true
            }
            Err(e) => {
                self.add_task_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn delete_task(&mut self, id: Uuid) {
        match self.store.delete(id) {
            Ok(_) => {
                if self.selected_task == Some(id) {
                    self.clear_selection();
                }
                self.status_message = "Task deleted".to_string();
            }
            Err(e) => {
                self.status_message = format!("Delete failed: {}", e);
            }
        }
    }

    pub fn select_task(&mut self, id: Uuid) {
        self.selected_task = Some(id);
        self.editor = self.store.get(id).map(EditorState::from_task);
    }

    pub fn clear_selection(&mut self) {
        self.selected_task = None;
        self.editor = None;
    }

    /// Apply the inline editor draft as a store patch.
    pub fn apply_editor(&mut self) {
        let Some(state) = &mut self.editor else {
            return;
        };
        let Some(task) = self.store.get(state.task_id) else {
            self.clear_selection();
            return;
        };
        let patch = state.to_patch(task);
        match self.store.update(state.task_id, patch, &self.directory) {
            Ok(view) => {
                self.editor = Some(EditorState::from_task(&view.task));
                self.status_message = "Task updated".to_string();
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    /// Commit the staged move. On success the pending move is consumed; on
    /// failure it stays staged so the user can retry or cancel.
    pub fn confirm_pending_move(&mut self) {
        let Some(pending) = self.drag.pending().cloned() else {
            return;
        };
        let patch = TaskPatch {
            start_date: Some(pending.to_date),
            room_id: pending.new_room_id,
            ..Default::default()
        };
        match self.store.update(pending.task_id, patch, &self.directory) {
            Ok(view) => {
                self.drag.cancel();
                self.refresh_editor();
                let room = view.room_number.as_deref().unwrap_or("—");
                self.status_message = format!(
                    "Moved {} to Room {} on {}",
                    view.task.task_type.label(),
                    room,
                    pending.to_date.format("%Y-%m-%d")
                );
            }
            Err(e) => {
                self.status_message = format!("Move failed: {}", e);
            }
        }
    }

    pub fn cancel_pending_move(&mut self) {
        self.drag.cancel();
        self.status_message = "Move cancelled".to_string();
    }

    /// Commit a finished resize gesture.
    pub fn commit_resize(&mut self, preview: ResizePreview) {
        let patch = TaskPatch {
            start_date: Some(preview.new_start),
            duration: Some(preview.new_duration),
            ..Default::default()
        };
        match self.store.update(preview.task_id, patch, &self.directory) {
            Ok(view) => {
                self.refresh_editor();
                self.status_message = format!(
                    "Resized {} to {} day{}",
                    view.task.task_type.label(),
                    view.task.duration,
                    if view.task.duration == 1 { "" } else { "s" }
                );
            }
            Err(e) => {
                self.status_message = format!("Resize failed: {}", e);
            }
        }
    }

    /// Stage placement of an unscheduled task onto a cell; goes through the
    /// same confirmation as a drag move.
    pub fn place_task(&mut self, task_id: Uuid, room_id: Uuid, date: NaiveDate) {
        self.drag.stage(task_id, date, date, room_id);
    }

    fn refresh_editor(&mut self) {
        if let Some(id) = self.selected_task {
            self.editor = self.store.get(id).map(EditorState::from_task);
        }
    }

    #[cfg(test)]
    fn for_tests(directory: Directory, store: TaskStore) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            board_name: "Test Board".to_string(),
            directory,
            store,
            viewport: BoardViewport::new(today, 14),
            file_path: None,
            drag: DragController::new(),
            resize: ResizeController::new(),
            selected_task: None,
            editor: None,
            list_filters: ListFilters::default(),
            show_add_task: false,
            show_about: false,
            new_task_type: TaskType::Cleaning,
            new_task_priority: TaskPriority::Medium,
            new_task_room: None,
            new_task_staff: None,
            new_task_scheduled: false,
            new_task_start: today,
            new_task_duration: 1,
            new_task_notes: String::new(),
            add_task_error: None,
            status_message: String::new(),
        }
    }

    fn reset_dialog_fields(&mut self) {
        self.new_task_type = TaskType::Cleaning;
        self.new_task_priority = TaskPriority::Medium;
        self.new_task_room = None;
        self.new_task_staff = None;
        self.new_task_scheduled = false;
        self.new_task_start = chrono::Local::now().date_naive();
        self.new_task_duration = 1;
        self.new_task_notes = String::new();
        self.add_task_error = None;
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_board();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.drag.pending().is_some() {
            self.cancel_pending_move();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Rooms: {} · Tasks: {}",
                                self.directory.rooms().len(),
                                self.store.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: editor + filtered task list
        let mut list_action = ui::task_list::TaskListAction::None;
        let mut editor_action = ui::task_editor::EditorAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(240.0)
            .min_width(200.0)
            .max_width(420.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let (Some(state), Some(id)) = (&mut self.editor, self.selected_task) {
                    if let Some(task) = self.store.get(id) {
                        editor_action =
                            ui::task_editor::show_task_editor(state, task, &self.directory, ui);
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                let filter = TaskFilter {
                    status: self.list_filters.status,
                    staff_id: self.list_filters.staff_id,
                    ..Default::default()
                };
                let tasks = self.store.get_all(&filter);
                list_action = ui::task_list::show_task_list(
                    &tasks,
                    &self.directory,
                    &mut self.list_filters,
                    self.selected_task,
                    ui,
                );
            });

        match editor_action {
            ui::task_editor::EditorAction::Apply => self.apply_editor(),
            ui::task_editor::EditorAction::Delete => {
                if let Some(id) = self.selected_task {
                    self.delete_task(id);
                }
            }
            ui::task_editor::EditorAction::None => {}
        }

        match list_action {
            ui::task_list::TaskListAction::Select(id) => self.select_task(id),
            ui::task_list::TaskListAction::Delete(id) => self.delete_task(id),
            ui::task_list::TaskListAction::Add => {
                self.show_add_task = true;
            }
            ui::task_list::TaskListAction::None => {}
        }

        // Central panel: the board grid
        let board_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let mut selected = self.selected_task;
        let mut board_action = ui::board::BoardAction::default();
        egui::CentralPanel::default().frame(board_frame).show(ctx, |ui| {
            board_action = ui::board::show_board(
                self.store.tasks(),
                &self.directory,
                &mut self.viewport,
                &mut self.drag,
                &mut self.resize,
                &mut selected,
                ui,
            );
        });
        if selected != self.selected_task {
            match selected {
                Some(id) => self.select_task(id),
                None => self.clear_selection(),
            }
        }

        if let Some(preview) = board_action.resize_committed.take() {
            self.commit_resize(preview);
        }
        if let Some((task_id, room_id, date)) = board_action.place_request.take() {
            self.place_task(task_id, room_id, date);
        }

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.drag.pending().is_some() {
            ui::dialogs::show_confirm_move_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
