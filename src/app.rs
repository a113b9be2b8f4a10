use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::TimelineSettings;
use crate::model::dates::{format_day, today_utc};
use crate::model::{DateGrid, Project};
use crate::reschedule::{DateChange, Rescheduler};
use crate::ui;

/// Main application state.
pub struct TimelineApp {
    pub project: Project,
    pub grid: DateGrid,
    pub settings: TimelineSettings,
    pub settings_path: PathBuf,
    pub file_path: Option<PathBuf>,
    pub rescheduler: Rescheduler,
    pub selected_task: Option<String>,
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: TimelineSettings, settings_path: PathBuf) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let reopened = settings.last_project.clone().and_then(|path| {
            match crate::io::load_project(&path) {
                Ok(project) => Some((project, path)),
                Err(e) => {
                    warn!(error = %e, "could not reopen last project");
                    None
                }
            }
        });
        match reopened {
            Some((project, path)) => Self::with_project(project, Some(path), settings, settings_path),
            None => {
                let project = Project::sample(&settings.viewer_id);
                Self::with_project(project, None, settings, settings_path)
            }
        }
    }

    /// Build the app state around a project without touching the UI.
    pub fn with_project(
        project: Project,
        file_path: Option<PathBuf>,
        settings: TimelineSettings,
        settings_path: PathBuf,
    ) -> Self {
        let grid = DateGrid::new(project.range, settings.day_width);
        let mut app = Self {
            project,
            grid,
            settings,
            settings_path,
            file_path,
            rescheduler: Rescheduler::new(),
            selected_task: None,
            status_message: "Ready".to_string(),
        };
        app.report_invalid_tasks();
        app
    }

    /// Swap in another project, dropping any gesture in flight.
    pub fn set_project(&mut self, project: Project, file_path: Option<PathBuf>) {
        self.rescheduler.reset();
        self.grid = DateGrid::new(project.range, self.settings.day_width);
        self.project = project;
        self.file_path = file_path;
        self.selected_task = None;
        self.report_invalid_tasks();
    }

    fn report_invalid_tasks(&self) {
        for task in self.project.invalid_tasks() {
            warn!(
                task_id = %task.id,
                start = %format_day(task.start),
                due = %format_day(task.due),
                "task dates are inverted or outside the project range"
            );
        }
    }

    pub fn can_edit(&self) -> bool {
        self.project.can_edit(&self.settings.viewer_id)
    }

    // --- File operations ---

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["timeline.json", "json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    pub fn reload_project(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.load_from(path);
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match crate::io::load_project(&path) {
            Ok(project) => {
                info!(path = %path.display(), tasks = project.tasks.len(), "project loaded");
                self.set_project(project, Some(path.clone()));
                self.remember_last_project(Some(path));
                self.status_message = "Project loaded".to_string();
            }
            Err(e) => {
                error!(error = %e, "failed to load project");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_project(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_to(path);
        } else {
            self.save_project_as();
        }
    }

    pub fn save_project_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline Project", &["timeline.json", "json"])
            .set_file_name(format!("{}.timeline.json", self.project.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.remember_last_project(Some(path.clone()));
            self.write_to(path);
        }
    }

    fn write_to(&mut self, path: PathBuf) -> bool {
        self.project.touch();
        match crate::io::save_project(&self.project, &path) {
            Ok(()) => {
                debug!(path = %path.display(), "project saved");
                self.status_message = "Project saved".to_string();
                true
            }
            Err(e) => {
                error!(error = %e, "failed to save project");
                self.status_message = format!("Error saving: {}", e);
                false
            }
        }
    }

    fn remember_last_project(&mut self, path: Option<PathBuf>) {
        if self.settings.last_project == path {
            return;
        }
        self.settings.last_project = path;
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!(error = %e, "failed to save settings");
        }
    }

    // --- Rescheduling ---

    /// Apply reschedules committed by the timeline, then persist when the
    /// project has a file. A change that leaves the dates as they were is
    /// skipped, and nothing is written unless some task actually moved.
    pub fn apply_date_changes(&mut self, changes: Vec<DateChange>) {
        let mut updated = None;
        let mut failure = None;
        for change in &changes {
            let current = self
                .project
                .task(&change.task_id)
                .map(|t| (format_day(t.start), format_day(t.due)));
            if current.as_ref() == Some(&(change.start.clone(), change.due.clone())) {
                debug!(task_id = %change.task_id, "reschedule leaves dates unchanged");
                continue;
            }
            match self.project.apply_task_dates(&change.task_id, &change.start, &change.due) {
                Ok(task) => {
                    updated = Some(format!("Updated '{}' ({} → {})", task.name, change.start, change.due));
                }
                Err(e) => {
                    error!(task_id = %change.task_id, error = %e, "could not apply reschedule");
                    failure = Some(format!("Error updating task: {}", e));
                }
            }
        }

        let mut saved = true;
        if updated.is_some() {
            if let Some(path) = self.file_path.clone() {
                saved = self.write_to(path);
            }
        }
        // Apply errors take precedence, then save errors (already in the status bar).
        if let Some(message) = failure {
            self.status_message = message;
        } else if let (Some(message), true) = (updated, saved) {
            self.status_message = message;
        }
    }

    /// Zoom the timeline; ignored while a gesture is running.
    pub fn zoom(&mut self, steps: i32) {
        if steps == 0 || self.rescheduler.is_dragging() {
            return;
        }
        if steps > 0 {
            self.grid.zoom_in(self.settings.max_day_width);
        } else {
            self.grid.zoom_out(self.settings.min_day_width);
        }
        self.settings.day_width = self.grid.day_width();
        self.save_settings();
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_project();
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
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.project.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!(
                                "{} → {}",
                                format_day(self.project.range.start()),
                                format_day(self.project.range.due())
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let can_edit = self.can_edit();
        let today = today_utc();

        // Left panel: task list
        let mut task_action = ui::task_table::TaskTableAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(240.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                task_action = ui::task_table::show_task_table(
                    &self.project,
                    self.selected_task.as_deref(),
                    today,
                    ui,
                );
            });
        if let ui::task_table::TaskTableAction::Select(id) = task_action {
            self.selected_task = Some(id);
        }

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(
                    &self.project.tasks,
                    &self.grid,
                    &self.settings,
                    &mut self.rescheduler,
                    self.selected_task.as_deref(),
                    can_edit,
                    today,
                    ui,
                )
            })
            .inner;

        if let Some(id) = interaction.clicked_task {
            self.selected_task = Some(id);
        }
        self.apply_date_changes(interaction.changes);
        self.zoom(interaction.zoom_steps);
    }
}
