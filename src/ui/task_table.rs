use chrono::NaiveDate;
use egui::{Color32, RichText, Stroke, Ui};

use crate::model::{Deadline, Project};
use crate::ui::theme;

/// Actions that the task table can request.
pub enum TaskTableAction {
    None,
    Select(String),
}

/// Render the left-side task list with the project's progress summary.
///
/// `today` drives the overdue / due-soon highlighting.
pub fn show_task_table(
    project: &Project,
    selected_task: Option<&str>,
    today: NaiveDate,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;
    let tasks = &project.tasks;
    let range = &project.range;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Tasks").strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    show_progress_summary(project, ui);
    ui.add_space(4.0);
    ui.separator();

    // Column headers
    ui.horizontal(|ui| {
        ui.add_space(12.0);
        for (text, width) in [("TASK", 150.0), ("START", 64.0), ("DUE", 64.0)] {
            ui.allocate_ui(egui::vec2(width, 16.0), |ui| {
                ui.label(RichText::new(text).size(9.0).color(theme::TEXT_DIM).strong());
            });
        }
    });

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected_task == Some(task.id.as_str());
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                let deadline = task.deadline(today);
                let warning = if !task.has_valid_dates() {
                    Some("Start is after due; the task cannot be drawn or dragged on the timeline")
                } else if !range.contains(task.start) || !range.contains(task.due) {
                    Some("Dates fall outside the project range")
                } else {
                    None
                };
                let edge = match deadline {
                    Deadline::Overdue => Stroke::new(1.0, theme::OVERDUE),
                    Deadline::DueSoon { .. } => Stroke::new(1.0, theme::DUE_SOON),
                    Deadline::OnTrack => Stroke::NONE,
                };

                let frame = egui::Frame::none()
                    .fill(row_bg)
                    .stroke(edge)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 4.0));

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, theme::status_color(task.status));

                        let name_text = RichText::new(task.display_label()).size(12.0).color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        });
                        ui.add(egui::Label::new(name_text).truncate());

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            if let Some(warning) = warning {
                                ui.label(RichText::new("⚠").color(theme::TEXT_WARNING))
                                    .on_hover_text(warning);
                            }
                            if let Some((text, color)) = deadline_badge(deadline) {
                                ui.label(RichText::new(text).size(9.5).color(color).strong());
                            }
                            ui.label(
                                RichText::new(task.status.label())
                                    .size(10.0)
                                    .color(theme::status_color(task.status)),
                            );
                            ui.label(
                                RichText::new(task.due.format("%m/%d").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                            ui.label(
                                RichText::new(task.start.format("%m/%d").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                });

                // Make entire row clickable
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id.as_str())),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskTableAction::Select(task.id.clone());
                }
                ui.add_space(1.0);
            }
        });

    action
}

/// Completion bar plus per-status counts.
fn show_progress_summary(project: &Project, ui: &mut Ui) {
    let percent = project.progress_percent();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Progress").size(11.0).color(theme::TEXT_SECONDARY));
        ui.add(
            egui::ProgressBar::new(f32::from(percent) / 100.0)
                .desired_width(160.0)
                .fill(theme::ACCENT)
                .text(format!("{}%", percent)),
        );
    });
    ui.horizontal_wrapped(|ui| {
        for (status, count) in project.status_counts() {
            let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(dot_rect.center(), 3.0, theme::status_color(status));
            ui.label(
                RichText::new(format!("{} {}", status.label(), count))
                    .size(10.5)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
        }
    });
}

fn deadline_badge(deadline: Deadline) -> Option<(String, Color32)> {
    match deadline {
        Deadline::Overdue => Some(("Overdue".to_string(), theme::OVERDUE)),
        Deadline::DueSoon { days_left: 0 } => Some(("Due today".to_string(), theme::DUE_SOON)),
        Deadline::DueSoon { days_left } => Some((format!("Due in {}d", days_left), theme::DUE_SOON)),
        Deadline::OnTrack => None,
    }
}
