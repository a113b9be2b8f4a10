use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::TimelineApp;
use crate::config::TimelineSettings;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open...", icons::FOLDER_OPEN)).clicked() {
                app.open_project();
                ui.close_menu();
            }
            if ui
                .add_enabled(app.file_path.is_some(), egui::Button::new(format!("{}  Reload", icons::ARROW_CLOCKWISE)))
                .clicked()
            {
                app.reload_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Save          Ctrl+S", icons::FLOPPY_DISK)).clicked() {
                app.save_project();
                ui.close_menu();
            }
            if ui.button("      Save As...").clicked() {
                app.save_project_as();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui
                .button(format!("{}  Zoom In        Ctrl+Scroll ↑", icons::MAGNIFYING_GLASS_PLUS))
                .clicked()
            {
                app.zoom(1);
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Zoom Out      Ctrl+Scroll ↓", icons::MAGNIFYING_GLASS_MINUS))
                .clicked()
            {
                app.zoom(-1);
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                let dir = TimelineSettings::config_dir();
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(path = %dir.display(), error = %e, "failed to open settings folder");
                }
                ui.close_menu();
            }
        });

        // Right-aligned project name and access
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if !app.can_edit() {
                ui.label(
                    RichText::new(format!("{} read-only", icons::LOCK))
                        .size(11.0)
                        .color(theme::TEXT_WARNING),
                );
            }
            let unsaved = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, unsaved))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
