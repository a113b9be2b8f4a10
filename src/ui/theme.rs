use egui::style::WidgetVisuals;
use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::TaskStatus;

// ── Palette (slate) ──────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(15, 23, 42);
pub const BG_PANEL: Color32 = Color32::from_rgb(22, 31, 52);
pub const BG_HEADER: Color32 = Color32::from_rgb(30, 41, 59);
pub const BG_WEEKEND: Color32 = Color32::from_rgb(19, 28, 48);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 50);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(51, 65, 85);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(129, 140, 248);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;
pub const TEXT_WARNING: Color32 = Color32::from_rgb(251, 191, 36);

pub const OVERDUE: Color32 = Color32::from_rgb(239, 68, 68);
pub const DUE_SOON: Color32 = Color32::from_rgb(234, 179, 8);

pub const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);
pub const GRID_LINE: Color32 = Color32::from_rgb(36, 48, 68);
pub const HANDLE_COLOR: Color32 = Color32::from_rgba_premultiplied(200, 200, 200, 180);
pub const PROGRESS_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 50);

pub const GHOST_FILL: Color32 = Color32::from_rgba_premultiplied(30, 58, 110, 150);
pub const GHOST_BORDER: Color32 = Color32::from_rgb(96, 165, 250);
pub const GHOST_TEXT: Color32 = Color32::from_rgb(191, 219, 254);

/// Bar colour per status (gray / blue / green).
pub fn status_color(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::NotStarted => Color32::from_rgb(156, 163, 175),
        TaskStatus::InProgress => Color32::from_rgb(96, 165, 250),
        TaskStatus::Completed => Color32::from_rgb(74, 222, 128),
    }
}

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 60.0;
/// Space between the header and the first row of bars.
pub const BARS_TOP_PAD: f32 = 10.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 340.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.0)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Visuals ──────────────────────────────────────────────────────────────────

fn widget_state(widget: &mut WidgetVisuals, fill: Color32, border: Color32, text: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = Stroke::new(1.0, border);
    widget.fg_stroke = text;
    widget.rounding = Rounding::same(4.0);
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_HEADER;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_WEEKEND;

    let widgets = &mut visuals.widgets;
    widget_state(&mut widgets.noninteractive, BG_PANEL, BORDER_SUBTLE, Stroke::new(1.0, TEXT_SECONDARY));
    widget_state(&mut widgets.inactive, BG_HEADER, BORDER_SUBTLE, Stroke::new(1.0, TEXT_PRIMARY));
    widget_state(&mut widgets.hovered, Color32::from_rgb(45, 58, 80), ACCENT, Stroke::new(1.0, TEXT_PRIMARY));
    widget_state(&mut widgets.active, Color32::from_rgb(55, 68, 92), ACCENT, Stroke::new(1.5, Color32::WHITE));
    widget_state(&mut widgets.open, BG_HEADER, ACCENT, Stroke::new(1.0, TEXT_PRIMARY));

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, BORDER_ACCENT);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    ctx.style_mut(|style| {
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 3.0);
    });
}
