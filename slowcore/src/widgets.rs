//! Custom widgets — pure black and white

use crate::theme::SlowColors;
use egui::{Response, Stroke, Ui, Widget};

/// Status bar: white bg, 1px black top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Two-line sidebar row: bold title over a small subtitle.
/// The active row gets a 4px black bar on its left edge.
pub struct EntryRow<'a> {
    title: &'a str,
    subtitle: &'a str,
    active: bool,
}

impl<'a> EntryRow<'a> {
    pub fn new(title: &'a str, subtitle: &'a str) -> Self {
        Self { title, subtitle, active: false }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl<'a> Widget for EntryRow<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 40.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, SlowColors::WHITE);
            painter.hline(rect.x_range(), rect.bottom(), Stroke::new(1.0, SlowColors::BLACK));

            if self.active || response.hovered() {
                let width = if self.active { 4.0 } else { 1.0 };
                let bar = egui::Rect::from_min_size(rect.min, egui::vec2(width, height - 1.0));
                painter.rect_filled(bar, 0.0, SlowColors::BLACK);
            }

            let left = rect.min.x + 10.0;
            let clip = painter.with_clip_rect(rect.shrink(1.0));
            clip.text(
                egui::pos2(left, rect.min.y + 6.0),
                egui::Align2::LEFT_TOP,
                self.title,
                egui::FontId::proportional(14.0),
                SlowColors::BLACK,
            );
            if self.active {
                // fake bold: second pass shifted by one pixel
                clip.text(
                    egui::pos2(left + 0.6, rect.min.y + 6.0),
                    egui::Align2::LEFT_TOP,
                    self.title,
                    egui::FontId::proportional(14.0),
                    SlowColors::BLACK,
                );
            }
            clip.text(
                egui::pos2(left, rect.max.y - 6.0),
                egui::Align2::LEFT_BOTTOM,
                self.subtitle,
                egui::FontId::proportional(11.0),
                SlowColors::BLACK,
            );
        }

        response
    }
}

/// Folder row for the folder picker. Selected rows are inverted.
pub struct FolderRow<'a> {
    name: &'a str,
    selected: bool,
}

impl<'a> FolderRow<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FolderRow<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (fill, text_color) = if self.selected {
                (SlowColors::BLACK, SlowColors::WHITE)
            } else {
                (SlowColors::WHITE, SlowColors::BLACK)
            };
            painter.rect_filled(rect, 0.0, fill);
            if response.hovered() && !self.selected {
                painter.rect_stroke(rect.shrink(0.5), 0.0, Stroke::new(1.0, SlowColors::BLACK));
            }

            painter.text(
                egui::pos2(rect.min.x + 4.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                "📁",
                egui::FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
