//! Slow Computer theme — e-ink optimized
//!
//! Pure black and white with 1px black outlines. Selection is the only
//! place a grey is allowed, so highlighted text stays readable.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Only two colors exist on this machine.
pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    /// Text selection background.
    pub const SELECTION: Color32 = Color32::from_rgb(160, 160, 160);
}

/// Theme configuration for slow computer apps
pub struct SlowTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub font_size_mono: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 22.0,
            font_size_small: 11.0,
            font_size_mono: 13.0,
            window_padding: 8.0,
            item_spacing: 4.0,
        }
    }
}

impl SlowTheme {
    /// Apply the slow computer theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_mono, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = SlowColors::WHITE;
        visuals.panel_fill = SlowColors::WHITE;
        visuals.faint_bg_color = SlowColors::WHITE;
        visuals.extreme_bg_color = SlowColors::WHITE;
        visuals.code_bg_color = SlowColors::WHITE;
        visuals.hyperlink_color = SlowColors::BLACK;
        visuals.override_text_color = Some(SlowColors::BLACK);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, SlowColors::BLACK);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        for widget in [
            &mut visuals.widgets.noninteractive,
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
            &mut visuals.widgets.open,
        ] {
            widget.bg_fill = SlowColors::WHITE;
            widget.weak_bg_fill = SlowColors::WHITE;
            widget.bg_stroke = Stroke::new(1.0, SlowColors::BLACK);
            widget.fg_stroke = Stroke::new(1.0, SlowColors::BLACK);
            widget.rounding = Rounding::ZERO;
        }

        visuals.selection.bg_fill = SlowColors::SELECTION;
        visuals.selection.stroke = Stroke::new(1.0, SlowColors::BLACK);

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Font size for a markdown heading of `level` (1 = largest).
    pub fn heading_size(&self, level: u8) -> f32 {
        let step = (self.font_size_heading - self.font_size_body) / 4.0;
        let level = level.clamp(1, 6) as f32;
        (self.font_size_heading - step * (level - 1.0)).max(self.font_size_body)
    }

    /// Title bar: white fill, 1px black bottom border
    pub fn title_bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SlowColors::WHITE)
            .stroke(Stroke::new(1.0, SlowColors::BLACK))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }

    /// Pane frame: white fill with inner padding, no outline
    pub fn pane_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(SlowColors::WHITE)
            .inner_margin(egui::Margin::same(8.0))
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Strip Tab and Cmd+/- before widgets see them.
///
/// Tab characters typed into text become `tab_spaces` spaces (or vanish when
/// zero). egui has already moved focus for the Tab by the time `update()`
/// runs, so the previous focus is restored here.
pub fn consume_special_keys_with_tab(ctx: &egui::Context, tab_spaces: usize) {
    let tab_pressed = ctx.input(|i| {
        i.events
            .iter()
            .any(|e| matches!(e, egui::Event::Key { key: egui::Key::Tab, pressed: true, .. }))
    });
    let focused_before = if tab_pressed { ctx.memory(|mem| mem.focused()) } else { None };

    let spaces = " ".repeat(tab_spaces);
    ctx.input_mut(|i| {
        i.events.retain_mut(|event| match event {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Key { key, modifiers, .. } if modifiers.command => {
                !matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals)
            }
            egui::Event::Text(text) if text.contains('\t') => {
                *text = text.replace('\t', &spaces);
                !text.is_empty()
            }
            _ => true,
        });
    });

    if !tab_pressed {
        return;
    }
    match focused_before {
        Some(id) => ctx.memory_mut(|mem| mem.request_focus(id)),
        None => {
            if let Some(id) = ctx.memory(|mem| mem.focused()) {
                ctx.memory_mut(|mem| mem.surrender_focus(id));
            }
        }
    }
}
