use eframe::egui;

use super::RoiWindow;

pub fn top_panel(window: &mut RoiWindow, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match &window.status_message {
                Some((message, _)) => ui.label(message),
                None => ui.label(" "),
            };
        });
    });
}
