use eframe::egui;

use super::RoiWindow;
use crate::models::PixelRect;

fn screen_to_pixel(pos: egui::Pos2, image_rect: egui::Rect, size: (u32, u32)) -> (u32, u32) {
    let u = ((pos.x - image_rect.left()) / image_rect.width()).clamp(0.0, 1.0);
    let v = ((pos.y - image_rect.top()) / image_rect.height()).clamp(0.0, 1.0);
    (
        (u * size.0 as f32).round() as u32,
        (v * size.1 as f32).round() as u32,
    )
}

pub fn selection_from_points(
    start: egui::Pos2,
    end: egui::Pos2,
    image_rect: egui::Rect,
    size: (u32, u32),
    from_center: bool,
) -> PixelRect {
    // 中心模式下以起点为中心镜像拖动位置
    let start = if from_center {
        start - (end - start)
    } else {
        start
    };
    let (ax, ay) = screen_to_pixel(start, image_rect, size);
    let (bx, by) = screen_to_pixel(end, image_rect, size);
    PixelRect {
        x: ax.min(bx),
        y: ay.min(by),
        width: ax.abs_diff(bx),
        height: ay.abs_diff(by),
    }
}

fn pixel_to_screen(rect: PixelRect, image_rect: egui::Rect, size: (u32, u32)) -> egui::Rect {
    let sx = image_rect.width() / size.0 as f32;
    let sy = image_rect.height() / size.1 as f32;
    egui::Rect::from_min_size(
        image_rect.min + egui::vec2(rect.x as f32 * sx, rect.y as f32 * sy),
        egui::vec2(rect.width as f32 * sx, rect.height as f32 * sy),
    )
}

pub fn central_panel(window: &mut RoiWindow, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(size) = window.image.as_ref().map(|img| img.dimensions()) else {
            ui.centered_and_justified(|ui| ui.label("等待图像..."));
            return;
        };
        if size.0 == 0 || size.1 == 0 {
            return;
        }

        if window.texture.is_none() {
            if let Some(image) = &window.image {
                window.texture = Some(ui.ctx().load_texture(
                    "current_image",
                    egui::ColorImage::from_rgb([size.0 as _, size.1 as _], image.as_raw()),
                    Default::default(),
                ));
            }
        }
        let Some(texture_id) = window.texture.as_ref().map(|t| t.id()) else {
            return;
        };

        let available_size = ui.available_size();
        let image_size = egui::vec2(size.0 as f32, size.1 as f32);
        let scale = (available_size.x / image_size.x).min(available_size.y / image_size.y);
        let displayed_size = image_size * scale;

        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
        let image_rect = egui::Rect::from_center_size(response.rect.center(), displayed_size);
        painter.image(
            texture_id,
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if window.reply.is_some() {
            if response.drag_started() {
                window.drawing_start = response.interact_pointer_pos();
            }
            if response.dragged() {
                if let (Some(start), Some(pointer)) =
                    (window.drawing_start, response.interact_pointer_pos())
                {
                    window.selection = Some(selection_from_points(
                        start,
                        pointer,
                        image_rect,
                        size,
                        window.from_center,
                    ));
                }
            }
            if response.drag_stopped() {
                window.drawing_start = None;
            }

            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                window.confirm_selection();
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                window.selection = None;
                window.drawing_start = None;
                window.show_status("已清除选区");
            }
        }

        if window.reply.is_some() && window.show_crosshair {
            if let Some(pointer) = ui.input(|i| i.pointer.hover_pos()) {
                if image_rect.contains(pointer) {
                    let stroke = egui::Stroke::new(1.0, egui::Color32::YELLOW);
                    painter.line_segment(
                        [
                            egui::pos2(image_rect.left(), pointer.y),
                            egui::pos2(image_rect.right(), pointer.y),
                        ],
                        stroke,
                    );
                    painter.line_segment(
                        [
                            egui::pos2(pointer.x, image_rect.top()),
                            egui::pos2(pointer.x, image_rect.bottom()),
                        ],
                        stroke,
                    );
                }
            }
        }

        if let Some(selection) = window.selection {
            painter.rect_stroke(
                pixel_to_screen(selection, image_rect, size),
                0.0,
                egui::Stroke::new(2.0, egui::Color32::YELLOW),
                egui::StrokeKind::Middle,
            );
        }
    });
}
