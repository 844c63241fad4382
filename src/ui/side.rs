use eframe::egui;

use super::RoiWindow;

pub fn side_panel(window: &mut RoiWindow, ctx: &egui::Context) {
    egui::SidePanel::left("side_panel")
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("操作说明");
            ui.label("按住左键拖动框选区域");
            ui.label("Enter: 提交选区");
            ui.label("Esc: 清除选区");
            ui.label("提交后在终端输入 Y 完成，其他输入继续添加");

            ui.separator();
            if let Some(image) = &window.image {
                ui.label(format!("图像尺寸: {} x {}", image.width(), image.height()));
            }

            if let Some(rect) = window.selection {
                ui.label(format!(
                    "当前选区: x={} y={} w={} h={}",
                    rect.x, rect.y, rect.width, rect.height
                ));
                if window.reply.is_some() && ui.button("提交选区").clicked() {
                    window.confirm_selection();
                }
            }

            ui.separator();
            let state = if window.finished {
                "已完成"
            } else if window.reply.is_some() {
                "等待框选"
            } else {
                "等待终端确认"
            };
            ui.label(format!("状态: {state}"));
        });
}
