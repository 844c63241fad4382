pub mod bridge;
mod central;
mod side;
mod top;

use std::sync::mpsc::{Receiver, Sender};

use eframe::egui;
use image::RgbImage;

use crate::models::PixelRect;
use bridge::GuiRequest;

pub use bridge::WindowHandle;

pub struct RoiWindow {
    pub requests: Receiver<GuiRequest>,
    pub image: Option<RgbImage>,
    pub texture: Option<egui::TextureHandle>,
    pub reply: Option<Sender<PixelRect>>,
    pub drawing_start: Option<egui::Pos2>,
    pub selection: Option<PixelRect>,
    pub status_message: Option<(String, f32)>,
    pub finished: bool,
    pub show_crosshair: bool,
    pub from_center: bool, // 拖动起点作为选区中心
}

impl RoiWindow {
    pub fn new(requests: Receiver<GuiRequest>) -> Self {
        Self {
            requests,
            image: None,
            texture: None,
            reply: None,
            drawing_start: None,
            selection: None,
            status_message: None,
            finished: false,
            show_crosshair: true,
            from_center: false,
        }
    }

    pub fn show_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), 4.0));
    }

    fn set_image(&mut self, image: RgbImage) {
        self.image = Some(image);
        self.texture = None;
    }

    fn handle_requests(&mut self, ctx: &egui::Context) {
        while let Ok(request) = self.requests.try_recv() {
            match request {
                GuiRequest::Show(image) => self.set_image(image),
                GuiRequest::Select { image, reply } => {
                    self.set_image(image);
                    self.reply = Some(reply);
                    self.selection = None;
                    self.drawing_start = None;
                    self.show_status("请拖动鼠标框选感兴趣区域，回车确认");
                }
                GuiRequest::Finished(image) => {
                    self.set_image(image);
                    self.finished = true;
                    self.show_status("标注完成，关闭窗口退出");
                }
                GuiRequest::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }

    pub fn confirm_selection(&mut self) {
        let Some(rect) = self.selection else {
            self.show_status("尚未框选区域");
            return;
        };
        if rect.width == 0 || rect.height == 0 {
            self.show_status("选区为空，请重新框选");
            return;
        }
        if let Some(reply) = self.reply.take() {
            let _ = reply.send(rect);
            self.selection = None;
            self.show_status("已提交选区，请在终端输入 Y 完成或回车继续");
        }
    }
}

impl eframe::App for RoiWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_requests(ctx);

        if let Some((_, remaining)) = &mut self.status_message {
            *remaining -= ctx.input(|i| i.stable_dt);
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }

        top::top_panel(self, ctx);
        side::side_panel(self, ctx);
        central::central_panel(self, ctx);

        // 会话线程随时可能发来新请求
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn rect(width: u32, height: u32) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn select_request_arms_the_window() {
        let (tx, rx) = mpsc::channel();
        let (reply, _selected) = mpsc::channel();
        let mut window = RoiWindow::new(rx);
        tx.send(GuiRequest::Select {
            image: RgbImage::new(4, 4),
            reply,
        })
        .unwrap();
        window.handle_requests(&egui::Context::default());
        assert!(window.reply.is_some());
        assert_eq!(window.image.as_ref().map(|i| i.dimensions()), Some((4, 4)));
    }

    #[test]
    fn empty_selection_is_not_sent() {
        let (_tx, rx) = mpsc::channel();
        let (reply, selected) = mpsc::channel();
        let mut window = RoiWindow::new(rx);
        window.reply = Some(reply);
        window.selection = Some(rect(0, 5));
        window.confirm_selection();
        assert!(window.reply.is_some());
        assert!(selected.try_recv().is_err());
    }

    #[test]
    fn confirmed_selection_reaches_the_session() {
        let (_tx, rx) = mpsc::channel();
        let (reply, selected) = mpsc::channel();
        let mut window = RoiWindow::new(rx);
        window.reply = Some(reply);
        window.selection = Some(rect(3, 5));
        window.confirm_selection();
        assert!(window.reply.is_none());
        assert_eq!(selected.try_recv().unwrap(), rect(3, 5));
    }
}
