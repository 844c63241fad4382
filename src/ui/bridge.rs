use std::sync::mpsc::{self, Sender};

use eframe::egui;
use image::RgbImage;

use crate::error::{AnnotateError, Result};
use crate::models::PixelRect;
use crate::session::{DisplaySurface, RectSelector};

pub enum GuiRequest {
    Show(RgbImage),
    Select {
        image: RgbImage,
        reply: Sender<PixelRect>,
    },
    Finished(RgbImage),
    Close,
}

#[derive(Clone)]
pub struct WindowHandle {
    requests: Sender<GuiRequest>,
    ctx: egui::Context,
}

impl WindowHandle {
    pub fn new(requests: Sender<GuiRequest>, ctx: egui::Context) -> Self {
        Self { requests, ctx }
    }

    fn send(&self, request: GuiRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| AnnotateError::InputUnavailable("window closed".into()))?;
        self.ctx.request_repaint();
        Ok(())
    }

    pub fn finish(&self, image: &RgbImage) -> Result<()> {
        self.send(GuiRequest::Finished(image.clone()))
    }

    pub fn close(&self) {
        let _ = self.send(GuiRequest::Close);
    }
}

impl RectSelector for WindowHandle {
    fn select_rect(&mut self, image: &RgbImage) -> Result<PixelRect> {
        let (reply, selected) = mpsc::channel();
        self.send(GuiRequest::Select {
            image: image.clone(),
            reply,
        })?;
        selected
            .recv()
            .map_err(|_| AnnotateError::InputUnavailable("selection window closed".into()))
    }
}

impl DisplaySurface for WindowHandle {
    fn show(&mut self, image: &RgbImage) -> Result<()> {
        self.send(GuiRequest::Show(image.clone()))
    }
}
