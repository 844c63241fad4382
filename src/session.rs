use image::RgbImage;
use log::{info, warn};

use crate::error::{AnnotateError, Result};
use crate::font::LabelFont;
use crate::geometry;
use crate::models::{PixelRect, Region, RoiEntry, SessionState};
use crate::render::{self, BoxStyle};

pub trait RectSelector {
    fn select_rect(&mut self, image: &RgbImage) -> Result<PixelRect>;
}

pub trait DisplaySurface {
    fn show(&mut self, image: &RgbImage) -> Result<()>;
}

pub trait InputChannel {
    fn read_line(&mut self) -> Result<String>;
}

pub struct RoiSession {
    image: RgbImage,
    preview: RgbImage,
    entries: Vec<RoiEntry>,
    counter: usize,
    state: SessionState,
    style: BoxStyle,
    font: LabelFont,
}

impl RoiSession {
    pub fn new(image: RgbImage, font: LabelFont, style: BoxStyle) -> Self {
        Self {
            preview: image.clone(),
            image,
            entries: Vec::new(),
            counter: 0,
            state: SessionState::Collecting,
            style,
            font,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn entries(&self) -> &[RoiEntry] {
        &self.entries
    }

    pub fn preview(&self) -> &RgbImage {
        &self.preview
    }

    // 失败时不记录任何状态
    pub fn add_selection(&mut self, rect: PixelRect) -> Result<&RoiEntry> {
        let (width, height) = self.image.dimensions();
        let bbox = geometry::normalize(rect, width, height)?;
        if bbox.is_degenerate() {
            return Err(AnnotateError::DegenerateBox);
        }

        let label = vec![(self.counter + 1).to_string()];
        let preview = render::render_box(
            &self.preview,
            &Region::normalized(bbox),
            &label,
            &self.style,
            &self.font,
        )?;

        info!("roi {} selected: {:?}", label[0], bbox);
        self.entries.push(RoiEntry {
            bbox,
            label,
            centroid: geometry::center(&bbox),
        });
        self.counter += 1;
        self.preview = preview;
        Ok(&self.entries[self.entries.len() - 1])
    }

    // 只有 y/Y 结束会话
    pub fn confirm(&mut self, token: &str) -> SessionState {
        if self.state == SessionState::Collecting && token.trim().eq_ignore_ascii_case("y") {
            info!("selection confirmed with {} regions", self.entries.len());
            self.state = SessionState::Done;
        }
        self.state
    }

    pub fn run<S, D, I>(&mut self, selector: &mut S, display: &mut D, input: &mut I) -> Result<()>
    where
        S: RectSelector + ?Sized,
        D: DisplaySurface + ?Sized,
        I: InputChannel + ?Sized,
    {
        while self.state == SessionState::Collecting {
            let rect = selector.select_rect(&self.preview)?;
            if let Err(e) = self.add_selection(rect) {
                if e.is_geometry() {
                    warn!("ignoring selection {rect:?}: {e}");
                    continue;
                }
                return Err(e);
            }
            display.show(&self.preview)?;
            let token = input.read_line()?;
            self.confirm(&token);
        }
        Ok(())
    }

    // [x1, y1, x2, y2, ...]
    pub fn centroids_flat(&self) -> Vec<f64> {
        self.entries
            .iter()
            .flat_map(|e| [e.centroid.0, e.centroid.1])
            .collect()
    }

    pub fn annotate(&self) -> Result<RgbImage> {
        render::render_all(&self.image, &self.entries, &self.style, &self.font)
    }
}
