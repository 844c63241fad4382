use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::error::{AnnotateError, Result};
use crate::font::{LabelFont, TextMetrics};
use crate::models::{BBox, Region, RoiEntry};

pub const TRUNCATION_MARKER: &str = "...";

#[derive(Clone, Copy, Debug)]
pub struct BoxStyle {
    pub color: Rgb<u8>,
    pub text_color: Rgb<u8>,
    pub thickness: u32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: Rgb([255, 0, 0]),
            text_color: Rgb([0, 0, 0]),
            thickness: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelPanel {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub segments: Vec<String>,
    pub truncated: bool,
    pub text_origin: (f64, f64),
}

impl LabelPanel {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

// 上方放得下就放上方，否则放下方；右边界不超过框的右边
// 放不下的段落替换为省略号，第一段始终保留
pub fn layout_label<M: TextMetrics + ?Sized>(
    metrics: &M,
    bbox: &BBox,
    label: &[String],
) -> Option<LabelPanel> {
    if label.is_empty() {
        return None;
    }

    let sizes: Vec<(f64, f64)> = label
        .iter()
        .map(|line| {
            let (w, h) = metrics.measure(line);
            (f64::from(w), f64::from(h))
        })
        .collect();
    let max_width = sizes.iter().map(|s| s.0).fold(0.0, f64::max);
    let block_width = sizes.iter().map(|s| s.0).sum::<f64>() + 1.1 * max_width;
    let block_height = sizes.iter().map(|s| s.1).fold(0.0, f64::max);

    let bottom = if bbox.ymin > block_height {
        bbox.ymin
    } else {
        bbox.ymax + block_height
    };
    let top = bottom - block_height;
    let right = bbox.xmax.min(bbox.xmin + block_width);
    let panel_width = right - bbox.xmin;

    // 前导留白为最宽一段的宽度
    let mut used = max_width;
    let mut fitted = 0;
    for (w, _) in &sizes {
        used += w;
        if used > panel_width {
            break;
        }
        fitted += 1;
    }
    let kept = fitted.max(1);

    let mut segments = label[..kept].to_vec();
    let truncated = kept < label.len();
    if truncated {
        if let Some(last) = segments.last_mut() {
            last.push_str(TRUNCATION_MARKER);
        }
    }

    Some(LabelPanel {
        left: bbox.xmin,
        top,
        right,
        bottom,
        segments,
        truncated,
        text_origin: (bbox.xmin + max_width / 2.0, top),
    })
}

fn draw_outline(image: &mut RgbImage, bbox: &BBox, color: Rgb<u8>, thickness: u32) {
    let x0 = bbox.xmin.round() as i32;
    let y0 = bbox.ymin.round() as i32;
    let x1 = bbox.xmax.round() as i32;
    let y1 = bbox.ymax.round() as i32;
    let thickness = thickness.max(1) as i32;

    // 线宽以边框为中心向内外扩展
    for t in 0..thickness {
        let d = t - thickness / 2;
        let w = x1 - x0 + 1 + 2 * d;
        let h = y1 - y0 + 1 + 2 * d;
        if w <= 0 || h <= 0 {
            continue;
        }
        let rect = Rect::at(x0 - d, y0 - d).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(image, rect, color);
    }
}

fn draw_panel(image: &mut RgbImage, panel: &LabelPanel, font: &LabelFont, style: &BoxStyle) {
    let w = panel.width().round() as i64;
    let h = panel.height().round() as i64;
    if w > 0 && h > 0 {
        let rect = Rect::at(panel.left.round() as i32, panel.top.round() as i32)
            .of_size(w as u32, h as u32);
        draw_filled_rect_mut(image, rect, style.color);
    }

    let (mut x, y) = panel.text_origin;
    for segment in &panel.segments {
        draw_text_mut(
            image,
            style.text_color,
            x.round() as i32,
            y.round() as i32,
            font.scale(),
            font.font(),
            segment,
        );
        x += f64::from(font.measure(segment).0);
    }
}

pub fn render_box(
    image: &RgbImage,
    region: &Region,
    label: &[String],
    style: &BoxStyle,
    font: &LabelFont,
) -> Result<RgbImage> {
    let bbox = region.to_absolute(image.width(), image.height())?;
    if bbox.is_degenerate() {
        return Err(AnnotateError::DegenerateBox);
    }

    let mut out = image.clone();
    draw_outline(&mut out, &bbox, style.color, style.thickness);
    if let Some(panel) = layout_label(font, &bbox, label) {
        draw_panel(&mut out, &panel, font, style);
    }
    Ok(out)
}

pub fn render_all(
    image: &RgbImage,
    entries: &[RoiEntry],
    style: &BoxStyle,
    font: &LabelFont,
) -> Result<RgbImage> {
    let mut out = image.clone();
    for entry in entries {
        out = render_box(&out, &Region::normalized(entry.bbox), &entry.label, style, font)?;
    }
    Ok(out)
}
