use crate::error::{AnnotateError, Result};

// (ymin, xmin, ymax, xmax)，归一化或像素坐标
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl BBox {
    pub fn new(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn check_ordered(&self) -> Result<()> {
        let edges = [self.ymin, self.xmin, self.ymax, self.xmax];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(AnnotateError::InvertedBox);
        }
        if self.ymin > self.ymax || self.xmin > self.xmax {
            return Err(AnnotateError::InvertedBox);
        }
        Ok(())
    }

    pub fn check_normalized(&self) -> Result<()> {
        self.check_ordered()?;
        let edges = [self.ymin, self.xmin, self.ymax, self.xmax];
        if edges.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(AnnotateError::NotNormalized);
        }
        Ok(())
    }
}

// 左上角加宽高，像素坐标
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordMode {
    Normalized,
    Absolute,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub bbox: BBox,
    pub mode: CoordMode,
}

impl Region {
    pub fn normalized(bbox: BBox) -> Self {
        Self {
            bbox,
            mode: CoordMode::Normalized,
        }
    }

    pub fn absolute(bbox: BBox) -> Self {
        Self {
            bbox,
            mode: CoordMode::Absolute,
        }
    }

    pub fn to_absolute(&self, width: u32, height: u32) -> Result<BBox> {
        match self.mode {
            CoordMode::Absolute => {
                self.bbox.check_ordered()?;
                Ok(self.bbox)
            }
            CoordMode::Normalized => crate::geometry::scale_to_pixels(&self.bbox, width, height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Collecting,
    Done,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoiEntry {
    pub bbox: BBox, // 归一化坐标
    pub label: Vec<String>,
    pub centroid: (f64, f64),
}
