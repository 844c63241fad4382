use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use log::{debug, warn};

use crate::error::{AnnotateError, Result};

pub trait TextMetrics {
    fn measure(&self, text: &str) -> (u32, u32);
}

pub struct LabelFont {
    font: FontVec,
    scale: PxScale,
}

impl LabelFont {
    // .ttc 字体集取第一个字体
    pub fn from_file(path: &Path, size: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|source| AnnotateError::FontNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .map_err(|_| AnnotateError::InvalidFont(path.to_path_buf()))?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    // egui 自带的默认比例字体
    pub fn builtin(size: f32) -> Result<Self> {
        let defs = egui::FontDefinitions::default();
        let data = defs
            .families
            .get(&egui::FontFamily::Proportional)
            .and_then(|names| names.first())
            .and_then(|name| defs.font_data.get(name))
            .map(|data| data.font.to_vec())
            .ok_or(AnnotateError::NoBuiltinFont)?;
        let font = FontVec::try_from_vec(data).map_err(|_| AnnotateError::NoBuiltinFont)?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    // 指定字体加载失败时回退到内置字体
    pub fn load_or_builtin(path: &Path, size: f32) -> Result<Self> {
        match Self::from_file(path, size) {
            Ok(font) => {
                debug!("loaded label font {}", path.display());
                Ok(font)
            }
            Err(e) => {
                warn!("{e}, using built-in font");
                Self::builtin(size)
            }
        }
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }
}

impl TextMetrics for LabelFont {
    fn measure(&self, text: &str) -> (u32, u32) {
        imageproc::drawing::text_size(self.scale, &self.font, text)
    }
}
