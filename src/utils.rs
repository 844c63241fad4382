use std::path::{Path, PathBuf};

use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::error::{AnnotateError, Result};

pub fn resize_to_limit(img: RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = img.dimensions();

    if width <= max_width && height <= max_height {
        return img;
    }

    let ratio = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);

    let new_width = ((width as f32 * ratio) as u32).max(1);
    let new_height = ((height as f32 * ratio) as u32).max(1);

    imageops::resize(&img, new_width, new_height, FilterType::Triangle)
}

// 默认图片不存在时弹出文件选择框
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    log::warn!("{} not found, asking for an image", path.display());
    rfd::FileDialog::new()
        .add_filter("image", &["png", "jpg", "jpeg", "bmp"])
        .pick_file()
        .ok_or(AnnotateError::NoInputImage)
}

pub fn load_image(path: &Path, limit: Option<(u32, u32)>) -> Result<RgbImage> {
    let img = image::open(path)?.to_rgb8();
    Ok(match limit {
        Some((max_width, max_height)) => resize_to_limit(img, max_width, max_height),
        None => img,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_are_kept() {
        let img = RgbImage::new(84, 84);
        assert_eq!(resize_to_limit(img, 1920, 1080).dimensions(), (84, 84));
    }

    #[test]
    fn large_images_keep_aspect_ratio() {
        let img = RgbImage::new(3840, 1080);
        assert_eq!(resize_to_limit(img, 1920, 1080).dimensions(), (1920, 540));
    }
}
