use std::path::PathBuf;

use image::Rgb;

use crate::render::BoxStyle;

#[derive(Clone, Debug)]
pub struct AnnotatorConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub box_color: Rgb<u8>,
    pub text_color: Rgb<u8>,
    pub thickness: u32,
    pub max_image_size: Option<(u32, u32)>,
    pub window_size: [f32; 2],
    pub window_title: String,
    pub show_crosshair: bool,
    pub from_center: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("01.png"),
            output_path: PathBuf::from("roi_image.jpg"),
            font_path: PathBuf::from("font/simsun.ttc"),
            font_size: 24.0,
            box_color: Rgb([255, 0, 0]),
            text_color: Rgb([0, 0, 0]),
            thickness: 4,
            max_image_size: Some((1920, 1080)),
            window_size: [1280.0, 720.0],
            window_title: "感兴趣区域标注".to_owned(),
            show_crosshair: true,
            from_center: false,
        }
    }
}

impl AnnotatorConfig {
    // 唯一的位置参数覆盖输入图片路径
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.next() {
            config.input_path = PathBuf::from(path);
        }
        config
    }

    pub fn box_style(&self) -> BoxStyle {
        BoxStyle {
            color: self.box_color,
            text_color: self.text_color,
            thickness: self.thickness,
        }
    }
}
