//! Client-side image conversion before upload.
//!
//! Decodes an image, scales it down to fit optional bounds while keeping its
//! aspect ratio, and re-encodes it as WebP (lossless), JPEG (with quality)
//! or PNG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use mythos_core::image::{MIME_JPEG, MIME_PNG, MIME_WEBP};

use crate::api::ImageFile;

mythos_core::string_enum! {
    pub enum OutputFormat {
        Webp => "webp",
        Jpeg => "jpeg",
        Png => "png",
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Webp
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Webp => ".webp",
            OutputFormat::Jpeg => ".jpg",
            OutputFormat::Png => ".png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Webp => MIME_WEBP,
            OutputFormat::Jpeg => MIME_JPEG,
            OutputFormat::Png => MIME_PNG,
        }
    }
}

pub const DEFAULT_QUALITY: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// 0.0 to 1.0. Only JPEG output uses it.
    pub quality: f32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub format: OutputFormat,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: None,
            max_height: None,
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedImage {
    pub data: Vec<u8>,
    pub original_size: usize,
    pub converted_size: usize,
    /// Percentage saved; negative when the output grew.
    pub compression_ratio: f64,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl ConvertedImage {
    /// Wrap the output as an upload named after `original_filename`.
    pub fn into_file(self, original_filename: &str) -> ImageFile {
        ImageFile::new(
            converted_filename(original_filename, self.format),
            self.format.mime_type(),
            self.data,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to load image: {0}")]
    Decode(image::ImageError),

    #[error("Failed to convert image: {0}")]
    Encode(image::ImageError),
}

/// Fit `width x height` inside the bounds: the width bound applies first,
/// then the height bound to the result. Unset or zero bounds are ignored.
/// Never scales up.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    let mut w = f64::from(width);
    let mut h = f64::from(height);

    if let Some(max) = max_width.filter(|&m| m > 0) {
        let max = f64::from(max);
        if w > max {
            h = h * max / w;
            w = max;
        }
    }
    if let Some(max) = max_height.filter(|&m| m > 0) {
        let max = f64::from(max);
        if h > max {
            w = w * max / h;
            h = max;
        }
    }

    (w.round() as u32, h.round() as u32)
}

/// `castle.png` -> `castle.webp`. A name without an extension gets one
/// appended.
pub fn converted_filename(original: &str, format: OutputFormat) -> String {
    let stem = match original.rfind('.') {
        Some(dot) if dot > 0 && !original[dot + 1..].contains('/') => &original[..dot],
        _ => original,
    };
    format!("{stem}{}", format.extension())
}

pub fn convert_image(data: &[u8], options: &ConversionOptions) -> Result<ConvertedImage, ConvertError> {
    let img = image::load_from_memory(data).map_err(ConvertError::Decode)?;
    let (width, height) =
        scaled_dimensions(img.width(), img.height(), options.max_width, options.max_height);
    let (width, height) = (width.max(1), height.max(1));

    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let encoded = encode(&img, options).map_err(ConvertError::Encode)?;

    let original_size = data.len();
    let converted_size = encoded.len();
    let compression_ratio = if original_size == 0 {
        0.0
    } else {
        (original_size as f64 - converted_size as f64) / original_size as f64 * 100.0
    };

    Ok(ConvertedImage {
        data: encoded,
        original_size,
        converted_size,
        compression_ratio,
        width,
        height,
        format: options.format,
    })
}

fn encode(img: &DynamicImage, options: &ConversionOptions) -> image::ImageResult<Vec<u8>> {
    let mut out = Vec::new();
    match options.format {
        OutputFormat::Webp => {
            let rgba = img.to_rgba8();
            WebPEncoder::new_lossless(&mut out).encode(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut out, jpeg_quality(options.quality)).encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::Png => {
            img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
        }
    }
    Ok(out)
}

fn jpeg_quality(quality: f32) -> u8 {
    let q = if quality.is_finite() { quality } else { DEFAULT_QUALITY };
    (q.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

fn convert_file(file: &ImageFile, options: &ConversionOptions) -> Option<ImageFile> {
    match convert_image(&file.data, options) {
        Ok(converted) => {
            tracing::debug!(
                filename = %file.filename,
                original_size = converted.original_size,
                converted_size = converted.converted_size,
                compression_ratio = converted.compression_ratio,
                "Converted image"
            );
            Some(converted.into_file(&file.filename))
        }
        Err(e) => {
            tracing::warn!(filename = %file.filename, error = %e, "Failed to convert image");
            None
        }
    }
}

/// Convert every file, skipping (and logging) those that fail.
pub fn convert_many(files: &[ImageFile], options: &ConversionOptions) -> Vec<ImageFile> {
    files
        .iter()
        .filter_map(|file| convert_file(file, options))
        .collect()
}

/// Like [`convert_many`], but each file carries its alt text. A file that
/// fails is dropped together with its alt text.
pub fn convert_with_alts(
    files: Vec<(ImageFile, Option<String>)>,
    options: &ConversionOptions,
) -> Vec<(ImageFile, Option<String>)> {
    files
        .into_iter()
        .filter_map(|(file, alt)| convert_file(&file, options).map(|converted| (converted, alt)))
        .collect()
}
