//! Letterbox composition and staging
//!
//! Scales the chosen image by the minimum of the two axis ratios so it fits
//! entirely within the screen canvas (upscaling permitted), centers it on a
//! black background, and persists the result as a BMP the desktop shell can
//! consume.

use crate::error::{CuratorError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placement of the scaled image on the screen canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRect {
    /// Horizontal offset of the scaled image on the canvas
    pub x: u32,
    /// Vertical offset of the scaled image on the canvas
    pub y: u32,
    /// Scaled image width
    pub width: u32,
    /// Scaled image height
    pub height: u32,
}

/// Compute the fit-inside placement of an image on a canvas
///
/// `scale = min(canvas_w / image_w, canvas_h / image_h)`; scale may exceed 1.
/// Scaled dimensions truncate to whole pixels and offsets use integer floor
/// division, so the image is centered with at most one spare pixel on the
/// short axis.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Scaled dimensions intentionally truncate to whole pixels; scale is non-negative"
)]
pub fn fit_rect(canvas_w: u32, canvas_h: u32, image_w: u32, image_h: u32) -> FitRect {
    if canvas_w == 0 || canvas_h == 0 || image_w == 0 || image_h == 0 {
        return FitRect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
    }

    let scale = (f64::from(canvas_w) / f64::from(image_w))
        .min(f64::from(canvas_h) / f64::from(image_h));

    let width = (f64::from(image_w) * scale) as u32;
    let height = (f64::from(image_h) * scale) as u32;

    FitRect {
        x: (canvas_w - width.min(canvas_w)) / 2,
        y: (canvas_h - height.min(canvas_h)) / 2,
        width,
        height,
    }
}

/// Render `image` letterboxed onto a black `screen_w` x `screen_h` canvas
///
/// Uses Lanczos3 resampling for the scale blit. The filter choice is a
/// quality policy, not a bit-exact contract.
pub fn compose(image: &DynamicImage, screen_w: u32, screen_h: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(screen_w, screen_h, Rgb([0, 0, 0]));

    let fit = fit_rect(screen_w, screen_h, image.width(), image.height());
    if fit.width == 0 || fit.height == 0 {
        return canvas;
    }

    let scaled = image
        .resize_exact(fit.width, fit.height, FilterType::Lanczos3)
        .to_rgb8();
    image::imageops::overlay(&mut canvas, &scaled, i64::from(fit.x), i64::from(fit.y));

    canvas
}

/// Decode `source`, compose it for the given screen, and persist the canvas
///
/// The staging file is overwritten on every call; its parent directory is
/// created if absent. Returns the staging path for the apply step.
pub fn compose_to_file(
    source: &Path,
    screen_w: u32,
    screen_h: u32,
    staging_path: &Path,
) -> Result<PathBuf> {
    let image = image::open(source).map_err(|e| CuratorError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    debug!(
        "Composing {} ({}x{}) onto {}x{} canvas",
        source.display(),
        image.width(),
        image.height(),
        screen_w,
        screen_h
    );

    let canvas = compose(&image, screen_w, screen_h);

    if let Some(parent) = staging_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CuratorError::Persist(Box::new(e)))?;
    }

    canvas
        .save_with_format(staging_path, ImageFormat::Bmp)
        .map_err(|e| CuratorError::Persist(Box::new(e)))?;

    Ok(staging_path.to_path_buf())
}
