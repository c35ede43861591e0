use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use egui::{Rect, Vec2};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::config::{ExportFormat, ExportOptions};
use crate::error::EngineError;
use crate::scene::{ObjectKind, VisualObject};

/// Composites `objects` bottom-up into an encoded bitmap of the canvas.
///
/// Images are scaled into their bounds and blended with their opacity. Text
/// is left to the interactive renderer; objects flagged `exclude_from_export`
/// never appear.
pub fn rasterize(
    objects: &[VisualObject],
    canvas_size: Vec2,
    assets: &HashMap<String, Arc<RgbaImage>>,
    options: &ExportOptions,
) -> Result<Vec<u8>, EngineError> {
    let scale = options.multiplier;
    let width = (canvas_size.x * scale).round().max(1.0) as u32;
    let height = (canvas_size.y * scale).round().max(1.0) as u32;
    let mut canvas = RgbaImage::new(width, height);

    for object in objects {
        draw_object(&mut canvas, object, assets, scale, 1.0);
    }

    encode(canvas, options)
}

fn draw_object(
    canvas: &mut RgbaImage,
    object: &VisualObject,
    assets: &HashMap<String, Arc<RgbaImage>>,
    scale: f32,
    parent_opacity: f32,
) {
    if object.exclude_from_export {
        return;
    }
    let opacity = object.opacity * parent_opacity;
    if opacity <= 0.0 {
        return;
    }

    match &object.kind {
        ObjectKind::Image { src } => match assets.get(src) {
            Some(asset) => {
                let bounds = object.bounds();
                let target = Rect::from_min_size(bounds.min * scale, bounds.size() * scale);
                draw_image(canvas, asset, target, opacity);
            }
            None => log::warn!("export: no decoded image for {}", src),
        },
        ObjectKind::Group { objects } => {
            for member in objects {
                draw_object(canvas, member, assets, scale, opacity);
            }
        }
        ObjectKind::Textbox(_) | ObjectKind::Guide { .. } => {}
    }
}

fn draw_image(canvas: &mut RgbaImage, asset: &RgbaImage, target: Rect, opacity: f32) {
    let target_width = target.width().round() as i64;
    let target_height = target.height().round() as i64;
    if target_width <= 0 || target_height <= 0 {
        return;
    }

    let resized = imageops::resize(asset, target_width as u32, target_height as u32, FilterType::Triangle);
    let origin_x = target.min.x.round() as i64;
    let origin_y = target.min.y.round() as i64;
    let (canvas_width, canvas_height) = (canvas.width() as i64, canvas.height() as i64);

    for (x, y, pixel) in resized.enumerate_pixels() {
        let dest_x = origin_x + x as i64;
        let dest_y = origin_y + y as i64;
        if dest_x < 0 || dest_y < 0 || dest_x >= canvas_width || dest_y >= canvas_height {
            continue;
        }
        blend(canvas.get_pixel_mut(dest_x as u32, dest_y as u32), *pixel, opacity);
    }
}

/// Source-over blend of `src` onto `dst`, with `src` alpha scaled by `opacity`.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, opacity: f32) {
    let src_alpha = src[3] as f32 / 255.0 * opacity;
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    for channel in 0..3 {
        let value = (src[channel] as f32 * src_alpha + dst[channel] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}

fn encode(canvas: RgbaImage, options: &ExportOptions) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Vec::new();
    match options.format {
        ExportFormat::Png => {
            DynamicImage::ImageRgba8(canvas)
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|err| EngineError::Export(err.to_string()))?;
        }
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel: flatten onto white.
            let flattened = RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
                let mut pixel = Rgba([255, 255, 255, 255]);
                blend(&mut pixel, *canvas.get_pixel(x, y), 1.0);
                Rgb([pixel[0], pixel[1], pixel[2]])
            });
            let quality = (options.quality * 100.0).round().clamp(1.0, 100.0) as u8;
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
            DynamicImage::ImageRgb8(flattened)
                .write_with_encoder(encoder)
                .map_err(|err| EngineError::Export(err.to_string()))?;
        }
    }
    Ok(bytes)
}
