use std::collections::HashMap;

use egui::{Align2, Color32, ColorImage, FontId, Painter, Pos2, Rect, Stroke, TextureHandle, TextureOptions};

use crate::color::parse_css_color;
use crate::editor::Editor;
use crate::engine::{CanvasEngine, SceneCanvas};
use crate::scene::{GuideAxis, ObjectKind, TextAlign, VisualObject};

const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(160);

/// Paints an editor session into an egui painter: the scene bottom-up, then
/// selection outlines, then visible snap guides.
#[derive(Default)]
pub struct SceneRenderer {
    textures: HashMap<String, TextureHandle>,
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("textures", &self.textures.len())
            .finish()
    }
}

/// Maps canvas coordinates into the screen rectangle the canvas occupies.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    origin: Pos2,
    zoom: f32,
}

impl Viewport {
    fn point(&self, x: f32, y: f32) -> Pos2 {
        self.origin + egui::vec2(x, y) * self.zoom
    }

    fn rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.point(rect.min.x, rect.min.y), self.point(rect.max.x, rect.max.y))
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `editor` scaled to fit `canvas_rect`.
    pub fn render(&mut self, ctx: &egui::Context, painter: &Painter, canvas_rect: Rect, editor: &Editor<SceneCanvas>) {
        let canvas = editor.engine();
        let size = canvas.size();
        let viewport = Viewport {
            origin: canvas_rect.min,
            zoom: (canvas_rect.width() / size.x).min(canvas_rect.height() / size.y),
        };

        painter.rect_filled(viewport.rect(Rect::from_min_size(Pos2::ZERO, size)), 0.0, Color32::WHITE);

        for object in canvas.objects() {
            self.paint_object(ctx, painter, viewport, canvas, object, 1.0);
        }

        for id in editor.selected_objects() {
            if let Some(object) = canvas.object(*id) {
                painter.rect_stroke(viewport.rect(object.bounds()), 0.0, Stroke::new(1.5, SELECTION_COLOR));
            }
        }

        for guide in editor.guides() {
            self.paint_object(ctx, painter, viewport, canvas, guide, 1.0);
        }
    }

    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    /// Forgets every uploaded texture, e.g. after the session was reset.
    pub fn clear_cache(&mut self) {
        self.textures.clear();
    }

    fn paint_object(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        viewport: Viewport,
        canvas: &SceneCanvas,
        object: &VisualObject,
        parent_opacity: f32,
    ) {
        let opacity = object.opacity * parent_opacity;
        let rect = viewport.rect(object.bounds());

        match &object.kind {
            ObjectKind::Image { src } => match self.texture(ctx, canvas, src) {
                Some(texture) => {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, Color32::WHITE.gamma_multiply(opacity));
                }
                None => {
                    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, PLACEHOLDER_COLOR));
                }
            },
            ObjectKind::Textbox(style) => {
                let color = fill_color(&object.fill).gamma_multiply(opacity);
                let (anchor, x) = match style.text_align {
                    TextAlign::Left | TextAlign::Justify => (Align2::LEFT_TOP, rect.left()),
                    TextAlign::Center => (Align2::CENTER_TOP, rect.center().x),
                    TextAlign::Right => (Align2::RIGHT_TOP, rect.right()),
                };
                let font = FontId::proportional(style.font_size * object.scale_y * viewport.zoom);
                let drawn = painter.text(Pos2::new(x, rect.top()), anchor, &style.text, font, color);

                let stroke = Stroke::new((style.font_size * viewport.zoom / 16.0).max(1.0), color);
                if style.underline {
                    painter.line_segment([drawn.left_bottom(), drawn.right_bottom()], stroke);
                }
                if style.linethrough {
                    let y = drawn.center().y;
                    painter.line_segment([Pos2::new(drawn.left(), y), Pos2::new(drawn.right(), y)], stroke);
                }
            }
            ObjectKind::Guide { axis } => {
                let stroke = Stroke::new(1.0, fill_color(&object.fill));
                let ends = match axis {
                    GuideAxis::Vertical => [rect.center_top(), rect.center_bottom()],
                    GuideAxis::Horizontal => [rect.left_center(), rect.right_center()],
                };
                painter.line_segment(ends, stroke);
            }
            ObjectKind::Group { objects } => {
                for member in objects {
                    self.paint_object(ctx, painter, viewport, canvas, member, opacity);
                }
            }
        }
    }

    fn texture(&mut self, ctx: &egui::Context, canvas: &SceneCanvas, src: &str) -> Option<TextureHandle> {
        if let Some(texture) = self.textures.get(src) {
            return Some(texture.clone());
        }

        let asset = canvas.image_asset(src)?;
        let size = [asset.width() as usize, asset.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, asset.as_raw());
        let texture = ctx.load_texture(src, image, TextureOptions::LINEAR);
        log::debug!("uploaded texture for {}", src);
        self.textures.insert(src.to_owned(), texture.clone());
        Some(texture)
    }
}

fn fill_color(fill: &str) -> Color32 {
    parse_css_color(fill).unwrap_or(Color32::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editor::{ImageOptions, TextOptions};
    use crate::engine::ImageSource;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_render_caches_image_textures() {
        let mut editor = Editor::new(EditorConfig::default()).unwrap();
        editor
            .add_image(ImageSource::bytes("red.png", png_bytes()), ImageOptions::default())
            .unwrap();
        futures::executor::block_on(editor.settle());
        editor.add_text("Hello", TextOptions::default()).unwrap();

        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(640.0, 360.0));
        let mut renderer = SceneRenderer::new();

        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);
                renderer.render(ctx, &painter, rect, &editor);
            });
        }
        assert_eq!(renderer.cached_textures(), 1);
    }

    #[test]
    fn test_missing_asset_draws_placeholder() {
        let mut editor = Editor::new(EditorConfig::default()).unwrap();
        editor
            .engine_mut()
            .add(VisualObject::image("missing.png", egui::vec2(10.0, 10.0)));
        editor.pump_events();

        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let mut renderer = SceneRenderer::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);
            renderer.render(ctx, &painter, rect, &editor);
        });
        assert_eq!(renderer.cached_textures(), 0);
    }
}
