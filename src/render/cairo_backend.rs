use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DrawCommand, Fill, PolygonPrimitive, RectPrimitive,
    RenderFrame, Renderer, TextBaseline, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polygons_drawn: usize,
    pub circles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Draws into its own image surface through `Renderer::render`, or in place
/// on an external context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in frame.layers.iter().filter(|layer| layer.kind.is_painted()) {
            for command in &layer.commands {
                match command {
                    DrawCommand::Polygon(polygon) => {
                        draw_polygon(context, frame, polygon)?;
                        stats.polygons_drawn += 1;
                    }
                    DrawCommand::Circle(circle) => {
                        draw_circle(context, *circle)?;
                        stats.circles_drawn += 1;
                    }
                    DrawCommand::Rect(rect) => {
                        draw_rect(context, *rect)?;
                        stats.rects_drawn += 1;
                    }
                    DrawCommand::Text(text) => {
                        draw_text(context, text)?;
                        stats.texts_drawn += 1;
                    }
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_polygon(
    context: &Context,
    frame: &RenderFrame,
    polygon: &PolygonPrimitive,
) -> ChartResult<()> {
    let mut points = polygon.points.iter();
    let Some(first) = points.next() else {
        return Ok(());
    };
    context.new_path();
    context.move_to(first.x, first.y);
    for point in points {
        context.line_to(point.x, point.y);
    }
    context.close_path();

    match &polygon.fill {
        Fill::Solid(color) => apply_color(context, *color),
        Fill::Gradient(key) => {
            let Some(gradient) = frame.gradient(key) else {
                return Err(ChartError::InvalidData(format!(
                    "polygon references undefined gradient `{key}`"
                )));
            };
            // Stops span the shape's own bounding box, left to right.
            let (x0, x1) = polygon.x_extent();
            let pattern = LinearGradient::new(x0, 0.0, x1, 0.0);
            let (start, end) = (gradient.start, gradient.end);
            pattern.add_color_stop_rgba(0.0, start.red, start.green, start.blue, start.alpha);
            pattern.add_color_stop_rgba(1.0, end.red, end.green, end.blue, end.alpha);
            context
                .set_source(&pattern)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        }
    }
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill polygon", err))
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> ChartResult<()> {
    context.new_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
    apply_color(context, circle.fill);
    match circle.stroke {
        Some((color, width)) => {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            apply_color(context, color);
            context.set_line_width(width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle", err))
        }
        None => context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err)),
    }
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    context.new_path();
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    if text.bold {
        font_description.set_weight(pango::Weight::Bold);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };
    let dy = match text.baseline {
        TextBaseline::Hanging => 0.0,
        TextBaseline::Middle => -f64::from(text_height) / 2.0,
        TextBaseline::Bottom => -f64::from(text_height),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.x, text.y);
    // Cairo turns clockwise on screen.
    context.rotate(-text.rotation_deg.to_radians());
    apply_color(context, text.color);
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
