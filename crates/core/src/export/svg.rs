use plotters::coord::Shift;
use plotters::prelude::{DrawingArea, DrawingBackend, IntoDrawingArea, PathElement, Rectangle, SVGBackend};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, IntoFont, RGBColor, TextStyle};

use crate::errors::CoreError;
use crate::models::geometry::{LineSegment, Point, Rect};
use crate::models::scene::{GlyphPlacement, Layer, Scene, Tooltip, TooltipTone};
use crate::models::settings::Palette;

/// Dash and gap length shared by grid lines and pivot markers.
const DASH: f64 = 3.0;

const LABEL_FONT: f64 = 12.0;
const LEGEND_SWATCH: f64 = 10.0;
const TOOLTIP_INSET: f64 = 12.0;
const TOOLTIP_ROW: f64 = 16.0;

/// Render a scene to a standalone SVG document.
///
/// Layers are drawn in [`Scene::layers`] order, so later layers paint on
/// top. Axes and the legend are drawn with the grid, before any data layer.
/// Coordinates are snapped to whole pixels.
pub fn render_svg(scene: &Scene) -> Result<String, CoreError> {
    let mut buf = String::new();
    {
        let size = (surface_px(scene.width), surface_px(scene.height));
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();

        for layer in scene.layers() {
            match layer {
                Layer::Grid => {
                    draw_grid(&root, scene)?;
                    draw_axes(&root, scene)?;
                    draw_legend(&root, scene)?;
                }
                Layer::Ma5 => draw_polyline(&root, &scene.ma5.points, &scene.ma5.color, scene.line_width)?,
                Layer::Ma10 => draw_polyline(&root, &scene.ma10.points, &scene.ma10.color, scene.line_width)?,
                Layer::Candles => draw_candles(&root, scene)?,
                Layer::Pivots => draw_pivots(&root, scene)?,
                Layer::Tooltip => {
                    if let Some(tooltip) = &scene.tooltip {
                        draw_tooltip(&root, tooltip, &scene.palette)?;
                    }
                }
            }
        }

        root.present()?;
    }
    Ok(buf)
}

/// Parse a `#rrggbb` palette color.
pub fn parse_color(hex: &str) -> Result<RGBColor, CoreError> {
    let invalid = || CoreError::ValidationError(format!("Invalid color '{hex}': expected #rrggbb"));

    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn corners(rect: &Rect) -> [(i32, i32); 2] {
    [
        px(Point::new(rect.x, rect.y)),
        px(Point::new(rect.right(), rect.bottom())),
    ]
}

fn stroke_px(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

fn surface_px(length: f64) -> u32 {
    length.round().max(1.0) as u32
}

fn font(size: f64, color: &RGBColor, h: HPos, v: VPos) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(color).pos(Pos::new(h, v))
}

fn draw_segment<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    line: &LineSegment,
    color: &RGBColor,
    width: f64,
    dashed: bool,
) -> Result<(), CoreError> {
    let style = color.stroke_width(stroke_px(width));
    let pieces = if dashed { line.dashes(DASH, DASH) } else { vec![*line] };
    for piece in pieces {
        area.draw(&PathElement::new(vec![px(piece.from), px(piece.to)], style))?;
    }
    Ok(())
}

fn draw_grid<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<(), CoreError> {
    let color = parse_color(&scene.palette.grid)?;
    for grid_line in &scene.grid {
        draw_segment(area, &grid_line.line, &color, 1.0, true)?;
    }
    Ok(())
}

fn draw_axes<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<(), CoreError> {
    let color = parse_color(&scene.palette.axis)?;
    let plot = scene.plot;

    let value_axis = LineSegment::new(Point::new(plot.x, plot.y), Point::new(plot.x, plot.bottom()));
    let category_axis = LineSegment::new(
        Point::new(plot.x, plot.bottom()),
        Point::new(plot.right(), plot.bottom()),
    );
    draw_segment(area, &value_axis, &color, 1.0, false)?;
    draw_segment(area, &category_axis, &color, 1.0, false)?;

    let value_style = font(LABEL_FONT, &color, HPos::Right, VPos::Center);
    for label in &scene.axes.value_labels {
        area.draw_text(&label.text, &value_style, px(label.position))?;
    }
    let category_style = font(LABEL_FONT, &color, HPos::Center, VPos::Bottom);
    for label in &scene.axes.category_labels {
        area.draw_text(&label.text, &category_style, px(label.position))?;
    }

    let value_title = font(LABEL_FONT, &color, HPos::Center, VPos::Center).transform(FontTransform::Rotate270);
    area.draw_text(
        &scene.axes.value_title,
        &value_title,
        px(Point::new(LABEL_FONT, plot.center_y())),
    )?;
    area.draw_text(
        &scene.axes.category_title,
        &category_style,
        px(Point::new(plot.center_x(), scene.height - 2.0)),
    )?;
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<(), CoreError> {
    let text_color = parse_color(&scene.palette.text)?;
    let label_style = font(LABEL_FONT, &text_color, HPos::Left, VPos::Center);

    let mut x = scene.plot.x + 8.0;
    let y = 16.0;
    for entry in &scene.legend {
        let swatch = Rect::new(x, y - LEGEND_SWATCH / 2.0, LEGEND_SWATCH, LEGEND_SWATCH);
        area.draw(&Rectangle::new(corners(&swatch), parse_color(&entry.color)?.filled()))?;
        area.draw_text(&entry.label, &label_style, px(Point::new(x + LEGEND_SWATCH + 4.0, y)))?;
        x += LEGEND_SWATCH + 4.0 + entry.label.chars().count() as f64 * LABEL_FONT * 0.75 + 16.0;
    }
    Ok(())
}

fn draw_polyline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[Point],
    color: &str,
    width: f64,
) -> Result<(), CoreError> {
    if points.is_empty() {
        return Ok(());
    }
    let style = parse_color(color)?.stroke_width(stroke_px(width));
    let path: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
    area.draw(&PathElement::new(path, style))?;
    Ok(())
}

fn draw_candles<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<(), CoreError> {
    for candle in &scene.candles {
        let color = parse_color(candle.geometry.color.resolve(&scene.palette))?;
        draw_segment(area, &candle.geometry.wick, &color, scene.candle_style.wick_width, false)?;
        area.draw(&Rectangle::new(corners(&candle.geometry.body), color.filled()))?;
    }
    Ok(())
}

fn draw_pivots<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<(), CoreError> {
    for marker in &scene.pivots {
        let color = parse_color(&marker.color)?;
        draw_segment(area, &marker.line, &color, 1.0, true)?;

        let v = match marker.placement {
            GlyphPlacement::Above => VPos::Bottom,
            GlyphPlacement::Below => VPos::Top,
        };
        let glyph_style = font(20.0, &color, HPos::Center, v);
        area.draw_text(&marker.glyph, &glyph_style, px(marker.glyph_position))?;
    }
    Ok(())
}

fn tone_color(tone: TooltipTone, palette: &Palette) -> &str {
    match tone {
        TooltipTone::Neutral => &palette.text,
        TooltipTone::Bull => &palette.bull,
        TooltipTone::Bear => &palette.bear,
        TooltipTone::Ma5 => &palette.ma5,
        TooltipTone::Ma10 => &palette.ma10,
    }
}

fn draw_tooltip<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    tooltip: &Tooltip,
    palette: &Palette,
) -> Result<(), CoreError> {
    let box_rect = tooltip.anchor;
    let background = parse_color(&palette.tooltip_background)?;
    let border = parse_color(&palette.tooltip_border)?;
    let text = parse_color(&palette.text)?;
    let label = parse_color(&palette.axis)?;

    area.draw(&Rectangle::new(corners(&box_rect), background.filled()))?;
    area.draw(&Rectangle::new(corners(&box_rect), border.stroke_width(1)))?;

    let left = box_rect.x + TOOLTIP_INSET;
    let right = box_rect.right() - TOOLTIP_INSET;
    let mut y = box_rect.y + 20.0;

    area.draw_text(
        &tooltip.title,
        &font(LABEL_FONT, &text, HPos::Left, VPos::Bottom),
        px(Point::new(left, y)),
    )?;

    let label_style = font(LABEL_FONT, &label, HPos::Left, VPos::Bottom);
    for row in &tooltip.rows {
        y += TOOLTIP_ROW;
        area.draw_text(&format!("{}:", row.label), &label_style, px(Point::new(left, y)))?;

        let value_color = parse_color(tone_color(row.tone, palette))?;
        area.draw_text(
            &row.value,
            &font(LABEL_FONT, &value_color, HPos::Right, VPos::Bottom),
            px(Point::new(right, y)),
        )?;
    }

    y += TOOLTIP_ROW + 4.0;
    area.draw_text(
        &tooltip.note,
        &font(LABEL_FONT, &text, HPos::Left, VPos::Bottom),
        px(Point::new(left, y)),
    )?;
    Ok(())
}
