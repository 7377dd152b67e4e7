//! SVG export.
//!
//! Pure string building, the figure is written out element by element in
//! painting order. Text extents are estimated, so the output does not
//! depend on the fonts installed on the machine doing the export.
use std::{fmt::Write, fs, path::Path};

use crate::{
    constants::{DPI, LEGEND_FONT_SIZE},
    error::FlowResult,
    figure::{Align, Arrow, Element, Figure, Label, Legend, Role, Shape, Viewport, Weight},
};

const FONT_FAMILY: &str = "SimHei, 'DejaVu Sans', sans-serif";
const LEGEND_EDGE: &str = "#CCCCCC";

/// Render the figure as a standalone SVG document.
pub fn render(figure: &Figure) -> FlowResult<String> {
    let [width, height] = figure.pixel_size(DPI);
    let view = Viewport::new(figure, [0.0, 0.0], [width as f32, height as f32]);

    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#
    )?;
    writeln!(
        out,
        r##"<rect class="canvas" x="0" y="0" width="{width}" height="{height}" fill="#FFFFFF"/>"##
    )?;

    for element in figure.elements() {
        match element {
            Element::Shape(shape) => write_shape(&mut out, &view, shape)?,
            Element::Text(label) => write_label(&mut out, &view, label)?,
            Element::Arrow(arrow) => write_arrow(&mut out, &view, arrow)?,
            Element::Legend(legend) => write_legend(&mut out, &view, legend)?,
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

/// Render the figure and write it to a file.
pub fn write_to_path(figure: &Figure, path: impl AsRef<Path>) -> FlowResult<()> {
    let path = path.as_ref();
    let document = render(figure)?;
    fs::write(path, document)?;
    log::info!("exported figure to {}", path.display());
    Ok(())
}

fn write_shape(out: &mut String, view: &Viewport, shape: &Shape) -> FlowResult<()> {
    let [x, y, w, h] = view.rect_to_screen(shape.outline());
    let rx = view.scale_x(shape.pad);
    let ry = view.scale_y(shape.pad);
    writeln!(
        out,
        r#"<rect class="{class}" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="{rx:.2}" ry="{ry:.2}" fill="{fill}" fill-opacity="{alpha:.2}" stroke="{edge}" stroke-width="{stroke:.2}"/>"#,
        class = role_class(shape.role),
        fill = shape.fill,
        alpha = shape.alpha,
        edge = shape.edge,
        stroke = view.points(shape.line_width),
    )?;
    Ok(())
}

fn write_label(out: &mut String, view: &Viewport, label: &Label) -> FlowResult<()> {
    let [cx, cy] = view.to_screen(label.pos);
    let font_px = view.points(label.size);
    let line_height = font_px * 1.2;
    let lines: Vec<&str> = label.text.lines().collect();
    let class = role_class(label.role);

    if let Some(background) = &label.background {
        let [text_w, text_h] = label.extent();
        let (text_w, text_h) = (view.points(text_w), view.points(text_h));
        let pad = view.points(background.pad * label.size);
        let left = match label.align {
            Align::Left => cx,
            Align::Center => cx - text_w * 0.5,
            Align::Right => cx - text_w,
        };
        writeln!(
            out,
            r#"<rect class="{class}-box" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="{pad:.2}" ry="{pad:.2}" fill="{fill}" fill-opacity="{alpha:.2}" stroke="{fill}" stroke-opacity="{alpha:.2}"/>"#,
            x = left - pad,
            y = cy - text_h * 0.5 - pad,
            w = text_w + pad * 2.0,
            h = text_h + pad * 2.0,
            fill = background.fill,
            alpha = background.alpha,
        )?;
    }

    let anchor = match label.align {
        Align::Left => "start",
        Align::Center => "middle",
        Align::Right => "end",
    };
    let weight = match label.weight {
        Weight::Normal => "normal",
        Weight::Bold => "bold",
    };
    writeln!(
        out,
        r#"<text class="{class}" font-size="{font_px:.2}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="central">"#
    )?;
    let first = cy - (lines.len().saturating_sub(1)) as f32 * line_height * 0.5;
    for (i, line) in lines.iter().enumerate() {
        writeln!(
            out,
            r#"<tspan x="{cx:.2}" y="{y:.2}">{text}</tspan>"#,
            y = first + i as f32 * line_height,
            text = escape(line),
        )?;
    }
    writeln!(out, "</text>")?;
    Ok(())
}

fn write_arrow(out: &mut String, view: &Viewport, arrow: &Arrow) -> FlowResult<()> {
    let [x0, y0] = view.to_screen(arrow.origin);
    let [x1, y1] = view.to_screen(arrow.end());
    let [a, b, c] = arrow.head().map(|p| view.to_screen(p));
    let stroke = view.points(arrow.line_width);

    writeln!(out, r#"<g class="{}">"#, role_class(arrow.role))?;
    writeln!(
        out,
        r#"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" stroke="{color}" stroke-width="{stroke:.2}"/>"#,
        color = arrow.color,
    )?;
    writeln!(
        out,
        r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{color}" stroke="{color}" stroke-width="{stroke:.2}"/>"#,
        a[0],
        a[1],
        b[0],
        b[1],
        c[0],
        c[1],
        color = arrow.color,
    )?;
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_legend(out: &mut String, view: &Viewport, legend: &Legend) -> FlowResult<()> {
    let [frame_w, frame_h] = legend.frame_size().map(|pt| view.points(pt));
    let [swatch_w, swatch_h] = legend.swatch_size().map(|pt| view.points(pt));
    let spacing = view.points(legend.spacing());
    let row_height = view.points(legend.row_height());
    let font_px = view.points(LEGEND_FONT_SIZE);

    let [right, bottom] = view.axes_fraction(legend.anchor);
    let left = right - frame_w;
    let top = bottom - frame_h;

    writeln!(out, r#"<g class="{}">"#, role_class(Role::Legend))?;
    writeln!(
        out,
        r##"<rect class="legend-frame" x="{left:.2}" y="{top:.2}" width="{frame_w:.2}" height="{frame_h:.2}" rx="{r:.2}" ry="{r:.2}" fill="#FFFFFF" fill-opacity="0.80" stroke="{LEGEND_EDGE}"/>"##,
        r = spacing * 0.5,
    )?;
    for (i, entry) in legend.entries.iter().enumerate() {
        let row_center = top + spacing + row_height * (i as f32 + 0.5);
        writeln!(
            out,
            r#"<rect class="legend-swatch" x="{x:.2}" y="{y:.2}" width="{swatch_w:.2}" height="{swatch_h:.2}" fill="{fill}" fill-opacity="{alpha:.2}"/>"#,
            x = left + spacing,
            y = row_center - swatch_h * 0.5,
            fill = entry.fill,
            alpha = entry.alpha,
        )?;
        writeln!(
            out,
            r#"<text class="legend-label" x="{x:.2}" y="{row_center:.2}" font-size="{font_px:.2}" dominant-baseline="central">{text}</text>"#,
            x = left + spacing * 2.0 + swatch_w,
            text = escape(&entry.label),
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

/// CSS class marking what an element depicts.
fn role_class(role: Role) -> &'static str {
    match role {
        Role::Title => "title",
        Role::StageBox(_) => "stage-box",
        Role::StageLabel(_) => "stage-label",
        Role::InputBox(_) => "input-box",
        Role::InputLabel(_) => "input-label",
        Role::OutputBox(_) => "output-box",
        Role::OutputLabel(_) => "output-label",
        Role::Description(_) => "description",
        Role::FlowArrow(_) => "flow-arrow",
        Role::InputArrow(_) => "input-arrow",
        Role::OutputArrow(_) => "output-arrow",
        Role::Legend => "legend",
        Role::Caption => "caption",
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
