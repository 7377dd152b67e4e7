//! Draws a [`Figure`] with egui's painter.
use compflow::prelude::*;
use egui::{pos2, vec2, Align2, Color32, FontId, Painter, Pos2, Rounding, Stroke};

/// Offset of the second pass used to thicken bold text, in pixels.
const BOLD_OFFSET: f32 = 0.6;

/// Paint the whole figure into `rect`, keeping the figure's aspect ratio.
pub fn draw_figure(painter: &Painter, rect: egui::Rect, figure: &Figure) {
    let view = Viewport::fit(
        figure,
        [rect.left(), rect.top()],
        [rect.width(), rect.height()],
    );

    for element in figure.elements() {
        match element {
            Element::Shape(shape) => draw_shape(painter, &view, shape),
            Element::Text(label) => draw_label(painter, &view, label),
            Element::Arrow(arrow) => draw_arrow(painter, &view, arrow),
            Element::Legend(legend) => draw_legend(painter, &view, legend),
        }
    }
}

fn draw_shape(painter: &Painter, view: &Viewport, shape: &Shape) {
    let rounding = view.scale_x(shape.pad).min(view.scale_y(shape.pad));
    painter.rect(
        screen_rect(view.rect_to_screen(shape.outline())),
        Rounding::same(rounding),
        color(shape.fill, shape.alpha),
        Stroke::new(view.points(shape.line_width), color(shape.edge, 1.0)),
    );
}

fn draw_label(painter: &Painter, view: &Viewport, label: &Label) {
    let [cx, cy] = view.to_screen(label.pos);
    let font = FontId::proportional(view.points(label.size));

    // Lines are laid out one by one so each can be aligned on its own.
    let galleys: Vec<_> = label
        .text
        .lines()
        .map(|line| painter.layout_no_wrap(line.to_string(), font.clone(), Color32::BLACK))
        .collect();
    let width = galleys
        .iter()
        .map(|galley| galley.size().x)
        .fold(0.0_f32, f32::max);
    let height: f32 = galleys.iter().map(|galley| galley.size().y).sum();

    let left = match label.align {
        Align::Left => cx,
        Align::Center => cx - width * 0.5,
        Align::Right => cx - width,
    };
    let top = cy - height * 0.5;

    if let Some(background) = &label.background {
        let pad = view.points(background.pad * label.size);
        let block = egui::Rect::from_min_size(pos2(left, top), vec2(width, height)).expand(pad);
        painter.rect(
            block,
            Rounding::same(pad),
            color(background.fill, background.alpha),
            Stroke::default(),
        );
    }

    let mut y = top;
    for galley in galleys {
        let size = galley.size();
        let x = match label.align {
            Align::Left => left,
            Align::Center => cx - size.x * 0.5,
            Align::Right => cx - size.x,
        };
        if label.weight == Weight::Bold {
            painter.galley(pos2(x + BOLD_OFFSET, y), galley.clone());
        }
        painter.galley(pos2(x, y), galley);
        y += size.y;
    }
}

fn draw_arrow(painter: &Painter, view: &Viewport, arrow: &Arrow) {
    let stroke = Stroke::new(view.points(arrow.line_width), color(arrow.color, 1.0));
    painter.line_segment(
        [
            screen_pos(view.to_screen(arrow.origin)),
            screen_pos(view.to_screen(arrow.end())),
        ],
        stroke,
    );

    let head = arrow
        .head()
        .iter()
        .map(|p| screen_pos(view.to_screen(*p)))
        .collect();
    painter.add(egui::Shape::convex_polygon(
        head,
        color(arrow.color, 1.0),
        Stroke::default(),
    ));
}

fn draw_legend(painter: &Painter, view: &Viewport, legend: &Legend) {
    let [frame_w, frame_h] = legend.frame_size().map(|pt| view.points(pt));
    let [swatch_w, swatch_h] = legend.swatch_size().map(|pt| view.points(pt));
    let spacing = view.points(legend.spacing());
    let row_height = view.points(legend.row_height());
    let font = FontId::proportional(view.points(compflow::constants::LEGEND_FONT_SIZE));

    let [right, bottom] = view.axes_fraction(legend.anchor);
    let frame = egui::Rect::from_min_max(pos2(right - frame_w, bottom - frame_h), pos2(right, bottom));
    painter.rect(
        frame,
        Rounding::same(spacing * 0.5),
        Color32::from_white_alpha(204),
        Stroke::new(1.0, Color32::from_gray(0xCC)),
    );

    for (i, entry) in legend.entries.iter().enumerate() {
        let row_center = frame.top() + spacing + row_height * (i as f32 + 0.5);
        let swatch = egui::Rect::from_min_size(
            pos2(frame.left() + spacing, row_center - swatch_h * 0.5),
            vec2(swatch_w, swatch_h),
        );
        painter.rect_filled(swatch, Rounding::none(), color(entry.fill, entry.alpha));
        painter.text(
            pos2(swatch.right() + spacing, row_center),
            Align2::LEFT_CENTER,
            &entry.label,
            font.clone(),
            Color32::BLACK,
        );
    }
}

fn color(c: Color, alpha: f32) -> Color32 {
    let [r, g, b] = c.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[inline]
fn screen_pos([x, y]: [f32; 2]) -> Pos2 {
    pos2(x, y)
}

#[inline]
fn screen_rect([x, y, w, h]: [f32; 4]) -> egui::Rect {
    egui::Rect::from_min_size(pos2(x, y), vec2(w, h))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_color_alpha() {
        let c = color(Color::LIGHT_BLUE, 0.8);
        assert_eq!(c.a(), 204);

        let opaque = color(Color::from_u32(0xFF6B6B), 1.0);
        assert_eq!(opaque, Color32::from_rgb(0xFF, 0x6B, 0x6B));
    }

    #[test]
    fn test_screen_rect() {
        let rect = screen_rect([10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.min, pos2(10.0, 20.0));
        assert_eq!(rect.max, pos2(40.0, 60.0));
    }
}
