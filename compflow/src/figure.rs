//! Retained drawing primitives.
//!
//! A [`Figure`] is what layout produces and what every backend consumes.
//! All positions are in data coordinates with the y axis pointing up,
//! sizes of text are in points.
use crate::{color::Color, constants::LEGEND_FONT_SIZE};

/// Points per inch, for converting font sizes to pixels.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Advance of a wide (CJK) glyph, in ems.
const WIDE_ADVANCE: f32 = 1.0;
/// Advance of any other glyph, in ems.
const NARROW_ADVANCE: f32 = 0.6;
/// Line height, in ems.
const LINE_HEIGHT: f32 = 1.2;

/// Swatch size in legend, in ems.
const LEGEND_SWATCH: [f32; 2] = [2.0, 0.7];
/// Gap between swatch and label, and around the legend frame, in ems.
const LEGEND_SPACING: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Point {
        point(self.x + dx, self.y + dy)
    }
}

/// Axis aligned rectangle, anchored at its lower left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_limits(x_limits: [f32; 2], y_limits: [f32; 2]) -> Self {
        Self::new(
            x_limits[0],
            y_limits[0],
            x_limits[1] - x_limits[0],
            y_limits[1] - y_limits[0],
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        point(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Grow the rectangle by `pad` on every side.
    pub fn expand(&self, pad: f32) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }
}

/// What an element depicts. Stage related roles carry the stage index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    StageBox(usize),
    StageLabel(usize),
    InputBox(usize),
    InputLabel(usize),
    OutputBox(usize),
    OutputLabel(usize),
    Description(usize),
    /// Arrow from a stage down to the next one.
    FlowArrow(usize),
    InputArrow(usize),
    OutputArrow(usize),
    Legend,
    Caption,
}

impl Role {
    /// Index of the stage this element belongs to, if any.
    pub fn stage(&self) -> Option<usize> {
        match *self {
            Role::StageBox(i)
            | Role::StageLabel(i)
            | Role::InputBox(i)
            | Role::InputLabel(i)
            | Role::OutputBox(i)
            | Role::OutputLabel(i)
            | Role::Description(i)
            | Role::FlowArrow(i)
            | Role::InputArrow(i)
            | Role::OutputArrow(i) => Some(i),
            Role::Title | Role::Legend | Role::Caption => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Bold,
}

/// Horizontal alignment of text relative to its anchor.
/// Text is always centred vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Rounded rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub role: Role,
    pub rect: Rect,
    /// Rounding pad in data units. The drawn outline is `rect` grown by
    /// this amount, with corners of the same radius.
    pub pad: f32,
    pub fill: Color,
    pub alpha: f32,
    pub edge: Color,
    pub line_width: f32,
}

impl Shape {
    /// Outline as drawn, including the rounding pad.
    pub fn outline(&self) -> Rect {
        self.rect.expand(self.pad)
    }
}

/// Background box drawn behind a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    /// Padding around the text, in ems.
    pub pad: f32,
    pub fill: Color,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub role: Role,
    pub pos: Point,
    pub text: String,
    /// Font size in points.
    pub size: f32,
    pub weight: Weight,
    pub align: Align,
    pub background: Option<TextBox>,
}

impl Label {
    /// Estimated extent of the text, in points.
    pub fn extent(&self) -> [f32; 2] {
        estimate_text_size(&self.text, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub role: Role,
    pub origin: Point,
    /// Direction and length of the shaft, in data units.
    pub delta: Point,
    pub head_width: f32,
    pub head_length: f32,
    pub color: Color,
    pub line_width: f32,
}

impl Arrow {
    /// The point the shaft reaches. The head extends past it by `head_length`.
    pub fn end(&self) -> Point {
        self.origin.offset(self.delta.x, self.delta.y)
    }

    /// Unit direction of the arrow.
    pub fn direction(&self) -> Point {
        let len = (self.delta.x * self.delta.x + self.delta.y * self.delta.y).sqrt();
        if len > f32::EPSILON {
            point(self.delta.x / len, self.delta.y / len)
        } else {
            point(0.0, 0.0)
        }
    }

    /// Triangle of the arrow head: tip, then the two base corners.
    pub fn head(&self) -> [Point; 3] {
        let end = self.end();
        let dir = self.direction();
        let normal = point(-dir.y, dir.x);
        let half = self.head_width * 0.5;
        [
            end.offset(dir.x * self.head_length, dir.y * self.head_length),
            end.offset(normal.x * half, normal.y * half),
            end.offset(-normal.x * half, -normal.y * half),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub fill: Color,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// Position of the frame's lower right corner, as a fraction of the axes.
    pub anchor: [f32; 2],
}

impl Legend {
    /// Estimated size of the legend frame, in points.
    pub fn frame_size(&self) -> [f32; 2] {
        let em = LEGEND_FONT_SIZE;
        let label_width = self
            .entries
            .iter()
            .map(|entry| estimate_text_size(&entry.label, em)[0])
            .fold(0.0_f32, f32::max);
        let rows = self.entries.len() as f32;
        [
            (LEGEND_SWATCH[0] + LEGEND_SPACING * 3.0) * em + label_width,
            (rows * LINE_HEIGHT + LEGEND_SPACING * 2.0) * em,
        ]
    }

    /// Swatch size in points.
    pub fn swatch_size(&self) -> [f32; 2] {
        [
            LEGEND_SWATCH[0] * LEGEND_FONT_SIZE,
            LEGEND_SWATCH[1] * LEGEND_FONT_SIZE,
        ]
    }

    /// Inner spacing in points.
    pub fn spacing(&self) -> f32 {
        LEGEND_SPACING * LEGEND_FONT_SIZE
    }

    /// Distance between entry rows in points.
    pub fn row_height(&self) -> f32 {
        LINE_HEIGHT * LEGEND_FONT_SIZE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    Text(Label),
    Arrow(Arrow),
    Legend(Legend),
}

impl Element {
    pub fn role(&self) -> Role {
        match self {
            Self::Shape(shape) => shape.role,
            Self::Text(label) => label.role,
            Self::Arrow(arrow) => arrow.role,
            Self::Legend(_) => Role::Legend,
        }
    }
}

/// Laid out flowchart, ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Canvas size in inches.
    size: [f32; 2],
    /// Data coordinates visible on the canvas.
    bounds: Rect,
    /// Elements in painting order.
    elements: Vec<Element>,
}

impl Figure {
    pub fn new(size: [f32; 2], bounds: Rect) -> Self {
        Self {
            size,
            bounds,
            elements: Vec::new(),
        }
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Canvas size in whole pixels at the given resolution.
    pub fn pixel_size(&self, dpi: f32) -> [u32; 2] {
        [
            (self.size[0] * dpi).round() as u32,
            (self.size[1] * dpi).round() as u32,
        ]
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn find(&self, role: Role) -> Option<&Element> {
        self.elements.iter().find(|el| el.role() == role)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.elements.iter().filter_map(|el| match el {
            Element::Shape(shape) => Some(shape),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.elements.iter().filter_map(|el| match el {
            Element::Text(label) => Some(label),
            _ => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> + '_ {
        self.elements.iter().filter_map(|el| match el {
            Element::Arrow(arrow) => Some(arrow),
            _ => None,
        })
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.elements.iter().find_map(|el| match el {
            Element::Legend(legend) => Some(legend),
            _ => None,
        })
    }
}

/// Linear mapping from data coordinates to a y-down pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Rect,
    /// Target area in pixels: left, top, width, height.
    target: [f32; 4],
    /// Pixels per inch of the target, for font sizes.
    dpi: f32,
}

impl Viewport {
    /// Map the figure onto a pixel area of the given size, at the given origin.
    pub fn new(figure: &Figure, origin: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            bounds: figure.bounds(),
            target: [origin[0], origin[1], size[0], size[1]],
            dpi: size[0] / figure.size()[0],
        }
    }

    /// Largest area with the figure's aspect ratio that fits `available`,
    /// centred in it.
    pub fn fit(figure: &Figure, origin: [f32; 2], available: [f32; 2]) -> Self {
        let [fig_w, fig_h] = figure.size();
        let scale = (available[0] / fig_w).min(available[1] / fig_h).max(0.0);
        let size = [fig_w * scale, fig_h * scale];
        let origin = [
            origin[0] + (available[0] - size[0]) * 0.5,
            origin[1] + (available[1] - size[1]) * 0.5,
        ];
        Self::new(figure, origin, size)
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Pixel position of a point in data coordinates.
    pub fn to_screen(&self, p: Point) -> [f32; 2] {
        let [left, top, width, height] = self.target;
        let fx = (p.x - self.bounds.left()) / self.bounds.width;
        let fy = (self.bounds.top() - p.y) / self.bounds.height;
        [left + fx * width, top + fy * height]
    }

    /// Pixel rectangle of a data rectangle: left, top, width, height.
    pub fn rect_to_screen(&self, rect: Rect) -> [f32; 4] {
        let [x0, y0] = self.to_screen(point(rect.left(), rect.top()));
        let [x1, y1] = self.to_screen(point(rect.right(), rect.bottom()));
        [x0, y0, x1 - x0, y1 - y0]
    }

    /// Horizontal data length in pixels.
    pub fn scale_x(&self, length: f32) -> f32 {
        length * self.target[2] / self.bounds.width
    }

    /// Vertical data length in pixels.
    pub fn scale_y(&self, length: f32) -> f32 {
        length * self.target[3] / self.bounds.height
    }

    /// Length in points as pixels.
    pub fn points(&self, pt: f32) -> f32 {
        pt * self.dpi / POINTS_PER_INCH
    }

    /// Pixel position of a fraction of the axes, with (0, 0) at the lower left.
    pub fn axes_fraction(&self, fraction: [f32; 2]) -> [f32; 2] {
        let [left, top, width, height] = self.target;
        [left + fraction[0] * width, top + (1.0 - fraction[1]) * height]
    }
}

/// Whether a glyph occupies a full em, like CJK ideographs and fullwidth forms.
fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x2E80..=0xA4CF // CJK radicals through Yi
            | 0xAC00..=0xD7A3 // Hangul
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60 // fullwidth forms
            | 0xFFE0..=0xFFE6
    )
}

/// Rough size of a block of text in points, from glyph counts alone.
///
/// Used where no font is at hand, such as the SVG export.
pub fn estimate_text_size(text: &str, size: f32) -> [f32; 2] {
    let mut width = 0.0_f32;
    let mut lines = 0;
    for line in text.lines() {
        let advance: f32 = line
            .chars()
            .map(|c| if is_wide(c) { WIDE_ADVANCE } else { NARROW_ADVANCE })
            .sum();
        width = width.max(advance * size);
        lines += 1;
    }
    [width, lines.max(1) as f32 * LINE_HEIGHT * size]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rect_expand() {
        let rect = Rect::new(1.5, 9.7, 3.0, 0.8).expand(0.1);
        assert!((rect.left() - 1.4).abs() < 1e-6);
        assert!((rect.right() - 4.6).abs() < 1e-6);
        assert!((rect.top() - 10.6).abs() < 1e-5);
    }

    #[test]
    fn test_text_estimate() {
        // Two wide glyphs on the widest line, two lines tall.
        let [w, h] = estimate_text_size("优化\nab", 10.0);
        assert!((w - 20.0).abs() < 1e-4);
        assert!((h - 24.0).abs() < 1e-4);

        let [w, h] = estimate_text_size("", 10.0);
        assert_eq!(w, 0.0);
        assert!((h - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_viewport_flips_y() {
        let figure = Figure::new([14.0, 10.0], Rect::new(0.0, 0.0, 10.0, 12.0));
        let view = Viewport::new(&figure, [0.0, 0.0], [1400.0, 1000.0]);

        assert_eq!(view.to_screen(point(0.0, 12.0)), [0.0, 0.0]);
        assert_eq!(view.to_screen(point(10.0, 0.0)), [1400.0, 1000.0]);
        assert_eq!(view.dpi(), 100.0);
        assert_eq!(view.points(72.0), 100.0);
    }

    #[test]
    fn test_viewport_fit_keeps_aspect() {
        let figure = Figure::new([14.0, 10.0], Rect::new(0.0, 0.0, 10.0, 12.0));
        // Wide window: height is the limiting side.
        let view = Viewport::fit(&figure, [0.0, 0.0], [2000.0, 500.0]);

        assert_eq!(view.dpi(), 50.0);
        assert_eq!(view.to_screen(point(0.0, 12.0)), [650.0, 0.0]);
        assert_eq!(view.to_screen(point(10.0, 0.0)), [1350.0, 500.0]);
    }

    #[test]
    fn test_arrow_head() {
        let arrow = Arrow {
            role: Role::FlowArrow(0),
            origin: point(3.0, 9.6),
            delta: point(0.0, -0.7),
            head_width: 0.1,
            head_length: 0.1,
            color: Color::BLACK,
            line_width: 2.0,
        };
        let [tip, a, b] = arrow.head();
        assert!((tip.y - 8.8).abs() < 1e-5);
        assert!((a.x - 3.05).abs() < 1e-5 || (b.x - 3.05).abs() < 1e-5);
        assert!((a.y - b.y).abs() < 1e-6);
    }
}
