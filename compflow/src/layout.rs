//! Flowchart layout.
//!
//! Turns the ordered stage list into a [`Figure`]. The drawing order is
//! the painting order: title, then per stage its boxes, labels and arrows,
//! then legend and caption on top.
use crate::{
    color::Color,
    constants::*,
    figure::{
        point, Align, Arrow, Element, Figure, Label, Legend, LegendEntry, Rect, Role, Shape,
        TextBox, Weight,
    },
    stage::Stage,
};

/// Lay out the flowchart for the given stages.
///
/// Stages must already be in top to bottom order. Every stage except the
/// last gets an arrow down to the one below it.
pub fn layout(stages: &[Stage]) -> Figure {
    let mut figure = Figure::new(FIGURE_SIZE, Rect::from_limits(X_LIMITS, Y_LIMITS));

    figure.push(Element::Text(Label {
        role: Role::Title,
        pos: point(TITLE_POS[0], TITLE_POS[1]),
        text: TITLE.to_string(),
        size: TITLE_SIZE,
        weight: Weight::Bold,
        align: Align::Center,
        background: None,
    }));

    for (index, stage) in stages.iter().enumerate() {
        let is_last = index + 1 == stages.len();
        layout_stage(&mut figure, index, stage, is_last);
    }

    figure.push(Element::Legend(legend()));

    figure.push(Element::Text(Label {
        role: Role::Caption,
        pos: point(CAPTION_POS[0], CAPTION_POS[1]),
        text: CAPTION.to_string(),
        size: CAPTION_SIZE,
        weight: Weight::Normal,
        align: Align::Center,
        background: Some(TextBox {
            pad: CAPTION_PAD,
            fill: Color::LIGHT_YELLOW,
            alpha: TEXT_BOX_ALPHA,
        }),
    }));

    log::debug!(
        "laid out {} stages into {} elements",
        stages.len(),
        figure.elements().len()
    );

    figure
}

fn layout_stage(figure: &mut Figure, index: usize, stage: &Stage, is_last: bool) {
    let y = stage.y;

    // Main processing box
    figure.push(Element::Shape(Shape {
        role: Role::StageBox(index),
        rect: Rect::new(
            STAGE_BOX_X,
            y + STAGE_BOX_DY,
            STAGE_BOX_SIZE[0],
            STAGE_BOX_SIZE[1],
        ),
        pad: STAGE_BOX_PAD,
        fill: stage.color,
        alpha: STAGE_ALPHA,
        edge: Color::BLACK,
        line_width: 2.0,
    }));
    figure.push(Element::Text(Label {
        role: Role::StageLabel(index),
        pos: point(STAGE_LABEL_X, y),
        text: stage.name.to_string(),
        size: STAGE_LABEL_SIZE,
        weight: Weight::Bold,
        align: Align::Center,
        background: None,
    }));

    // Input annotation, left of the stage
    figure.push(Element::Shape(annotation_box(
        Role::InputBox(index),
        INPUT_BOX_X,
        y,
        Color::LIGHT_BLUE,
    )));
    figure.push(Element::Text(annotation_label(
        Role::InputLabel(index),
        INPUT_LABEL_X,
        y,
        stage.input,
    )));

    // Output annotation, right of the stage
    figure.push(Element::Shape(annotation_box(
        Role::OutputBox(index),
        OUTPUT_BOX_X,
        y,
        Color::LIGHT_GREEN,
    )));
    figure.push(Element::Text(annotation_label(
        Role::OutputLabel(index),
        OUTPUT_LABEL_X,
        y,
        stage.output,
    )));

    figure.push(Element::Text(Label {
        role: Role::Description(index),
        pos: point(DESCRIPTION_X, y),
        text: stage.description.to_string(),
        size: DESCRIPTION_SIZE,
        weight: Weight::Normal,
        align: Align::Left,
        background: Some(TextBox {
            pad: DESCRIPTION_PAD,
            fill: Color::WHITE,
            alpha: TEXT_BOX_ALPHA,
        }),
    }));

    if !is_last {
        figure.push(Element::Arrow(Arrow {
            role: Role::FlowArrow(index),
            origin: point(STAGE_LABEL_X, y + FLOW_ARROW_DY),
            delta: point(0.0, -FLOW_ARROW_LENGTH),
            head_width: FLOW_ARROW_HEAD,
            head_length: FLOW_ARROW_HEAD,
            color: Color::BLACK,
            line_width: 2.0,
        }));
    }

    figure.push(Element::Arrow(connector(
        Role::InputArrow(index),
        INPUT_ARROW_X,
        y,
        Color::BLUE,
    )));
    figure.push(Element::Arrow(connector(
        Role::OutputArrow(index),
        OUTPUT_ARROW_X,
        y,
        Color::GREEN,
    )));
}

fn annotation_box(role: Role, x: f32, y: f32, fill: Color) -> Shape {
    Shape {
        role,
        rect: Rect::new(
            x,
            y + ANNOTATION_BOX_DY,
            ANNOTATION_BOX_SIZE[0],
            ANNOTATION_BOX_SIZE[1],
        ),
        pad: ANNOTATION_BOX_PAD,
        fill,
        alpha: ANNOTATION_ALPHA,
        edge: Color::GRAY,
        line_width: 1.0,
    }
}

fn annotation_label(role: Role, x: f32, y: f32, text: &str) -> Label {
    Label {
        role,
        pos: point(x, y),
        text: text.to_string(),
        size: ANNOTATION_LABEL_SIZE,
        weight: Weight::Normal,
        align: Align::Center,
        background: None,
    }
}

/// Short horizontal arrow between an annotation and the stage box.
fn connector(role: Role, x: f32, y: f32, color: Color) -> Arrow {
    Arrow {
        role,
        origin: point(x, y),
        delta: point(CONNECTOR_LENGTH, 0.0),
        head_width: CONNECTOR_HEAD,
        head_length: CONNECTOR_HEAD,
        color,
        line_width: 1.0,
    }
}

fn legend() -> Legend {
    Legend {
        entries: vec![
            LegendEntry {
                label: LEGEND_INPUT.to_string(),
                fill: Color::LIGHT_BLUE,
                alpha: ANNOTATION_ALPHA,
            },
            LegendEntry {
                label: LEGEND_OUTPUT.to_string(),
                fill: Color::LIGHT_GREEN,
                alpha: ANNOTATION_ALPHA,
            },
            LegendEntry {
                label: LEGEND_STAGE.to_string(),
                fill: Color::GRAY,
                alpha: LEGEND_STAGE_ALPHA,
            },
        ],
        anchor: LEGEND_ANCHOR,
    }
}

/// Join link names into a caption chain, `a → b → c`.
pub fn chain<'a>(links: impl IntoIterator<Item = &'a str>) -> String {
    itertools::join(links, CHAIN_ARROW)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stage::STAGES;

    #[test]
    fn test_single_stage_has_no_flow_arrow() {
        let figure = layout(&STAGES[..1]);
        assert_eq!(figure.arrows().count(), 2);
        assert!(figure.find(Role::FlowArrow(0)).is_none());
    }

    #[test]
    fn test_empty_stages() {
        let figure = layout(&[]);
        // Title, legend and caption remain.
        assert_eq!(figure.elements().len(), 3);
        assert_eq!(figure.shapes().count(), 0);
    }

    #[test]
    fn test_flow_arrow_points_at_next_stage() {
        let figure = layout(&STAGES);
        for index in 0..STAGES.len() - 1 {
            let arrow = match figure.find(Role::FlowArrow(index)) {
                Some(Element::Arrow(arrow)) => arrow,
                other => panic!("expected flow arrow, found {other:?}"),
            };
            let next_box = match figure.find(Role::StageBox(index + 1)) {
                Some(Element::Shape(shape)) => shape.outline(),
                other => panic!("expected stage box, found {other:?}"),
            };
            let [tip, _, _] = arrow.head();
            // The head ends inside the upper half of the next box.
            assert!(tip.y <= next_box.top(), "arrow {index} stops short");
            assert!(tip.y > STAGES[index + 1].y, "arrow {index} overshoots");
        }
    }

    #[test]
    fn test_chain() {
        assert_eq!(chain(["a", "b", "c"]), "a → b → c");
        assert_eq!(chain([]), "");
    }
}
