mod color;
pub mod constants;
mod error;
mod figure;
mod layout;
mod stage;
pub mod svg;

pub use self::{
    color::Color,
    error::{FlowError, FlowResult},
    layout::{chain, layout},
    stage::{Stage, STAGES},
};

pub mod prelude {
    pub use super::{
        color::Color,
        error::{FlowError, FlowResult},
        figure::{
            estimate_text_size, point, Align, Arrow, Element, Figure, Label, Legend, LegendEntry,
            Point, Rect, Role, Shape, TextBox, Viewport, Weight,
        },
        layout::layout,
        stage::{Stage, STAGES},
    };
}

/// Lay out the built in compiler pipeline.
pub fn pipeline_figure() -> prelude::Figure {
    layout(&STAGES)
}
