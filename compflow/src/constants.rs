//! Fixed content and geometry of the flowchart.

/// Canvas size in inches.
pub const FIGURE_WIDTH: f32 = 14.0;
pub const FIGURE_HEIGHT: f32 = 10.0;
pub const FIGURE_SIZE: [f32; 2] = [FIGURE_WIDTH, FIGURE_HEIGHT];

/// Pixels per inch when rasterising or exporting.
pub const DPI: f32 = 100.0;

/// Visible range of the data coordinates. The axes themselves are hidden.
pub const X_LIMITS: [f32; 2] = [0.0, 10.0];
pub const Y_LIMITS: [f32; 2] = [0.0, 12.0];

pub const TITLE: &str = "编译阶段流程图\nCompilation Process Flow";
pub const TITLE_POS: [f32; 2] = [5.0, 11.5];
pub const TITLE_SIZE: f32 = 18.0;

/// The whole pipeline as one chain, from preprocessed source to assembly.
pub const CAPTION: &str =
    ".i文件 → 词法分析 → 语法分析 → 语义分析 → 中间代码生成 → 优化 → 目标代码生成 → .s文件";
pub const CAPTION_POS: [f32; 2] = [5.0, 0.8];
pub const CAPTION_SIZE: f32 = 10.0;
/// Separator between links of the caption chain.
pub const CHAIN_ARROW: &str = " → ";

pub const LEGEND_INPUT: &str = "输入";
pub const LEGEND_OUTPUT: &str = "输出";
pub const LEGEND_STAGE: &str = "编译阶段";
/// Font size of legend labels.
pub const LEGEND_FONT_SIZE: f32 = 10.0;
/// Legend anchor as a fraction of the axes, lower right corner.
pub const LEGEND_ANCHOR: [f32; 2] = [0.98, 0.02];

// Main stage box, relative to the stage centre line.
pub const STAGE_BOX_X: f32 = 1.5;
pub const STAGE_BOX_DY: f32 = -0.3;
pub const STAGE_BOX_SIZE: [f32; 2] = [3.0, 0.8];
pub const STAGE_BOX_PAD: f32 = 0.1;
pub const STAGE_LABEL_X: f32 = 3.0;
pub const STAGE_LABEL_SIZE: f32 = 11.0;

// Input and output annotation boxes.
pub const INPUT_BOX_X: f32 = 0.2;
pub const OUTPUT_BOX_X: f32 = 4.8;
pub const ANNOTATION_BOX_DY: f32 = -0.15;
pub const ANNOTATION_BOX_SIZE: [f32; 2] = [1.0, 0.4];
pub const ANNOTATION_BOX_PAD: f32 = 0.05;
pub const INPUT_LABEL_X: f32 = 0.7;
pub const OUTPUT_LABEL_X: f32 = 5.3;
pub const ANNOTATION_LABEL_SIZE: f32 = 8.0;

pub const DESCRIPTION_X: f32 = 7.5;
pub const DESCRIPTION_SIZE: f32 = 9.0;
pub const DESCRIPTION_PAD: f32 = 0.3;
pub const CAPTION_PAD: f32 = 0.5;

// Vertical arrow between consecutive stages.
pub const FLOW_ARROW_DY: f32 = -0.4;
pub const FLOW_ARROW_LENGTH: f32 = 0.7;
pub const FLOW_ARROW_HEAD: f32 = 0.1;

// Short horizontal arrows into and out of the stage box.
pub const INPUT_ARROW_X: f32 = 1.3;
pub const OUTPUT_ARROW_X: f32 = 4.6;
pub const CONNECTOR_LENGTH: f32 = 0.15;
pub const CONNECTOR_HEAD: f32 = 0.05;

pub const STAGE_ALPHA: f32 = 0.8;
pub const ANNOTATION_ALPHA: f32 = 0.7;
pub const LEGEND_STAGE_ALPHA: f32 = 0.5;
pub const TEXT_BOX_ALPHA: f32 = 0.8;
