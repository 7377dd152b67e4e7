use compflow::{constants::*, prelude::*};

fn stage_roles(figure: &Figure, index: usize) -> Vec<Role> {
    figure
        .elements()
        .iter()
        .map(Element::role)
        .filter(|role| role.stage() == Some(index))
        .collect()
}

#[test]
fn test_each_stage_has_boxes_and_description() {
    let figure = compflow::pipeline_figure();

    for index in 0..STAGES.len() {
        let roles = stage_roles(&figure, index);
        for expected in [
            Role::StageBox(index),
            Role::InputBox(index),
            Role::OutputBox(index),
            Role::Description(index),
        ] {
            let count = roles.iter().filter(|role| **role == expected).count();
            assert_eq!(count, 1, "stage {index} has {count} of {expected:?}");
        }
    }

    // Main, input and output box per stage, nothing else is a shape.
    assert_eq!(figure.shapes().count(), STAGES.len() * 3);
    // Name, input, output and description per stage, plus title and caption.
    assert_eq!(figure.labels().count(), STAGES.len() * 4 + 2);
}

#[test]
fn test_stage_boxes_top_to_bottom() {
    let figure = compflow::pipeline_figure();

    let centers: Vec<f32> = figure
        .shapes()
        .filter(|shape| matches!(shape.role, Role::StageBox(_)))
        .map(|shape| shape.rect.center().y)
        .collect();

    assert_eq!(centers.len(), 6);
    for (center, expected) in centers.iter().zip([10.0, 8.5, 7.0, 5.5, 4.0, 2.5]) {
        // Box is offset 0.3 below the centre line and 0.8 tall.
        assert!((center - (expected + 0.1)).abs() < 1e-5, "{center} != {expected}");
    }
    assert!(centers.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn test_arrow_counts() {
    let figure = compflow::pipeline_figure();
    let count = |f: fn(&Role) -> bool| figure.arrows().filter(|arrow| f(&arrow.role)).count();

    assert_eq!(count(|role| matches!(role, Role::FlowArrow(_))), 5);
    assert_eq!(count(|role| matches!(role, Role::InputArrow(_))), 6);
    assert_eq!(count(|role| matches!(role, Role::OutputArrow(_))), 6);
    assert!(figure.find(Role::FlowArrow(5)).is_none());
}

#[test]
fn test_legend_entries() {
    let figure = compflow::pipeline_figure();
    let legend = figure.legend().expect("figure has a legend");

    let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["输入", "输出", "编译阶段"]);
    assert_eq!(legend.entries[0].fill, Color::LIGHT_BLUE);
    assert_eq!(legend.entries[1].fill, Color::LIGHT_GREEN);
    assert_eq!(legend.entries[2].fill, Color::GRAY);
    assert_eq!(legend.anchor, [0.98, 0.02]);
}

#[test]
fn test_caption() {
    let figure = compflow::pipeline_figure();
    let caption = match figure.find(Role::Caption) {
        Some(Element::Text(label)) => label,
        other => panic!("expected caption text, found {other:?}"),
    };

    assert_eq!(
        caption.text,
        ".i文件 → 词法分析 → 语法分析 → 语义分析 → 中间代码生成 → 优化 → 目标代码生成 → .s文件"
    );

    // The inner links of the chain are the stage names.
    let links = std::iter::once(".i文件")
        .chain(STAGES.iter().map(Stage::short_name))
        .chain(std::iter::once(".s文件"));
    assert_eq!(compflow::chain(links), CAPTION);
}

#[test]
fn test_title() {
    let figure = compflow::pipeline_figure();
    match figure.find(Role::Title) {
        Some(Element::Text(label)) => {
            assert_eq!(label.text, "编译阶段流程图\nCompilation Process Flow");
            assert_eq!(label.weight, Weight::Bold);
            assert_eq!(label.pos, point(5.0, 11.5));
        }
        other => panic!("expected title text, found {other:?}"),
    }
}

#[test]
fn test_layout_is_deterministic() {
    assert_eq!(compflow::pipeline_figure(), compflow::pipeline_figure());
}

#[test]
fn test_figure_canvas() {
    let figure = compflow::pipeline_figure();
    assert_eq!(figure.size(), [14.0, 10.0]);
    assert_eq!(figure.bounds(), Rect::new(0.0, 0.0, 10.0, 12.0));
    assert_eq!(figure.pixel_size(DPI), [1400, 1000]);

    // Everything but the legend sits inside the visible data range.
    for shape in figure.shapes() {
        let outline = shape.outline();
        assert!(figure.bounds().contains(point(outline.left(), outline.bottom())));
        assert!(figure.bounds().contains(point(outline.right(), outline.top())));
    }
}
