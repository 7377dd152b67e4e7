use std::fs;

use compflow::svg;

fn count_class(document: &str, class: &str) -> usize {
    document.matches(&format!(r#"class="{class}""#)).count()
}

#[test]
fn test_svg_canvas() {
    let document = svg::render(&compflow::pipeline_figure()).unwrap();

    assert!(document.starts_with("<?xml"));
    assert!(document.contains(r#"width="1400" height="1000""#));
    assert!(document.trim_end().ends_with("</svg>"));
}

#[test]
fn test_svg_elements() {
    let document = svg::render(&compflow::pipeline_figure()).unwrap();

    assert_eq!(count_class(&document, "stage-box"), 6);
    assert_eq!(count_class(&document, "input-box"), 6);
    assert_eq!(count_class(&document, "output-box"), 6);
    assert_eq!(count_class(&document, "description"), 6);
    assert_eq!(count_class(&document, "description-box"), 6);
    assert_eq!(count_class(&document, "flow-arrow"), 5);
    assert_eq!(count_class(&document, "input-arrow"), 6);
    assert_eq!(count_class(&document, "output-arrow"), 6);
    assert_eq!(count_class(&document, "legend"), 1);
    assert_eq!(count_class(&document, "legend-swatch"), 3);
    assert_eq!(count_class(&document, "caption"), 1);

    // Canvas, 18 boxes, 7 text backgrounds, legend frame and 3 swatches.
    assert_eq!(document.matches("<rect").count(), 1 + 18 + 7 + 1 + 3);
}

#[test]
fn test_svg_content() {
    let document = svg::render(&compflow::pipeline_figure()).unwrap();

    assert!(document.contains(">Compilation Process Flow</tspan>"));
    assert!(document.contains(">(Lexical Analysis)</tspan>"));
    assert!(document.contains(">编译阶段</text>"));
    assert!(document.contains("#FF6B6B"));
    assert!(document.contains("#DDA0DD"));
}

#[test]
fn test_svg_is_deterministic() {
    let first = svg::render(&compflow::pipeline_figure()).unwrap();
    let second = svg::render(&compflow::pipeline_figure()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_to_path() {
    let path = std::env::temp_dir().join(format!("compflow-test-{}.svg", std::process::id()));
    let figure = compflow::pipeline_figure();

    svg::write_to_path(&figure, &path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(written, svg::render(&figure).unwrap());
}

#[test]
fn test_write_to_missing_dir() {
    let path = std::env::temp_dir()
        .join("compflow-missing-dir")
        .join("nested")
        .join("out.svg");
    let result = svg::write_to_path(&compflow::pipeline_figure(), &path);
    assert!(matches!(result, Err(compflow::FlowError::Io(_))));
}
