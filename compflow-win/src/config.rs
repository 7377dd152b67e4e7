//! Viewer configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{error::AppError, inputmap::InputDef};

/// Settings of the interactive viewer, usually loaded from a YAML file.
///
/// Every field is optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConf {
    /// Logical inner size of the window.
    pub window_size: [u32; 2],
    /// TrueType or OpenType font installed ahead of the built in fonts,
    /// needed for the CJK labels.
    pub font: Option<PathBuf>,
    /// Where the `export` action writes the SVG.
    pub export_path: PathBuf,
    /// Key bindings.
    pub input: Vec<InputDef>,
}

impl Default for ViewerConf {
    fn default() -> Self {
        Self {
            window_size: [1400, 1000],
            font: None,
            export_path: PathBuf::from("compflow.svg"),
            input: InputDef::defaults(),
        }
    }
}

impl ViewerConf {
    pub fn from_file(filepath: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = std::fs::File::open(filepath.as_ref())?;
        let conf: ViewerConf = serde_yaml::from_reader(file)?;
        log::debug!("loaded viewer config: {:#?}", conf);
        Ok(conf)
    }

    pub fn from_yaml(source: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

#[cfg(test)]
mod test {
    use winit::event::VirtualKeyCode;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_shipped_config() {
        let conf = ViewerConf::from_yaml(include_str!("../viewer.yaml")).unwrap();
        assert_eq!(conf, ViewerConf::default());
    }

    #[test]
    fn test_partial_config() {
        let conf = ViewerConf::from_yaml(
            "
window_size: [800, 600]
font: /usr/share/fonts/noto/NotoSansCJK-Regular.ttc
",
        )
        .unwrap();

        assert_eq!(conf.window_size, [800, 600]);
        assert_eq!(
            conf.font.as_deref(),
            Some(Path::new("/usr/share/fonts/noto/NotoSansCJK-Regular.ttc"))
        );
        assert_eq!(conf.export_path, PathBuf::from("compflow.svg"));
        assert_eq!(conf.input, InputDef::defaults());
    }

    #[test]
    fn test_custom_keys() {
        let conf = ViewerConf::from_yaml(
            "
input:
  - action: exit
    keyboard_keys: [X]
",
        )
        .unwrap();
        assert_eq!(conf.input, [InputDef::new("exit", &[VirtualKeyCode::X])]);
    }

    #[test]
    fn test_unknown_field() {
        let err = ViewerConf::from_yaml("colour: red").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ViewerConf::from_file("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }
}
