//! Application errors
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Flow(#[from] compflow::FlowError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid viewer config: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error("OpenGL: {0}")]
    Gl(#[from] glutin::error::Error),
    /// No usable display or GL config was found.
    #[error("display: {0}")]
    Display(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

macro_rules! impl_from_error {
    ($($err:ty),+ $(,)?) => {
        $(
            impl From<$err> for AppError {
                fn from(err: $err) -> Self {
                    Self {
                        kind: ErrorKind::from(err),
                    }
                }
            }
        )+
    };
}

impl_from_error!(
    compflow::FlowError,
    std::io::Error,
    serde_yaml::Error,
    winit::error::OsError,
    glutin::error::Error,
);
