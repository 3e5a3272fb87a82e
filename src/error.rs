use thiserror::Error;

#[derive(Error, Debug)]
pub enum EclatError {
    #[error("input error: {message}")]
    Input {
        message: String,
        line: Option<usize>,
    },
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EclatError>;

impl EclatError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            line: None,
        }
    }

    pub fn input_at(message: impl Into<String>, line: usize) -> Self {
        Self::Input {
            message: format!("{} at line {}", message.into(), line),
            line: Some(line),
        }
    }
}

impl From<std::io::Error> for EclatError {
    fn from(e: std::io::Error) -> Self {
        Self::input(e.to_string())
    }
}
