use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Attribute { name: &'static str, value: String },
}

impl Error {
    pub fn attribute_error(name: &'static str, value: &str) -> Self {
        Self::Attribute {
            name,
            value: value.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute { name, value } => {
                write!(f, "Attribute Parse Error: `{name}` has unexpected value {value:?}")
            }
        }
    }
}

impl std::error::Error for Error {}
