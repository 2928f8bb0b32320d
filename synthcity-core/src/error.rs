use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    NonPositive { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    InvertedRange { field: &'static str, min: f32, max: f32 },
    Snapshot(String),
}

impl LayoutError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LayoutError::NonPositive { field, .. }
            | LayoutError::NonFinite { field }
            | LayoutError::InvertedRange { field, .. } => Some(*field),
            LayoutError::Snapshot(_) => None,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NonPositive { field, value } => {
                write!(f, "invalid configuration: {field} must be positive, got {value}")
            }
            LayoutError::NonFinite { field } => {
                write!(f, "invalid configuration: {field} must be a finite number")
            }
            LayoutError::InvertedRange { field, min, max } => {
                write!(
                    f,
                    "invalid configuration: {field} range is inverted ({min} > {max})"
                )
            }
            LayoutError::Snapshot(message) => write!(f, "layout snapshot error: {message}"),
        }
    }
}

impl Error for LayoutError {}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Snapshot(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = LayoutError::InvertedRange {
            field: "building_heights",
            min: 5.0,
            max: 1.0,
        };
        assert!(err.to_string().contains("building_heights"));
        assert_eq!(err.field(), Some("building_heights"));
        assert_eq!(LayoutError::Snapshot("eof".into()).field(), None);
    }
}
