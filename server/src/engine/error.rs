/// Faults raised while turning stored records into a navigation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// A channel type or member role outside its closed set.
    InvalidEnumValue { field: &'static str, value: String },
}

impl NavError {
    pub fn invalid_enum(field: &'static str, value: &str) -> Self {
        NavError::InvalidEnumValue {
            field,
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::InvalidEnumValue { field, value } => {
                write!(f, "invalid {field} value: {value:?}")
            }
        }
    }
}

impl std::error::Error for NavError {}
