pub type UnparseResult<T> = std::result::Result<T, UnparseError>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnparseError {
    /// A targeting rule was given an empty helper name.
    EmptyHelperName,
    /// Parameter positions are 1-based, so zero can never match.
    InvalidParamPosition { position: usize },
}

impl std::fmt::Display for UnparseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHelperName => {
                write!(f, "Targeting rule requires a helper name")
            }
            Self::InvalidParamPosition { position } => {
                write!(
                    f,
                    "Invalid parameter position {}: positions start at 1",
                    position
                )
            }
        }
    }
}

impl std::error::Error for UnparseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ntest::timeout(100)]
    fn test_display() {
        assert_eq!(
            UnparseError::InvalidParamPosition { position: 0 }.to_string(),
            "Invalid parameter position 0: positions start at 1"
        );
        assert_eq!(
            UnparseError::EmptyHelperName.to_string(),
            "Targeting rule requires a helper name"
        );
    }
}
