//! Gameplay tables
//!
//! The acupoint registry and the ordered case list. Both ship as RON
//! documents embedded in the binary and are validated once at startup.

mod cases;
mod points;

pub use cases::{Case, CaseBook};
pub use points::PointRegistry;
#[cfg(test)]
pub use points::Acupoint;

/// Built-in acupoint table
pub const ACUPOINTS_RON: &str = include_str!("../../assets/data/acupoints.ron");
/// Built-in case table
pub const CASES_RON: &str = include_str!("../../assets/data/cases.ron");

/// Errors that can occur loading the gameplay tables
#[derive(Debug)]
pub enum DataError {
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<ron::error::SpannedError> for DataError {
    fn from(e: ron::error::SpannedError) -> Self {
        DataError::ParseError(e)
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::ParseError(e) => write!(f, "Parse error: {}", e),
            DataError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for DataError {}

/// Load and cross-check the built-in registry and case list
pub fn load_builtin() -> Result<(PointRegistry, CaseBook), DataError> {
    let registry = PointRegistry::from_ron_str(ACUPOINTS_RON)?;
    let cases = CaseBook::from_ron_str(CASES_RON, &registry)?;
    Ok((registry, cases))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_load() {
        let (registry, cases) = load_builtin().expect("built-in tables must validate");
        assert_eq!(registry.len(), 15);
        assert_eq!(cases.len(), 8);
        assert!(registry.get("LI4").is_some());
        assert_eq!(cases.get(0).map(|c| c.required_points.clone()), Some(vec!["LI4".to_string(), "LU7".to_string()]));
    }

    #[test]
    fn test_error_display() {
        let err = DataError::ValidationError("duplicate point id 'LI4'".into());
        assert_eq!(err.to_string(), "Validation error: duplicate point id 'LI4'");
    }
}
