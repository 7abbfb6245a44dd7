//! Case list
//!
//! Cases are played in table order. Level numbers index into the list and
//! are clamped to the last case once the player runs off the end.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use super::{DataError, PointRegistry};

/// One patient case: symptoms plus the points that treat them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: u32,
    pub title: String,
    pub symptoms: String,
    /// Ordered list of required point ids
    pub required_points: Vec<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Score bonus for completing the case
    pub reward: i32,
}

fn default_difficulty() -> u8 {
    1
}

#[derive(Debug, Clone)]
pub struct CaseBook {
    cases: Vec<Case>,
}

impl CaseBook {
    /// Validate cases against the registry
    pub fn from_cases(cases: Vec<Case>, registry: &PointRegistry) -> Result<Self, DataError> {
        if cases.is_empty() {
            return Err(DataError::ValidationError("case list is empty".into()));
        }
        for case in &cases {
            if case.required_points.is_empty() {
                return Err(DataError::ValidationError(format!(
                    "case {} '{}': no required points", case.id, case.title
                )));
            }
            let mut seen = HashSet::new();
            for id in &case.required_points {
                if !registry.contains(id) {
                    return Err(DataError::ValidationError(format!(
                        "case {}: unknown point id '{}'", case.id, id
                    )));
                }
                if !seen.insert(id.as_str()) {
                    return Err(DataError::ValidationError(format!(
                        "case {}: point '{}' listed twice", case.id, id
                    )));
                }
            }
        }
        Ok(Self { cases })
    }

    pub fn from_ron_str(s: &str, registry: &PointRegistry) -> Result<Self, DataError> {
        let cases: Vec<Case> = ron::from_str(s)?;
        Self::from_cases(cases, registry)
    }

    #[cfg(test)]
    pub fn get(&self, level: usize) -> Option<&Case> {
        self.cases.get(level)
    }

    /// The case for a level, clamped to the last one
    pub fn get_clamped(&self, level: usize) -> &Case {
        let idx = level.min(self.last_index());
        &self.cases[idx]
    }

    pub fn last_index(&self) -> usize {
        self.cases.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ACUPOINTS_RON;

    fn registry() -> PointRegistry {
        PointRegistry::from_ron_str(ACUPOINTS_RON).unwrap()
    }

    fn case(id: u32, required: &[&str]) -> Case {
        Case {
            id,
            title: format!("Case {}", id),
            symptoms: String::new(),
            required_points: required.iter().map(|s| s.to_string()).collect(),
            difficulty: 1,
            reward: 10,
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(CaseBook::from_cases(vec![], &registry()).is_err());
    }

    #[test]
    fn test_unknown_required_point_rejected() {
        let result = CaseBook::from_cases(vec![case(1, &["LI4", "XX1"])], &registry());
        assert!(matches!(result, Err(DataError::ValidationError(msg)) if msg.contains("XX1")));
    }

    #[test]
    fn test_duplicate_required_point_rejected() {
        assert!(CaseBook::from_cases(vec![case(1, &["LI4", "LI4"])], &registry()).is_err());
    }

    #[test]
    fn test_get_clamped() {
        let book = CaseBook::from_cases(vec![case(1, &["LI4"]), case(2, &["ST36"])], &registry()).unwrap();
        assert_eq!(book.get_clamped(0).id, 1);
        assert_eq!(book.get_clamped(1).id, 2);
        assert_eq!(book.get_clamped(99).id, 2);
        assert!(book.get(2).is_none());
    }

    #[test]
    fn test_difficulty_defaults() {
        let src = r#"[(id: 1, title: "T", symptoms: "S", required_points: ["LI4"], reward: 5)]"#;
        let book = CaseBook::from_ron_str(src, &registry()).unwrap();
        assert_eq!(book.get(0).unwrap().difficulty, 1);
    }
}
