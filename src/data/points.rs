//! Acupoint registry

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::rasterizer::Vec3;
use super::DataError;

/// Coordinates beyond this are rejected as corrupt data
const MAX_COORD: f32 = 100.0;

/// A targetable point on the body. Immutable for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acupoint {
    /// Unique short code ("LI4")
    pub id: String,
    /// Romanized name
    pub name: String,
    /// Name in the original script, shown as metadata only
    #[serde(default)]
    pub chinese_name: String,
    pub meridian: String,
    /// Rest position in body space
    pub position: Vec3,
    #[serde(default)]
    pub description: String,
}

/// The static list of acupoints, in table order
#[derive(Debug, Clone, Default)]
pub struct PointRegistry {
    points: Vec<Acupoint>,
}

impl PointRegistry {
    /// Build a registry from already-parsed points, validating them
    pub fn from_points(points: Vec<Acupoint>) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for (i, p) in points.iter().enumerate() {
            if p.id.trim().is_empty() {
                return Err(DataError::ValidationError(format!("point {}: empty id", i)));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(DataError::ValidationError(format!("duplicate point id '{}'", p.id)));
            }
            let v = p.position;
            if !v.is_finite() || v.x.abs() > MAX_COORD || v.y.abs() > MAX_COORD || v.z.abs() > MAX_COORD {
                return Err(DataError::ValidationError(format!(
                    "point '{}': invalid position ({}, {}, {})", p.id, v.x, v.y, v.z
                )));
            }
        }
        Ok(Self { points })
    }

    /// Parse a RON list of points
    pub fn from_ron_str(s: &str) -> Result<Self, DataError> {
        let points: Vec<Acupoint> = ron::from_str(s)?;
        Self::from_points(points)
    }

    pub fn get(&self, id: &str) -> Option<&Acupoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Acupoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, x: f32) -> Acupoint {
        Acupoint {
            id: id.to_string(),
            name: id.to_string(),
            chinese_name: String::new(),
            meridian: "Test".to_string(),
            position: Vec3::new(x, 0.0, 0.0),
            description: String::new(),
        }
    }

    #[test]
    fn test_parse_minimal_entry() {
        let src = r#"[(id: "LI4", name: "Hegu", meridian: "Large Intestine", position: (x: 0.8, y: 0.0, z: 0.2))]"#;
        let reg = PointRegistry::from_ron_str(src).unwrap();
        let p = reg.get("LI4").unwrap();
        assert_eq!(p.position, Vec3::new(0.8, 0.0, 0.2));
        assert!(p.chinese_name.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = PointRegistry::from_points(vec![point("A", 0.0), point("A", 1.0)]);
        assert!(matches!(result, Err(DataError::ValidationError(_))));
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let result = PointRegistry::from_points(vec![point("A", f32::NAN)]);
        assert!(result.is_err());
        let result = PointRegistry::from_points(vec![point("B", 1.0e6)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_lookup_is_none() {
        let reg = PointRegistry::from_points(vec![point("A", 0.0)]).unwrap();
        assert!(reg.get("ZZ99").is_none());
        assert!(!reg.contains(""));
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(PointRegistry::from_ron_str("[(id: "), Err(DataError::ParseError(_))));
    }
}
