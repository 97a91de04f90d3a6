//! Marker placement definitions and per-frame detections.

use std::collections::HashMap;

use glam::DVec3;
use serde::Deserialize;
use thiserror::Error;

/// Error types for marker definition handling.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// Two definitions share the same id.
    #[error("duplicate marker id {0} in definition set")]
    DuplicateId(u32),

    /// The definition file could not be parsed.
    #[error("failed to parse marker definitions: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The known world placement of one physical marker.
///
/// Definitions are loaded once at startup and never mutated; the set of
/// definitions forms a [`MarkerMap`] keyed by id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkerDefinition {
    /// Marker id, unique across the known set.
    pub id: u32,
    /// Informational tag naming the surface the marker is mounted on.
    pub face: String,
    /// Unit normal of the marker plane, world frame.
    pub normal: DVec3,
    /// The marker's world-space origin, meters.
    pub center: DVec3,
    /// Euler angles (radians) carrying marker-local axes into world axes.
    pub rotation_to_world: DVec3,
}

/// One detected marker in a video frame.
///
/// `corners` are pixel coordinates in the detector's fixed order: top-left,
/// top-right, bottom-right, bottom-left. The order is a trust contract with
/// the detector and is not re-validated here; a detector that violates it
/// silently corrupts the estimated pose.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDetection {
    /// Detected marker id; usable downstream only if a definition exists.
    pub id: u32,
    /// The four corner pixels, TL / TR / BR / BL.
    pub corners: [[f64; 2]; 4],
}

/// Immutable lookup table of marker definitions keyed by id.
///
/// Built once at startup and passed into the resolver at call time, so the
/// core carries no process-wide state and tests can use arbitrary sets.
#[derive(Debug, Clone, Default)]
pub struct MarkerMap {
    map: HashMap<u32, MarkerDefinition>,
}

impl MarkerMap {
    /// Build the table from a definition list, rejecting duplicate ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = MarkerDefinition>,
    ) -> Result<Self, MarkerError> {
        let mut map = HashMap::new();
        for def in definitions {
            let id = def.id;
            if map.insert(id, def).is_some() {
                return Err(MarkerError::DuplicateId(id));
            }
        }
        Ok(Self { map })
    }

    /// Parse a JSON array of definitions, as produced by deployment tooling.
    pub fn from_json_str(json: &str) -> Result<Self, MarkerError> {
        let definitions: Vec<MarkerDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Look up the definition for a detected id.
    pub fn get(&self, id: u32) -> Option<&MarkerDefinition> {
        self.map.get(&id)
    }

    /// Number of known markers.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over the known definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerDefinition> {
        self.map.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: u32) -> MarkerDefinition {
        MarkerDefinition {
            id,
            face: "north".to_string(),
            normal: DVec3::new(0.0, 0.0, 1.0),
            center: DVec3::new(0.0, 0.0, 0.06),
            rotation_to_world: DVec3::ZERO,
        }
    }

    #[test]
    fn lookup_by_id() {
        let map = MarkerMap::from_definitions([definition(0), definition(7)]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(7).unwrap().id, 7);
        assert!(map.get(3).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = MarkerMap::from_definitions([definition(1), definition(1)]).unwrap_err();
        assert!(matches!(err, MarkerError::DuplicateId(1)));
    }

    #[test]
    fn parses_json_definition_set() {
        let json = r#"[
            {
                "id": 4,
                "face": "east",
                "normal": [1.0, 0.0, 0.0],
                "center": [0.5, 0.0, 0.06],
                "rotation_to_world": [0.0, 1.5707963267948966, 0.0]
            }
        ]"#;
        let map = MarkerMap::from_json_str(json).unwrap();
        let def = map.get(4).unwrap();
        assert_eq!(def.face, "east");
        assert_eq!(def.center, DVec3::new(0.5, 0.0, 0.06));
    }
}
