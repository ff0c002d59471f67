//! Scene Graph Settings
//!
//! Behavioural switches for a [`SceneGraph`](crate::scene::SceneGraph).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use arbor::settings::GraphSettings;
//!
//! // Default: cycle checks on, deep copies of payload data when duplicating
//! let settings = GraphSettings::default();
//!
//! // Bulk loader that trusts its input and shares payload data with clones
//! let settings = GraphSettings {
//!     check_cycles: false,
//!     non_node_cloning: false,
//! };
//!
//! // Or from a JSON document; missing fields keep their defaults
//! let settings = GraphSettings::from_json(r#"{ "check_cycles": false }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Configuration for a scene graph instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Reject `add_child` calls that would make a node its own ancestor.
    ///
    /// The check walks the owner sets above the receiving group. Loaders that
    /// build large, known-acyclic graphs may turn it off; on cyclic input
    /// the bounding-box and propagation walks then never terminate.
    pub check_cycles: bool,

    /// Default for [`CloneMap`](crate::scene::CloneMap)s created by
    /// [`SceneGraph::duplicate`](crate::scene::SceneGraph::duplicate).
    ///
    /// When `false`, meshes, materials, textures, images and data arrays are
    /// shared between the original and the duplicate instead of copied.
    pub non_node_cloning: bool,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            check_cycles: true,
            non_node_cloning: true,
        }
    }
}

impl GraphSettings {
    /// Parses settings from JSON. Absent fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_checks_and_deep_copies() {
        let settings = GraphSettings::default();
        assert!(settings.check_cycles);
        assert!(settings.non_node_cloning);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = GraphSettings::from_json(r#"{ "non_node_cloning": false }"#).unwrap();
        assert!(settings.check_cycles);
        assert!(!settings.non_node_cloning);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(GraphSettings::from_json("{ check_cycles: ").is_err());
    }

    #[test]
    fn json_round_trip() {
        let settings = GraphSettings {
            check_cycles: false,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(GraphSettings::from_json(&json).unwrap(), settings);
    }
}
