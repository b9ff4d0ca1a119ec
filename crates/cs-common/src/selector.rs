//! Map projection selector used by the plotting entry points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CsError;

/// The two supported map views.
///
/// The string forms are the selector names used in output file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSelector {
    /// Flat longitude/latitude map (Plate Carrée).
    Mercator,
    /// Orthographic globe view.
    Sphere,
}

impl MapSelector {
    pub const ALL: [MapSelector; 2] = [MapSelector::Mercator, MapSelector::Sphere];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapSelector::Mercator => "mercator",
            MapSelector::Sphere => "sphere",
        }
    }

    /// Figure size in pixels for this view.
    pub fn figure_size(&self) -> (u32, u32) {
        match self {
            MapSelector::Mercator => (1832, 977),
            MapSelector::Sphere => (800, 800),
        }
    }
}

impl FromStr for MapSelector {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mercator" => Ok(MapSelector::Mercator),
            "sphere" => Ok(MapSelector::Sphere),
            _ => Err(CsError::InvalidProjection(s.to_string())),
        }
    }
}

impl fmt::Display for MapSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!("mercator".parse::<MapSelector>().unwrap(), MapSelector::Mercator);
        assert_eq!("sphere".parse::<MapSelector>().unwrap(), MapSelector::Sphere);
    }

    #[test]
    fn test_parse_selector_rejects_unknown() {
        for bad in ["Mercator", "globe", "", "lambert"] {
            match bad.parse::<MapSelector>() {
                Err(CsError::InvalidProjection(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidProjection for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for sel in MapSelector::ALL {
            assert_eq!(sel.to_string().parse::<MapSelector>().unwrap(), sel);
        }
    }

    #[test]
    fn test_figure_sizes() {
        assert_eq!(MapSelector::Mercator.figure_size(), (1832, 977));
        assert_eq!(MapSelector::Sphere.figure_size(), (800, 800));
    }
}
