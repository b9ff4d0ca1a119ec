//! Map projections for diagnostic figures.
//!
//! Implements the two map views used by the plotting routines from scratch:
//! - Plate Carrée (flat longitude/latitude map)
//! - Orthographic (globe seen from infinity)
//!
//! plus great-circle densification so that mesh edges are drawn as geodesics.

pub mod geodesic;
pub mod orthographic;
pub mod plate_carree;
pub mod transform;

pub use geodesic::{great_circle, GEODESIC_STEP_DEG};
pub use orthographic::Orthographic;
pub use plate_carree::PlateCarree;
pub use transform::{Bounds, MapProjection};
