//! Notch geometry: pre-existing cracks that must not receive new interfaces.
//!
//! The containment tests are inclusive: a point within `tol` of a segment end
//! point or of a box face counts as on the notch.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;
use crate::topology::node::Point;

/// User-specified exclusion geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notch {
    /// Straight segment from `a` to `b`.
    Segment { a: Point, b: Point },
    /// Axis-aligned box; use a flat box for a planar crack in 3D.
    Box { min: Point, max: Point },
}

impl Notch {
    pub fn segment(a: impl Into<Point>, b: impl Into<Point>) -> Self {
        Notch::Segment {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn aabb(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        Notch::Box {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Rejects non-finite and degenerate geometry.
    pub fn validate(&self) -> Result<(), MeshError> {
        match *self {
            Notch::Segment { a, b } => {
                if !a.is_finite() || !b.is_finite() {
                    return Err(MeshError::InvalidConfig(
                        "notch segment has non-finite coordinates".into(),
                    ));
                }
                if a == b {
                    return Err(MeshError::InvalidConfig(format!(
                        "notch segment has zero length at ({}, {}, {})",
                        a.x, a.y, a.z
                    )));
                }
            }
            Notch::Box { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(MeshError::InvalidConfig(
                        "notch box has non-finite coordinates".into(),
                    ));
                }
                if min.x > max.x || min.y > max.y || min.z > max.z {
                    return Err(MeshError::InvalidConfig(
                        "notch box has min above max".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// True when `p` lies on the notch within `tol`.
    pub fn contains(&self, p: Point, tol: f64) -> bool {
        match *self {
            Notch::Segment { a, b } => on_segment(p, a, b, tol),
            Notch::Box { min, max } => {
                p.x >= min.x - tol
                    && p.x <= max.x + tol
                    && p.y >= min.y - tol
                    && p.y <= max.y + tol
                    && p.z >= min.z - tol
                    && p.z <= max.z + tol
            }
        }
    }

    /// True when every point lies on this notch.
    pub fn contains_all(&self, points: impl IntoIterator<Item = Point>, tol: f64) -> bool {
        points.into_iter().all(|p| self.contains(p, tol))
    }
}

fn on_segment(p: Point, a: Point, b: Point, tol: f64) -> bool {
    // end points first: projection round-off must not reject them
    if p.distance(a) <= tol || p.distance(b) <= tol {
        return true;
    }
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 == 0.0 {
        return false;
    }
    let t = (p - a).dot(ab) / len2;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let foot = Point::new(a.x + t * ab.x, a.y + t * ab.y, a.z + t * ab.z);
    p.distance(foot) <= tol
}
