//! Run configuration for interface insertion.
//!
//! Everything the dispatcher needs to know up front: mesh family, insertion
//! policy, hydraulic coupling and notch geometry. Drivers usually deserialize
//! it from JSON/TOML; all names are `snake_case`.

use serde::{Deserialize, Serialize};

use crate::algs::classify::RegionMode;
use crate::algs::notch::Notch;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::{Dimension, ElementOrder};
use crate::topology::mesh::Mesh;

/// Tolerance of the point-on-notch test.
pub const DEFAULT_NOTCH_TOLERANCE: f64 = 1e-7;

/// Which inter-element boundaries receive an interface element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Boundaries between different domains.
    MaterialInterface,
    /// Every internal boundary not registered as true boundary.
    DomainBoundary,
    /// Grain boundaries, resolving triple/quadruple junctions.
    Polycrystal,
    /// Every boundary whose vertices all have duplicity >= 2.
    #[default]
    Everywhere,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::MaterialInterface,
        Policy::DomainBoundary,
        Policy::Polycrystal,
        Policy::Everywhere,
    ];

    /// Region notion used when splitting nodes for this policy.
    pub fn region_mode(self) -> RegionMode {
        match self {
            Policy::MaterialInterface | Policy::Polycrystal => RegionMode::Domain,
            Policy::DomainBoundary | Policy::Everywhere => RegionMode::Element,
        }
    }

    /// Whether interface elements must reference duplicate ids only.
    pub fn duplicates_both_sides(self) -> bool {
        !matches!(self, Policy::DomainBoundary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Policy::MaterialInterface => "material_interface",
            Policy::DomainBoundary => "domain_boundary",
            Policy::Polycrystal => "polycrystal",
            Policy::Everywhere => "everywhere",
        }
    }
}

/// Configuration recognized by the interface dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertionConfig {
    pub dimension: Dimension,
    pub order: ElementOrder,
    pub policy: Policy,
    /// Emit flow elements along planar interfaces.
    pub hydraulic: bool,
    pub notches: Vec<Notch>,
    /// Accept a run that produces no interface element.
    pub allow_empty: bool,
    pub notch_tolerance: f64,
}

impl Default for InsertionConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Two,
            order: ElementOrder::Linear,
            policy: Policy::Everywhere,
            hydraulic: false,
            notches: Vec::new(),
            allow_empty: false,
            notch_tolerance: DEFAULT_NOTCH_TOLERANCE,
        }
    }
}

impl InsertionConfig {
    pub fn new(dimension: Dimension, order: ElementOrder, policy: Policy) -> Self {
        Self {
            dimension,
            order,
            policy,
            ..Self::default()
        }
    }

    pub fn with_hydraulic(mut self, on: bool) -> Self {
        self.hydraulic = on;
        self
    }

    pub fn with_notch(mut self, notch: Notch) -> Self {
        self.notches.push(notch);
        self
    }

    pub fn with_allow_empty(mut self, on: bool) -> Self {
        self.allow_empty = on;
        self
    }

    /// Rejects contradictory or out-of-range settings.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.hydraulic && self.dimension == Dimension::Three {
            return Err(MeshError::InvalidConfig(
                "hydraulic coupling is only available for 2D meshes".into(),
            ));
        }
        if !self.notch_tolerance.is_finite() || self.notch_tolerance < 0.0 {
            return Err(MeshError::InvalidConfig(format!(
                "notch tolerance must be finite and non-negative, got {}",
                self.notch_tolerance
            )));
        }
        self.notches.iter().try_for_each(Notch::validate)
    }

    /// Checks that the declared family matches the elements of `mesh`.
    pub fn validate_against(&self, mesh: &Mesh) -> Result<(), MeshError> {
        if mesh.dimension() != self.dimension {
            return Err(MeshError::DimensionMismatch {
                configured: self.dimension.as_u8(),
                found: mesh.dimension().as_u8(),
            });
        }
        if mesh.order() != self.order {
            return Err(MeshError::OrderMismatch {
                configured: self.order.as_str(),
                found: mesh.order().as_str(),
            });
        }
        Ok(())
    }
}
