//! Shorted Region Classifier — label detector coordinates against known
//! anomalous zones
//!
//! Pure, stateless classification of a (y, z) detector coordinate (in
//! detector-length units) against the hand-surveyed boundaries of regions
//! with shorted wires. The boundaries are piecewise linear: axis-aligned
//! z intervals and diagonal bands between parallel lines of slope 0.577
//! (U plane) or -0.58 (V plane).
//!
//! Evaluation order is fixed and matters because the regions are not
//! disjoint by construction: Nominal is defined as the exclusion of every
//! known special zone, so it is tested first; any coordinate it rejects is
//! then tried against the ShortedU strips, then the ShortedY intervals.
//!
//! All boundary constants live in named tables rather than inline
//! arithmetic so the region definitions are auditable one row at a time.

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Discrete classification of a detector coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionLabel {
    /// Outside every known special region.
    Nominal,
    /// Inside one of the diagonal strips of shorted U wires.
    ShortedU,
    /// Inside one of the z intervals of shorted Y wires.
    ShortedY,
    /// Rejected by the Nominal exclusion but matching no known region.
    Unknown,
}

/// Slope shared by all U-plane diagonal boundaries.
const U_SLOPE: f64 = 0.577;
/// Slope shared by all V-plane diagonal boundaries.
const V_SLOPE: f64 = -0.58;

/// z intervals (lo, hi) excluded from the Nominal region.
const Z_EXCLUSIONS: &[(f64, f64)] = &[
    (54.0, 57.0),
    (93.0, 96.0),
    (101.0, 104.0),
    (246.0, 249.0),
    (290.0, 293.0),
    (347.0, 350.0),
    (399.0, 402.0),
    (414.0, 417.0),
    (700.9, 739.3),
    (808.0, 811.0),
    (821.0, 824.0),
    (875.0, 878.0),
];

/// Intercept envelope of the whole shorted-U zone: Nominal requires
/// `y - U_SLOPE * z` outside (lo, hi).
const U_ENVELOPE: (f64, f64) = (-115.42, 14.77);

/// V-plane diagonal bands (intercept lo, hi) excluded from Nominal:
/// a coordinate with `y - V_SLOPE * z` inside any band is not Nominal.
const V_BANDS: &[(f64, f64)] = &[
    (157.0, 160.0),
    (230.0, 233.0),
    (419.5, 436.0),
    (582.0, 591.0),
    (615.0, 622.0),
];

/// ShortedU strips: intercept pairs (lo, hi) of parallel lines of slope
/// `U_SLOPE`; a coordinate is in a strip when `lo < y - U_SLOPE * z < hi`.
const U_STRIPS: &[(f64, f64)] = &[
    (14.42, 14.77),
    (7.84, 14.076),
    (7.15, 7.49),
    (3.68, 6.80),
    (0.22, 0.91),
    (-2.55, -1.51),
    (-4.63, -3.25),
    (-21.60, -12.94),
    (-37.19, -24.72),
    (-50.70, -37.54),
    (-57.28, -56.25),
    (-63.17, -57.63),
    (-64.56, -63.52),
    (-76.68, -68.37),
    (-88.12, -77.03),
    (-90.19, -88.81),
    (-101.97, -90.54),
    (-108.9, -102.32),
    (-109.59, -109.25),
    (-115.42, -109.93),
];

/// ShortedY z intervals (lo, hi), independent of y.
const Y_SHORT_INTERVALS: &[(f64, f64)] = &[(700.9, 720.1), (720.4, 724.6), (724.9, 739.3)];

fn is_nominal(y: f64, z: f64) -> bool {
    let outside_z = Z_EXCLUSIONS.iter().all(|&(lo, hi)| z < lo || z > hi);
    let u_intercept = y - U_SLOPE * z;
    let outside_u = u_intercept > U_ENVELOPE.1 || u_intercept < U_ENVELOPE.0;
    let v_intercept = y - V_SLOPE * z;
    let outside_v = V_BANDS.iter().all(|&(lo, hi)| v_intercept < lo || v_intercept > hi);
    outside_z && outside_u && outside_v
}

fn is_shorted_u(y: f64, z: f64) -> bool {
    let intercept = y - U_SLOPE * z;
    U_STRIPS.iter().any(|&(lo, hi)| intercept > lo && intercept < hi)
}

fn is_shorted_y(_y: f64, z: f64) -> bool {
    Y_SHORT_INTERVALS.iter().any(|&(lo, hi)| z > lo && z < hi)
}

/// Classify a (y, z) detector coordinate.
///
/// Priority order: Nominal, then ShortedU, then ShortedY, else Unknown.
pub fn classify(y: f64, z: f64) -> RegionLabel {
    if is_nominal(y, z) {
        RegionLabel::Nominal
    } else if is_shorted_u(y, z) {
        RegionLabel::ShortedU
    } else if is_shorted_y(y, z) {
        RegionLabel::ShortedY
    } else {
        RegionLabel::Unknown
    }
}

/// Label grid tiling the classifier over the full detector face,
/// the product behind the `make_shorted_region_plot` option.
#[derive(Debug, Clone)]
pub struct RegionMap {
    labels: Vec<RegionLabel>,
}

impl RegionMap {
    /// z cells over [`Z_MIN`](Self::Z_MIN), [`Z_MAX`](Self::Z_MAX).
    pub const NZ: usize = 1100;
    /// y cells over [`Y_MIN`](Self::Y_MIN), [`Y_MAX`](Self::Y_MAX).
    pub const NY: usize = 250;
    pub const Z_MIN: f64 = 0.0;
    pub const Z_MAX: f64 = 1100.0;
    pub const Y_MIN: f64 = -125.0;
    pub const Y_MAX: f64 = 125.0;

    /// Classify every cell center over the fixed coordinate range.
    pub fn build() -> Self {
        let dz = (Self::Z_MAX - Self::Z_MIN) / Self::NZ as f64;
        let dy = (Self::Y_MAX - Self::Y_MIN) / Self::NY as f64;
        let mut labels = Vec::with_capacity(Self::NZ * Self::NY);
        for iz in 0..Self::NZ {
            let z = Self::Z_MIN + (iz as f64 + 0.5) * dz;
            for iy in 0..Self::NY {
                let y = Self::Y_MIN + (iy as f64 + 0.5) * dy;
                labels.push(classify(y, z));
            }
        }
        Self { labels }
    }

    /// Label of cell (`iz`, `iy`), or `None` outside the grid.
    pub fn label_at(&self, iz: usize, iy: usize) -> Option<RegionLabel> {
        if iz >= Self::NZ || iy >= Self::NY {
            return None;
        }
        self.labels.get(iz * Self::NY + iy).copied()
    }

    /// Cell-center coordinate of cell (`iz`, `iy`) as (y, z).
    pub fn cell_center(iz: usize, iy: usize) -> (Sample, Sample) {
        let dz = (Self::Z_MAX - Self::Z_MIN) / Self::NZ as f64;
        let dy = (Self::Y_MAX - Self::Y_MIN) / Self::NY as f64;
        (
            Self::Y_MIN + (iy as f64 + 0.5) * dy,
            Self::Z_MIN + (iz as f64 + 0.5) * dz,
        )
    }
}
