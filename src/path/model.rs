use crate::foundation::core::Point;
use crate::path::project::project;

/// One polar sample: angle `theta` (passed through in whatever unit the input uses) and unitless
/// radius `rho`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolarSample {
    pub theta: f64,
    pub rho: f64,
}

impl PolarSample {
    pub fn new(theta: f64, rho: f64) -> Self {
        Self { theta, rho }
    }

    /// Planar point in normalized units.
    pub fn to_point(self) -> Point {
        project(self.theta, self.rho)
    }
}

/// An ordered theta-rho path. Insertion order is traversal order.
///
/// Paths are replaced wholesale on load; there is no incremental mutation API.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThetaRhoPath {
    samples: Vec<PolarSample>,
}

impl ThetaRhoPath {
    pub fn new(samples: Vec<PolarSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PolarSample> {
        self.samples.get(index).copied()
    }

    pub fn samples(&self) -> &[PolarSample] {
        &self.samples
    }

    /// `(min, max)` over the finite rho values, `None` when there are none.
    pub fn rho_bounds(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| s.rho)
            .filter(|rho| rho.is_finite())
            .fold(None, |acc, rho| match acc {
                None => Some((rho, rho)),
                Some((lo, hi)) => Some((lo.min(rho), hi.max(rho))),
            })
    }

    /// Number of frames an animation with `step` samples per tick draws before it stops.
    ///
    /// Ticks run at cursor `0, step, 2*step, ...` while the cursor is `<= len`.
    pub fn frame_count(&self, step: usize) -> usize {
        self.len() / step.max(1) + 1
    }
}

impl FromIterator<PolarSample> for ThetaRhoPath {
    fn from_iter<I: IntoIterator<Item = PolarSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/model.rs"]
mod tests;
