//! Boundary condition types.
//!
//! Kind and parity codes match the integer values written in parameter files
//! (`lo_boundary`, `hi_boundary`, `vars_parity`).

use serde::Serialize;

use crate::SPACEDIM;

/// Boundary kind selected for one side of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Implied by a periodic axis; never read from a parameter file
    Periodic,
    /// Values held fixed at their initial data
    Static,
    /// Outgoing-wave condition relaxing towards an asymptotic value
    Sommerfeld,
    /// Mirror symmetry plane
    Reflective,
    /// Extrapolation from the interior
    Extrapolating,
    /// Any other code, handled by the physics layer
    Other(i32),
}

impl BoundaryKind {
    pub const STATIC_CODE: i32 = 0;
    pub const SOMMERFELD_CODE: i32 = 1;
    pub const REFLECTIVE_CODE: i32 = 2;
    pub const EXTRAPOLATING_CODE: i32 = 3;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::STATIC_CODE => BoundaryKind::Static,
            Self::SOMMERFELD_CODE => BoundaryKind::Sommerfeld,
            Self::REFLECTIVE_CODE => BoundaryKind::Reflective,
            Self::EXTRAPOLATING_CODE => BoundaryKind::Extrapolating,
            other => BoundaryKind::Other(other),
        }
    }

    pub fn is_reflective(&self) -> bool {
        matches!(self, BoundaryKind::Reflective)
    }

    /// Whether selecting this kind requires `vars_asymptotic_values`
    pub fn requires_asymptotic_values(&self) -> bool {
        matches!(self, BoundaryKind::Sommerfeld)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Periodic => "periodic",
            BoundaryKind::Static => "static",
            BoundaryKind::Sommerfeld => "sommerfeld",
            BoundaryKind::Reflective => "reflective",
            BoundaryKind::Extrapolating => "extrapolating",
            BoundaryKind::Other(_) => "other",
        }
    }
}

/// Behaviour of a variable under reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

impl Parity {
    pub const EVEN_CODE: i32 = 0;
    pub const ODD_CODE: i32 = 1;

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::EVEN_CODE => Some(Parity::Even),
            Self::ODD_CODE => Some(Parity::Odd),
            _ => None,
        }
    }
}

/// Boundary selection on both sides of one axis.
///
/// `lo`/`hi` are the kinds in effect: [`BoundaryKind::Periodic`] on a periodic
/// axis. `selected_lo`/`selected_hi` keep the codes given in `lo_boundary` and
/// `hi_boundary` even there. A reflective selection halves the meshed cell
/// count and places the center on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisBoundary {
    pub lo: BoundaryKind,
    pub hi: BoundaryKind,
    pub periodic: bool,
    pub selected_lo: BoundaryKind,
    pub selected_hi: BoundaryKind,
}

impl AxisBoundary {
    /// Periodic axis with the default static selection
    pub fn periodic() -> Self {
        Self::periodic_selecting(BoundaryKind::Static, BoundaryKind::Static)
    }

    /// Periodic axis that remembers the kinds selected for it
    pub fn periodic_selecting(selected_lo: BoundaryKind, selected_hi: BoundaryKind) -> Self {
        Self {
            lo: BoundaryKind::Periodic,
            hi: BoundaryKind::Periodic,
            periodic: true,
            selected_lo,
            selected_hi,
        }
    }

    pub fn non_periodic(lo: BoundaryKind, hi: BoundaryKind) -> Self {
        Self {
            lo,
            hi,
            periodic: false,
            selected_lo: lo,
            selected_hi: hi,
        }
    }

    /// True if either side in effect is a symmetry plane
    pub fn has_reflective(&self) -> bool {
        self.lo.is_reflective() || self.hi.is_reflective()
    }

    pub fn has_asymptotic(&self) -> bool {
        self.lo.requires_asymptotic_values() || self.hi.requires_asymptotic_values()
    }

    /// True if either side was selected as reflective, periodic or not
    pub fn selects_reflective(&self) -> bool {
        self.selected_lo.is_reflective() || self.selected_hi.is_reflective()
    }
}

impl Default for AxisBoundary {
    fn default() -> Self {
        Self::periodic()
    }
}

/// Fully populated boundary specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryConditions {
    pub axes: [AxisBoundary; SPACEDIM],
    /// One entry per evolution variable
    pub vars_parity: Vec<Parity>,
    /// One entry per evolution variable
    pub vars_asymptotic_values: Vec<f64>,
    pub nonperiodic_boundaries_exist: bool,
    pub symmetric_boundaries_exist: bool,
}

impl BoundaryConditions {
    /// Every axis periodic, every variable even with zero asymptotic value
    pub fn all_periodic(num_vars: usize) -> Self {
        Self {
            axes: [AxisBoundary::periodic(); SPACEDIM],
            vars_parity: vec![Parity::Even; num_vars],
            vars_asymptotic_values: vec![0.0; num_vars],
            nonperiodic_boundaries_exist: false,
            symmetric_boundaries_exist: false,
        }
    }

    pub fn axis(&self, axis: usize) -> &AxisBoundary {
        &self.axes[axis]
    }

    pub fn lo_boundary(&self, axis: usize) -> BoundaryKind {
        self.axes[axis].lo
    }

    pub fn hi_boundary(&self, axis: usize) -> BoundaryKind {
        self.axes[axis].hi
    }

    pub fn selected_lo(&self, axis: usize) -> BoundaryKind {
        self.axes[axis].selected_lo
    }

    pub fn selected_hi(&self, axis: usize) -> BoundaryKind {
        self.axes[axis].selected_hi
    }

    pub fn is_periodic(&self) -> [bool; SPACEDIM] {
        self.axes.map(|axis| axis.periodic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(BoundaryKind::from_code(0), BoundaryKind::Static);
        assert_eq!(BoundaryKind::from_code(1), BoundaryKind::Sommerfeld);
        assert_eq!(BoundaryKind::from_code(2), BoundaryKind::Reflective);
        assert_eq!(BoundaryKind::from_code(3), BoundaryKind::Extrapolating);
        assert_eq!(BoundaryKind::from_code(7), BoundaryKind::Other(7));
    }

    #[test]
    fn test_parity_codes() {
        assert_eq!(Parity::from_code(0), Some(Parity::Even));
        assert_eq!(Parity::from_code(1), Some(Parity::Odd));
        assert_eq!(Parity::from_code(-1), None);
        assert_eq!(Parity::default(), Parity::Even);
    }

    #[test]
    fn test_periodic_axis_never_reflective() {
        let axis = AxisBoundary::periodic();
        assert!(!axis.has_reflective());
        assert!(!axis.has_asymptotic());

        let axis = AxisBoundary::non_periodic(BoundaryKind::Static, BoundaryKind::Reflective);
        assert!(axis.has_reflective());
        assert!(axis.selects_reflective());
        assert!(!axis.has_asymptotic());
    }

    #[test]
    fn test_periodic_axis_keeps_selection() {
        let axis = AxisBoundary::periodic_selecting(BoundaryKind::Reflective, BoundaryKind::Sommerfeld);
        assert_eq!(axis.lo, BoundaryKind::Periodic);
        assert!(!axis.has_reflective());
        assert!(!axis.has_asymptotic());
        assert!(axis.selects_reflective());
        assert_eq!(axis.selected_hi, BoundaryKind::Sommerfeld);
    }

    #[test]
    fn test_all_periodic_defaults() {
        let bc = BoundaryConditions::all_periodic(4);
        assert_eq!(bc.is_periodic(), [true; SPACEDIM]);
        assert_eq!(bc.vars_parity, vec![Parity::Even; 4]);
        assert_eq!(bc.vars_asymptotic_values, vec![0.0; 4]);
        assert!(!bc.nonperiodic_boundaries_exist);
        assert!(!bc.symmetric_boundaries_exist);
    }
}
