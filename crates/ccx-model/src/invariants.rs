//! Derived quantities of symmetric tensor fields.
//!
//! CalculiX writes stresses and strains as six components in the order
//! `XX YY ZZ XY YZ ZX`. The writers append von Mises and the three principal
//! values to every such field:
//!
//! ```
//! use ccx_model::invariants::{TensorComponents, mises_stress};
//!
//! let stress = TensorComponents::from_voigt(&[100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
//! assert!((mises_stress(&stress) - 100.0).abs() < 1e-9);
//! ```

/// Names given to the appended invariant components, in output order.
pub const INVARIANT_NAMES: [&str; 4] = ["Mises", "Min Principal", "Mid Principal", "Max Principal"];

/// Stress or strain tensor components (Voigt notation)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TensorComponents {
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    pub xy: f64,
    pub yz: f64,
    pub zx: f64,
}

impl TensorComponents {
    /// Build from a row in FRD component order. Missing trailing entries are zero.
    pub fn from_voigt(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self {
            xx: at(0),
            yy: at(1),
            zz: at(2),
            xy: at(3),
            yz: at(4),
            zx: at(5),
        }
    }
}

/// Principal values (eigenvalues of the tensor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalValues {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

/// Which von Mises definition applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorMeasure {
    Stress,
    Strain,
}

impl TensorMeasure {
    /// Strain fields (TOSTRAIN, MESTRAIN, ...) use the equivalent strain.
    pub fn for_field(name: &str) -> Self {
        if name.to_ascii_uppercase().contains("STRAIN") {
            TensorMeasure::Strain
        } else {
            TensorMeasure::Stress
        }
    }
}

/// von Mises equivalent stress
///
/// σ_v = sqrt(0.5 · [(σxx−σyy)² + (σyy−σzz)² + (σzz−σxx)²] + 3 · [τxy² + τyz² + τzx²])
pub fn mises_stress(t: &TensorComponents) -> f64 {
    let normal = 0.5 * ((t.xx - t.yy).powi(2) + (t.yy - t.zz).powi(2) + (t.zz - t.xx).powi(2));
    let shear = 3.0 * (t.xy.powi(2) + t.yz.powi(2) + t.zx.powi(2));
    (normal + shear).sqrt()
}

/// von Mises equivalent strain, for tensor (not engineering) shear components
pub fn mises_strain(t: &TensorComponents) -> f64 {
    (2.0 / 3.0) * mises_stress(t)
}

/// Eigenvalues of a symmetric 3×3 tensor, closed form.
pub fn principal_values(t: &TensorComponents) -> PrincipalValues {
    let off = t.xy.powi(2) + t.yz.powi(2) + t.zx.powi(2);
    if off == 0.0 {
        let mut diag = [t.xx, t.yy, t.zz];
        diag.sort_by(f64::total_cmp);
        return PrincipalValues {
            min: diag[0],
            mid: diag[1],
            max: diag[2],
        };
    }

    let mean = (t.xx + t.yy + t.zz) / 3.0;
    let (dx, dy, dz) = (t.xx - mean, t.yy - mean, t.zz - mean);
    let p = ((dx * dx + dy * dy + dz * dz + 2.0 * off) / 6.0).sqrt();
    if p == 0.0 {
        return PrincipalValues {
            min: mean,
            mid: mean,
            max: mean,
        };
    }

    // det((T - mean·I) / p) / 2, clamped against rounding
    let det = dx * (dy * dz - t.yz * t.yz) - t.xy * (t.xy * dz - t.yz * t.zx)
        + t.zx * (t.xy * t.yz - dy * t.zx);
    let r = (det / (2.0 * p.powi(3))).clamp(-1.0, 1.0);
    let phi = r.acos() / 3.0;

    let max = mean + 2.0 * p * phi.cos();
    let min = mean + 2.0 * p * (phi + 2.0 * std::f64::consts::PI / 3.0).cos();
    let mid = 3.0 * mean - max - min;
    PrincipalValues { min, mid, max }
}

/// The four appended values for one tensor row, in [`INVARIANT_NAMES`] order.
pub fn invariants(values: &[f64], measure: TensorMeasure) -> [f64; 4] {
    let t = TensorComponents::from_voigt(values);
    let mises = match measure {
        TensorMeasure::Stress => mises_stress(&t),
        TensorMeasure::Strain => mises_strain(&t),
    };
    let p = principal_values(&t);
    [mises, p.min, p.mid, p.max]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn test_mises_stress_uniaxial() {
        let stress = TensorComponents::from_voigt(&[100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(close(mises_stress(&stress), 100.0));
    }

    #[test]
    fn test_mises_stress_pure_shear() {
        let stress = TensorComponents::from_voigt(&[0.0, 0.0, 0.0, 100.0, 0.0, 0.0]);
        assert!(close(mises_stress(&stress), 3.0_f64.sqrt() * 100.0));
    }

    #[test]
    fn test_mises_strain_uniaxial_incompressible() {
        // eps = (1, -0.5, -0.5) has equivalent strain 1
        let strain = TensorComponents::from_voigt(&[1.0, -0.5, -0.5, 0.0, 0.0, 0.0]);
        assert!(close(mises_strain(&strain), 1.0));
    }

    #[test]
    fn test_principal_diagonal_sorted() {
        let p = principal_values(&TensorComponents::from_voigt(&[200.0, 300.0, 100.0, 0.0, 0.0, 0.0]));
        assert_eq!(p, PrincipalValues { min: 100.0, mid: 200.0, max: 300.0 });
    }

    #[test]
    fn test_principal_pure_shear() {
        let p = principal_values(&TensorComponents::from_voigt(&[0.0, 0.0, 0.0, 50.0, 0.0, 0.0]));
        assert!(close(p.max, 50.0));
        assert!(close(p.mid, 0.0) || p.mid.abs() < 1e-9);
        assert!(close(p.min, -50.0));
    }

    #[test]
    fn test_principal_general_tensor_preserves_invariants() {
        let t = TensorComponents::from_voigt(&[100.0, 50.0, 25.0, 10.0, 5.0, 2.0]);
        let p = principal_values(&t);
        assert!(p.min <= p.mid && p.mid <= p.max);
        assert!(close(p.min + p.mid + p.max, 175.0));
        let det = t.xx * (t.yy * t.zz - t.yz * t.yz) - t.xy * (t.xy * t.zz - t.yz * t.zx)
            + t.zx * (t.xy * t.yz - t.yy * t.zx);
        assert!((p.min * p.mid * p.max - det).abs() < 1e-6 * det.abs());
    }

    #[test]
    fn test_hydrostatic_state_has_equal_principals() {
        let p = principal_values(&TensorComponents::from_voigt(&[7.0, 7.0, 7.0, 0.0, 0.0, 0.0]));
        assert_eq!((p.min, p.mid, p.max), (7.0, 7.0, 7.0));
    }

    #[test]
    fn measure_follows_field_name() {
        assert_eq!(TensorMeasure::for_field("STRESS"), TensorMeasure::Stress);
        assert_eq!(TensorMeasure::for_field("TOSTRAIN"), TensorMeasure::Strain);
        assert_eq!(TensorMeasure::for_field("MEstrain"), TensorMeasure::Strain);
    }
}
