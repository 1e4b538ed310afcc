use uom::si::f64::{Area, Length};

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    nomial::Variable,
};

/// Planform geometry of a tapered lifting surface.
///
/// The surface is discretized into `n` spanwise stations at evenly spaced
/// `η = 2y/b`. The normalized chord distribution follows from the taper
/// ratio, which is fixed when the planform is built, so the chord ratios and
/// the normalized mean aerodynamic chord are declared as fixed variables.
#[derive(Debug, Clone)]
pub struct Planform {
    /// Surface area.
    pub s: Variable,
    /// Aspect ratio.
    pub ar: Variable,
    /// Span.
    pub b: Variable,
    /// Airfoil thickness ratio.
    pub tau: Variable,
    /// Maximum lift coefficient, 1.39.
    pub cl_max: Variable,
    /// Wing moment coefficient, 0.14.
    pub cm: Variable,
    /// Root chord.
    pub croot: Variable,
    /// Mean aerodynamic chord.
    pub cmac: Variable,
    /// Taper ratio.
    pub lam: Variable,
    /// Mean aerodynamic chord over root chord.
    pub cbarmac: Variable,
    /// Normalized chord at each station.
    pub cbar: Vec<Variable>,
    /// Mid-section chord of each panel.
    pub cave: Vec<Variable>,
    /// Normalized mid-section chord of each panel.
    pub cbave: Vec<Variable>,
    /// Width of each panel in `η`.
    pub deta: Vec<Variable>,
    eta: Vec<f64>,
}

impl Planform {
    /// Builds a planform with `n` stations and taper ratio `taper`.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`, since a surface needs at least one panel.
    #[must_use]
    pub fn new(n: usize, taper: f64) -> Self {
        assert!(n >= 2, "a planform needs at least two stations, got {n}");

        #[allow(clippy::cast_precision_loss)]
        let eta: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        let cbar = chord_distribution(&eta, taper);

        let cbave: Vec<f64> = cbar.windows(2).map(|c| (c[0] + c[1]) / 2.0).collect();
        let deta: Vec<f64> = eta.windows(2).map(|e| e[1] - e[0]).collect();
        let cbarmac = normalized_mac(&cbar, &deta);

        Self {
            s: Variable::free::<Area>("S", "surface area"),
            ar: Variable::dimensionless("AR", "aspect ratio"),
            b: Variable::free::<Length>("b", "span"),
            tau: Variable::dimensionless("tau", "airfoil thickness ratio"),
            cl_max: Variable::fixed("CLmax", "maximum lift coefficient", 1.39),
            cm: Variable::fixed("CM", "wing moment coefficient", 0.14),
            croot: Variable::free::<Length>("croot", "root chord"),
            cmac: Variable::free::<Length>("cmac", "mean aerodynamic chord"),
            lam: Variable::fixed("lam", "taper ratio", taper),
            cbarmac: Variable::fixed("cbarmac", "non-dim MAC", cbarmac),
            cbar: Variable::fixed_vector("cbar", "non-dim chord at nodes", cbar),
            cave: Variable::vector::<Length>(n - 1, "cave", "mid section chord"),
            cbave: Variable::fixed_vector("cbave", "non-dim mid section chord", cbave),
            deta: Variable::fixed_vector("deta", "panel width in 2y/b", deta),
            eta,
        }
    }

    /// Number of spanwise stations.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.eta.len()
    }

    /// Station positions as fractions of the half span, `2y/b`.
    #[must_use]
    pub fn eta(&self) -> &[f64] {
        &self.eta
    }
}

impl Default for Planform {
    fn default() -> Self {
        Self::new(5, 0.5)
    }
}

/// Chord at each station over the mean chord, for a linear taper.
fn chord_distribution(eta: &[f64], taper: f64) -> Vec<f64> {
    eta.iter()
        .map(|e| 2.0 / (1.0 + taper) * (1.0 + (taper - 1.0) * e))
        .collect()
}

/// Area-weighted mean aerodynamic chord, normalized by the root chord.
fn normalized_mac(cbar: &[f64], deta: &[f64]) -> f64 {
    let (num, den) = cbar
        .windows(2)
        .zip(deta)
        .fold((0.0, 0.0), |(num, den), (c, de)| {
            let lam = c[1] / c[0];
            let mac = 2.0 / 3.0 * c[0] * (1.0 + lam + lam * lam) / (1.0 + lam);
            let area = (c[0] + c[1]) / 2.0 * de;
            (num + area * mac, den + area)
        });
    num / den / cbar[0]
}

impl ConstraintModel for Planform {
    fn constraints(&self) -> ConstraintSet {
        let mut set = ConstraintSet::from([
            self.b.pow(2.0).equals(&self.s * &self.ar),
            self.croot.equals(&self.s / &self.b * &self.cbar[0]),
            self.cmac.equals(&self.croot * &self.cbarmac),
        ]);
        set.extend(
            self.cave
                .iter()
                .zip(&self.cbave)
                .map(|(cave, cbave)| cave.equals(cbave * &self.s / &self.b)),
        );
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{area::square_meter, length::meter};

    use crate::support::{
        program::Program,
        solve::{GpSolver, Solver},
    };

    #[test]
    fn untapered_chord_is_uniform() {
        let planform = Planform::new(4, 1.0);
        for cbar in &planform.cbar {
            assert_relative_eq!(cbar.value().unwrap(), 1.0);
        }
        assert_relative_eq!(planform.cbarmac.value().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tapered_chord_distribution() {
        let planform = Planform::default();
        let cbar: Vec<f64> = planform.cbar.iter().filter_map(Variable::value).collect();

        // Root 2/(1+λ), tip 2λ/(1+λ).
        assert_relative_eq!(cbar[0], 4.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(cbar[4], 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(planform.cave.len(), 4);
        assert_relative_eq!(planform.eta()[2], 0.5);

        let total: f64 = planform.deta.iter().filter_map(Variable::value).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);

        // The MAC of a linear taper, (2/3)(1 + λ + λ²)/(1 + λ), relative to the root.
        assert_relative_eq!(
            planform.cbarmac.value().unwrap(),
            2.0 / 3.0 * 1.75 / 1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn geometry_follows_area_and_aspect_ratio() {
        let planform = Planform::default();
        let set = planform
            .constraints()
            .with_substitution(&planform.s, Area::new::<square_meter>(2.0))
            .with_substitution(&planform.ar, 8.0);
        let program = Program::new(&planform.cmac, set).unwrap();
        let solution = GpSolver::default().solve(&program).unwrap();

        let b: Length = solution.quantity(&planform.b).unwrap();
        assert_relative_eq!(b.get::<meter>(), 4.0, max_relative = 1e-6);

        let croot: Length = solution.quantity(&planform.croot).unwrap();
        assert_relative_eq!(croot.get::<meter>(), 0.5 * 4.0 / 3.0, max_relative = 1e-6);
        assert_relative_eq!(
            solution.value(&planform.cmac).unwrap(),
            0.5 * 4.0 / 3.0 * 7.0 / 9.0,
            max_relative = 1e-6
        );
    }
}
