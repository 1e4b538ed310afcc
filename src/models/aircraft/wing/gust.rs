use std::f64::consts::{FRAC_PI_2, PI};

use uom::si::{
    f64::{Force, Velocity},
    velocity::meter_per_second,
};

use crate::{
    models::aircraft::FlightState,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        fit::{FitConstraintSet, FitError, FitInput, FitRecord},
        modular::PerformanceModel,
        nomial::{Monomial, Variable},
    },
};

use super::{SparLoading, Wing};

const ARCTAN_FIT: &str = include_str!("arctan_fit.csv");

/// [`SparLoading`] with the extra lift of a vertical gust.
///
/// A gust of speed `vgust` that grows as `1 - cos(πη/2)` toward the tip adds
/// an angle of attack `atan(vgust (1 - cos(πη/2)) / V)` at each station. The
/// arctangent is replaced by a softmax-affine fit.
#[derive(Debug, Clone)]
pub struct GustLoading {
    pub loading: SparLoading,
    /// Gust velocity, 10 m/s.
    pub vgust: Variable,
    /// Wing weight.
    pub ww: Variable,
    /// Vehicle speed.
    pub v: Variable,
    /// Wing lift coefficient.
    pub cl: Variable,
    /// Gust angle of attack at each station.
    pub agust: Vec<Variable>,
    /// `1 - cos(πη/2)` at each station.
    pub cosminus1: Vec<Variable>,
    fit: FitConstraintSet,
}

impl GustLoading {
    /// Returns `Ok(None)` if `wing` has no spar.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled arctangent fit fails to load.
    pub fn new(wing: &Wing, state: &FlightState) -> Result<Option<Self>, FitError> {
        let Some(loading) = SparLoading::new(wing, state) else {
            return Ok(None);
        };
        let eta = wing.planform.eta();

        let vgust = Variable::fixed(
            "vgust",
            "gust velocity",
            Velocity::new::<meter_per_second>(10.0),
        );
        let v = Variable::free::<Velocity>("v", "vehicle speed");
        let agust = Variable::dimensionless_vector(eta.len(), "agust", "gust angle of attack");
        let cosminus1 = Variable::fixed_vector(
            "cosminus1",
            "1 minus cosine factor",
            eta.iter().enumerate().map(|(i, e)| {
                if i == 0 {
                    1e-10
                } else {
                    1.0 - (e * FRAC_PI_2).cos()
                }
            }),
        );

        let record = FitRecord::from_csv(ARCTAN_FIT, 0)?;
        let gust_ratio: Vec<Monomial> = cosminus1.iter().map(|c| c * &vgust / &v).collect();
        let fit = FitConstraintSet::new(&record, &agust, [FitInput::from(gust_ratio)])?;

        Ok(Some(Self {
            loading,
            vgust,
            ww: Variable::free::<Force>("Ww", "wing weight"),
            v,
            cl: Variable::dimensionless("cl", "wing lift coefficient"),
            agust,
            cosminus1,
            fit,
        }))
    }
}

impl ConstraintModel for GustLoading {
    fn constraints(&self) -> ConstraintSet {
        let l = &self.loading;
        let mut set = l.constraints();
        set.include_model(&self.fit);
        for ((q, cbar), agust) in l.q.iter().zip(&l.cbar).zip(&self.agust) {
            let steady = &l.w * &l.n / &l.b * cbar;
            let gust = 2.0 * PI * agust / &self.cl;
            set.push(q.geq(&steady + &steady * &gust + &l.n / &l.b * cbar * &gust * &self.ww));
        }
        set
    }
}

impl PerformanceModel for GustLoading {}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::aircraft::wing::{SparKind, WingConfig};

    #[test]
    fn gust_profile_grows_toward_the_tip() {
        let wing = Wing::new();
        let gust = GustLoading::new(&wing, &FlightState::default())
            .unwrap()
            .unwrap();

        let profile: Vec<f64> = gust.cosminus1.iter().filter_map(Variable::value).collect();
        assert_relative_eq!(profile[0], 1e-10);
        assert_relative_eq!(profile[4], 1.0, epsilon = 1e-12);
        assert!(profile.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(gust.fit.points(), 5);
    }

    #[test]
    fn adds_a_fit_and_gust_load_per_station() {
        let wing = Wing::new();
        let state = FlightState::default();
        let gust = GustLoading::new(&wing, &state).unwrap().unwrap();
        let steady = SparLoading::new(&wing, &state).unwrap();

        let set = gust.constraints();
        assert_eq!(set.len(), steady.constraints().len() + 5 + 5);
        assert!(set.is_gp());
    }

    #[test]
    fn wing_without_spar_has_no_gust_loading() {
        let wing = Wing::with_config(WingConfig {
            spar: SparKind::None,
            ..WingConfig::default()
        });
        assert!(GustLoading::new(&wing, &FlightState::default()).unwrap().is_none());
    }
}
