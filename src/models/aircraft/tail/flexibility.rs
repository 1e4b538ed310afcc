use std::f64::consts::PI;

use crate::{
    models::aircraft::wing::SpWing,
    support::{
        constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
        modular::PerformanceModel,
        nomial::Variable,
    },
};

use super::{HorizontalTail, TailBoomBending};

/// Pitch stability with a tail boom that bends under tail load.
///
/// Boom deflection twists the horizontal tail and costs it authority. The
/// lost authority is made up by tail volume, which keeps the static margin
/// above `sm_corr`.
#[derive(Debug, Clone)]
pub struct TailBoomFlexibility {
    /// Tail boom flexibility factor.
    pub fne: Variable,
    /// Change in downwash with angle of attack.
    pub deda: Variable,
    /// Corrected static margin, 0.55.
    pub sm_corr: Variable,
    /// First bound on static margin.
    pub sph1: Variable,
    /// Second bound on static margin.
    pub sph2: Variable,
    mh: Variable,
    vh: Variable,
    lh: Variable,
    cl_hmin: Variable,
    th: Variable,
    mw: Variable,
    sw: Variable,
    bw: Variable,
    cl_wmax: Variable,
    cm: Variable,
}

impl TailBoomFlexibility {
    #[must_use]
    pub fn new(htail: &HorizontalTail, bending: &TailBoomBending, wing: &SpWing) -> Self {
        let planform = &wing.wing.planform;
        Self {
            fne: Variable::dimensionless("Fne", "tail boom flexibility factor"),
            deda: Variable::dimensionless("deda", "wing downwash derivative"),
            sm_corr: Variable::fixed("SMcorr", "corrected static margin", 0.55),
            sph1: Variable::dimensionless("sph1", "flexibility helper variable 1"),
            sph2: Variable::dimensionless("sph2", "flexibility helper variable 2"),
            mh: htail.mh.clone(),
            vh: htail.vh.clone(),
            lh: htail.lh.clone(),
            cl_hmin: htail.cl_hmin.clone(),
            th: bending.th.clone(),
            mw: wing.mw.clone(),
            sw: planform.s.clone(),
            bw: planform.b.clone(),
            cl_wmax: planform.cl_max.clone(),
            cm: planform.cm.clone(),
        }
    }
}

impl ConstraintModel for TailBoomFlexibility {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.fne.geq(1.0 + &self.mh * &self.th),
            (&self.sph1 * &self.mw * &self.fne / (&self.mh * &self.vh) + &self.deda).leq(1.0),
            self.sph2.leq(&self.vh * &self.cl_hmin / &self.cl_wmax),
            self.deda
                .geq(&self.mw * &self.sw / (4.0 * PI * &self.bw * &self.lh)),
            Constraint::leq(
                &self.sm_corr + &self.cm / &self.cl_wmax,
                &self.sph1 + &self.sph2,
            ),
        ])
    }
}

impl PerformanceModel for TailBoomFlexibility {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::aircraft::{tail::TailBoom, FlightState},
        support::constraint::ConstraintKind,
    };

    #[test]
    fn static_margin_is_the_only_signomial() {
        let htail = HorizontalTail::new();
        let tailboom = TailBoom::default();
        let bending = TailBoomBending::new(&tailboom, &htail, &FlightState::default());
        let flex = TailBoomFlexibility::new(&htail, &bending, &SpWing::new());

        let set = flex.constraints();
        assert_eq!(set.len(), 5);
        assert_eq!(set.count(ConstraintKind::Signomial), 1);
        assert_eq!(set.count(ConstraintKind::Posynomial), 4);
    }
}
