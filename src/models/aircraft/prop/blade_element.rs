use std::f64::consts::PI;

use uom::si::{
    f64::{AngularVelocity, Force, Length, Torque, Velocity},
    velocity::meter_per_second,
};

use crate::{
    models::aircraft::FlightState,
    support::{
        constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
        fit::{FitConstraintSet, FitError, FitInput, FitRecord},
        modular::PerformanceModel,
        nomial::{Posynomial, Variable},
        units::Circulation,
    },
};

use super::{max_rotation_rate, tip_mach, Propeller};

const BLADE_POLAR: &str = include_str!("dae51_fitdata.csv");

/// Blade elements of a propeller, one value per element from hub to tip.
///
/// Each element balances its lift and drag against the velocity it induces,
/// with Prandtl's tip loss correction on the wake circulation.
#[derive(Debug, Clone)]
pub struct BladeElementPerf {
    /// Element thrust.
    pub dt: Vec<Variable>,
    /// Local induced efficiency.
    pub eta_i: Vec<Variable>,
    /// Element torque.
    pub dq: Vec<Variable>,
    /// Axial total relative velocity.
    pub wa: Vec<Variable>,
    /// Tangential total relative velocity.
    pub wt: Vec<Variable>,
    /// Total relative velocity.
    pub wr: Vec<Variable>,
    /// Axial induced velocity.
    pub va: Vec<Variable>,
    /// Tangential induced velocity.
    pub vt: Vec<Variable>,
    /// Circulation.
    pub g: Vec<Variable>,
    /// Local lift coefficient.
    pub cl: Vec<Variable>,
    /// Local drag coefficient.
    pub cd: Vec<Variable>,
    /// Local radius.
    pub r: Vec<Variable>,
    /// Wake advance ratio.
    pub lam_w: Vec<Variable>,
    /// Drag to lift ratio.
    pub eps: Vec<Variable>,
    /// Blade aspect ratio.
    pub ar_b: Vec<Variable>,
    /// Blade Reynolds number.
    pub re: Vec<Variable>,
    /// Intermediate tip loss variable.
    pub f: Vec<Variable>,
    /// Prandtl tip loss factor.
    pub tip_loss: Vec<Variable>,
    /// Mach number.
    pub m: Vec<Variable>,
    /// Rotation rate.
    pub omega: Variable,
    /// Number of blades, 2.
    pub b: Variable,
    /// Max blade aspect ratio, 50.
    pub ar_b_max: Variable,
    /// Max airfoil lift coefficient, 0.6.
    pub cl_max: Variable,
    /// Length of each element.
    pub dr: Variable,
    /// Speed of sound at altitude, 295 m/s.
    pub a: Variable,
    polar: FitConstraintSet,
    v: Variable,
    rho: Variable,
    mu: Variable,
    radius: Variable,
    c: Vec<Variable>,
}

impl BladeElementPerf {
    /// One element per chord of `prop`.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled blade polar fails to load.
    pub fn new(prop: &Propeller, state: &FlightState) -> Result<Self, FitError> {
        let n = prop.elements();
        let cl = Variable::dimensionless_vector(n, "cl", "local lift coefficient");
        let cd = Variable::dimensionless_vector(n, "cd", "local drag coefficient");
        let re = Variable::dimensionless_vector(n, "Re", "blade reynolds number");

        let record = FitRecord::from_csv(BLADE_POLAR, 0)?;
        let polar =
            FitConstraintSet::new(&record, &cd, [FitInput::from(&cl), FitInput::from(&re)])?;

        Ok(Self {
            dt: Variable::vector::<Force>(n, "dT", "thrust"),
            eta_i: Variable::dimensionless_vector(n, "eta_i", "local induced efficiency"),
            dq: Variable::vector::<Torque>(n, "dQ", "torque"),
            wa: Variable::vector::<Velocity>(n, "Wa", "axial total relative velocity"),
            wt: Variable::vector::<Velocity>(n, "Wt", "tangential total relative velocity"),
            wr: Variable::vector::<Velocity>(n, "Wr", "total relative velocity"),
            va: Variable::vector::<Velocity>(n, "va", "axial induced velocity"),
            vt: Variable::vector::<Velocity>(n, "vt", "tangential induced velocity"),
            g: Variable::vector::<Circulation>(n, "G", "circulation"),
            cl,
            cd,
            r: Variable::vector::<Length>(n, "r", "local radius"),
            lam_w: Variable::dimensionless_vector(n, "lam_w", "advance ratio"),
            eps: Variable::dimensionless_vector(n, "eps", "blade efficiency"),
            ar_b: Variable::dimensionless_vector(n, "AR_b", "blade aspect ratio"),
            re,
            f: Variable::dimensionless_vector(n, "f", "intermediate tip loss variable"),
            tip_loss: Variable::dimensionless_vector(n, "F", "Prandtl tip loss factor"),
            m: Variable::dimensionless_vector(n, "M", "mach number"),
            omega: Variable::free::<AngularVelocity>("omega", "propeller rotation rate"),
            b: Variable::fixed("B", "number of blades", 2.0),
            ar_b_max: Variable::fixed("AR_b_max", "max blade aspect ratio", 50.0),
            cl_max: Variable::fixed("cl_max", "max airfoil cl", 0.6),
            dr: Variable::free::<Length>("dr", "length of blade element"),
            a: Variable::fixed(
                "a",
                "speed of sound at altitude",
                Velocity::new::<meter_per_second>(295.0),
            ),
            polar,
            v: state.v.clone(),
            rho: state.rho.clone(),
            mu: state.mu.clone(),
            radius: prop.r.clone(),
            c: prop.c.clone(),
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn elements(&self) -> usize {
        self.r.len()
    }
}

impl ConstraintModel for BladeElementPerf {
    fn constraints(&self) -> ConstraintSet {
        let (v, rho, radius, b) = (&self.v, &self.rho, &self.radius, &self.b);
        // (2/π)(1.01116 f^0.0379556)^10
        let tip_loss_coefficient = 2.0 / PI * 1.01116_f64.powi(10);

        let mut set = ConstraintSet::new();
        for i in 0..self.elements() {
            let (wa, wt, wr) = (&self.wa[i], &self.wt[i], &self.wr[i]);
            let (g, r, c) = (&self.g[i], &self.r[i], &self.c[i]);
            let (lam_w, eps) = (&self.lam_w[i], &self.eps[i]);
            let blade_load = rho * b * g * &self.dr;
            let wake = 4.0 * lam_w * radius / (PI * b * r);

            set.extend([
                wa.geq(v + &self.va[i]).tight(),
                (wt + &self.vt[i]).leq(&self.omega * r).tight(),
                g.equals(0.5 * wr * c * &self.cl[i]).tight(),
                self.tip_loss[i].equals(tip_loss_coefficient * self.f[i].pow(0.379_556)),
                self.m[i].equals(wr / &self.a),
                lam_w.equals(r / radius * wa / wt),
                self.va[i].equals(&self.vt[i] * wt / wa),
                eps.equals(&self.cd[i] / &self.cl[i]),
                self.dq[i].geq(&blade_load * r * (wa + eps * wt)).tight(),
                self.ar_b[i].equals(radius / c),
                self.ar_b[i].leq(&self.ar_b_max),
                self.re[i].equals(wr * c * rho / &self.mu),
                self.eta_i[i].equals(v / (&self.omega * r) * wt / wa),
                (&self.f[i] + r / radius * b / (2.0 * lam_w))
                    .leq(b / (2.0 * lam_w))
                    .tight(),
                self.cl[i].leq(&self.cl_max),
                Constraint::equal(wr.pow(2.0), wa.pow(2.0) + wt.pow(2.0)),
                Constraint::leq(&self.dt[i], &blade_load * (wt - eps * wa)).tight(),
                (self.vt[i].pow(2.0) * self.tip_loss[i].pow(2.0) * (1.0 + wake.pow(2.0)))
                    .geq((b * g / (4.0 * PI * r)).pow(2.0))
                    .tight(),
            ]);
        }
        set.include_model(&self.polar);
        set
    }
}

impl PerformanceModel for BladeElementPerf {}

/// Propeller performance summed over its blade elements.
#[derive(Debug, Clone)]
pub struct BladeElementProp {
    /// Tip mach number limit, 0.5.
    pub m_tip: Variable,
    /// Max rotation rate, 10000 rpm.
    pub omega_max: Variable,
    /// Overall efficiency.
    pub eta: Variable,
    /// Total thrust.
    pub t: Variable,
    /// Total torque.
    pub q: Variable,
    pub blade: BladeElementPerf,
    radius: Variable,
    t_m: Variable,
}

impl BladeElementProp {
    /// # Errors
    ///
    /// Returns a [`FitError`] if the bundled blade polar fails to load.
    pub fn new(prop: &Propeller, state: &FlightState) -> Result<Self, FitError> {
        Ok(Self {
            m_tip: tip_mach(),
            omega_max: max_rotation_rate(),
            eta: Variable::dimensionless("eta", "overall efficiency"),
            t: Variable::free::<Force>("T", "total thrust"),
            q: Variable::free::<Torque>("Q", "total torque"),
            blade: BladeElementPerf::new(prop, state)?,
            radius: prop.r.clone(),
            t_m: prop.t_m.clone(),
        })
    }

    /// Rotation rate, shared by every element.
    #[must_use]
    pub fn omega(&self) -> &Variable {
        &self.blade.omega
    }
}

impl ConstraintModel for BladeElementProp {
    fn constraints(&self) -> ConstraintSet {
        let blade = &self.blade;
        #[allow(clippy::cast_precision_loss)]
        let n = blade.elements() as f64;
        let element = &self.radius / n;

        let mut set = ConstraintSet::from([
            blade.dr.equals(&element),
            blade.r[0].equals(&self.radius / (2.0 * n)),
        ]);
        for i in 1..blade.elements() {
            set.extend([
                blade.r[i].geq(&blade.r[i - 1] + &element).tight(),
                blade.eta_i[i].equals(&blade.eta_i[i - 1]),
            ]);
        }

        let torque: Posynomial = blade.dq.iter().sum();
        let thrust: Posynomial = blade.dt.iter().sum();
        set.extend([
            self.q.geq(torque).tight(),
            self.eta.equals(&blade.v * &self.t / (&blade.omega * &self.q)),
            blade.m[blade.elements() - 1].leq(&self.m_tip),
            self.t_m.geq(&self.t),
            blade.omega.leq(&self.omega_max),
            self.t.leq(thrust).tight(),
        ]);
        set.include_model(blade);
        set
    }
}

impl PerformanceModel for BladeElementProp {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintKind;

    #[test]
    fn blade_elements_are_signomial() {
        let prop = Propeller::default();
        let blade = BladeElementPerf::new(&prop, &FlightState::default()).unwrap();

        let set = blade.constraints();
        assert_eq!(set.len(), 5 * 19);
        assert_eq!(set.count(ConstraintKind::SignomialEquality), 5);
        assert_eq!(set.count(ConstraintKind::Signomial), 10);
        assert!(!set.is_gp());
    }

    #[test]
    fn propeller_sums_thrust_and_torque_over_elements() {
        let prop = Propeller::new(3);
        let perf = BladeElementProp::new(&prop, &FlightState::default()).unwrap();

        let set = perf.constraints();
        assert_eq!(set.len(), 2 + 2 * 2 + 6 + 3 * 19);
        assert_eq!(set.count(ConstraintKind::Signomial), 3 * 2 + 1);
        assert_eq!(perf.omega().name(), "omega");
    }
}
