use std::{convert::Infallible, f64::consts::PI};

use uom::si::{
    f64::{Area, Force, Length, MassDensity, Pressure, Torque, Velocity},
    mass_density::kilogram_per_cubic_meter,
    pressure::megapascal,
    velocity::meter_per_second,
};

use crate::{
    models::{
        aircraft::{
            beam::{Beam, BeamLoad},
            FlightState,
        },
        gravity,
    },
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::{PerformanceModel, PhysicalComponent},
        nomial::Variable,
        units::{ArealDensity, SecondMomentOfArea, SiQuantity},
    },
};

use super::{HorizontalTail, TubeSpar, VerticalTail};

/// Tapered tube carrying the tail surfaces.
#[derive(Debug, Clone)]
pub struct TailBoom {
    /// Tail boom length.
    pub l: Variable,
    /// Tail boom surface area.
    pub s: Variable,
    /// Twice the tail boom length.
    pub b: Variable,
    /// Thickness to width ratio, 1.
    pub tau: Variable,
    /// Secondary structure areal density, 0.15 kg/m².
    pub rho_a: Variable,
    /// Normalized segment length.
    pub deta: Variable,
    pub spar: TubeSpar,
    secondary_weight: bool,
}

impl TailBoom {
    /// A boom with `n` stations.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "a tail boom needs at least two stations, got {n}");
        let l = Variable::free::<Length>("l", "tail boom length");
        #[allow(clippy::cast_precision_loss)]
        let deta = Variable::fixed("deta", "normalized segment length", 1.0 / (n - 1) as f64);
        let spar = TubeSpar::new(n, &deta, &l);
        Self {
            s: Variable::free::<Area>("S", "tail boom surface area"),
            b: Variable::free::<Length>("b", "twice tail boom length"),
            tau: Variable::fixed("tau", "thickness to width ratio", 1.0),
            rho_a: Variable::fixed(
                "rhoA",
                "total aerial density",
                ArealDensity::from_si(0.15),
            ),
            l,
            deta,
            spar,
            secondary_weight: false,
        }
    }

    /// Adds secondary structure weight proportional to the wetted area.
    #[must_use]
    pub fn with_secondary_weight(mut self) -> Self {
        self.secondary_weight = true;
        self
    }

    /// Number of stations.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.spar.d.len() + 1
    }

    /// Tail boom weight.
    #[must_use]
    pub fn w(&self) -> &Variable {
        &self.spar.w
    }

    /// Root diameter.
    #[must_use]
    pub fn d0(&self) -> &Variable {
        &self.spar.d[0]
    }
}

impl Default for TailBoom {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ConstraintModel for TailBoom {
    fn constraints(&self) -> ConstraintSet {
        let secondary = self
            .secondary_weight
            .then(|| &self.rho_a * gravity() * &self.s);
        let mut set = self.spar.constraints_with(secondary);
        set.extend([
            self.s.equals(PI * &self.l * self.d0()),
            self.b.equals(2.0 * &self.l),
        ]);
        set
    }
}

impl PhysicalComponent for TailBoom {
    type State = FlightState;
    type Performance = TailBoomAero;
    type Error = Infallible;

    fn flight_model(&self, state: &FlightState) -> Result<TailBoomAero, Infallible> {
        Ok(TailBoomAero::new(self, state))
    }
}

/// Skin friction of a tail boom in one flight state.
#[derive(Debug, Clone)]
pub struct TailBoomAero {
    /// Skin friction coefficient.
    pub cf: Variable,
    /// Reynolds number.
    pub re: Variable,
    l: Variable,
    rho: Variable,
    v: Variable,
    mu: Variable,
}

impl TailBoomAero {
    #[must_use]
    pub fn new(tailboom: &TailBoom, state: &FlightState) -> Self {
        Self {
            cf: Variable::dimensionless("Cf", "tail boom skin friction coefficient"),
            re: Variable::dimensionless("Re", "tail boom reynolds number"),
            l: tailboom.l.clone(),
            rho: state.rho.clone(),
            v: state.v.clone(),
            mu: state.mu.clone(),
        }
    }
}

impl ConstraintModel for TailBoomAero {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.re.equals(&self.v * &self.rho * &self.l / &self.mu),
            self.cf.geq(0.455 * self.re.pow(-0.3)),
        ])
    }
}

impl PerformanceModel for TailBoomAero {}

/// Sea level never exceed condition for tail boom loads.
#[derive(Debug, Clone)]
pub struct TailBoomState {
    /// Sea level air density, 1.225 kg/m³.
    pub rhosl: Variable,
    /// Never exceed speed, 40 m/s.
    pub vne: Variable,
}

impl TailBoomState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rhosl: Variable::fixed(
                "rhosl",
                "air density at sea level",
                MassDensity::new::<kilogram_per_cubic_meter>(1.225),
            ),
            vne: Variable::fixed(
                "Vne",
                "never exceed vehicle speed",
                Velocity::new::<meter_per_second>(40.0),
            ),
        }
    }
}

impl Default for TailBoomState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for TailBoomState {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
    }
}

/// Torsion of the tail boom root from full vertical tail lift.
#[derive(Debug, Clone)]
pub struct VerticalBoomTorsion {
    /// Vertical tail moment.
    pub t: Variable,
    /// Torsional stress limit of carbon, 210 MPa.
    pub taucfrp: Variable,
    j: Variable,
    d0: Variable,
    b: Variable,
    s: Variable,
    cl_max: Variable,
    rhosl: Variable,
    vne: Variable,
}

impl VerticalBoomTorsion {
    #[must_use]
    pub fn new(tailboom: &TailBoom, vtail: &VerticalTail, state: &TailBoomState) -> Self {
        let planform = &vtail.wing.planform;
        Self {
            t: Variable::free::<Torque>("T", "vertical tail moment"),
            taucfrp: Variable::fixed(
                "taucfrp",
                "torsional stress limit of carbon",
                Pressure::new::<megapascal>(210.0),
            ),
            j: tailboom.spar.j[0].clone(),
            d0: tailboom.d0().clone(),
            b: planform.b.clone(),
            s: planform.s.clone(),
            cl_max: planform.cl_max.clone(),
            rhosl: state.rhosl.clone(),
            vne: state.vne.clone(),
        }
    }
}

impl ConstraintModel for VerticalBoomTorsion {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.t.geq(
                0.5 * &self.rhosl * self.vne.pow(2.0) * &self.s * &self.cl_max * &self.b,
            ),
            self.taucfrp.geq(0.5 * &self.t * &self.d0 / &self.j),
        ])
    }
}

impl PerformanceModel for VerticalBoomTorsion {}

/// Tail boom bending from horizontal tail lift at never exceed speed.
///
/// The boom is a [`Beam`] with uniform normalized shear, scaled by the tail
/// force and boom length.
#[derive(Debug, Clone)]
pub struct TailBoomBending {
    /// Tail force.
    pub f: Variable,
    /// Tail boom deflection angle at the tail.
    pub th: Variable,
    /// Max tail boom deflection, 0.1.
    pub kappa: Variable,
    /// Safety load factor, 1.
    pub n_safety: Variable,
    /// Minimum polar moment of inertia, 1e-10 m⁴.
    pub jmin: Variable,
    /// Section root moment of each segment.
    pub mr: Vec<Variable>,
    pub beam: Beam,
    deta: Variable,
    qne: Variable,
    s: Variable,
    cl_max: Variable,
    e: Variable,
    sigma: Variable,
    l: Variable,
    i: Vec<Variable>,
    j: Vec<Variable>,
    sy: Vec<Variable>,
}

impl TailBoomBending {
    #[must_use]
    pub fn new(tailboom: &TailBoom, htail: &HorizontalTail, state: &FlightState) -> Self {
        let n = tailboom.stations();
        let spar = &tailboom.spar;
        Self {
            f: Variable::free::<Force>("F", "tail force"),
            th: Variable::dimensionless("th", "tail boom deflection angle"),
            kappa: Variable::fixed("kappa", "max tail boom deflection", 0.1),
            n_safety: Variable::fixed("Nsafety", "safety load factor", 1.0),
            jmin: Variable::fixed(
                "Jmin",
                "minimum polar moment of inertia",
                SecondMomentOfArea::from_si(1e-10),
            ),
            mr: Variable::vector::<Torque>(n - 1, "Mr", "section root moment"),
            beam: Beam::new(&BeamLoad::Shear(vec![1.0; n])),
            deta: tailboom.deta.clone(),
            qne: state.qne.clone(),
            s: htail.wing.planform.s.clone(),
            cl_max: htail.wing.planform.cl_max.clone(),
            e: spar.material.e.clone(),
            sigma: spar.material.sigma.clone(),
            l: tailboom.l.clone(),
            i: spar.i.clone(),
            j: spar.j.clone(),
            sy: spar.sy.clone(),
        }
    }
}

impl ConstraintModel for TailBoomBending {
    fn constraints(&self) -> ConstraintSet {
        let mut set = ConstraintSet::from([
            self.beam.dx.equals(&self.deta),
            self.f.geq(&self.qne * &self.s),
            self.th.equals(&self.beam.th[self.beam.nodes() - 1]),
            (&self.beam.dbar[self.beam.nodes() - 1] * &self.cl_max * &self.n_safety)
                .leq(&self.kappa),
        ]);
        for s in 0..self.mr.len() {
            set.extend([
                self.beam.eibar[s]
                    .leq(0.5 * &self.e * &self.i[s] / (&self.f * self.l.pow(2.0))),
                self.mr[s].geq(&self.beam.mbar[s] * &self.f * &self.l),
                self.sigma.geq(&self.mr[s] / &self.sy[s]),
                self.j[s].geq(&self.jmin),
            ]);
        }
        set.include_model(&self.beam);
        set
    }
}

impl PerformanceModel for TailBoomBending {}
