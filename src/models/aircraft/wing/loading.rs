use std::f64::consts::PI;

use uom::si::f64::{Force, Length, Torque};

use crate::{
    models::aircraft::FlightState,
    support::{
        constraint::{ConstraintModel, ConstraintSet, Relate},
        modular::PerformanceModel,
        nomial::Variable,
        units::{ForcePerLength, SiQuantity},
    },
};

use super::Wing;

/// Torsion of a spar that carries the wing pitching moment.
#[derive(Debug, Clone)]
struct Torsion {
    qne: Variable,
    j: Vec<Variable>,
    g: Variable,
    cm: Variable,
}

/// Discretized beam model of a wing spar under distributed lift.
///
/// Shear, moment, slope and deflection are integrated from the tip to the
/// root with the trapezoidal rule. Lift at each station is proportional to
/// the local chord. If the spar carries torsion, the twist from the wing
/// pitching moment at never exceed speed is limited as well.
#[derive(Debug, Clone)]
pub struct SparLoading {
    /// Max loading, 5.
    pub n_max: Variable,
    /// Safety load factor, 1.
    pub n_safety: Variable,
    /// Max tip deflection over half span, 0.2.
    pub kappa: Variable,
    /// Weight carried by the wing.
    pub w: Variable,
    /// Load factor.
    pub n: Variable,
    /// Max tip twist, 15°.
    pub twmax: Variable,
    /// Tip shear, effectively zero.
    pub stip: Variable,
    /// Tip moment, effectively zero.
    pub mtip: Variable,
    /// Root slope, effectively zero.
    pub throot: Variable,
    /// Root deflection, effectively zero.
    pub wroot: Variable,
    /// Distributed load at each station.
    pub q: Vec<Variable>,
    /// Shear at each station.
    pub s: Vec<Variable>,
    /// Bending moment at each station.
    pub m: Vec<Variable>,
    /// Deflection angle at each station.
    pub th: Vec<Variable>,
    /// Deflection at each station.
    pub deflection: Vec<Variable>,
    /// Local moment from twisting on each panel.
    pub mtw: Vec<Variable>,
    /// Twist of each panel.
    pub theta: Vec<Variable>,
    pub(super) b: Variable,
    pub(super) cbar: Vec<Variable>,
    cave: Vec<Variable>,
    deta: Vec<Variable>,
    i: Vec<Variable>,
    sy: Vec<Variable>,
    e: Variable,
    sigma: Variable,
    torsion: Option<Torsion>,
}

impl SparLoading {
    /// Returns `None` if `wing` has no spar.
    #[must_use]
    pub fn new(wing: &Wing, state: &FlightState) -> Option<Self> {
        let spar = wing.spar.as_ref()?;
        let planform = &wing.planform;
        let n = planform.stations();

        Some(Self {
            n_max: Variable::fixed("Nmax", "max loading", 5.0),
            n_safety: Variable::fixed("Nsafety", "safety load factor", 1.0),
            kappa: Variable::fixed("kappa", "max tip deflection ratio", 0.2),
            w: Variable::free::<Force>("W", "loading weight"),
            n: Variable::dimensionless("N", "loading factor"),
            twmax: Variable::fixed("twmax", "max tip twist", 15.0 * PI / 180.0),
            stip: Variable::fixed("Stip", "tip loading", Force::from_si(1e-10)),
            mtip: Variable::fixed("Mtip", "tip moment", Torque::from_si(1e-10)),
            throot: Variable::fixed("throot", "root deflection angle", 1e-10),
            wroot: Variable::fixed("wroot", "root deflection", Length::from_si(1e-10)),
            q: Variable::vector::<ForcePerLength>(n, "q", "distributed wing loading"),
            s: Variable::vector::<Force>(n, "S", "shear along wing"),
            m: Variable::vector::<Torque>(n, "M", "wing section root moment"),
            th: Variable::dimensionless_vector(n, "th", "deflection angle"),
            deflection: Variable::vector::<Length>(n, "w", "wing deflection"),
            mtw: Variable::vector::<Torque>(n - 1, "Mtw", "local moment due to twisting"),
            theta: Variable::dimensionless_vector(n - 1, "theta", "twist deflection"),
            b: planform.b.clone(),
            cbar: planform.cbar.clone(),
            cave: planform.cave.clone(),
            deta: planform.deta.clone(),
            i: spar.i().to_vec(),
            sy: spar.sy().to_vec(),
            e: spar.material().e.clone(),
            sigma: spar.material().sigma.clone(),
            torsion: spar.j().map(|j| Torsion {
                qne: state.qne.clone(),
                j: j.to_vec(),
                g: spar.shear_material().g.clone(),
                cm: planform.cm.clone(),
            }),
        })
    }

    /// Whether the twist of the spar is limited.
    #[must_use]
    pub fn carries_torsion(&self) -> bool {
        self.torsion.is_some()
    }

    /// The beam relations, without the chord-proportional load.
    pub(super) fn beam(&self) -> ConstraintSet {
        let half_span = 0.5 * &self.b;
        let last = self.q.len() - 1;
        let mut set = ConstraintSet::new();

        for i in 0..last {
            let step = 0.5 * &self.deta[i] * &half_span;
            set.extend([
                self.s[i].geq(&self.s[i + 1] + &step * (&self.q[i] + &self.q[i + 1])),
                self.m[i].geq(&self.m[i + 1] + &step * (&self.s[i] + &self.s[i + 1])),
                self.th[i + 1].geq(
                    &self.th[i]
                        + &step / (&self.e * &self.i[i]) * (&self.m[i + 1] + &self.m[i]),
                ),
                self.deflection[i + 1]
                    .geq(&self.deflection[i] + &step * (&self.th[i + 1] + &self.th[i])),
                self.sigma.geq(&self.m[i] / &self.sy[i]),
            ]);
        }

        set.extend([
            self.n.equals(&self.n_safety * &self.n_max),
            self.s[last].geq(&self.stip),
            self.m[last].geq(&self.mtip),
            self.th[0].geq(&self.throot),
            self.deflection[0].geq(&self.wroot),
            (&self.deflection[last] / &half_span).leq(&self.kappa),
        ]);

        if let Some(torsion) = &self.torsion {
            for i in 0..last {
                let panel = &self.deta[i] * &half_span;
                set.push(self.mtw[i].geq(
                    &torsion.cm
                        * self.cave[i].pow(2.0)
                        * &torsion.qne
                        * &panel
                        * &self.n_safety,
                ));
                let twist = &self.mtw[i] / (&torsion.g * &torsion.j[i]) * &panel;
                set.push(if i == 0 {
                    self.theta[0].geq(twist)
                } else {
                    self.theta[i].geq(&self.theta[i - 1] + twist)
                });
            }
            set.push(self.twmax.geq(&self.theta[last - 1]));
        }
        set
    }
}

impl ConstraintModel for SparLoading {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.beam();
        set.extend(
            self.q
                .iter()
                .zip(&self.cbar)
                .map(|(q, cbar)| q.geq(&self.n * &self.w / &self.b * cbar)),
        );
        set
    }
}

impl PerformanceModel for SparLoading {}
