//! A small conceptual aircraft sizing problem.
//!
//! [`SimpleAc`] sizes the wing, speed and fuel of a fixed-fuselage aircraft
//! for a given range. Fuel may be carried in the wing and the fuselage, and
//! the available volume is the sum of the two, which makes the problem a
//! signomial program.

use std::f64::consts::PI;

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{
        Area, DynamicViscosity, Force, Frequency, Length, MassDensity, Pressure, Time, Velocity,
        Volume,
    },
    force::newton,
    frequency::hertz,
    length::{kilometer, meter},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    velocity::meter_per_second,
};

use crate::{
    models::gravity,
    support::{
        constraint::{Constraint, ConstraintModel, ConstraintSet, Relate},
        nomial::Variable,
        units::{InverseLength, SiQuantity},
    },
};

/// Simple signomial aircraft.
#[derive(Debug, Clone)]
pub struct SimpleAc {
    /// Viscosity of air.
    pub mu: Variable,
    /// Density of air.
    pub rho: Variable,
    /// Density of fuel.
    pub rho_f: Variable,
    /// Maximum lift coefficient with flaps down, 1.6.
    pub cl_max: Variable,
    /// Oswald efficiency factor, 0.92.
    pub e: Variable,
    /// Form factor, 1.17.
    pub k: Variable,
    /// Ultimate load factor, 3.3.
    pub n_ult: Variable,
    /// Wetted area ratio, 2.075.
    pub s_wetratio: Variable,
    /// Airfoil thickness to chord ratio, 0.12.
    pub tau: Variable,
    /// Structural wing weight coefficient.
    pub w_w_coeff1: Variable,
    /// Skin wing weight coefficient.
    pub w_w_coeff2: Variable,
    /// Range, 3000 km.
    pub range: Variable,
    /// Thrust specific fuel consumption, 0.6/hr.
    pub tsfc: Variable,
    /// Takeoff speed, 25 m/s.
    pub v_min: Variable,
    /// Aircraft weight excluding the wing, 6250 N.
    pub w_0: Variable,
    /// Fuselage fuel volume per unit drag area, 10 m.
    pub l_fuse: Variable,

    pub lod: Variable,
    pub d: Variable,
    pub v: Variable,
    pub w: Variable,
    pub re: Variable,
    /// Fuselage drag area.
    pub cda0: Variable,
    pub c_d: Variable,
    pub c_l: Variable,
    /// Skin friction coefficient.
    pub c_f: Variable,
    pub w_f: Variable,
    pub v_f: Variable,
    /// Fuel volume available in the wing and fuselage.
    pub v_f_avail: Variable,
    pub t_flight: Variable,

    /// Aspect ratio.
    pub a: Variable,
    /// Wing area.
    pub s: Variable,
    pub w_w: Variable,
    pub w_w_strc: Variable,
    pub w_w_surf: Variable,
    pub v_f_wing: Variable,
    pub v_f_fuse: Variable,
}

impl SimpleAc {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mu: Variable::fixed(
                "mu",
                "viscosity of air",
                DynamicViscosity::new::<pascal_second>(1.775e-5),
            ),
            rho: Variable::fixed(
                "rho",
                "density of air",
                MassDensity::new::<kilogram_per_cubic_meter>(1.23),
            ),
            rho_f: Variable::fixed(
                "rho_f",
                "density of fuel",
                MassDensity::new::<kilogram_per_cubic_meter>(817.0),
            ),
            cl_max: Variable::fixed("CLmax", "max CL with flaps down", 1.6),
            e: Variable::fixed("e", "Oswald efficiency factor", 0.92),
            k: Variable::fixed("k", "form factor", 1.17),
            n_ult: Variable::fixed("Nult", "ultimate load factor", 3.3),
            s_wetratio: Variable::fixed("Swetratio", "wetted area ratio", 2.075),
            tau: Variable::fixed("tau", "airfoil thickness to chord ratio", 0.12),
            w_w_coeff1: Variable::fixed(
                "Wwcoeff1",
                "wing weight coefficient 1",
                InverseLength::from_si(2e-5),
            ),
            w_w_coeff2: Variable::fixed(
                "Wwcoeff2",
                "wing weight coefficient 2",
                Pressure::new::<pascal>(60.0),
            ),
            range: Variable::fixed("Range", "aircraft range", Length::new::<kilometer>(3000.0)),
            tsfc: Variable::fixed(
                "TSFC",
                "thrust specific fuel consumption",
                Frequency::new::<hertz>(0.6 / 3600.0),
            ),
            v_min: Variable::fixed(
                "Vmin",
                "takeoff speed",
                Velocity::new::<meter_per_second>(25.0),
            ),
            w_0: Variable::fixed(
                "W0",
                "aircraft weight excluding wing",
                Force::new::<newton>(6250.0),
            ),
            l_fuse: Variable::fixed(
                "lfuse",
                "fuselage fuel volume per drag area",
                Length::new::<meter>(10.0),
            ),

            lod: Variable::dimensionless("L/D", "lift-to-drag ratio"),
            d: Variable::free::<Force>("D", "total drag force"),
            v: Variable::free::<Velocity>("V", "cruising speed"),
            w: Variable::free::<Force>("W", "total aircraft weight"),
            re: Variable::dimensionless("Re", "Reynolds number"),
            cda0: Variable::free::<Area>("CDA0", "fuselage drag area"),
            c_d: Variable::dimensionless("CD", "drag coefficient"),
            c_l: Variable::dimensionless("CL", "lift coefficient of wing"),
            c_f: Variable::dimensionless("Cf", "skin friction coefficient"),
            w_f: Variable::free::<Force>("Wf", "fuel weight"),
            v_f: Variable::free::<Volume>("Vf", "fuel volume"),
            v_f_avail: Variable::free::<Volume>("Vfavail", "fuel volume available"),
            t_flight: Variable::free::<Time>("Tflight", "flight time"),

            a: Variable::dimensionless("A", "aspect ratio"),
            s: Variable::free::<Area>("S", "total wing area"),
            w_w: Variable::free::<Force>("Ww", "wing weight"),
            w_w_strc: Variable::free::<Force>("Wwstrc", "wing structural weight"),
            w_w_surf: Variable::free::<Force>("Wwsurf", "wing skin weight"),
            v_f_wing: Variable::free::<Volume>("Vfwing", "fuel volume in the wing"),
            v_f_fuse: Variable::free::<Volume>("Vffuse", "fuel volume in the fuselage"),
        }
    }

    fn lift_and_weight(&self) -> ConstraintSet {
        let q = 0.5 * &self.rho * &self.s * self.v.pow(2.0);
        ConstraintSet::from([
            self.w.geq(&self.w_0 + &self.w_w + &self.w_f),
            (&self.w_0 + &self.w_w + 0.5 * &self.w_f).leq(&q * &self.c_l),
            self.w.leq(0.5 * &self.rho * &self.s * &self.cl_max * self.v_min.pow(2.0)),
            self.t_flight.geq(&self.range / &self.v),
            self.lod.equals(&self.c_l / &self.c_d),
        ])
    }

    fn thrust_and_drag(&self) -> ConstraintSet {
        let fuselage = &self.cda0 / &self.s;
        let parasitic = &self.k * &self.c_f * &self.s_wetratio;
        let induced = self.c_l.pow(2.0) / (PI * &self.a * &self.e);
        ConstraintSet::from([
            self.w_f.geq(&self.tsfc * &self.t_flight * &self.d),
            self.d.geq(0.5 * &self.rho * &self.s * &self.c_d * self.v.pow(2.0)),
            self.c_d.geq(fuselage + parasitic + induced),
            self.v_f_fuse.leq(&self.l_fuse * &self.cda0),
            self.re.leq(&self.rho / &self.mu * &self.v * (&self.s / &self.a).pow(0.5)),
            self.c_f.geq(0.074 * self.re.pow(-0.2)),
        ])
    }

    fn fuel_volume(&self) -> ConstraintSet {
        ConstraintSet::from([
            self.v_f.equals(&self.w_f / gravity() / &self.rho_f),
            self.v_f_wing
                .pow(2.0)
                .leq(0.0009 * self.s.pow(3.0) / &self.a * self.tau.pow(2.0)),
            Constraint::leq(&self.v_f_avail, &self.v_f_wing + &self.v_f_fuse),
            self.v_f_avail.geq(&self.v_f),
        ])
    }

    fn wing_weight(&self) -> ConstraintSet {
        let carried = &self.w_0 + &self.v_f_fuse * gravity() * &self.rho_f;
        let scale = self.w_w_coeff1.pow(2.0) / self.tau.pow(2.0)
            * self.n_ult.pow(2.0)
            * self.a.pow(3.0)
            * &self.w
            * &self.s;
        ConstraintSet::from([
            self.w_w_surf.geq(&self.w_w_coeff2 * &self.s),
            self.w_w_strc.pow(2.0).geq(carried * scale),
            self.w_w.geq(&self.w_w_surf + &self.w_w_strc),
        ])
    }
}

impl Default for SimpleAc {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel for SimpleAc {
    fn constraints(&self) -> ConstraintSet {
        let mut set = self.lift_and_weight();
        set.include(self.thrust_and_drag())
            .include(self.fuel_volume())
            .include(self.wing_weight());
        set
    }
}
