use uom::si::f64::Force;

use crate::support::{
    constraint::{ConstraintModel, ConstraintSet, Relate},
    nomial::{Posynomial, Variable},
};

use super::{HorizontalTail, TailBoom, VerticalTail};

/// Horizontal and vertical tails on a shared tail boom.
#[derive(Debug, Clone)]
pub struct Empennage {
    /// Empennage weight.
    pub w: Variable,
    /// Tail weight margin factor, 1.
    pub mfac: Variable,
    pub htail: HorizontalTail,
    pub vtail: VerticalTail,
    pub tailboom: TailBoom,
}

impl Empennage {
    /// An empennage whose tail boom has `n` stations.
    ///
    /// # Panics
    ///
    /// Panics if `n < 2`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            w: Variable::free::<Force>("W", "empennage weight"),
            mfac: Variable::fixed("mfac", "tail weight margin factor", 1.0),
            htail: HorizontalTail::new(),
            vtail: VerticalTail::new(),
            tailboom: TailBoom::new(n),
        }
    }
}

impl Default for Empennage {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ConstraintModel for Empennage {
    fn constraints(&self) -> ConstraintSet {
        let parts: Posynomial = [&self.htail.wing.w, &self.vtail.wing.w, self.tailboom.w()]
            .into_iter()
            .sum();

        let mut set = ConstraintSet::from([
            (&self.w / &self.mfac).geq(parts),
            self.tailboom.l.geq(&self.htail.lh),
            self.tailboom.l.geq(&self.vtail.lv),
        ]);
        set.include_model(&self.htail)
            .include_model(&self.vtail)
            .include_model(&self.tailboom);
        set.substitute(&self.htail.wing.mfac, 1.1);
        set.substitute(&self.vtail.wing.mfac, 1.1);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_surfaces_carry_a_heavier_margin() {
        let empennage = Empennage::default();
        let set = empennage.constraints();

        assert!(set.is_gp());
        assert_eq!(set.fixed_value(&empennage.htail.wing.mfac), Some(1.1));
        assert_eq!(set.fixed_value(&empennage.vtail.wing.mfac), Some(1.1));
        assert_eq!(set.fixed_value(&empennage.htail.wing.planform.ar), Some(4.0));
        assert_eq!(empennage.tailboom.stations(), 2);
    }
}
