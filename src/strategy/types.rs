use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::common::errors::{ConstraintError, ConstraintResult};
use crate::strategy::direction::Direction;

/// Lower/upper bound on a single decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bound {
    pub lower: Decimal,
    pub upper: Decimal,
}

impl Bound {
    pub fn new(lower: Decimal, upper: Decimal) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Trade sizes returned by an optimizer, one entry per decision variable
pub type Allocation = Vec<Decimal>;

/// Inputs for a linear program over every visible level of a triangle
///
/// Variables are indexed leg 1 levels first, then leg 2, then leg 3, each in
/// the order the snapshot listed them. Consumers may rely on this order.
///
/// The objective is to maximize `target · x` subject to
/// `first_corner · x = 0`, `second_corner · x = 0` and `bounds`.
///
/// On any allocation satisfying both corner rows, `target · x` equals the
/// cycle's pre-fee profit in the closing currency, scaled by `(1 - fee)²`.
/// It ranks allocations the same way realized profit does at zero fee, but
/// with a positive fee it can be positive while [`realized_profit`] is
/// negative. Check the latter before acting on a solution.
///
/// [`realized_profit`]: ConstraintBundle::realized_profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintBundle {
    /// Direction the bundle was built for
    pub direction: Direction,
    /// Objective coefficients
    pub target: Vec<Decimal>,
    /// Conservation row at the node between leg 1 and leg 2
    pub first_corner: Vec<Decimal>,
    /// Conservation row at the node between leg 2 and leg 3
    pub second_corner: Vec<Decimal>,
    /// Net closing-currency flow per unit, after fees
    pub closing_flow: Vec<Decimal>,
    /// Per-variable bounds
    pub bounds: Vec<Bound>,
    /// Number of levels in each leg
    pub leg_sizes: [usize; 3],
}

impl ConstraintBundle {
    /// Number of decision variables
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Index range of the variables belonging to leg `0..3`
    pub fn leg_range(&self, leg: usize) -> Option<Range<usize>> {
        let size = *self.leg_sizes.get(leg)?;
        let start: usize = self.leg_sizes[..leg].iter().sum();
        Some(start..start + size)
    }

    fn leg_ranges(&self) -> [Range<usize>; 3] {
        let [a, b, c] = self.leg_sizes;
        [0..a, a..a + b, a + b..a + b + c]
    }

    /// Value of the objective for an allocation
    pub fn objective(&self, allocation: &[Decimal]) -> ConstraintResult<Decimal> {
        self.check_len(allocation.len())?;
        dot(&self.target, allocation)
    }

    /// Closing currency gained by an allocation, net of every fee
    ///
    /// Only meaningful when both conservation residuals are zero.
    pub fn realized_profit(&self, allocation: &[Decimal]) -> ConstraintResult<Decimal> {
        self.check_len(allocation.len())?;
        dot(&self.closing_flow, allocation)
    }

    /// Residuals of the two conservation rows for an allocation
    pub fn conservation_residuals(
        &self,
        allocation: &[Decimal],
    ) -> ConstraintResult<(Decimal, Decimal)> {
        self.check_len(allocation.len())?;
        Ok((
            dot(&self.first_corner, allocation)?,
            dot(&self.second_corner, allocation)?,
        ))
    }

    /// Whether every leg fills its levels in order
    ///
    /// A level may only carry volume once every earlier level of the same
    /// leg is at its upper bound.
    pub fn respects_level_priority(&self, allocation: &[Decimal]) -> ConstraintResult<bool> {
        self.check_len(allocation.len())?;
        let legs = self.split_allocation(allocation)?;
        let bounds = self.split_bounds()?;

        Ok(legs.iter().zip(bounds).all(|(volumes, bounds)| {
            let first_open = volumes
                .iter()
                .zip(bounds)
                .position(|(x, bound)| *x < bound.upper)
                .unwrap_or(volumes.len());
            volumes
                .iter()
                .skip(first_open + 1)
                .all(|x| *x <= Decimal::ZERO)
        }))
    }

    /// Split an allocation into per-leg slices
    pub fn split_allocation<'a>(
        &self,
        allocation: &'a [Decimal],
    ) -> ConstraintResult<[&'a [Decimal]; 3]> {
        self.check_len(allocation.len())?;
        split(&self.leg_ranges(), allocation)
    }

    fn split_bounds(&self) -> ConstraintResult<[&[Bound]; 3]> {
        split(&self.leg_ranges(), &self.bounds)
    }

    /// Check every vector against the variable count
    pub(crate) fn check_dimensions(&self) -> ConstraintResult<()> {
        let expected: usize = self.leg_sizes.iter().sum();
        for actual in [
            self.target.len(),
            self.first_corner.len(),
            self.second_corner.len(),
            self.closing_flow.len(),
            self.bounds.len(),
        ] {
            if actual != expected {
                return Err(ConstraintError::DimensionMismatch { expected, actual });
            }
        }
        Ok(())
    }

    fn check_len(&self, actual: usize) -> ConstraintResult<()> {
        if actual != self.len() {
            return Err(ConstraintError::DimensionMismatch {
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

fn split<'a, T>(
    ranges: &[Range<usize>; 3],
    values: &'a [T],
) -> ConstraintResult<[&'a [T]; 3]> {
    let slice = |range: &Range<usize>| {
        values
            .get(range.clone())
            .ok_or(ConstraintError::DimensionMismatch {
                expected: range.end,
                actual: values.len(),
            })
    };
    Ok([slice(&ranges[0])?, slice(&ranges[1])?, slice(&ranges[2])?])
}

fn dot(coefficients: &[Decimal], values: &[Decimal]) -> ConstraintResult<Decimal> {
    coefficients
        .iter()
        .zip(values)
        .try_fold(Decimal::ZERO, |acc, (c, x)| {
            c.checked_mul(*x).and_then(|term| acc.checked_add(term))
        })
        .ok_or(ConstraintError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bundle() -> ConstraintBundle {
        ConstraintBundle {
            direction: Direction::BSB,
            target: vec![dec!(-2), dec!(3), dec!(-1)],
            first_corner: vec![dec!(1), dec!(-1), dec!(0)],
            second_corner: vec![dec!(0), dec!(3), dec!(-1)],
            closing_flow: vec![dec!(-2), dec!(0), dec!(1)],
            bounds: vec![Bound::new(dec!(0), dec!(3)); 3],
            leg_sizes: [1, 1, 1],
        }
    }

    #[test]
    fn test_objective_and_residuals() {
        let b = bundle();
        let x = [dec!(1), dec!(1), dec!(3)];
        assert_eq!(b.objective(&x).unwrap(), dec!(-2));
        assert_eq!(b.conservation_residuals(&x).unwrap(), (dec!(0), dec!(0)));
    }

    #[test]
    fn test_length_mismatch() {
        let b = bundle();
        assert_eq!(
            b.objective(&[dec!(1)]),
            Err(ConstraintError::DimensionMismatch { expected: 3, actual: 1 })
        );
    }

    #[test]
    fn test_check_dimensions_detects_short_bounds() {
        let mut b = bundle();
        b.bounds.pop();
        assert_eq!(
            b.check_dimensions(),
            Err(ConstraintError::DimensionMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_leg_ranges() {
        let mut b = bundle();
        b.leg_sizes = [1, 0, 2];
        assert_eq!(b.leg_range(0), Some(0..1));
        assert_eq!(b.leg_range(1), Some(1..1));
        assert_eq!(b.leg_range(2), Some(1..3));
        assert_eq!(b.leg_range(3), None);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let b = bundle();
        let x = [Decimal::MAX, dec!(0), dec!(0)];
        assert_eq!(b.objective(&x), Err(ConstraintError::Overflow));
        assert_eq!(b.realized_profit(&x), Err(ConstraintError::Overflow));

        // each term fits, the running sum does not
        let mut wide = bundle();
        wide.first_corner = vec![dec!(1), dec!(1), dec!(0)];
        assert_eq!(
            wide.conservation_residuals(&[Decimal::MAX, Decimal::MAX, dec!(0)]),
            Err(ConstraintError::Overflow)
        );
    }

    #[test]
    fn test_split_rejects_inconsistent_leg_sizes() {
        let mut b = bundle();
        b.leg_sizes = [1, 1, 5];
        assert!(matches!(
            b.split_allocation(&[dec!(1), dec!(1), dec!(1)]),
            Err(ConstraintError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_level_priority() {
        let mut b = bundle();
        b.leg_sizes = [3, 0, 0];
        // best level full, second partly used, third empty
        assert!(b
            .respects_level_priority(&[dec!(3), dec!(1), dec!(0)])
            .unwrap());
        // third level used while the second still has depth
        assert!(!b
            .respects_level_priority(&[dec!(3), dec!(1), dec!(0.5)])
            .unwrap());
        // nothing traded
        assert!(b
            .respects_level_priority(&[dec!(0), dec!(0), dec!(0)])
            .unwrap());
    }
}
