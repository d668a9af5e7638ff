//! Constraint generation for triangular arbitrage
//!
//! One decision variable is created per visible price level. A variable is
//! the base amount executed at that level, so for a level at price `p`:
//!
//! ```text
//!            received   spent
//!   Buy         1         p      (pay quote, get base)
//!   Sell        p         1      (give base, get quote)
//! ```
//!
//! The two corners are the currency nodes between consecutive legs. What
//! leg `k` delivers into a node, net of the fee haircut `h = 1 - fee`, has
//! to equal what leg `k + 1` takes out of it.
//!
//! The target coefficient of a level is `received - spent`, i.e. `p - 1`
//! for a sell and `1 - p` for a buy, weighted `h²`, `h` and `1` on legs 1, 2
//! and 3. Adding the corner rows scaled by `h` and `1` to `h²` times the
//! closing-currency flow gives exactly these weights on legs 1 and 2; on
//! leg 3 the received side is counted without the `h³` haircut. Flipping
//! every side negates every coefficient. Once both corners balance,
//! `target · x` is `h²` times the pre-fee profit of the cycle in the
//! closing currency. A
//! level with a worse price therefore always scores strictly below a
//! better level of the same leg for the same flow through the node it
//! touches, which makes an optimal solution fill levels in book order.

use rust_decimal::Decimal;
use tracing::debug;

use crate::common::errors::{ConstraintError, ConstraintResult};
use crate::common::types::{PriceLevel, Side};
use crate::strategy::direction::Direction;
use crate::strategy::types::{Bound, ConstraintBundle};

/// Builds [`ConstraintBundle`]s from three order-book snapshots
///
/// Stateless; a single instance can be shared between tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintSolver;

impl ConstraintSolver {
    pub fn new() -> Self {
        Self
    }

    /// Build constraints for a direction given as text, e.g. `"BSB"`
    ///
    /// # Arguments
    /// * `direction` - Three letters of `B`/`S`, one per leg
    /// * `first`, `second`, `third` - Snapshots for each leg, best price first
    /// * `fee` - Fee/tolerance in `[0, 1)`
    ///
    /// # Errors
    /// `InvalidDirection`, `EmptyBook`, `InvalidPriceLevel` or `InvalidFee`,
    /// checked in that order before anything is built.
    pub fn generate_constraints(
        &self,
        direction: &str,
        first: &[PriceLevel],
        second: &[PriceLevel],
        third: &[PriceLevel],
        fee: Decimal,
    ) -> ConstraintResult<ConstraintBundle> {
        let direction: Direction = direction.parse()?;
        self.build(direction, first, second, third, fee)
    }

    /// Build constraints for a parsed direction
    pub fn build(
        &self,
        direction: Direction,
        first: &[PriceLevel],
        second: &[PriceLevel],
        third: &[PriceLevel],
        fee: Decimal,
    ) -> ConstraintResult<ConstraintBundle> {
        let books = [first, second, third];
        for (leg, book) in books.iter().enumerate() {
            if book.is_empty() {
                return Err(ConstraintError::EmptyBook { leg: leg + 1 });
            }
        }
        for (leg, book) in books.iter().enumerate() {
            validate_levels(leg + 1, book)?;
        }
        if fee < Decimal::ZERO || fee >= Decimal::ONE {
            return Err(ConstraintError::InvalidFee(fee));
        }

        let haircut = Decimal::ONE - fee;
        let weights = [haircut * haircut, haircut, Decimal::ONE];
        let leg_sizes = books.map(|book| book.len());
        let n: usize = leg_sizes.iter().sum();

        let mut target = Vec::with_capacity(n);
        let mut first_corner = Vec::with_capacity(n);
        let mut second_corner = Vec::with_capacity(n);
        let mut closing_flow = Vec::with_capacity(n);
        let mut bounds = Vec::with_capacity(n);

        for (leg, book) in books.iter().enumerate() {
            let side = direction.leg(leg);
            for level in book.iter() {
                let received = received(side, level.price);
                let spent = spent(side, level.price);

                target.push(edge(side, level.price) * weights[leg]);

                // leg 0 feeds the first node, leg 1 drains it and feeds the
                // second, leg 2 drains the second
                let (into_first, into_second, closing) = match leg {
                    0 => (received * haircut, Decimal::ZERO, -spent),
                    1 => (-spent, received * haircut, Decimal::ZERO),
                    _ => (Decimal::ZERO, -spent, received * haircut),
                };
                first_corner.push(into_first);
                second_corner.push(into_second);
                closing_flow.push(closing);

                let upper = (level.amount * haircut).max(Decimal::ZERO);
                bounds.push(Bound::new(Decimal::ZERO, upper));
            }
        }

        let bundle = ConstraintBundle {
            direction,
            target,
            first_corner,
            second_corner,
            closing_flow,
            bounds,
            leg_sizes,
        };
        bundle.check_dimensions()?;

        debug!(%direction, variables = n, %fee, "Generated triangle constraints");
        Ok(bundle)
    }
}

fn validate_levels(leg: usize, book: &[PriceLevel]) -> ConstraintResult<()> {
    if let Some(index) = book
        .iter()
        .position(|level| level.price <= Decimal::ZERO || level.amount < Decimal::ZERO)
    {
        return Err(ConstraintError::InvalidPriceLevel { leg, index });
    }
    Ok(())
}

/// `received - spent` for one unit; the two sides are exact negations
fn edge(side: Side, price: Decimal) -> Decimal {
    let sell = price - Decimal::ONE;
    match side {
        Side::Buy => -sell,
        Side::Sell => sell,
    }
}

fn received(side: Side, price: Decimal) -> Decimal {
    match side {
        Side::Buy => Decimal::ONE,
        Side::Sell => price,
    }
}

fn spent(side: Side, price: Decimal) -> Decimal {
    match side {
        Side::Buy => price,
        Side::Sell => Decimal::ONE,
    }
}
