use crate::common::errors::{ConstraintError, ConstraintResult};
use crate::strategy::types::{Allocation, ConstraintBundle};

/// Linear program backend that turns a bundle into trade sizes
///
/// The crate ships no implementation; callers plug in whatever LP solver
/// they run. Implementations maximize `target · x` under the bundle's two
/// conservation rows and bounds.
///
/// # Implementation Notes
///
/// - Must be `Send + Sync` so several strategy tasks can share one backend
/// - An infeasible or unprofitable problem is not an error; return the zero
///   allocation
/// - The returned allocation uses the bundle's variable order
pub trait Optimizer: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Solve the program described by `bundle`
    fn solve(&self, bundle: &ConstraintBundle) -> ConstraintResult<Allocation>;
}

/// Boxed optimizer for dynamic dispatch
pub type BoxedOptimizer = Box<dyn Optimizer>;

impl ConstraintBundle {
    /// Run `optimizer` and check that the allocation matches the bundle
    pub fn evaluate(&self, optimizer: &dyn Optimizer) -> ConstraintResult<Allocation> {
        let allocation = optimizer.solve(self)?;
        if allocation.len() != self.len() {
            return Err(ConstraintError::DimensionMismatch {
                expected: self.len(),
                actual: allocation.len(),
            });
        }
        tracing::debug!(
            optimizer = optimizer.name(),
            direction = %self.direction,
            "Optimizer returned allocation"
        );
        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::PriceLevel;
    use crate::strategy::constraint_solver::ConstraintSolver;
    use crate::strategy::direction::Direction;
    use mockall::mock;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    mock! {
        pub Backend {}
        impl Optimizer for Backend {
            fn name(&self) -> &'static str;
            fn solve(&self, bundle: &ConstraintBundle) -> ConstraintResult<Allocation>;
        }
    }

    fn bundle() -> ConstraintBundle {
        let book = vec![PriceLevel::new(dec!(1), dec!(1)), PriceLevel::new(dec!(2), dec!(1))];
        ConstraintSolver::new()
            .build(Direction::BBS, &book, &book, &book, dec!(0.01))
            .unwrap()
    }

    #[test]
    fn test_evaluate_passes_through_allocation() {
        let mut backend = MockBackend::new();
        backend.expect_name().return_const("mock");
        backend
            .expect_solve()
            .times(1)
            .returning(|b| Ok(vec![Decimal::ZERO; b.len()]));

        let allocation = bundle().evaluate(&backend).unwrap();
        assert_eq!(allocation.len(), 6);
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        let mut backend = MockBackend::new();
        backend.expect_name().return_const("mock");
        backend.expect_solve().returning(|_| Ok(vec![Decimal::ONE]));

        assert_eq!(
            bundle().evaluate(&backend),
            Err(ConstraintError::DimensionMismatch { expected: 6, actual: 1 })
        );
    }
}
