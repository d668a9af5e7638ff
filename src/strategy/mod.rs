//! Strategy module for triangular arbitrage sizing
//!
//! This module turns three order-book snapshots into the inputs of a linear
//! program whose solution is the trade size at every visible level.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Strategy layer                                             │
//! │    - Picks a triangle and a Direction (e.g. BSB)            │
//! │    - Collects three snapshots, best price first             │
//! └─────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ConstraintSolver (pure, sync)                              │
//! │    - target        objective, one entry per level           │
//! │    - first_corner  leg 1 → leg 2 currency conservation      │
//! │    - second_corner leg 2 → leg 3 currency conservation      │
//! │    - bounds        [0, amount * (1 - fee)]                  │
//! └─────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Optimizer (external)                                       │
//! │    - Solves the LP, returns an Allocation                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Direction`]: One of the eight buy/sell combinations
//! - [`ConstraintSolver`]: Builds a [`ConstraintBundle`]
//! - [`Optimizer`]: Seam for the LP backend
//!
//! # Example
//!
//! ```ignore
//! use triangular_arbitrage::strategy::ConstraintSolver;
//!
//! let bundle = ConstraintSolver::new()
//!     .generate_constraints("BSB", &first, &second, &third, dec!(0.001))?;
//! let allocation = bundle.evaluate(&my_lp_backend)?;
//! if bundle.realized_profit(&allocation)? > Decimal::ZERO {
//!     // execute
//! }
//! ```

mod constraint_solver;
mod direction;
mod traits;
mod types;

pub use constraint_solver::ConstraintSolver;
pub use direction::Direction;
pub use traits::{BoxedOptimizer, Optimizer};
pub use types::{Allocation, Bound, ConstraintBundle};
