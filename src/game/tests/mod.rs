//! Game-level tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Legal move generation from the façade
//! - `scenarios.rs` - Full-game scenarios (mates, special moves, draws)
//! - `proptest.rs` - Property-based tests over random playouts


use super::types::Square;

pub(crate) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}
