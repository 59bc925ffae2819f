//! Test support for the calendar heatmap crates.
//!
//! - [`fixtures`]: complete station years, normals tables, raw inputs
//! - [`generators`]: deterministic daily values keyed on month-day
//! - [`assert_cell_value!`]: tolerant comparison of optional cell values
//!
//! Pull it in as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert that an `Option<f64>` cell value is present and within `epsilon`
/// of `expected`.
///
/// ```ignore
/// use test_utils::assert_cell_value;
///
/// assert_cell_value!(Some(0.1 + 0.2), 0.3, 1e-9); // passes
/// assert_cell_value!(None, 0.3, 1e-9);            // fails: absent
/// ```
#[macro_export]
macro_rules! assert_cell_value {
    ($actual:expr, $expected:expr, $epsilon:expr) => {{
        let actual: Option<f64> = $actual;
        let expected: f64 = $expected as f64;
        let epsilon: f64 = $epsilon as f64;
        match actual {
            None => panic!(
                "assertion failed: cell is absent, expected `{:?}`",
                expected
            ),
            Some(value) if (value - expected).abs() > epsilon => panic!(
                "assertion failed: cell `{:?}` differs from `{:?}` by more than `{:?}`",
                value, expected, epsilon
            ),
            Some(_) => {}
        }
    }};
}
