//! The dispatch engine.
//!
//! A [`Runner`] drives one table of cases through one test function per
//! `run` call: it binds the callable to its form, resolves the iteration
//! order, then invokes case by case until the table is exhausted or a
//! verdict stops the run. The runner owns the permutation PRNG and the
//! optional external order override; the case collection stays read-only
//! for the whole run.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::cases::Cases;
use crate::order::{resolve, RunOrder};
use crate::testfn::IntoTestFn;

// Concrete, seedable PRNG so shuffled runs can be pinned in tests.
type SmallRng = Xoshiro256StarStar;

/// Executes test functions over a [`Cases`] table.
#[derive(Debug)]
pub struct Runner {
    order: Option<RunOrder>,
    rng: SmallRng,
}

impl Runner {
    /// A runner with no order override and an entropy-seeded PRNG:
    /// every run draws a fresh, unreproducible permutation.
    pub fn new() -> Self {
        Self {
            order: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// A runner honoring the process-wide override variable, read leniently
    /// at construction time. This is what [`Cases::run`] builds per call.
    pub fn from_env() -> Self {
        Self {
            order: RunOrder::from_env(),
            ..Self::new()
        }
    }

    /// A runner with a deterministic PRNG, for pinning shuffled runs.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            order: None,
            rng: SmallRng::from_seed(seed),
        }
    }

    /// Injects an explicit order override, replacing any previous one.
    /// The override outranks both the `in_order` flag and the shuffle.
    pub fn with_order(mut self, order: RunOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Calls `test_fn` once per case and returns the number of invocations
    /// performed. With an order override in place the same case may be
    /// visited more than once, and override entries outside the table are
    /// skipped without being counted.
    ///
    /// The test function must take one of four forms:
    ///
    /// * `|case: &T|`
    /// * `|case: &T| -> bool`
    /// * `|index: usize, case: &T|`
    /// * `|index: usize, case: &T| -> bool`
    ///
    /// A `bool` form reports whether the run should continue; returning
    /// `false` stops the run immediately after that invocation. An empty
    /// table reports zero invocations without binding the callable.
    pub fn run<'f, T, Form, F>(&mut self, cases: &Cases<T>, test_fn: F) -> usize
    where
        F: IntoTestFn<'f, T, Form>,
    {
        if cases.is_empty() {
            return 0;
        }
        let mut test_fn = test_fn.into_test_fn();
        let plan = resolve(self.order.as_ref(), cases.in_order, cases.len(), &mut self.rng);

        let mut invoked = 0;
        for entry in plan {
            let index = match usize::try_from(entry) {
                Ok(index) if index < cases.len() => index,
                _ => continue,
            };
            invoked += 1;
            if !test_fn.call(index, &cases[index]) {
                break;
            }
        }
        invoked
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}
