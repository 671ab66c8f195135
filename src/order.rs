//! Run-order resolution.
//!
//! Each run call resolves its iteration order from three sources, highest
//! precedence first:
//!
//! 1. an external [`RunOrder`] override carried by the runner;
//! 2. the collection's `in_order` flag, yielding `0, 1, .., n-1`;
//! 3. a fresh uniform random permutation of `0, 1, .., n-1`.
//!
//! The override is a comma-separated list of decimal indices, conventionally
//! sourced from the [`RUN_ORDER_ENV`] environment variable. Its lenient
//! parse is best-effort and diagnostic-free: tokens that do not parse as
//! integers are dropped silently. Parsed indices are kept signed and
//! unfiltered, duplicates included; entries that fall outside the collection
//! are skipped one by one during the run itself. An override consisting
//! entirely of out-of-range indices therefore still wins the precedence
//! race and produces a run of zero invocations.

use std::env;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::OrderError;

/// Environment variable naming the external run-order override,
/// e.g. `TABULA_RUN_ORDER="2,0,4"`. Empty or absent means not overridden.
pub const RUN_ORDER_ENV: &str = "TABULA_RUN_ORDER";

/// An external run-order override: a non-empty list of case indices.
///
/// Indices are stored signed and unvalidated against any particular
/// collection; range filtering happens at invocation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOrder {
    indices: Vec<i64>,
}

impl RunOrder {
    /// Best-effort parse of a comma-separated index list.
    ///
    /// Unparseable tokens are dropped without diagnostics; tokens are not
    /// trimmed, so a whitespace-padded entry is a failed entry. Returns
    /// `None` when no token parses, which leaves the run to fall through
    /// to the `in_order` flag or a random permutation.
    pub fn lenient(spec: &str) -> Option<Self> {
        let indices: Vec<i64> = spec
            .split(',')
            .filter_map(|token| token.parse().ok())
            .collect();
        if indices.is_empty() {
            None
        } else {
            Some(Self { indices })
        }
    }

    /// Reads the override from [`RUN_ORDER_ENV`], leniently.
    pub fn from_env() -> Option<Self> {
        env::var(RUN_ORDER_ENV)
            .ok()
            .as_deref()
            .and_then(Self::lenient)
    }

    /// Builds an override from explicit indices. Returns `None` for an
    /// empty sequence, which would not constitute an override.
    pub fn from_indices(indices: impl IntoIterator<Item = i64>) -> Option<Self> {
        let indices: Vec<i64> = indices.into_iter().collect();
        if indices.is_empty() {
            None
        } else {
            Some(Self { indices })
        }
    }

    /// The override's indices, verbatim: duplicates preserved, range
    /// unchecked. Non-empty by construction.
    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl FromStr for RunOrder {
    type Err = OrderError;

    /// Strict counterpart of [`RunOrder::lenient`] for callers that want
    /// loud configuration validation: every token must parse and the list
    /// must be non-empty.
    fn from_str(spec: &str) -> Result<Self, OrderError> {
        if spec.is_empty() {
            return Err(OrderError::Empty);
        }
        let mut indices = Vec::new();
        for (position, token) in spec.split(',').enumerate() {
            match token.parse::<i64>() {
                Ok(index) => indices.push(index),
                Err(_) => {
                    return Err(OrderError::InvalidToken {
                        token: token.to_string(),
                        position,
                    })
                }
            }
        }
        Ok(Self { indices })
    }
}

/// Produces the index plan for one run over `len` cases.
///
/// The plan may contain out-of-range entries only in the override arm;
/// the invocation loop filters those individually.
pub(crate) fn resolve<R: Rng>(
    order: Option<&RunOrder>,
    in_order: bool,
    len: usize,
    rng: &mut R,
) -> Vec<i64> {
    if let Some(order) = order {
        return order.indices().to_vec();
    }
    let mut plan: Vec<i64> = (0..len as i64).collect();
    if !in_order {
        plan.shuffle(rng);
    }
    plan
}
