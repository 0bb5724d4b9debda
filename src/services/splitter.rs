//! Fair splitting of shared expenses
//!
//! Every shared expense is halved. When the half falls between two cents,
//! one party has to absorb the extra cent; which one alternates from one
//! such category to the next so neither side is favored over a run.
//! The other party's share is always `shared - individual`, so the two
//! halves add back to the original amount exactly.

use rand::Rng;
use tracing::debug;

use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{ExpenseCatalog, Money};

/// Probability that the first odd-cent category rounds the individual share up
pub const DEFAULT_ROUND_UP_PROBABILITY: f64 = 0.5;

/// Splits a shared catalog into an individual catalog
#[derive(Debug, Clone, Copy)]
pub struct FairSplitter {
    round_up_probability: f64,
}

impl Default for FairSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_ROUND_UP_PROBABILITY)
    }
}

impl FairSplitter {
    /// Create a splitter with the given initial round-up probability
    ///
    /// Values outside `[0, 1]` (and NaN) are clamped into range.
    pub fn new(round_up_probability: f64) -> Self {
        let round_up_probability = if round_up_probability.is_nan() {
            DEFAULT_ROUND_UP_PROBABILITY
        } else {
            round_up_probability.clamp(0.0, 1.0)
        };

        Self {
            round_up_probability,
        }
    }

    pub fn round_up_probability(&self) -> f64 {
        self.round_up_probability
    }

    /// Toss the coin once, then split the whole catalog
    pub fn split<R: Rng>(
        &self,
        shared: &ExpenseCatalog,
        individual: &ExpenseCatalog,
        rng: &mut R,
    ) -> ExpensesResult<ExpenseCatalog> {
        let round_up = rng.gen_bool(self.round_up_probability);
        debug!(round_up, "tossed initial rounding bias");
        split_with_bias(shared, individual, round_up)
    }
}

/// Split every shared expense in half, starting with the given rounding bias
///
/// Returns a copy of `individual` whose amounts are this party's halves.
/// Categories are visited in lexicographic order. Fails with a precondition
/// error when a shared category has no counterpart in `individual`.
pub fn split_with_bias(
    shared: &ExpenseCatalog,
    individual: &ExpenseCatalog,
    mut round_up: bool,
) -> ExpensesResult<ExpenseCatalog> {
    let mut result = individual.clone();

    for (category_name, shared_expense) in &shared.expenses {
        let target = result
            .expenses
            .get_mut(category_name)
            .ok_or_else(|| ExpensesError::category_missing(category_name, "individual"))?;

        let half = shared_expense.amount.half();
        let share = if half == half.round_cents() {
            half
        } else {
            let rounded = if round_up {
                half.round_cents_up()
            } else {
                half.round_cents_down()
            };
            round_up = !round_up;
            rounded
        };

        debug!(
            category = %category_name,
            shared = %shared_expense.amount,
            individual = %share,
            "split shared expense"
        );
        target.amount = share;
    }

    Ok(result)
}

/// The other party's share of a category: whatever the individual share leaves over
pub fn counterpart_share(shared_amount: Money, individual_amount: Money) -> Money {
    shared_amount - individual_amount
}
