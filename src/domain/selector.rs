use super::banknote::Banknote;
use super::deposit::MoneyDeposit;
use super::money::Money;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;

/// Why no banknote combination could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// Zero amount, nothing to dispense.
    NotPositive,
    /// The amount is larger than everything the deposit holds.
    ExceedsDeposit,
    /// Within the deposit total, but not an exact sum of available banknotes.
    NotComposable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infeasible {
    pub reason: InfeasibleReason,
    /// Part of the amount left uncovered.
    pub remainder: Decimal,
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            InfeasibleReason::NotPositive => "amount is not positive",
            InfeasibleReason::ExceedsDeposit => "amount exceeds deposit",
            InfeasibleReason::NotComposable => "amount cannot be composed from banknotes",
        };
        write!(f, "{} (remainder {})", reason, self.remainder.normalize())
    }
}

/// Picks the banknotes to pay out `amount` from `deposit`.
///
/// Greedy by descending face value: each denomination contributes as many
/// notes as fit in the remaining amount and are available. The amount is
/// feasible only if the remainder reaches exactly zero. The returned plan is
/// ordered highest denomination first; the deposit is not modified.
pub fn select(amount: &Money, deposit: &MoneyDeposit) -> Result<Vec<Banknote>, Infeasible> {
    let target = amount.amount();
    if target <= Decimal::ZERO {
        return Err(Infeasible {
            reason: InfeasibleReason::NotPositive,
            remainder: target,
        });
    }
    if amount.currency() != deposit.currency() {
        return Err(Infeasible {
            reason: InfeasibleReason::NotComposable,
            remainder: target,
        });
    }

    let mut remaining = target;
    let mut plan = Vec::new();
    for banknote in Banknote::catalog(deposit.currency()) {
        let available = deposit.count_of(banknote);
        if available == 0 {
            continue;
        }
        let face = Decimal::from(banknote.face_value());
        let fitting = (remaining / face).trunc().to_u32().unwrap_or(u32::MAX);
        let take = fitting.min(available);
        if take == 0 {
            continue;
        }
        remaining -= Decimal::from(take) * face;
        plan.extend(std::iter::repeat_n(banknote, take as usize));
        if remaining.is_zero() {
            break;
        }
    }

    if remaining.is_zero() {
        return Ok(plan);
    }
    let reason = if target > deposit.total_value().amount() {
        InfeasibleReason::ExceedsDeposit
    } else {
        InfeasibleReason::NotComposable
    };
    Err(Infeasible {
        reason,
        remainder: remaining,
    })
}
