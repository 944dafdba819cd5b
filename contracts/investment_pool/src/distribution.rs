use crate::storage::PERMILLE;

/// Total pool tokens the contract has ever received.
///
/// Paying investors reduces the live token balance, so entitlements are
/// always computed against live balance plus everything already paid out.
/// The sum stays constant across payouts and only grows when the
/// crowdsale releases another tranche.
pub fn cumulative_received(live_balance: i128, total_withdrawn: i128) -> Option<i128> {
    live_balance.checked_add(total_withdrawn)
}

/// Operator reward on the cumulative balance.
///
/// Formula: reward = floor(cumulative × rate / 1000)
pub fn reward_share(cumulative: i128, reward_permille: u32) -> Option<i128> {
    cumulative
        .checked_mul(reward_permille as i128)?
        .checked_div(PERMILLE)
}

/// Gross entitlement of one account against the distributable balance.
///
/// Formula: entitlement = floor(contribution × distributable / total_raised)
///
/// Floor rounding means the per-account entitlements can sum to slightly
/// less than the distributable balance, never more.
pub fn entitlement(contribution: i128, total_raised: i128, distributable: i128) -> Option<i128> {
    if total_raised <= 0 {
        return None;
    }
    contribution
        .checked_mul(distributable)?
        .checked_div(total_raised)
}
