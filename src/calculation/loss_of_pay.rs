//! Loss-of-pay calculation.

/// Leaves per billing period that do not reduce pay.
pub const DEFAULT_FREE_LEAVES_PER_MONTH: u32 = 2;

/// Returns the number of leave days that reduce pay.
///
/// Every leave beyond `free_leaves` in a period is a loss-of-pay day.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::calculate_loss_of_pay;
///
/// assert_eq!(calculate_loss_of_pay(5, 2), 3);
/// assert_eq!(calculate_loss_of_pay(1, 2), 0);
/// ```
pub fn calculate_loss_of_pay(leaves_taken: u32, free_leaves: u32) -> u32 {
    leaves_taken.saturating_sub(free_leaves)
}
