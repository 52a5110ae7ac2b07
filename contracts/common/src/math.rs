use ethnum::I256;

/// Fixed-point scaling factor.
///
/// Every reward-per-contribution value is scaled by this constant before
/// storage so that sub-unit precision survives integer division. 10^12 keeps
/// twelve decimal places, enough for token amounts up to 10^18.
pub const PRECISION: i128 = 1_000_000_000_000;

/// Compute `a * b / denominator`, flooring the quotient.
///
/// The product is formed in 256 bits so that two large `i128` operands (e.g.
/// a per-block reward of 10^21 times a vote weight of 10^18) never overflow
/// in the intermediate step. Only the final quotient has to fit in `i128`.
///
/// Returns `None` when an operand is negative, the denominator is not
/// positive, or the quotient does not fit.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if a < 0 || b < 0 || denominator <= 0 {
        return None;
    }

    let quotient = I256::from(a) * I256::from(b) / I256::from(denominator);
    if quotient > I256::from(i128::MAX) {
        return None;
    }
    Some(quotient.as_i128())
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div(10, 10, 3), Some(33));
        assert_eq!(mul_div(0, 10, 3), Some(0));
    }

    #[test]
    fn mul_div_rejects_bad_inputs() {
        assert_eq!(mul_div(1, 1, 0), None);
        assert_eq!(mul_div(-1, 1, 1), None);
        assert_eq!(mul_div(1, -1, 1), None);
    }

    #[test]
    fn mul_div_survives_wide_intermediate() {
        // 10^21 * 10^18 overflows i128 but the quotient does not.
        let reward: i128 = 1_000 * 10i128.pow(18);
        let votes: i128 = 10i128.pow(18);
        assert_eq!(mul_div(reward, votes, 2 * votes), Some(reward / 2));
    }

    #[test]
    fn mul_div_reports_quotient_overflow() {
        assert_eq!(mul_div(i128::MAX, 2, 1), None);
    }
}
