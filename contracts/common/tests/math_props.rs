use common::math::mul_div;
use proptest::prelude::*;

proptest! {
    #[test]
    fn mul_div_matches_narrow_arithmetic(
        a in 0i128..1_000_000_000_000,
        b in 0i128..1_000_000_000_000,
        d in 1i128..1_000_000_000,
    ) {
        prop_assert_eq!(mul_div(a, b, d), Some(a * b / d));
    }

    #[test]
    fn mul_div_is_monotone_in_the_numerator(
        a in 0i128..1_000_000_000_000_000_000,
        extra in 0i128..1_000_000_000_000,
        b in 0i128..1_000_000_000_000_000_000,
        d in 1i128..1_000_000_000_000_000_000,
    ) {
        prop_assert!(mul_div(a, b, d).unwrap() <= mul_div(a + extra, b, d).unwrap());
    }
}
