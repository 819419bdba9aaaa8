pub const PJ_PER_TWH: f64 = 3.6;

/// Rounds a value to the given number of decimal places, matching the
/// conventions the output tables are published with.
pub(crate) fn round_to_dp(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(1.23456, 3, 1.235)]
    #[case(1.23444, 3, 1.234)]
    #[case(100.05, 1, 100.1)]
    #[case(0., 3, 0.)]
    fn rounds_to_decimal_places(#[case] value: f64, #[case] dp: u32, #[case] expected: f64) {
        assert_eq!(round_to_dp(value, dp), expected);
    }
}
