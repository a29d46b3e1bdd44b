/// Smallest difference between two amounts that still counts as money owed.
pub const MONEY_EPSILON: f64 = 1e-6;

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Returns true when two amounts are equal within [`MONEY_EPSILON`].
pub fn amounts_match(left: f64, right: f64) -> bool {
    (left - right).abs() < MONEY_EPSILON
}

/// Bit pattern that compares amounts exactly, with `-0.0` folded into `0.0`.
pub fn amount_key(amount: f64) -> u64 {
    if amount == 0.0 {
        0.0f64.to_bits()
    } else {
        amount.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_noise_still_matches() {
        assert!(amounts_match(0.1 + 0.2, 0.3));
        assert!(!amounts_match(0.30, 0.31));
    }

    #[test]
    fn amount_key_is_exact() {
        assert_eq!(amount_key(-0.0), amount_key(0.0));
        assert_eq!(amount_key(100.0), amount_key(100.00));
        assert_ne!(amount_key(100.0), amount_key(100.004));
    }
}
