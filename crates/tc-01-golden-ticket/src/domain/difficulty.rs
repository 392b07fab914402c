//! Golden ticket difficulty predicate
//!
//! Difficulty `k.f` has two parts. The integer part `k` requires the last
//! `k` hex digits of the solution hash to equal the last `k` hex digits of
//! the block being solved. The fractional part `f` then looks at one more
//! digit of the solution hash and requires it to be at least
//! `floor(floor(f * 10000) / 625)`, which splits the 16 values of a hex
//! digit into buckets between integer steps.

use shared_types::{Decimal8, SCALE};

/// Why a hash fails the predicate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyCheck {
    /// Hash satisfies the difficulty
    Met,
    /// Trailing digits differ from the target hash
    SuffixMismatch,
    /// Probe digit is below the fractional bucket (or out of range)
    BelowThreshold,
}

impl DifficultyCheck {
    pub fn is_met(self) -> bool {
        self == Self::Met
    }
}

/// Minimum probe digit for the fractional part of a difficulty.
pub fn fractional_threshold(difficulty: Decimal8) -> u32 {
    let basis_points = difficulty.fract().raw() / (SCALE / 10_000);
    (basis_points / 625) as u32
}

fn suffix(value: &str, digits: usize) -> &[u8] {
    let bytes = value.as_bytes();
    &bytes[bytes.len().saturating_sub(digits)..]
}

/// Evaluates `hash_value` against `difficulty` for a block hashed `target`.
///
/// The probe digit sits at `pubkey_len - 1 - k`; a probe outside the hash
/// fails.
pub fn check_difficulty(
    hash_value: &str,
    target: &str,
    pubkey_len: usize,
    difficulty: Decimal8,
) -> DifficultyCheck {
    let k = usize::try_from(difficulty.floor_int().max(0)).unwrap_or(usize::MAX);

    if k > 0 && suffix(hash_value, k) != suffix(target, k) {
        return DifficultyCheck::SuffixMismatch;
    }

    let probe = pubkey_len
        .checked_sub(1)
        .and_then(|last| last.checked_sub(k))
        .and_then(|index| hash_value.as_bytes().get(index))
        .and_then(|byte| char::from(*byte).to_digit(16));

    match probe {
        Some(digit) if digit >= fractional_threshold(difficulty) => DifficultyCheck::Met,
        _ => DifficultyCheck::BelowThreshold,
    }
}

/// Whether `hash_value` satisfies `difficulty`.
pub fn meets_difficulty(hash_value: &str, target: &str, pubkey_len: usize, difficulty: Decimal8) -> bool {
    check_difficulty(hash_value, target, pubkey_len, difficulty).is_met()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> Decimal8 {
        s.parse().unwrap()
    }

    const PUBKEY_LEN: usize = 64;

    #[test]
    fn test_threshold_buckets() {
        assert_eq!(fractional_threshold(d("0")), 0);
        assert_eq!(fractional_threshold(d("0.0624")), 0);
        assert_eq!(fractional_threshold(d("0.0625")), 1);
        assert_eq!(fractional_threshold(d("2.5")), 8);
        assert_eq!(fractional_threshold(d("0.99999999")), 15);
    }

    #[test]
    fn test_zero_difficulty_always_passes() {
        let hash = "0".repeat(64);
        assert!(meets_difficulty(&hash, "ffff", PUBKEY_LEN, Decimal8::ZERO));
    }

    #[test]
    fn test_integer_difficulty_compares_suffix() {
        let target = format!("{}abc", "1".repeat(61));
        let good = format!("{}abc", "f".repeat(61));
        let bad = format!("{}abd", "f".repeat(61));

        assert!(meets_difficulty(&good, &target, PUBKEY_LEN, d("3")));
        assert_eq!(
            check_difficulty(&bad, &target, PUBKEY_LEN, d("3")),
            DifficultyCheck::SuffixMismatch
        );
    }

    #[test]
    fn test_fractional_difficulty_probes_next_digit() {
        // k = 1, probe index = 64 - 1 - 1 = 62
        let target = "0".repeat(63) + "7";
        let mut high = "0".repeat(62);
        high.push('9');
        high.push('7');
        let mut low = "0".repeat(62);
        low.push('7');
        low.push('7');

        // threshold for .5 is 8
        assert!(meets_difficulty(&high, &target, PUBKEY_LEN, d("1.5")));
        assert_eq!(
            check_difficulty(&low, &target, PUBKEY_LEN, d("1.5")),
            DifficultyCheck::BelowThreshold
        );
    }

    #[test]
    fn test_probe_out_of_range_fails() {
        let hash = "f".repeat(64);
        assert!(!meets_difficulty(&hash, &hash, 3, d("5")));
        assert!(!meets_difficulty(&hash, &hash, 0, d("0")));
    }

    #[test]
    fn test_negative_difficulty_treated_as_zero_integer_part() {
        let hash = "f".repeat(64);
        assert!(meets_difficulty(&hash, "", PUBKEY_LEN, d("-0.5")));
    }

    proptest! {
        #[test]
        fn prop_threshold_within_hex_range(raw in 0i128..1_000_000_000_000i128) {
            prop_assert!(fractional_threshold(Decimal8::from_raw(raw)) < 16);
        }

        #[test]
        fn prop_all_f_hash_meets_any_fraction(frac in 0i128..100_000_000i128) {
            let hash = "f".repeat(64);
            prop_assert!(meets_difficulty(&hash, "", PUBKEY_LEN, Decimal8::from_raw(frac)));
        }
    }
}
