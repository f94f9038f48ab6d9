use crate::error::{LabError, LabResult};

/// The lookup table the comparison floors against; `MAGIC_NUMBERS[i]` maps to `LETTERS[i]`.
pub const MAGIC_NUMBERS: [u64; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
const LETTERS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOutcome {
    /// The larger power was below the largest magic number.
    Floored { value: u64, letter: char },
    Value(u64),
}

impl PowerOutcome {
    pub fn value(self) -> u64 {
        match self {
            PowerOutcome::Floored { value, .. } | PowerOutcome::Value(value) => value,
        }
    }
}

fn checked_pow(base: u64, exp: u64) -> LabResult<u64> {
    let overflow = LabError::Overflow { base, exp };
    match base {
        // These bases never grow, whatever the exponent.
        0 | 1 if exp > 0 => Ok(base),
        _ => u32::try_from(exp)
            .ok()
            .and_then(|e| base.checked_pow(e))
            .ok_or(overflow),
    }
}

/// Larger of `a^b` and `b^a`, never less than the largest magic number.
pub fn power_compare(a: u64, b: u64) -> LabResult<PowerOutcome> {
    let larger = checked_pow(a, b)?.max(checked_pow(b, a)?);
    let floor = MAGIC_NUMBERS[MAGIC_NUMBERS.len() - 1];
    if larger < floor {
        return Ok(PowerOutcome::Floored {
            value: floor,
            letter: LETTERS[LETTERS.len() - 1],
        });
    }
    Ok(PowerOutcome::Value(larger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs() {
        assert_eq!(
            power_compare(11, 12),
            Ok(PowerOutcome::Value(3_138_428_376_721))
        );
    }

    #[test]
    fn picks_larger_direction() {
        // 2^5 = 32, 5^2 = 25
        assert_eq!(power_compare(2, 5), Ok(PowerOutcome::Value(32)));
        assert_eq!(power_compare(5, 2), Ok(PowerOutcome::Value(32)));
    }

    #[test]
    fn small_results_are_floored() {
        let out = power_compare(1, 2).unwrap();
        assert_eq!(
            out,
            PowerOutcome::Floored {
                value: 8,
                letter: 'h'
            }
        );
        assert_eq!(out.value(), 8);
        assert_eq!(power_compare(2, 3).unwrap().value(), 9);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            power_compare(10, 30),
            Err(LabError::Overflow { base: 10, exp: 30 })
        );
    }

    #[test]
    fn huge_exponent_is_reported_as_given() {
        let exp = u64::from(u32::MAX) + 5;
        assert_eq!(
            power_compare(2, exp),
            Err(LabError::Overflow { base: 2, exp })
        );
        // 1^n stays 1 even past u32 exponents, so only n^1 decides.
        assert_eq!(power_compare(1, exp), Ok(PowerOutcome::Value(exp)));
    }
}
