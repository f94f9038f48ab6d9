use crate::error::{LabError, LabResult};
use rand::Rng;

/// Quotient of `dividend / divisor` counted by repeated subtraction.
///
/// A zero divisor would never shrink the dividend, so it is rejected up front.
pub fn integer_division(dividend: u64, divisor: u64) -> LabResult<u64> {
    if divisor == 0 {
        return Err(LabError::DivideByZero);
    }
    let mut remaining = dividend;
    let mut quotient = 0;
    while remaining >= divisor {
        remaining -= divisor;
        quotient += 1;
    }
    Ok(quotient)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionRound {
    pub dividend: u64,
    pub divisor: u64,
    pub quotient: LabResult<u64>,
}

impl DivisionRound {
    pub fn to_message(&self) -> String {
        match &self.quotient {
            Ok(q) => format!("{} divided by {} is {}.", self.dividend, self.divisor, q),
            Err(e) => format!(
                "{} divided by {} is undefined ({}).",
                self.dividend, self.divisor, e
            ),
        }
    }
}

/// Draw `rounds` random pairs (dividend in 0..=100, divisor in 0..=7) and divide them.
pub fn random_rounds<R: Rng + ?Sized>(rounds: usize, rng: &mut R) -> Vec<DivisionRound> {
    (0..rounds)
        .map(|_| {
            let dividend = rng.gen_range(0..=100);
            let divisor = rng.gen_range(0..=7);
            DivisionRound {
                dividend,
                divisor,
                quotient: integer_division(dividend, divisor),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn matches_native_division() {
        for dividend in 0..=100u64 {
            for divisor in 1..=7u64 {
                assert_eq!(integer_division(dividend, divisor), Ok(dividend / divisor));
            }
        }
    }

    #[test]
    fn zero_divisor_is_an_error() {
        assert_eq!(integer_division(10, 0), Err(LabError::DivideByZero));
        assert_eq!(integer_division(0, 0), Err(LabError::DivideByZero));
    }

    #[test]
    fn random_rounds_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(10);
        let rounds = random_rounds(200, &mut rng);
        assert_eq!(rounds.len(), 200);
        for r in &rounds {
            assert!(r.dividend <= 100);
            assert!(r.divisor <= 7);
            if r.divisor == 0 {
                assert_eq!(r.quotient, Err(LabError::DivideByZero));
            } else {
                assert_eq!(r.quotient, Ok(r.dividend / r.divisor));
            }
        }
    }

    #[test]
    fn messages() {
        let ok = DivisionRound {
            dividend: 17,
            divisor: 5,
            quotient: Ok(3),
        };
        assert_eq!(ok.to_message(), "17 divided by 5 is 3.");
        let err = DivisionRound {
            dividend: 4,
            divisor: 0,
            quotient: Err(LabError::DivideByZero),
        };
        assert_eq!(
            err.to_message(),
            "4 divided by 0 is undefined (division by zero)."
        );
    }
}
