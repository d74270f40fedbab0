use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt as BigInteger;
use num_traits::ToPrimitive;

// ============================================================================
// Integer Tower
// ============================================================================

#[derive(Debug, Clone)]
pub enum Number {
    /// Primary integer type - promotes to Big on overflow
    Int(i64),

    /// Arbitrary precision integer
    Big(Rc<BigInteger>),
}

impl Number {
    /// Interpret `text` as an integer literal: a non-empty run of ASCII
    /// decimal digits. Returns `None` for anything else, leaving name
    /// classification to the caller.
    pub fn from_literal(text: &str) -> Option<Number> {
        if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        let mut small: i64 = 0;
        for byte in text.bytes() {
            let digit = i64::from(byte - b'0');
            match small.checked_mul(10).and_then(|n| n.checked_add(digit)) {
                Some(next) => small = next,
                None => return Self::big_from_digits(text),
            }
        }
        Some(Number::Int(small))
    }

    fn big_from_digits(digits: &str) -> Option<Number> {
        let big = BigInteger::parse_bytes(digits.as_bytes(), 10)?;
        Some(Number::Big(Rc::new(big)))
    }

    /// Reduce a big result back to the primary type when it fits
    fn shrink(big: BigInteger) -> Number {
        match big.to_i64() {
            Some(small) => Number::Int(small),
            None => Number::Big(Rc::new(big)),
        }
    }
}

// ============================================================================
// Arithmetic Operations
// ============================================================================

impl Number {
    /// Addition; promotes to a big integer instead of overflowing
    pub fn add(&self, other: &Number) -> Number {
        use Number::*;

        match (self, other) {
            (Int(a), Int(b)) => match a.checked_add(*b) {
                Some(result) => Int(result),
                None => Big(Rc::new(BigInteger::from(*a) + BigInteger::from(*b))),
            },
            (Int(a), Big(b)) => Self::shrink(BigInteger::from(*a) + b.as_ref()),
            (Big(a), Int(b)) => Self::shrink(a.as_ref() + BigInteger::from(*b)),
            (Big(a), Big(b)) => Self::shrink(a.as_ref() + b.as_ref()),
        }
    }

    /// Subtraction; promotes to a big integer instead of overflowing
    pub fn sub(&self, other: &Number) -> Number {
        use Number::*;

        match (self, other) {
            (Int(a), Int(b)) => match a.checked_sub(*b) {
                Some(result) => Int(result),
                None => Big(Rc::new(BigInteger::from(*a) - BigInteger::from(*b))),
            },
            (Int(a), Big(b)) => Self::shrink(BigInteger::from(*a) - b.as_ref()),
            (Big(a), Int(b)) => Self::shrink(a.as_ref() - BigInteger::from(*b)),
            (Big(a), Big(b)) => Self::shrink(a.as_ref() - b.as_ref()),
        }
    }

    /// Multiplication; promotes to a big integer instead of overflowing
    pub fn mul(&self, other: &Number) -> Number {
        use Number::*;

        match (self, other) {
            (Int(a), Int(b)) => match a.checked_mul(*b) {
                Some(result) => Int(result),
                None => Big(Rc::new(BigInteger::from(*a) * BigInteger::from(*b))),
            },
            (Int(a), Big(b)) => Self::shrink(BigInteger::from(*a) * b.as_ref()),
            (Big(a), Int(b)) => Self::shrink(a.as_ref() * BigInteger::from(*b)),
            (Big(a), Big(b)) => Self::shrink(a.as_ref() * b.as_ref()),
        }
    }

    /// Negation; `i64::MIN` promotes rather than wrapping
    pub fn neg(&self) -> Number {
        use Number::*;

        match self {
            Int(n) => match n.checked_neg() {
                Some(result) => Int(result),
                None => Big(Rc::new(-BigInteger::from(*n))),
            },
            Big(n) => Self::shrink(-n.as_ref()),
        }
    }
}

// ============================================================================
// Equality and Comparison
// ============================================================================

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        use Number::*;

        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Big(b)) => BigInteger::from(*a).cmp(b),
            (Big(a), Int(b)) => a.as_ref().cmp(&BigInteger::from(*b)),
            (Big(a), Big(b)) => a.cmp(b),
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Big(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic() {
        let a = Number::Int(5);
        let b = Number::Int(3);

        assert_eq!(a.add(&b), Number::Int(8));
        assert_eq!(a.sub(&b), Number::Int(2));
        assert_eq!(a.mul(&b), Number::Int(15));
        assert_eq!(b.neg(), Number::Int(-3));
    }

    #[test]
    fn test_int_overflow_promotes() {
        let max = Number::Int(i64::MAX);
        let one = Number::Int(1);

        // Should promote to Big on overflow
        match max.add(&one) {
            Number::Big(_) => {}
            _ => panic!("Expected Big promotion on overflow"),
        }
        assert_eq!(max.add(&one).to_string(), "9223372036854775808");

        match Number::Int(i64::MIN).neg() {
            Number::Big(_) => {}
            _ => panic!("Expected Big promotion when negating i64::MIN"),
        }
    }

    #[test]
    fn test_big_results_shrink_back() {
        let big = Number::Int(i64::MAX).add(&Number::Int(1));

        // 2^63 - 1 fits again, so the representation drops back to Int
        assert_eq!(big.sub(&Number::Int(1)), Number::Int(i64::MAX));
        match big.sub(&Number::Int(1)) {
            Number::Int(_) => {}
            _ => panic!("Expected Big result to shrink back to Int"),
        }
    }

    #[test]
    fn test_literal_parsing() {
        assert_eq!(Number::from_literal("5"), Some(Number::Int(5)));
        assert_eq!(Number::from_literal("007"), Some(Number::Int(7)));
        assert_eq!(Number::from_literal("0"), Some(Number::Int(0)));

        let big = Number::from_literal("123456789012345678901234567890").unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        match big {
            Number::Big(_) => {}
            _ => panic!("Expected Big for a literal beyond i64"),
        }
    }

    #[test]
    fn test_literal_parsing_at_the_i64_boundary() {
        assert_eq!(
            Number::from_literal("9223372036854775807"),
            Some(Number::Int(i64::MAX))
        );

        // One past i64::MAX must take the big path and stay exact
        let boundary = Number::from_literal("9223372036854775808").unwrap();
        assert_eq!(boundary.to_string(), "9223372036854775808");
        match boundary {
            Number::Big(_) => {}
            _ => panic!("Expected Big for a literal one past i64::MAX"),
        }
    }

    #[test]
    fn test_literal_rejects_non_digits() {
        assert_eq!(Number::from_literal(""), None);
        assert_eq!(Number::from_literal("-5"), None);
        assert_eq!(Number::from_literal("x1"), None);
        assert_eq!(Number::from_literal("1.5"), None);
    }

    #[test]
    fn test_cross_width_comparison() {
        let small = Number::Int(42);
        let same = Number::Big(Rc::new(BigInteger::from(42)));
        let bigger = Number::from_literal("99999999999999999999").unwrap();

        assert_eq!(small, same);
        assert!(small < bigger);
        assert!(bigger > same);
    }
}
