use lisplet::{Number, Session};
use num_bigint::BigInt;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Integers that stay comfortably inside i64 arithmetic
fn small_i64() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

/// Integers likely to overflow i64 arithmetic
fn large_i64() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(i64::MAX),
        Just(i64::MIN),
        Just(i64::MAX - 1),
        Just(i64::MIN + 1),
        i64::MAX / 2..i64::MAX,
        i64::MIN..i64::MIN / 2,
    ]
}

/// Any i64, weighted toward the overflow-prone extremes
fn any_i64() -> impl Strategy<Value = i64> {
    prop_oneof![small_i64(), large_i64()]
}

/// Digit runs, including ones far beyond i64
fn digit_run() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{1,40}").unwrap()
}

// ============================================================================
// Arithmetic Against BigInt Ground Truth
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn add_matches_bigint(a in any_i64(), b in any_i64()) {
        let result = Number::Int(a).add(&Number::Int(b));
        let expected = BigInt::from(a) + BigInt::from(b);
        prop_assert_eq!(result.to_string(), expected.to_string());
    }

    #[test]
    fn sub_matches_bigint(a in any_i64(), b in any_i64()) {
        let result = Number::Int(a).sub(&Number::Int(b));
        let expected = BigInt::from(a) - BigInt::from(b);
        prop_assert_eq!(result.to_string(), expected.to_string());
    }

    #[test]
    fn mul_matches_bigint(a in any_i64(), b in any_i64()) {
        let result = Number::Int(a).mul(&Number::Int(b));
        let expected = BigInt::from(a) * BigInt::from(b);
        prop_assert_eq!(result.to_string(), expected.to_string());
    }

    #[test]
    fn neg_matches_bigint(a in any_i64()) {
        let result = Number::Int(a).neg();
        let expected = -BigInt::from(a);
        prop_assert_eq!(result.to_string(), expected.to_string());
    }

    #[test]
    fn add_commutative(a in any_i64(), b in any_i64()) {
        let left = Number::Int(a).add(&Number::Int(b));
        let right = Number::Int(b).add(&Number::Int(a));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn mul_associative(a in small_i64(), b in small_i64(), c in small_i64()) {
        let left = Number::Int(a).mul(&Number::Int(b)).mul(&Number::Int(c));
        let right = Number::Int(a).mul(&Number::Int(b).mul(&Number::Int(c)));
        prop_assert_eq!(left, right);
    }

    // ========================================================================
    // Literal Handling
    // ========================================================================

    #[test]
    fn literal_roundtrip_is_canonical(digits in digit_run()) {
        let number = Number::from_literal(&digits).unwrap();
        let canonical = digits.trim_start_matches('0');
        let expected = if canonical.is_empty() { "0" } else { canonical };
        prop_assert_eq!(number.to_string(), expected);
    }

    #[test]
    fn literal_comparison_matches_bigint(a in digit_run(), b in digit_run()) {
        let left = Number::from_literal(&a).unwrap();
        let right = Number::from_literal(&b).unwrap();
        let big_a: BigInt = a.parse().unwrap();
        let big_b: BigInt = b.parse().unwrap();
        prop_assert_eq!(left.cmp(&right), big_a.cmp(&big_b));
        prop_assert_eq!(left == right, big_a == big_b);
    }

    // ========================================================================
    // Whole-Pipeline Properties
    // ========================================================================

    #[test]
    fn sum_fold_matches_bigint(operands in prop::collection::vec(0u64..u64::MAX, 0..10)) {
        let rendered: Vec<String> = operands.iter().map(u64::to_string).collect();
        let source = format!("(+ {})", rendered.join(" "));

        let session = Session::new();
        let results = session.run(&source).unwrap();
        let expected: BigInt = operands.iter().map(|n| BigInt::from(*n)).sum();
        prop_assert_eq!(results.last().unwrap().to_string(), expected.to_string());
    }

    #[test]
    fn product_fold_matches_bigint(operands in prop::collection::vec(0u64..u64::MAX, 0..6)) {
        let rendered: Vec<String> = operands.iter().map(u64::to_string).collect();
        let source = format!("(* {})", rendered.join(" "));

        let session = Session::new();
        let results = session.run(&source).unwrap();
        let expected: BigInt = operands.iter().map(|n| BigInt::from(*n)).product();
        prop_assert_eq!(results.last().unwrap().to_string(), expected.to_string());
    }

    #[test]
    fn subtraction_inverts_addition(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let source = format!("(- (+ {a} {b}) {b})");

        let session = Session::new();
        let results = session.run(&source).unwrap();
        prop_assert_eq!(results.last().unwrap().to_string(), a.to_string());
    }

    #[test]
    fn negation_matches_bigint(digits in digit_run()) {
        let source = format!("(- {digits})");

        let session = Session::new();
        let results = session.run(&source).unwrap();
        let expected = -digits.parse::<BigInt>().unwrap();
        prop_assert_eq!(results.last().unwrap().to_string(), expected.to_string());
    }
}
