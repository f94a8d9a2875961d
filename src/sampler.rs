// ABOUTME: Random value generation satisfying constraints inferred by the analyser

use crate::constraints::{IntegerConstraint, ListConstraint};
use crate::config::{INPUT_MAX, INPUT_MIN, LIST_LENGTH};
use rand::Rng;

/// Draws an integer satisfying `constraint`, or `None` if the constraint's
/// window is empty. A bound left unset by the constraint defaults to
/// `INPUT_MIN`/`INPUT_MAX`; a bound the constraint does supply is used as-is,
/// never re-clamped against the default, so a constraint outside the default
/// window (reachable from a long chain of `Map` inverse-shifts) still yields
/// its own, wider window instead of spuriously coming up empty. Even/odd
/// constraints are sampled by halving the range, drawing uniformly, then
/// doubling (and adding one for odd) rather than rejection-sampling every
/// candidate.
pub fn generate_integer(constraint: &IntegerConstraint, rng: &mut impl Rng) -> Option<i64> {
    let (range_min, range_max) = constraint.range();
    let lo = range_min.unwrap_or(INPUT_MIN);
    let hi = range_max.unwrap_or(INPUT_MAX);
    if lo > hi {
        return None;
    }

    match constraint.is_even {
        Some(true) => {
            let lo_half = (lo as f64 / 2.0).ceil() as i64;
            let hi_half = (hi as f64 / 2.0).floor() as i64;
            if lo_half > hi_half {
                return None;
            }
            Some(rng.gen_range(lo_half..=hi_half) * 2)
        }
        Some(false) => {
            let lo_half = ((lo - 1) as f64 / 2.0).ceil() as i64;
            let hi_half = ((hi - 1) as f64 / 2.0).floor() as i64;
            if lo_half > hi_half {
                return None;
            }
            Some(rng.gen_range(lo_half..=hi_half) * 2 + 1)
        }
        None => Some(rng.gen_range(lo..=hi)),
    }
}

/// Draws one element satisfying one of `buckets`' `(sign, is_even)`
/// combinations. Tries a uniformly-chosen bucket first; if that bucket's
/// window happens to be empty, falls through every remaining combination in
/// turn before giving up.
fn generate_element(buckets: &[IntegerConstraint], rng: &mut impl Rng) -> Option<i64> {
    let first = rng.gen_range(0..buckets.len());
    if let Some(v) = generate_integer(&buckets[first], rng) {
        return Some(v);
    }
    (0..buckets.len())
        .filter(|&i| i != first)
        .find_map(|i| generate_integer(&buckets[i], rng))
}

/// Draws a list whose length and every element satisfy `constraint`.
/// Each element is sampled by drawing one of `constraint`'s `(sign,
/// is_even)` buckets uniformly and then generating within that bucket,
/// matching the way the analyser records a list's elements as possibly
/// drawn from several incompatible buckets. `None` if the length
/// window is empty or every bucket is unsatisfiable.
pub fn generate_list(constraint: &ListConstraint, rng: &mut impl Rng) -> Option<Vec<i64>> {
    let min_length = constraint.min_length.unwrap_or(0);
    // Upper bound is the *larger* of the inferred max_length and the default
    // LIST_LENGTH, not a cap at whichever is smaller: a tight upper bound
    // inferred for an intermediate list doesn't have to hold for the sampled
    // input itself, since `generate_examples` rejects bad draws downstream.
    let max_length = constraint.max_length.unwrap_or(0).max(LIST_LENGTH);
    if min_length > max_length {
        return None;
    }

    let length = rng.gen_range(min_length..=max_length);
    let buckets = constraint.all_constraints();
    if buckets.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(length);
    for _ in 0..length {
        out.push(generate_element(&buckets, rng)?);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Sign;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_generate_integer_respects_sign_and_parity() {
        let mut r = rng();
        let constraint = IntegerConstraint {
            min: None,
            max: None,
            sign: Some(Sign::Positive),
            is_even: Some(true),
        };
        for _ in 0..100 {
            let v = generate_integer(&constraint, &mut r).unwrap();
            assert!(v > 0);
            assert_eq!(v % 2, 0);
        }
    }

    #[test]
    fn test_generate_integer_zero_sign_is_exactly_zero() {
        let mut r = rng();
        let constraint = IntegerConstraint {
            min: None,
            max: None,
            sign: Some(Sign::Zero),
            is_even: None,
        };
        assert_eq!(generate_integer(&constraint, &mut r), Some(0));
    }

    #[test]
    fn test_generate_integer_odd_negative() {
        let mut r = rng();
        let constraint = IntegerConstraint {
            min: None,
            max: None,
            sign: Some(Sign::Negative),
            is_even: Some(false),
        };
        for _ in 0..100 {
            let v = generate_integer(&constraint, &mut r).unwrap();
            assert!(v < 0);
            assert_eq!(v.abs() % 2, 1);
        }
    }

    #[test]
    fn test_generate_integer_empty_window_is_none() {
        let mut r = rng();
        let constraint = IntegerConstraint {
            min: Some(10),
            max: Some(5),
            sign: None,
            is_even: None,
        };
        assert_eq!(generate_integer(&constraint, &mut r), None);
    }

    #[test]
    fn test_generate_integer_window_outside_input_range_is_not_clamped() {
        // A constraint whose bounds lie entirely outside [INPUT_MIN, INPUT_MAX]
        // (reachable from a chain of Map inverse-shifts) must still be
        // satisfiable: the defaults substitute for an absent bound, they don't
        // clamp a present one.
        let mut r = rng();
        let constraint = IntegerConstraint {
            min: Some(300),
            max: Some(400),
            sign: None,
            is_even: None,
        };
        for _ in 0..20 {
            let v = generate_integer(&constraint, &mut r).unwrap();
            assert!((300..=400).contains(&v));
        }
    }

    #[test]
    fn test_generate_list_respects_length_window() {
        // An explicit max_length below LIST_LENGTH widens back up to
        // LIST_LENGTH per the sampler's [min_length, max(max_length,
        // LIST_LENGTH)] formula; only the lower bound is actually tight.
        let mut r = rng();
        let mut constraint = ListConstraint::default();
        constraint.min_length = Some(3);
        constraint.max_length = Some(6);
        for _ in 0..50 {
            let list = generate_list(&constraint, &mut r).unwrap();
            assert!(list.len() >= 3 && list.len() <= LIST_LENGTH);
        }
    }

    #[test]
    fn test_generate_list_max_length_above_default_is_not_capped() {
        // LIST_LENGTH is only the default when a constraint leaves max_length
        // unset; an explicit, larger max_length must be honored rather than
        // silently shrunk back down to LIST_LENGTH.
        let mut r = rng();
        let mut constraint = ListConstraint::default();
        constraint.min_length = Some(LIST_LENGTH + 5);
        constraint.max_length = Some(LIST_LENGTH + 5);
        let list = generate_list(&constraint, &mut r).expect("explicit window above LIST_LENGTH should be usable");
        assert_eq!(list.len(), LIST_LENGTH + 5);
    }

    #[test]
    fn test_generate_list_impossible_length_window_is_none() {
        let mut r = rng();
        let mut constraint = ListConstraint::default();
        constraint.min_length = Some(10);
        constraint.max_length = Some(2);
        assert_eq!(generate_list(&constraint, &mut r), None);
    }

    #[test]
    fn test_generate_list_draws_from_every_bucket_over_many_trials() {
        // A constraint whose sign set holds both "any sign" and "negative
        // only" should, over enough draws, produce both non-negative and
        // negative elements — not just whichever bucket happened to be
        // picked first.
        let mut r = rng();
        let mut constraint = ListConstraint::default();
        constraint.sign = [None, Some(Sign::Negative)].into_iter().collect();
        constraint.is_even = [None].into_iter().collect();
        constraint.min_length = Some(20);
        constraint.max_length = Some(20);

        let mut saw_negative = false;
        let mut saw_non_negative = false;
        for _ in 0..50 {
            let list = generate_list(&constraint, &mut r).unwrap();
            saw_negative |= list.iter().any(|&v| v < 0);
            saw_non_negative |= list.iter().any(|&v| v >= 0);
        }
        assert!(saw_negative);
        assert!(saw_non_negative);
    }
}
