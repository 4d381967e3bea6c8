//! Hoeffding bound test driving rule expansion (§4.4, §4.5).

/// ε = √(ln(1/δ) / (2n)), the confidence margin for declaring one running
/// mean strictly greater than another with confidence `1 − δ`.
pub fn epsilon(delta: f64, n: u64) -> f64 {
    if n == 0 {
        return f64::INFINITY;
    }
    ((1.0 / delta).ln() / (2.0 * n as f64)).sqrt()
}

/// `true` iff the observed `mean_diff` clears the Hoeffding margin for
/// sample size `n` at confidence `delta`, i.e. the rule should be swapped
/// for its best refinement.
pub fn should_swap(mean_diff: f64, delta: f64, n: u64) -> bool {
    mean_diff > epsilon(delta, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s6_hoeffding_driven_swap() {
        let eps_1000 = epsilon(0.05, 1000);
        assert!((eps_1000 - 0.0387).abs() < 0.001);
        assert!(should_swap(0.1, 0.05, 1000));

        let eps_100 = epsilon(0.05, 100);
        assert!((eps_100 - 0.122).abs() < 0.001);
        assert!(!should_swap(0.1, 0.05, 100));
    }

    #[test]
    fn epsilon_shrinks_as_sample_size_grows() {
        assert!(epsilon(0.05, 10_000) < epsilon(0.05, 100));
    }

    #[test]
    fn zero_samples_never_triggers_a_swap() {
        assert!(!should_swap(1.0, 0.05, 0));
    }
}
