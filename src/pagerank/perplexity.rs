//! Perplexity tracking and the convergence test
//!
//! Perplexity is `2^H` where `H = -Σ p·log2(p)` over the score vector. The
//! engine records one value per iteration and stops once the integer parts
//! of the last [`CONVERGENCE_WINDOW`] values agree.

/// Number of trailing samples whose floors must agree
pub const CONVERGENCE_WINDOW: usize = 4;

/// Perplexity of a score distribution.
///
/// Zero scores contribute nothing (the `p·log2(p) → 0` limit).
pub fn perplexity(scores: &[f64]) -> f64 {
    let entropy: f64 = -scores
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.log2())
        .sum::<f64>();
    entropy.exp2()
}

/// True once the last four samples share the same floor.
///
/// Fewer than four samples never count as converged.
pub fn is_converged(history: &[f64]) -> bool {
    if history.len() < CONVERGENCE_WINDOW {
        return false;
    }
    let window = &history[history.len() - CONVERGENCE_WINDOW..];
    let first = window[0].floor();
    window[1..].iter().all(|p| p.floor() == first)
}

/// Append-only record of per-iteration perplexity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerplexityHistory {
    values: Vec<f64>,
}

impl PerplexityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn is_converged(&self) -> bool {
        is_converged(&self.values)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mass_point_has_perplexity_one() {
        assert_eq!(perplexity(&[1.0]), 1.0);
        assert_eq!(perplexity(&[0.0, 1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_uniform_perplexity_is_n() {
        let scores = vec![0.25; 4];
        assert!((perplexity(&scores) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scores_do_not_produce_nan() {
        let p = perplexity(&[0.5, 0.5, 0.0]);
        assert!(p.is_finite());
        assert!((p - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_perplexity_non_negative() {
        for scores in [vec![0.9, 0.1], vec![0.2, 0.3, 0.5], vec![]] {
            assert!(perplexity(&scores) >= 0.0);
        }
    }

    #[test]
    fn test_needs_four_samples() {
        assert!(!is_converged(&[]));
        assert!(!is_converged(&[5.0]));
        assert!(!is_converged(&[5.0, 5.0, 5.0]));
        assert!(is_converged(&[5.0, 5.0, 5.0, 5.0]));
    }

    #[test]
    fn test_floors_agree() {
        assert!(is_converged(&[100.2, 100.7, 100.9, 100.1]));
        // floor(99.9) is 99, so a dip just under the boundary breaks agreement
        assert!(!is_converged(&[100.2, 100.7, 99.9, 100.1]));
    }

    #[test]
    fn test_floors_disagree() {
        assert!(!is_converged(&[100.2, 101.7, 99.9, 100.1]));
    }

    #[test]
    fn test_only_trailing_window_matters() {
        assert!(is_converged(&[3.0, 250.0, 7.5, 7.1, 7.9, 7.0]));
        assert!(!is_converged(&[7.5, 7.1, 7.9, 7.0, 8.0]));
    }

    #[test]
    fn test_history_append_only() {
        let mut history = PerplexityHistory::new();
        assert!(history.is_empty());

        for value in [12.5, 11.2, 11.9, 11.0] {
            history.push(value);
        }

        assert_eq!(history.len(), 4);
        assert_eq!(history.last(), Some(11.0));
        assert!(history.is_converged());
        assert_eq!(history.into_vec(), vec![12.5, 11.2, 11.9, 11.0]);
    }
}
