/// Numerically stable logistic function.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Mean binary cross-entropy, probabilities clamped to [1e-15, 1 - 1e-15].
pub fn log_loss(labels: &[bool], probabilities: &[f64]) -> f64 {
    assert_eq!(labels.len(), probabilities.len());
    if labels.is_empty() {
        return 0.0;
    }
    let total: f64 = labels
        .iter()
        .zip(probabilities)
        .map(|(&y, &p)| {
            let p = p.clamp(1e-15, 1.0 - 1e-15);
            if y {
                -p.ln()
            } else {
                -(1.0 - p).ln()
            }
        })
        .sum();
    total / labels.len() as f64
}

/// Share of rows where `p >= 0.5` agrees with the label.
pub fn accuracy(labels: &[bool], probabilities: &[f64]) -> f64 {
    assert_eq!(labels.len(), probabilities.len());
    if labels.is_empty() {
        return 0.0;
    }
    let hits = labels
        .iter()
        .zip(probabilities)
        .filter(|(y, p)| (**p >= 0.5) == **y)
        .count();
    hits as f64 / labels.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn log_loss_of_coin_flip() {
        let loss = log_loss(&[true, false], &[0.5, 0.5]);
        assert!((loss - std::f64::consts::LN_2).abs() < 1e-12);
        assert!(log_loss(&[true], &[0.0]).is_finite());
    }

    #[test]
    fn accuracy_counts_threshold_hits() {
        assert_eq!(accuracy(&[true, false, true, false], &[0.9, 0.1, 0.4, 0.5]), 0.5);
    }
}
