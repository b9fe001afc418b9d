//! Smoothed vertical tendency.
//!
//! The per-sample vertical rate is noisy, so the classifier also looks at the
//! mean rate over a short window of consecutive samples:
//!
//! ```text
//! k < N - w :  [k, k+1, ..., k+w-1]      (forward window)
//! k >= N - w:  [k-w+1, ..., k-1, k]      (backward window, end of track)
//! ```
//!
//! The mean is classified as cruise, climb or descent. A mean that falls
//! between the bands leaves the previous tendency in place.

use super::ClassifierConfig;

/// Windowed vertical trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tendency {
    /// Mean rate inside the cruise band.
    Cruise,
    /// Mean rate above the trend threshold.
    Climb,
    /// Mean rate below the negated trend threshold.
    Descent,
}

impl Tendency {
    /// Classify a mean vertical rate; `None` when it falls between bands.
    pub fn from_mean(mean_fpm: i32, config: &ClassifierConfig) -> Option<Self> {
        if mean_fpm > -config.cruise_band_fpm && mean_fpm < config.cruise_band_fpm {
            Some(Tendency::Cruise)
        } else if mean_fpm > config.trend_threshold_fpm {
            Some(Tendency::Climb)
        } else if mean_fpm < -config.trend_threshold_fpm {
            Some(Tendency::Descent)
        } else {
            None
        }
    }
}

/// Mean of the rate window for sample `k`, rounded to the nearest ft/min.
///
/// Windows are clipped at the start of the sequence when it is shorter than
/// the configured window.
pub fn window_mean(rates: &[i32], k: usize, window: usize) -> i32 {
    let n = rates.len();
    let window = window.max(1);

    let range = if k.saturating_add(window) < n {
        k..k + window
    } else {
        (k + 1).saturating_sub(window)..k + 1
    };

    let slice = &rates[range];
    let sum: i64 = slice.iter().map(|&r| r as i64).sum();
    (sum as f64 / slice.len() as f64).round_ties_even() as i32
}

/// Compute the sticky tendency for every sample.
///
/// `None` is only possible before the first window that lands in a band.
pub fn compute_tendencies(rates: &[i32], config: &ClassifierConfig) -> Vec<Option<Tendency>> {
    let mut current = None;
    (0..rates.len())
        .map(|k| {
            let mean = window_mean(rates, k, config.tendency_window);
            if let Some(tendency) = Tendency::from_mean(mean, config) {
                current = Some(tendency);
            }
            current
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mean_bands() {
        let config = ClassifierConfig::default();
        assert_eq!(Tendency::from_mean(0, &config), Some(Tendency::Cruise));
        assert_eq!(Tendency::from_mean(19, &config), Some(Tendency::Cruise));
        assert_eq!(Tendency::from_mean(-19, &config), Some(Tendency::Cruise));
        assert_eq!(Tendency::from_mean(20, &config), None);
        assert_eq!(Tendency::from_mean(100, &config), None);
        assert_eq!(Tendency::from_mean(101, &config), Some(Tendency::Climb));
        assert_eq!(Tendency::from_mean(-100, &config), None);
        assert_eq!(Tendency::from_mean(-101, &config), Some(Tendency::Descent));
    }

    #[test]
    fn test_forward_window_before_tail() {
        let rates = [10, 20, 30, 40, 50, 60, 70, 80];
        // k = 0: mean of 10..50
        assert_eq!(window_mean(&rates, 0, 5), 30);
        // k = 2: mean of 30..70
        assert_eq!(window_mean(&rates, 2, 5), 50);
    }

    #[test]
    fn test_backward_window_on_tail() {
        let rates = [10, 20, 30, 40, 50, 60, 70, 80];
        // k = 3 is among the last 5: mean of 0..=3 clipped → 10, 20, 30, 40
        assert_eq!(window_mean(&rates, 3, 5), 25);
        // k = 7: mean of 40..80
        assert_eq!(window_mean(&rates, 7, 5), 60);
    }

    #[test]
    fn test_short_sequence_window_is_clipped() {
        let rates = [100, 300];
        assert_eq!(window_mean(&rates, 0, 5), 100);
        assert_eq!(window_mean(&rates, 1, 5), 200);
    }

    #[test]
    fn test_huge_window_falls_back_to_clipped_backward() {
        let rates = [100, 300, 500];
        assert_eq!(window_mean(&rates, 0, usize::MAX), 100);
        assert_eq!(window_mean(&rates, 2, usize::MAX), 300);

        let config = ClassifierConfig::default().with_tendency_window(usize::MAX);
        assert_eq!(compute_tendencies(&rates, &config).len(), 3);
    }

    #[test]
    fn test_tendency_is_sticky() {
        let config = ClassifierConfig::default().with_tendency_window(1);
        let rates = [500, 60, -60, 0, 50, -500];
        let tendencies = compute_tendencies(&rates, &config);
        assert_eq!(
            tendencies,
            vec![
                Some(Tendency::Climb),
                Some(Tendency::Climb),
                Some(Tendency::Climb),
                Some(Tendency::Cruise),
                Some(Tendency::Cruise),
                Some(Tendency::Descent),
            ]
        );
    }

    #[test]
    fn test_no_tendency_until_first_band() {
        let config = ClassifierConfig::default().with_tendency_window(1);
        let tendencies = compute_tendencies(&[50, 60, 0], &config);
        assert_eq!(tendencies, vec![None, None, Some(Tendency::Cruise)]);
    }
}
