//! Scoring curve shapes shared by the category scorers.

use catscore_core::CaPRatioTarget;

/// Minimum-to-ideal ramp.
///
/// `0` below `min`, `floor` at `min`, rising linearly to `full` at `ideal`,
/// and `full` from there on.
pub(crate) fn ramp(value: f64, min: f64, ideal: f64, floor: f64, full: f64) -> f64 {
    if value < min {
        0.0
    } else if value >= ideal {
        full
    } else {
        floor + (full - floor) * (value - min) / (ideal - min)
    }
}

/// Symmetric closeness to a single ideal: `weight` at the ideal, falling
/// linearly to `0` at `ideal ± falloff`.
pub(crate) fn closeness(value: f64, ideal: f64, falloff: f64, weight: f64) -> f64 {
    let distance = (value - ideal).abs();
    if falloff <= 0.0 {
        return if distance == 0.0 { weight } else { 0.0 };
    }
    weight * (1.0 - distance / falloff).max(0.0)
}

/// Calcium:phosphorus ratio credit.
///
/// Full `weight` at the ideal ratio, linear down to `0` at whichever band edge
/// lies on the same side, and `-penalty` outside the band. A non-finite ratio
/// is never inside the band.
pub(crate) fn ratio_credit(ratio: f64, target: &CaPRatioTarget, weight: f64, penalty: f64) -> f64 {
    if !ratio.is_finite() || ratio < target.min || ratio > target.max {
        return -penalty;
    }
    let span = if ratio >= target.ideal {
        target.max - target.ideal
    } else {
        target.ideal - target.min
    };
    if span <= 0.0 {
        return weight;
    }
    weight * (1.0 - (ratio - target.ideal).abs() / span)
}

/// Round to two decimals, the precision scores are reported at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ratio_target() -> CaPRatioTarget {
        CaPRatioTarget {
            min: 1.0,
            ideal: 1.0,
            max: 1.8,
        }
    }

    #[test]
    fn ramp_is_zero_below_min() {
        assert!(ramp(24.9, 25.0, 38.0, 5.0, 15.0).abs() < EPS);
    }

    #[test]
    fn ramp_starts_at_floor() {
        assert!((ramp(25.0, 25.0, 38.0, 5.0, 15.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn ramp_is_linear_between_min_and_ideal() {
        assert!((ramp(31.5, 25.0, 38.0, 5.0, 15.0) - 10.0).abs() < EPS);
    }

    #[test]
    fn ramp_caps_at_full() {
        assert!((ramp(60.0, 25.0, 38.0, 5.0, 15.0) - 15.0).abs() < EPS);
    }

    #[test]
    fn ramp_with_equal_min_and_ideal_is_a_step() {
        assert!((ramp(0.2, 0.2, 0.2, 4.0, 10.0) - 10.0).abs() < EPS);
        assert!(ramp(0.19, 0.2, 0.2, 4.0, 10.0).abs() < EPS);
    }

    #[test]
    fn closeness_peaks_at_ideal() {
        assert!((closeness(14.5, 14.5, 11.0, 10.0) - 10.0).abs() < EPS);
    }

    #[test]
    fn closeness_penalizes_both_directions_equally() {
        let below = closeness(9.0, 14.5, 11.0, 10.0);
        let above = closeness(20.0, 14.5, 11.0, 10.0);
        assert!((below - above).abs() < EPS);
        assert!((below - 5.0).abs() < EPS);
    }

    #[test]
    fn closeness_floors_at_zero() {
        assert!(closeness(40.0, 14.5, 11.0, 10.0).abs() < EPS);
    }

    #[test]
    fn ratio_full_at_ideal() {
        assert!((ratio_credit(1.0, &ratio_target(), 7.0, 2.0) - 7.0).abs() < EPS);
    }

    #[test]
    fn ratio_degrades_to_zero_at_band_edge() {
        assert!((ratio_credit(1.4, &ratio_target(), 7.0, 2.0) - 3.5).abs() < EPS);
        assert!(ratio_credit(1.8, &ratio_target(), 7.0, 2.0).abs() < EPS);
    }

    #[test]
    fn ratio_penalized_outside_band() {
        assert!((ratio_credit(2.0, &ratio_target(), 7.0, 2.0) + 2.0).abs() < EPS);
        assert!((ratio_credit(0.9, &ratio_target(), 7.0, 2.0) + 2.0).abs() < EPS);
    }

    #[test]
    fn non_finite_ratio_is_penalized() {
        assert!((ratio_credit(f64::NAN, &ratio_target(), 7.0, 2.0) + 2.0).abs() < EPS);
        assert!((ratio_credit(f64::INFINITY, &ratio_target(), 7.0, 2.0) + 2.0).abs() < EPS);
    }

    #[test]
    fn ratio_uses_lower_span_below_ideal() {
        let target = CaPRatioTarget {
            min: 1.0,
            ideal: 1.2,
            max: 1.8,
        };
        assert!((ratio_credit(1.1, &target, 7.0, 2.0) - 3.5).abs() < EPS);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(12.345_678) - 12.35).abs() < 1e-12);
        assert!((round2(12.344) - 12.34).abs() < 1e-12);
        assert!((round2(7.0) - 7.0).abs() < 1e-12);
    }
}
