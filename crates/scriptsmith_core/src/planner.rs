//! Word-budget planner.

use crate::WordDistribution;
use tracing::debug;

/// Safety margin applied on top of the caller's target.
const BUFFER_FACTOR: f64 = 1.05;

/// Split a word target into per-section targets.
///
/// The caller passes the target already inflated for later trimming; this
/// adds a further 5% buffer, assigns fixed sizes to the hook, intro, key
/// points and conclusion by regime, and splits the remainder across the
/// chapters. A remainder below zero saturates to zero.
///
/// | buffered      | hook | intro | key points | conclusion | reserved | chapter 3 share |
/// |---------------|------|-------|------------|------------|----------|-----------------|
/// | < 1000        | 100  | 150   | 200        | 100        | 550      | 0.20            |
/// | < 3000        | 150  | 200   | 200        | 150        | 750      | 0.20            |
/// | otherwise     | 200  | 300   | 200        | 200        | 900      | 0.25            |
///
/// The remainder is the buffered total minus the reserved amount, which is
/// not always the sum of the fixed sections.
///
/// Chapters 1 and 2 always get 35% of the remainder each.
///
/// # Examples
///
/// ```
/// use scriptsmith_core::plan;
///
/// let distribution = plan(1150);
/// assert_eq!(*distribution.hook(), 150);
/// assert_eq!(*distribution.chapter_1(), 159);
/// assert_eq!(*distribution.chapter_3(), 91);
/// ```
pub fn plan(total_words: u32) -> WordDistribution {
    let buffered = (f64::from(total_words) * BUFFER_FACTOR) as u32;

    let (hook, intro, key_points, conclusion, reserved, chapter_3_share) = if buffered < 1000 {
        (100, 150, 200, 100, 550, 0.20)
    } else if buffered < 3000 {
        (150, 200, 200, 150, 750, 0.20)
    } else {
        (200, 300, 200, 200, 900, 0.25)
    };

    let remainder = buffered.saturating_sub(reserved);
    let share = |fraction: f64| (f64::from(remainder) * fraction) as u32;

    let distribution = WordDistribution {
        hook,
        intro,
        key_points,
        chapter_1: share(0.35),
        chapter_2: share(0.35),
        chapter_3: share(chapter_3_share),
        conclusion,
    };
    debug!(total_words, buffered, remainder, "Planned word distribution");
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_target_regime() {
        // 500 * 1.15 = 575, buffered 603
        let d = plan(575);
        assert_eq!(d.hook, 100);
        assert_eq!(d.intro, 150);
        assert_eq!(d.conclusion, 100);
        assert_eq!(d.chapter_1, 18);
        assert_eq!(d.chapter_2, 18);
        assert_eq!(d.chapter_3, 10);
    }

    #[test]
    fn test_middle_regime() {
        // buffered 1207, remainder 457
        let d = plan(1150);
        assert_eq!(d.hook, 150);
        assert_eq!(d.intro, 200);
        assert_eq!(d.key_points, 200);
        assert_eq!(d.conclusion, 150);
        assert_eq!(d.chapter_1, 159);
        assert_eq!(d.chapter_2, 159);
        assert_eq!(d.chapter_3, 91);
    }

    #[test]
    fn test_large_regime_uses_quarter_for_chapter_three() {
        // 10000 * 1.15 = 11500, buffered 12075, remainder 11175
        let d = plan(11_500);
        assert_eq!(d.hook, 200);
        assert_eq!(d.intro, 300);
        assert_eq!(d.chapter_1, 3911);
        assert_eq!(d.chapter_3, 2793);
    }

    #[test]
    fn test_small_input_saturates() {
        let d = plan(10);
        assert_eq!(d.chapter_1, 0);
        assert_eq!(d.chapter_2, 0);
        assert_eq!(d.chapter_3, 0);
        assert_eq!(d.hook, 100);
    }

    #[test]
    fn test_regime_boundaries() {
        // 952 * 1.05 = 999.6 -> 999
        assert_eq!(plan(952).hook, 100);
        // 953 * 1.05 = 1000.65 -> 1000
        assert_eq!(plan(953).hook, 150);
        // 2858 * 1.05 = 3000.9 -> 3000
        assert_eq!(plan(2858).hook, 200);
    }

    #[test]
    fn test_middle_regime_reserves_more_than_fixed_sections() {
        // buffered 1000, remainder 250, fixed sections sum to 700
        let d = plan(953);
        assert_eq!(d.chapter_1, 87);
        assert_eq!(d.chapter_3, 50);
        // buffered 2999, remainder 2249
        let d = plan(2857);
        assert_eq!(d.chapter_1, 787);
        assert_eq!(d.chapter_3, 449);
    }

    #[test]
    fn test_total_within_ten_percent_for_valid_targets() {
        // Inflated targets for requests of 500..=18000 words, plus the
        // values just inside each regime boundary.
        let inflated = (500u32..=18_000)
            .step_by(50)
            .map(|target| (f64::from(target) * 1.15) as u32)
            .chain([575, 952, 953, 2857, 2858, 20_700]);

        for total_words in inflated {
            let d = plan(total_words);
            assert!(d.chapter_3 > 0, "target {total_words}: empty chapter");
            let deviation =
                (f64::from(d.total()) - f64::from(total_words)).abs() / f64::from(total_words);
            assert!(
                deviation <= 0.10,
                "target {total_words}: planned {} deviates {:.3}",
                d.total(),
                deviation
            );
        }
    }
}
