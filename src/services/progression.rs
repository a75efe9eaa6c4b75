//! Level and in-level progress derived from cumulative experience.

use serde::Serialize;

/// Experience needed to clear any single level.
pub const XP_PER_LEVEL: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub level: u64,
    pub xp_into_level: u64,
    pub xp_for_next_level: u64,
    /// Share of the current level already earned, within `[0, 1]`.
    pub fraction: f64,
}

/// Experience required to advance from `level` to the next one.
///
/// The schedule is flat: every level costs the same.
pub fn xp_required_for_level(_level: u64) -> u64 {
    XP_PER_LEVEL
}

pub fn progress_for(xp: u64) -> Progress {
    let per_level = xp_required_for_level(0);
    let level = xp / per_level;
    let xp_into_level = xp % per_level;
    let fraction = (xp_into_level as f64 / per_level as f64).clamp(0.0, 1.0);

    Progress {
        level,
        xp_into_level,
        xp_for_next_level: xp_required_for_level(level),
        fraction,
    }
}

/// Same as [`progress_for`] for a stored balance; negative values count as zero.
pub fn progress_for_balance(xp: i64) -> Progress {
    progress_for(u64::try_from(xp).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_level_zero() {
        let p = progress_for(0);
        assert_eq!(p.level, 0);
        assert_eq!(p.xp_into_level, 0);
        assert_eq!(p.xp_for_next_level, 20);
        assert_eq!(p.fraction, 0.0);
    }

    #[test]
    fn twenty_points_reach_level_one() {
        let p = progress_for(20);
        assert_eq!(p.level, 1);
        assert_eq!(p.fraction, 0.0);
    }

    #[test]
    fn partial_level_is_a_fraction() {
        let p = progress_for(25);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_into_level, 5);
        assert_eq!(p.fraction, 0.25);
    }

    #[test]
    fn fraction_stays_in_unit_interval() {
        for xp in (0..500).chain([u64::MAX - 1, u64::MAX]) {
            let p = progress_for(xp);
            assert!((0.0..=1.0).contains(&p.fraction), "xp {} gave {}", xp, p.fraction);
            assert!(p.xp_into_level < p.xp_for_next_level);
        }
    }

    #[test]
    fn negative_balance_counts_as_zero() {
        assert_eq!(progress_for_balance(-5), progress_for(0));
        assert_eq!(progress_for_balance(45).level, 2);
    }
}
