//! Deterministic candidate selection shared by every injector.
//!
//! filter eligible -> floor(len * pct / 100) -> Fisher-Yates shuffle of
//! the eligible index list -> take the first `count`. Duplicate-style
//! injectors reserve index 0 as the untouched source and mutate
//! `[1..count]` instead, so a plan below two records is a no-op.

use grist_core::rng::SeedStream;

/// Exact floor-based count, by contrast with the base generators'
/// per-record Bernoulli trials.
pub fn planned_count(eligible: usize, pct: f64) -> usize {
    (eligible as f64 * pct / 100.0).floor() as usize
}

/// Shuffle `eligible` indices and return the first `count` targets.
/// Returns an empty vec when the plan rounds to zero.
pub fn select_targets(eligible: Vec<usize>, pct: f64, rng: &mut SeedStream) -> Vec<usize> {
    let count = planned_count(eligible.len(), pct);
    if count == 0 {
        return Vec::new();
    }
    let mut shuffled = eligible;
    rng.shuffle(&mut shuffled);
    shuffled.truncate(count);
    shuffled
}

/// Duplicate-from-source selection: index 0 of the shuffle is the
/// untouched source, indices `[1..count]` are the copy targets. A plan
/// below two records has nothing to copy onto, so it is a no-op.
pub fn select_source_and_targets(
    eligible: Vec<usize>,
    pct: f64,
    rng: &mut SeedStream,
) -> Option<(usize, Vec<usize>)> {
    let count = planned_count(eligible.len(), pct);
    if count < 2 {
        return None;
    }
    let mut shuffled = eligible;
    rng.shuffle(&mut shuffled);
    let source = shuffled[0];
    let take = count.min(shuffled.len());
    let targets = shuffled[1..take].to_vec();
    Some((source, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grist_core::config::Seed;

    #[test]
    fn count_is_exact_floor() {
        assert_eq!(planned_count(1000, 10.0), 100);
        assert_eq!(planned_count(99, 10.0), 9);
        assert_eq!(planned_count(9, 10.0), 0);
        assert_eq!(planned_count(0, 50.0), 0);
    }

    #[test]
    fn selection_is_deterministic() {
        let mut a = SeedStream::from_seed(&Seed::Int(5));
        let mut b = SeedStream::from_seed(&Seed::Int(5));
        let x = select_targets((0..100).collect(), 25.0, &mut a);
        let y = select_targets((0..100).collect(), 25.0, &mut b);
        assert_eq!(x, y);
        assert_eq!(x.len(), 25);
    }

    #[test]
    fn zero_plan_is_noop() {
        let mut rng = SeedStream::from_seed(&Seed::Int(5));
        assert!(select_targets((0..5).collect(), 10.0, &mut rng).is_empty());
    }

    #[test]
    fn duplicate_selection_reserves_source() {
        let mut rng = SeedStream::from_seed(&Seed::Int(6));
        let (source, targets) = select_source_and_targets((0..50).collect(), 20.0, &mut rng).unwrap();
        // count = 10, one of which is the source.
        assert_eq!(targets.len(), 9);
        assert!(!targets.contains(&source));
    }

    #[test]
    fn duplicate_selection_needs_two_records() {
        let mut rng = SeedStream::from_seed(&Seed::Int(7));
        assert!(select_source_and_targets(vec![3], 100.0, &mut rng).is_none());
    }

    #[test]
    fn duplicate_selection_noops_below_two_planned() {
        let mut rng = SeedStream::from_seed(&Seed::Int(8));
        // 2% of 50 plans a single record: nothing to copy onto.
        assert!(select_source_and_targets((0..50).collect(), 2.0, &mut rng).is_none());
    }
}
