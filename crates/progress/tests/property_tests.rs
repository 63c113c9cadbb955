//! Property-based tests for the status engine.
//!
//! - Percentages always land in [0, 100]
//! - Directional key results are monotone in their current value
//! - Identical inputs give identical outputs
//! - Every objective evaluation lands on exactly one documented branch

use chrono::{DateTime, Duration, TimeZone, Utc};
use okr_core::{CycleId, KeyResult, KeyResultType, Objective, ObjectiveId, ObjectiveStatus, TimeWindow};
use okr_progress::{
    compute_objective_status_at, compute_progress, progress_percentage, time_progress, StatusPolicy,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap()
}

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0e6f64..1.0e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

fn arb_kind() -> impl Strategy<Value = KeyResultType> {
    prop_oneof![
        Just(KeyResultType::IncreaseTo),
        Just(KeyResultType::DecreaseTo),
        Just(KeyResultType::AchieveOrNot),
        Just(KeyResultType::ShouldStayAbove),
        Just(KeyResultType::ShouldStayBelow),
    ]
}

/// Window offsets in hours relative to `fixed_now`, possibly inverted.
fn arb_window() -> impl Strategy<Value = (i64, i64)> {
    (-5000i64..5000, -5000i64..5000)
}

fn key_result(kind: KeyResultType, base: f64, target: f64, current: f64) -> KeyResult {
    KeyResult::new(ObjectiveId::new(), "KR", kind, base, target, current)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: all returned percentages are clamped
    #[test]
    fn prop_percentages_are_clamped(
        kind in arb_kind(),
        base in arb_value(),
        target in arb_value(),
        current in arb_value(),
        (start, end) in arb_window(),
    ) {
        let now = fixed_now();
        let kr = key_result(kind, base, target, current);

        let raw = progress_percentage(&kr).unwrap();
        prop_assert!((0.0..=100.0).contains(&raw));

        let window = TimeWindow::new(now + Duration::hours(start), now + Duration::hours(end));
        let time = time_progress(&window, now);
        prop_assert!((0.0..=100.0).contains(&time));

        let status = compute_progress(&kr, window.start, window.end, now).unwrap();
        prop_assert!(status.progress_percentage <= 100);
        prop_assert!(status.time_progress_percentage <= 100);
    }

    /// Property: increase_to is non-decreasing in current, 0 at base and 100 at target
    #[test]
    fn prop_increase_to_monotone(
        base in -1000.0f64..1000.0,
        span in 0.001f64..1000.0,
        a in -3000.0f64..3000.0,
        b in -3000.0f64..3000.0,
    ) {
        let target = base + span;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let p_low = progress_percentage(&key_result(KeyResultType::IncreaseTo, base, target, low)).unwrap();
        let p_high = progress_percentage(&key_result(KeyResultType::IncreaseTo, base, target, high)).unwrap();
        prop_assert!(p_low <= p_high);

        prop_assert_eq!(progress_percentage(&key_result(KeyResultType::IncreaseTo, base, target, target)).unwrap(), 100.0);
        prop_assert_eq!(progress_percentage(&key_result(KeyResultType::IncreaseTo, base, target, base)).unwrap(), 0.0);
    }

    /// Property: decrease_to grows as current falls toward target
    #[test]
    fn prop_decrease_to_monotone(
        target in -1000.0f64..1000.0,
        span in 0.001f64..1000.0,
        a in -3000.0f64..3000.0,
        b in -3000.0f64..3000.0,
    ) {
        let base = target + span;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let p_low = progress_percentage(&key_result(KeyResultType::DecreaseTo, base, target, low)).unwrap();
        let p_high = progress_percentage(&key_result(KeyResultType::DecreaseTo, base, target, high)).unwrap();
        prop_assert!(p_low >= p_high);

        prop_assert_eq!(progress_percentage(&key_result(KeyResultType::DecreaseTo, base, target, target)).unwrap(), 100.0);
        prop_assert_eq!(progress_percentage(&key_result(KeyResultType::DecreaseTo, base, target, base)).unwrap(), 0.0);
    }

    /// Property: evaluation is a pure function of its inputs
    #[test]
    fn prop_idempotent(
        kind in arb_kind(),
        base in arb_value(),
        target in arb_value(),
        current in arb_value(),
        (start, end) in arb_window(),
    ) {
        let now = fixed_now();
        let kr = key_result(kind, base, target, current);
        let (ws, we) = (now + Duration::hours(start), now + Duration::hours(end));
        prop_assert_eq!(
            compute_progress(&kr, ws, we, now).unwrap(),
            compute_progress(&kr, ws, we, now).unwrap()
        );

        let objective = Objective::new("O", CycleId::new());
        let krs = vec![kr.clone(), kr];
        let window = TimeWindow::new(ws, we);
        prop_assert_eq!(
            compute_objective_status_at(&objective, &krs, &window, now).unwrap(),
            compute_objective_status_at(&objective, &krs, &window, now).unwrap()
        );
    }

    /// Property: each (overall, time) pair maps to exactly the documented branch
    #[test]
    fn prop_objective_branches_exhaustive(
        current in 0.0f64..=100.0,
        elapsed_pct in 0i64..=150,
    ) {
        let now = fixed_now();
        let start = now - Duration::hours(elapsed_pct);
        let window = TimeWindow::new(start, start + Duration::hours(100));

        let objective = Objective::new("O", CycleId::new());
        let kr = key_result(KeyResultType::IncreaseTo, 0.0, 100.0, current);
        let overall = progress_percentage(&kr).unwrap();
        let result = compute_objective_status_at(&objective, &[kr], &window, now).unwrap();

        let policy = StatusPolicy::default();
        let time = time_progress(&window, now);
        let expected = if overall >= 100.0 {
            ObjectiveStatus::Completed
        } else if time >= 100.0 {
            if overall >= policy.partial_achievement_threshold {
                ObjectiveStatus::PartiallyAchieved
            } else {
                ObjectiveStatus::NotAchieved
            }
        } else if overall - time >= 0.0 {
            ObjectiveStatus::OnTrack
        } else if overall - time >= policy.behind_gap_threshold {
            ObjectiveStatus::AtRisk
        } else {
            ObjectiveStatus::Behind
        };
        prop_assert_eq!(result.status, expected);
        prop_assert!(!result.status.is_manual());
        prop_assert_ne!(result.status, ObjectiveStatus::NotStarted);
    }
}
