//! Signal phase controller tests
//!
//! The phase function is pure, so everything here is direct evaluation.

use flux_sim::simulation::{phase_colors, LaneGroup, LightColor, Policy};

#[test]
fn test_fixed_timer_cycle_scenarios() {
    let state = phase_colors(5.0, Policy::FixedTimer, None);
    assert_eq!(state.ns, LightColor::Green);
    assert_eq!(state.ew, LightColor::Red);

    let state = phase_colors(6.5, Policy::FixedTimer, None);
    assert_eq!(state.ns, LightColor::Yellow);
    assert_eq!(state.ew, LightColor::Red);

    let state = phase_colors(10.0, Policy::FixedTimer, None);
    assert_eq!(state.ns, LightColor::Red);
    assert_eq!(state.ew, LightColor::Green);

    let state = phase_colors(13.5, Policy::FixedTimer, None);
    assert_eq!(state.ns, LightColor::Red);
    assert_eq!(state.ew, LightColor::Yellow);
}

#[test]
fn test_fixed_timer_cycle_wraps() {
    // 33s is 5s into the third cycle
    let state = phase_colors(33.0, Policy::FixedTimer, None);
    assert_eq!(state.ns, LightColor::Green);
    assert_eq!(state.ew, LightColor::Red);

    assert_eq!(
        phase_colors(14.0 + 6.5, Policy::FixedTimer, None),
        phase_colors(6.5, Policy::FixedTimer, None)
    );
}

#[test]
fn test_adaptive_cycle_scenarios() {
    let state = phase_colors(1.0, Policy::Adaptive, None);
    assert_eq!(state.ns, LightColor::Green);
    assert_eq!(state.ew, LightColor::Red);

    let state = phase_colors(2.25, Policy::Adaptive, None);
    assert_eq!(state.ns, LightColor::Yellow);
    assert_eq!(state.ew, LightColor::Red);

    let state = phase_colors(3.0, Policy::Adaptive, None);
    assert_eq!(state.ns, LightColor::Red);
    assert_eq!(state.ew, LightColor::Green);

    let state = phase_colors(4.75, Policy::Adaptive, None);
    assert_eq!(state.ns, LightColor::Red);
    assert_eq!(state.ew, LightColor::Yellow);
}

#[test]
fn test_groups_never_both_green() {
    for policy in [Policy::FixedTimer, Policy::Adaptive] {
        for step in 0..600 {
            let elapsed = step as f32 * 0.05;
            let state = phase_colors(elapsed, policy, None);
            assert!(
                !(state.ns == LightColor::Green && state.ew == LightColor::Green),
                "both groups green at {elapsed}s under {policy:?}"
            );
            // At most one group is ever non-red
            assert!(
                state.ns == LightColor::Red || state.ew == LightColor::Red,
                "both groups non-red at {elapsed}s under {policy:?}"
            );
        }
    }
}

#[test]
fn test_phase_function_is_pure() {
    let emergencies = [None, Some(LaneGroup::NorthSouth), Some(LaneGroup::EastWest)];
    for policy in [Policy::FixedTimer, Policy::Adaptive] {
        for emergency in emergencies {
            for step in 0..300 {
                let elapsed = step as f32 * 0.1;
                assert_eq!(
                    phase_colors(elapsed, policy, emergency),
                    phase_colors(elapsed, policy, emergency)
                );
            }
        }
    }
}

#[test]
fn test_emergency_preemption_overrides_adaptive_cycle() {
    for step in 0..300 {
        let elapsed = step as f32 * 0.1;

        let state = phase_colors(elapsed, Policy::Adaptive, Some(LaneGroup::NorthSouth));
        assert_eq!(state.ns, LightColor::Green);
        assert_eq!(state.ew, LightColor::Red);

        let state = phase_colors(elapsed, Policy::Adaptive, Some(LaneGroup::EastWest));
        assert_eq!(state.ns, LightColor::Red);
        assert_eq!(state.ew, LightColor::Green);
    }
}

#[test]
fn test_preemption_ignored_under_fixed_timer() {
    for step in 0..300 {
        let elapsed = step as f32 * 0.1;
        assert_eq!(
            phase_colors(elapsed, Policy::FixedTimer, Some(LaneGroup::NorthSouth)),
            phase_colors(elapsed, Policy::FixedTimer, None)
        );
    }
}
