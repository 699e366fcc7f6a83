use marionette_animation_core::{Config, Easing, KeyframeId, Timeline, TimelineError};
use marionette_skeleton_core::presets;

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn two_keyframes(cfg: &Config) -> (Timeline, KeyframeId, KeyframeId) {
    let mut tl = Timeline::new(&presets::standing(), cfg);
    let first = tl.keyframes()[0].id.clone();
    let (_, second) = tl.add_keyframe(1000.0, &presets::sitting()).unwrap();
    (tl, first, second)
}

fn times(tl: &Timeline) -> Vec<u32> {
    tl.keyframes().iter().map(|k| k.time).collect()
}

#[test]
fn scrub_interpolates_between_brackets() {
    let (tl, _, _) = two_keyframes(&Config::default());
    let mid = tl.scrub(500.0).unwrap();
    approx(mid.hip.y, 240.0, 1e-9);
    // Sitting right upper leg is 0°, standing 290°: shortest arc goes through 325.
    approx(mid.right_upper_leg_angle, 325.0, 1e-9);
}

#[test]
fn scrub_outside_range_and_on_keyframes_is_exact() {
    let (tl, _, _) = two_keyframes(&Config::default());
    assert_eq!(tl.scrub(-20.0).unwrap(), presets::standing());
    assert_eq!(tl.scrub(0.0).unwrap(), presets::standing());
    assert_eq!(tl.scrub(1000.0).unwrap(), presets::sitting());
    assert_eq!(tl.scrub(4000.0).unwrap(), presets::sitting());
}

#[test]
fn scrub_single_and_empty() {
    let cfg = Config::default();
    let tl = Timeline::new(&presets::walking(), &cfg);
    assert_eq!(tl.scrub(1234.0).unwrap(), presets::walking());
    assert!(Timeline::empty(&cfg).scrub(0.0).is_none());
}

#[test]
fn scrub_applies_configured_easing() {
    let cfg = Config {
        easing: Easing::EaseInQuad,
        ..Config::default()
    };
    let (tl, _, _) = two_keyframes(&cfg);
    approx(tl.scrub(500.0).unwrap().hip.y, 220.0, 1e-9);
}

#[test]
fn scrub_never_mutates() {
    let (tl, _, _) = two_keyframes(&Config::default());
    let before = tl.clone();
    let _ = tl.scrub(333.0);
    assert_eq!(tl, before);
}

#[test]
fn add_at_free_time_extends_duration_and_selects() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    let (time, id) = tl.add_keyframe(6000.0, &presets::walking()).unwrap();
    assert_eq!(time, 6000);
    assert_eq!(tl.duration(), 6000);
    assert_eq!(tl.selected(), Some(&id));
    assert_eq!(times(&tl), vec![0, 6000]);
}

#[test]
fn add_negative_time_clamps_to_zero_then_falls_back() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    // -40 clamps to 0, which is taken; the selected keyframe is last, so the
    // new one goes at the end of the duration.
    let (time, _) = tl.add_keyframe(-40.0, &presets::walking()).unwrap();
    assert_eq!(time, 5000);
    assert_eq!(tl.duration(), 5000);
}

#[test]
fn fallback_past_the_end_extends_by_step() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    tl.add_keyframe(5000.0, &presets::walking()).unwrap();
    // 4995 collides with 5000 (selected, last, flush with the duration).
    let (time, _) = tl.add_keyframe(4995.0, &presets::sitting()).unwrap();
    assert_eq!(time, 6000);
    assert_eq!(tl.duration(), 6000);
    assert_eq!(times(&tl), vec![0, 5000, 6000]);
}

#[test]
fn fallback_without_selection_is_rejected() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    tl.clear_selection();
    let before = tl.clone();
    assert_eq!(
        tl.add_keyframe(3.0, &presets::walking()),
        Err(TimelineError::MissingSelection)
    );
    assert_eq!(tl, before);
}

#[test]
fn fallback_midpoint_collision_is_rejected() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    let first = tl.keyframes()[0].id.clone();
    tl.add_keyframe(15.0, &presets::walking()).unwrap();
    tl.select_keyframe(&first).unwrap();
    let before = tl.clone();
    assert_eq!(
        tl.add_keyframe(5.0, &presets::sitting()),
        Err(TimelineError::KeyframeCollision { time: 7 })
    );
    assert_eq!(tl, before);
}

#[test]
fn move_keyframe_resorts_and_extends() {
    let (mut tl, first, second) = two_keyframes(&Config::default());
    assert_eq!(tl.move_keyframe(&first, 2000.0).unwrap(), 2000);
    assert_eq!(tl.keyframes()[0].id, second);
    assert_eq!(tl.keyframes()[1].id, first);
    assert_eq!(tl.duration(), 5000);
    tl.move_keyframe(&first, 7000.4).unwrap();
    assert_eq!(tl.duration(), 7000);
}

#[test]
fn move_keyframe_collision_is_a_no_op() {
    let (mut tl, _, second) = two_keyframes(&Config::default());
    let before = tl.clone();
    assert_eq!(
        tl.move_keyframe(&second, -50.0),
        Err(TimelineError::KeyframeCollision { time: 0 })
    );
    assert_eq!(tl, before);
    // Moving onto its own neighbourhood is fine.
    assert_eq!(tl.move_keyframe(&second, 1005.0).unwrap(), 1005);
}

#[test]
fn unknown_ids_are_reported() {
    let mut tl = Timeline::new(&presets::standing(), &Config::default());
    let ghost = KeyframeId::from("ghost");
    assert_eq!(
        tl.move_keyframe(&ghost, 10.0),
        Err(TimelineError::UnknownKeyframe(ghost.clone()))
    );
    assert!(tl.select_keyframe(&ghost).is_err());
    assert!(tl.delete_keyframe(&ghost).is_err());
}

#[test]
fn stored_poses_are_independent_copies() {
    let mut live = presets::standing();
    let mut tl = Timeline::new(&live, &Config::default());
    live.torso_angle = 45.0;
    assert_eq!(tl.keyframes()[0].pose.torso_angle, 0.0);
    assert!(tl.sync_selected_pose(&live));
    assert_eq!(tl.keyframes()[0].pose.torso_angle, 45.0);
    assert_eq!(tl.keyframes()[0].time, 0);
    tl.clear_selection();
    assert!(!tl.sync_selected_pose(&presets::sitting()));
}

#[test]
fn delete_clears_selection_and_may_empty_the_timeline() {
    let (mut tl, first, second) = two_keyframes(&Config::default());
    assert_eq!(tl.selected(), Some(&second));
    tl.delete_keyframe(&second).unwrap();
    assert_eq!(tl.selected(), None);
    tl.delete_keyframe(&first).unwrap();
    assert!(tl.is_empty());
    assert!(tl.scrub(0.0).is_none());
}

#[test]
fn reset_restores_single_keyframe() {
    let (mut tl, _, _) = two_keyframes(&Config::default());
    tl.add_keyframe(9000.0, &presets::walking()).unwrap();
    tl.reset(&presets::dynamic_action());
    assert_eq!(tl.len(), 1);
    assert_eq!(tl.duration(), 5000);
    assert_eq!(tl.selected_keyframe().unwrap().pose, presets::dynamic_action());
}

#[test]
fn neighbors_are_strict() {
    let (tl, first, second) = two_keyframes(&Config::default());
    let (prev, next) = tl.neighbors(500.0);
    assert_eq!(prev.map(|k| &k.id), Some(&first));
    assert_eq!(next.map(|k| &k.id), Some(&second));
    let (prev, next) = tl.neighbors(1000.0);
    assert_eq!(prev.map(|k| &k.id), Some(&first));
    assert!(next.is_none());
}

#[test]
fn duration_never_drops_below_latest_keyframe() {
    let (mut tl, _, _) = two_keyframes(&Config::default());
    assert_eq!(tl.set_duration(200), 1000);
    assert_eq!(tl.set_duration(8000), 8000);
}

#[test]
fn add_at_zero_on_empty_timeline() {
    let cfg = Config::default();
    let mut tl = Timeline::empty(&cfg);
    let (time, id) = tl.add_keyframe(0.0, &presets::standing()).unwrap();
    assert_eq!((time, tl.len(), tl.duration()), (0, 1, 5000));
    assert_eq!(tl.selected(), Some(&id));
}

fn assert_ordered_and_separated(tl: &Timeline, min_sep: u32) {
    for pair in tl.keyframes().windows(2) {
        assert!(
            pair[1].time >= pair[0].time + min_sep,
            "keyframes at {} and {} ms are out of order or too close",
            pair[0].time,
            pair[1].time
        );
    }
    let latest = tl.keyframes().last().map_or(0, |k| k.time);
    assert!(tl.duration() >= latest);
}

#[test]
fn mixed_adds_and_moves_keep_keyframes_ordered() {
    let cfg = Config::default();
    let mut tl = Timeline::new(&presets::standing(), &cfg);
    // Deterministic LCG so the sequence is reproducible.
    let mut seed: u64 = 0x5eed;
    let mut next = move |bound: u64| {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) % bound
    };
    for step in 0..200 {
        let t = next(7000) as f64 - 100.0;
        if step % 3 == 0 && !tl.is_empty() {
            let pick = next(tl.len() as u64) as usize;
            let id = tl.keyframes()[pick].id.clone();
            let before = tl.clone();
            if tl.move_keyframe(&id, t).is_err() {
                assert_eq!(tl, before);
            }
        } else {
            let before = tl.clone();
            if tl.add_keyframe(t, &presets::walking()).is_err() {
                assert_eq!(tl, before);
            }
        }
        assert_ordered_and_separated(&tl, cfg.min_separation_ms);
    }
    assert!(tl.len() > 10);
}
