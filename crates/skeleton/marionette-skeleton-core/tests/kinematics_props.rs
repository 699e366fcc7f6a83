use hashbrown::HashSet;
use marionette_skeleton_core::{
    interp::interpolate,
    joints::{ChainName, Joint, Placement},
    presets, propagate, resolve, solve_chain, solve_ik, AngleAttr, ConstraintMode, Pose,
    PoseCoordinates, Vec2,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn bone_lengths(coords: &PoseCoordinates, chain: &[Joint]) -> Vec<f64> {
    chain
        .windows(2)
        .map(|p| coords[p[0]].distance(coords[p[1]]))
        .collect()
}

fn unit(v: Vec2) -> Vec2 {
    v * (1.0 / v.length())
}

#[test]
fn fk_places_every_bone_at_its_length() {
    for pose in [presets::standing(), presets::sitting(), presets::dynamic_action()] {
        for scale in [0.5, 1.0, 1.75] {
            let c = resolve(&pose, scale).unwrap();
            for joint in Joint::ALL.iter().skip(1) {
                let info = joint.info().unwrap();
                let expected = match info.placement {
                    Placement::Bone(len) => pose.length(len),
                    Placement::BeyondNeck => pose.neck_length + pose.head_radius,
                };
                approx(
                    c[info.origin()].distance(c[*joint]),
                    expected * scale,
                    1e-9,
                );
            }
        }
    }
}

#[test]
fn ik_to_current_effector_changes_nothing() {
    let pose = presets::standing();
    let before = resolve(&pose, 1.0).unwrap();
    for chain in [ChainName::LeftArm, ChainName::RightArm, ChainName::LeftLeg] {
        let target = before[chain.effector()];
        let solved = solve_chain(target, chain, &pose, &HashSet::new());
        let after = resolve(&solved, 1.0).unwrap();
        assert!(after[chain.effector()].distance(target) < 1e-6, "{chain:?}");
        for joint in chain.joints() {
            assert!(after[*joint].distance(before[*joint]) < 1e-6, "{chain:?} {joint}");
        }
    }
}

#[test]
fn ik_preserves_bone_lengths() {
    let pose = presets::walking();
    let before = resolve(&pose, 1.0).unwrap();
    let targets = [
        Vec2::new(250.0, 150.0),
        Vec2::new(380.0, 260.0),
        Vec2::new(300.0, 300.0),
        Vec2::new(150.0, 40.0),
    ];
    for chain in ChainName::ALL {
        let expected = bone_lengths(&before, chain.joints());
        for target in targets {
            let solved = solve_chain(target, chain, &pose, &HashSet::new());
            let after = resolve(&solved, 1.0).unwrap();
            for (got, want) in bone_lengths(&after, chain.joints()).iter().zip(&expected) {
                approx(*got, *want, 1e-6);
            }
            assert_eq!(after[Joint::Hip], before[Joint::Hip]);
            for attr in AngleAttr::ALL {
                assert!((0.0..360.0).contains(&solved.angle(attr)));
            }
        }
    }
}

#[test]
fn unreachable_target_straightens_chain() {
    let pose = presets::standing();
    let target = Vec2::new(-700.0, 200.0);
    let solved = solve_chain(target, ChainName::LeftArm, &pose, &HashSet::new());
    let c = resolve(&solved, 1.0).unwrap();
    let joints = ChainName::LeftArm.joints();
    for w in joints.windows(3) {
        let a = unit(c[w[1]] - c[w[0]]);
        let b = unit(c[w[2]] - c[w[1]]);
        let dot = a.x * b.x + a.y * b.y;
        assert!(dot > 0.999, "{} -> {} -> {}: dot={dot}", w[0], w[1], w[2]);
    }
    // Pointing at the target, never beyond it.
    assert!(c[Joint::LeftHand].x < c[Joint::Hip].x);
    assert!(c[Joint::LeftHand].distance(target) > 500.0);
}

#[test]
fn excluded_joint_keeps_its_angle() {
    let pose = presets::standing();
    let before = resolve(&pose, 1.0).unwrap();
    let excluded: HashSet<Joint> = [Joint::LeftLowerArm].into_iter().collect();
    let target = before[Joint::LeftHand] + Vec2::new(-20.0, 5.0);
    let solved = solve_chain(target, ChainName::LeftArm, &pose, &excluded);
    assert_eq!(solved.left_lower_arm_angle, pose.left_lower_arm_angle);
    let after = resolve(&solved, 1.0).unwrap();
    for (got, want) in bone_lengths(&after, ChainName::LeftArm.joints())
        .iter()
        .zip(bone_lengths(&before, ChainName::LeftArm.joints()))
    {
        approx(*got, want, 1e-6);
    }
}

#[test]
fn degenerate_chain_is_a_no_op() {
    let pose = presets::sitting();
    assert_eq!(
        solve_ik(Vec2::new(0.0, 0.0), &[Joint::Hip], &pose, &HashSet::new()),
        pose
    );
    assert_eq!(solve_ik(Vec2::new(0.0, 0.0), &[], &pose, &HashSet::new()), pose);
}

#[test]
fn relative_propagation_preserves_world_offsets() {
    let original = presets::dynamic_action();
    let mut pose = original.clone();
    pose.torso_angle = 40.0;
    propagate(&mut pose, Joint::Shoulder, &original, ConstraintMode::Relative);
    let before = resolve(&original, 1.0).unwrap();
    let after = resolve(&pose, 1.0).unwrap();
    // The whole upper body rotates rigidly about the shoulder.
    let delta = 40.0 - original.torso_angle;
    for joint in [Joint::Head, Joint::LeftHand, Joint::RightLowerArm] {
        let d0 = before[joint] - before[Joint::Shoulder];
        let d1 = after[joint] - after[Joint::Shoulder];
        approx(d0.length(), d1.length(), 1e-9);
        let a0 = d0.y.atan2(d0.x).to_degrees();
        let a1 = d1.y.atan2(d1.x).to_degrees();
        let turn = (a0 - a1 - delta).rem_euclid(360.0);
        assert!(turn < 1e-6 || turn > 360.0 - 1e-6, "{joint}: turn={turn}");
    }
    // Legs hang off the hip and do not move.
    assert_eq!(after[Joint::LeftFoot], before[Joint::LeftFoot]);
}

#[test]
fn interpolated_pose_resolves_between_keyframes() {
    let a: Pose = presets::standing();
    let b: Pose = presets::sitting();
    let mid = interpolate(&a, &b, 0.5);
    let c = resolve(&mid, 1.0).unwrap();
    approx(c[Joint::Hip].y, 240.0, 1e-12);
}
