//! Two-pass reaching IK over a joint chain.
//!
//! Positions are solved first (forward pass from the effector, backward pass
//! from the fixed anchor), then converted back into stored angles walking from
//! the anchor out. Bone lengths are taken from the resolved coordinates and never
//! change. A target beyond reach leaves the chain straightened toward it.

use hashbrown::HashSet;

use crate::error::PoseError;
use crate::fk::{self, direction_angle, offset, stored_angle, world_angle};
use crate::joints::{ChainName, Joint, JointInfo};
use crate::pose::{Pose, Vec2};

/// One resolvable chain entry; `info` is `None` only for the anchor.
#[derive(Copy, Clone, Debug)]
struct Link {
    joint: Joint,
    info: Option<JointInfo>,
}

/// Keep the anchor plus every joint with a hierarchy entry.
fn chain_links(chain: &[Joint]) -> Result<Vec<Link>, PoseError> {
    let links: Vec<Link> = chain
        .iter()
        .enumerate()
        .filter_map(|(i, j)| {
            let info = j.info();
            (i == 0 || info.is_some()).then_some(Link { joint: *j, info })
        })
        .collect();
    if links.len() < 2 {
        return Err(PoseError::DegenerateChain { len: links.len() });
    }
    Ok(links)
}

/// Place `from` at `length` along the direction toward it from `toward`.
/// Zero-length directions normalize with a denominator of 1.
#[inline]
fn reach(toward: Vec2, from: Vec2, length: f64) -> Vec2 {
    let d = from - toward;
    let mut l = d.length();
    if l == 0.0 {
        l = 1.0;
    }
    toward + d * (length / l)
}

/// Solve `chain` so its last joint reaches `target`.
///
/// Joints in `excluded` keep their stored angle and act as fixed pivots the rest
/// of the chain bends around. A degenerate chain or an unresolvable pose returns
/// `pose` unchanged.
pub fn solve_ik(target: Vec2, chain: &[Joint], pose: &Pose, excluded: &HashSet<Joint>) -> Pose {
    let links = match chain_links(chain) {
        Ok(links) => links,
        Err(err) => {
            log::warn!("ik: {err}; pose left unchanged");
            return pose.clone();
        }
    };
    let coords = match fk::resolve(pose, 1.0) {
        Ok(c) => c,
        Err(err) => {
            log::warn!("ik: cannot resolve input pose: {err}");
            return pose.clone();
        }
    };

    let mut positions: Vec<Vec2> = links.iter().map(|l| coords[l.joint]).collect();
    let lengths: Vec<f64> = positions
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .collect();
    let n = positions.len();

    // Forward pass: effector onto the target, walk back toward the anchor.
    positions[n - 1] = target;
    for i in (0..n - 1).rev() {
        positions[i] = reach(positions[i + 1], positions[i], lengths[i]);
    }

    // Backward pass: pin the anchor, walk out to the effector.
    positions[0] = coords[links[0].joint];
    for i in 1..n {
        positions[i] = reach(positions[i - 1], positions[i], lengths[i - 1]);
    }

    // Angle extraction, tracking where each joint actually lands.
    let mut solved = pose.clone();
    let mut actual = positions[0];
    for i in 1..n {
        let Some(info) = links[i].info else { continue };
        if !excluded.contains(&links[i].joint) {
            let world = direction_angle(actual, positions[i]);
            solved.set_angle(info.angle, stored_angle(world, info.needs_offset));
        }
        let world = world_angle(solved.angle(info.angle), info.needs_offset);
        actual = actual + offset(world, lengths[i - 1]);
    }

    log::debug!(
        "ik: solved {} joint chain toward ({:.1}, {:.1})",
        n,
        target.x,
        target.y
    );
    solved
}

/// [`solve_ik`] over one of the predefined chains.
pub fn solve_chain(
    target: Vec2,
    chain: ChainName,
    pose: &Pose,
    excluded: &HashSet<Joint>,
) -> Pose {
    solve_ik(target, chain.joints(), pose, excluded)
}
