//! Static joint hierarchy and named IK chains.
//!
//! Every non-root joint names its parent, the angle attribute that rotates it,
//! whether that attribute is stored 90° below the world angle, and how far from
//! its origin it sits. The table is a compile-time constant; [`validate_hierarchy`]
//! checks it forms a tree rooted at the hip.

use serde::{Deserialize, Serialize};

use crate::error::PoseError;
use crate::pose::{AngleAttr, LengthAttr};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    Hip,
    Shoulder,
    Neck,
    Head,
    LeftShoulder,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightShoulder,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftHip,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightHip,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

/// How a joint's position is measured from its origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// One bone length away from the parent.
    Bone(LengthAttr),
    /// Head centre: `neckLength + headRadius` away from the shoulder, one radius
    /// beyond the neck tip.
    BeyondNeck,
}

/// Hierarchy entry for a non-root joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JointInfo {
    pub parent: Joint,
    pub angle: AngleAttr,
    pub needs_offset: bool,
    pub placement: Placement,
}

impl JointInfo {
    const fn bone(parent: Joint, angle: AngleAttr, length: LengthAttr) -> Self {
        Self {
            parent,
            angle,
            needs_offset: false,
            placement: Placement::Bone(length),
        }
    }

    /// Joint whose resolved coordinate this joint is offset from.
    pub fn origin(&self) -> Joint {
        match self.placement {
            Placement::Bone(_) => self.parent,
            Placement::BeyondNeck => Joint::Shoulder,
        }
    }
}

impl Joint {
    pub const COUNT: usize = 20;

    /// Every joint, parents before children (root first).
    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Hip,
        Joint::Shoulder,
        Joint::Neck,
        Joint::Head,
        Joint::LeftShoulder,
        Joint::LeftUpperArm,
        Joint::LeftLowerArm,
        Joint::LeftHand,
        Joint::RightShoulder,
        Joint::RightUpperArm,
        Joint::RightLowerArm,
        Joint::RightHand,
        Joint::LeftHip,
        Joint::LeftUpperLeg,
        Joint::LeftLowerLeg,
        Joint::LeftFoot,
        Joint::RightHip,
        Joint::RightUpperLeg,
        Joint::RightLowerLeg,
        Joint::RightFoot,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Joint::Hip => "hip",
            Joint::Shoulder => "shoulder",
            Joint::Neck => "neck",
            Joint::Head => "head",
            Joint::LeftShoulder => "leftShoulder",
            Joint::LeftUpperArm => "leftUpperArm",
            Joint::LeftLowerArm => "leftLowerArm",
            Joint::LeftHand => "leftHand",
            Joint::RightShoulder => "rightShoulder",
            Joint::RightUpperArm => "rightUpperArm",
            Joint::RightLowerArm => "rightLowerArm",
            Joint::RightHand => "rightHand",
            Joint::LeftHip => "leftHip",
            Joint::LeftUpperLeg => "leftUpperLeg",
            Joint::LeftLowerLeg => "leftLowerLeg",
            Joint::LeftFoot => "leftFoot",
            Joint::RightHip => "rightHip",
            Joint::RightUpperLeg => "rightUpperLeg",
            Joint::RightLowerLeg => "rightLowerLeg",
            Joint::RightFoot => "rightFoot",
        }
    }

    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.into_iter().find(|j| j.name() == name)
    }

    /// Hierarchy entry; `None` for the hip (root).
    pub const fn info(self) -> Option<JointInfo> {
        use AngleAttr as A;
        use Joint as J;
        use LengthAttr as L;
        let info = match self {
            J::Hip => return None,
            J::Shoulder => JointInfo {
                parent: J::Hip,
                angle: A::Torso,
                needs_offset: true,
                placement: Placement::Bone(L::Torso),
            },
            // Neck and head share one orientation; only `headAngle` is stored.
            J::Neck => JointInfo {
                parent: J::Shoulder,
                angle: A::Head,
                needs_offset: true,
                placement: Placement::Bone(L::Neck),
            },
            J::Head => JointInfo {
                parent: J::Neck,
                angle: A::Head,
                needs_offset: true,
                placement: Placement::BeyondNeck,
            },
            J::LeftShoulder => JointInfo::bone(J::Shoulder, A::LeftShoulder, L::LeftShoulder),
            J::LeftUpperArm => JointInfo::bone(J::LeftShoulder, A::LeftUpperArm, L::LeftUpperArm),
            J::LeftLowerArm => JointInfo::bone(J::LeftUpperArm, A::LeftLowerArm, L::LeftLowerArm),
            J::LeftHand => JointInfo::bone(J::LeftLowerArm, A::LeftHand, L::LeftHand),
            J::RightShoulder => JointInfo::bone(J::Shoulder, A::RightShoulder, L::RightShoulder),
            J::RightUpperArm => {
                JointInfo::bone(J::RightShoulder, A::RightUpperArm, L::RightUpperArm)
            }
            J::RightLowerArm => {
                JointInfo::bone(J::RightUpperArm, A::RightLowerArm, L::RightLowerArm)
            }
            J::RightHand => JointInfo::bone(J::RightLowerArm, A::RightHand, L::RightHand),
            J::LeftHip => JointInfo::bone(J::Hip, A::LeftHip, L::LeftHip),
            J::LeftUpperLeg => JointInfo::bone(J::LeftHip, A::LeftUpperLeg, L::LeftUpperLeg),
            J::LeftLowerLeg => JointInfo::bone(J::LeftUpperLeg, A::LeftLowerLeg, L::LeftLowerLeg),
            J::LeftFoot => JointInfo::bone(J::LeftLowerLeg, A::LeftFoot, L::LeftFoot),
            J::RightHip => JointInfo::bone(J::Hip, A::RightHip, L::RightHip),
            J::RightUpperLeg => JointInfo::bone(J::RightHip, A::RightUpperLeg, L::RightUpperLeg),
            J::RightLowerLeg => {
                JointInfo::bone(J::RightUpperLeg, A::RightLowerLeg, L::RightLowerLeg)
            }
            J::RightFoot => JointInfo::bone(J::RightLowerLeg, A::RightFoot, L::RightFoot),
        };
        Some(info)
    }

    pub fn parent(self) -> Option<Joint> {
        self.info().map(|i| i.parent)
    }

    /// Direct children with their hierarchy entries, in table order.
    pub fn children(self) -> impl Iterator<Item = (Joint, JointInfo)> {
        Joint::ALL
            .into_iter()
            .filter_map(move |j| j.info().filter(|i| i.parent == self).map(|i| (j, i)))
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that every joint reaches the hip through its parents and that
/// [`Joint::ALL`] lists parents before children.
pub fn validate_hierarchy() -> Result<(), PoseError> {
    for joint in Joint::ALL {
        let mut cursor = joint;
        let mut hops = 0;
        while let Some(parent) = cursor.parent() {
            hops += 1;
            if hops > Joint::COUNT {
                return Err(PoseError::BrokenHierarchy(joint.name()));
            }
            cursor = parent;
        }
        if cursor != Joint::Hip {
            return Err(PoseError::BrokenHierarchy(joint.name()));
        }
        if let Some(info) = joint.info() {
            let pos = |j: Joint| Joint::ALL.iter().position(|x| *x == j);
            if pos(info.origin()) >= pos(joint) {
                return Err(PoseError::BrokenHierarchy(joint.name()));
            }
        }
    }
    Ok(())
}

/// Root-to-leaf walk used by forward kinematics.
#[inline]
pub fn topological_order() -> &'static [Joint] {
    &Joint::ALL
}

/// Predefined IK chains.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainName {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Head,
}

impl ChainName {
    pub const ALL: [ChainName; 5] = [
        ChainName::LeftArm,
        ChainName::RightArm,
        ChainName::LeftLeg,
        ChainName::RightLeg,
        ChainName::Head,
    ];

    /// Ordered joints from the anchor (always the hip) to the end effector.
    pub const fn joints(self) -> &'static [Joint] {
        use Joint as J;
        match self {
            ChainName::LeftArm => &[
                J::Hip,
                J::Shoulder,
                J::LeftShoulder,
                J::LeftUpperArm,
                J::LeftLowerArm,
                J::LeftHand,
            ],
            ChainName::RightArm => &[
                J::Hip,
                J::Shoulder,
                J::RightShoulder,
                J::RightUpperArm,
                J::RightLowerArm,
                J::RightHand,
            ],
            ChainName::LeftLeg => &[
                J::Hip,
                J::LeftHip,
                J::LeftUpperLeg,
                J::LeftLowerLeg,
                J::LeftFoot,
            ],
            ChainName::RightLeg => &[
                J::Hip,
                J::RightHip,
                J::RightUpperLeg,
                J::RightLowerLeg,
                J::RightFoot,
            ],
            ChainName::Head => &[J::Hip, J::Shoulder, J::Head],
        }
    }

    pub fn effector(self) -> Joint {
        let joints = self.joints();
        joints[joints.len() - 1]
    }
}
