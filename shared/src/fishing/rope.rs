//! Fishing line: a chain of small bodies hanging from a kinematic anchor in
//! the hand, each link capped by a maximum-distance joint.

use std::fmt::Debug;

use bevy::math::Vec3;

/// Body and joint operations the line needs from the physics engine.
pub trait RopePhysics {
    /// Identifies a body or a joint.
    type Handle: Copy + Eq + Debug;

    fn spawn_hand_anchor(&mut self, position: Vec3) -> Self::Handle;
    fn spawn_segment(&mut self, position: Vec3) -> Self::Handle;
    fn despawn(&mut self, body: Self::Handle);

    /// Links two bodies so they never drift further apart than `max_distance`.
    fn attach_max_distance(
        &mut self,
        parent: Self::Handle,
        child: Self::Handle,
        max_distance: f32,
    ) -> Self::Handle;
    fn detach(&mut self, joint: Self::Handle);

    fn position(&self, body: Self::Handle) -> Option<Vec3>;
    fn linear_velocity(&self, body: Self::Handle) -> Option<Vec3>;
    fn set_linear_velocity(&mut self, body: Self::Handle, velocity: Vec3);
    fn move_kinematic(&mut self, body: Self::Handle, position: Vec3);
    /// Continuous force, replacing whatever was set before.
    fn set_force(&mut self, body: Self::Handle, force: Vec3);
    fn set_enabled(&mut self, body: Self::Handle, enabled: bool);
    fn teleport(&mut self, body: Self::Handle, position: Vec3);
}

/// Bodies and joints making up one cast's line. Owned by the apparatus and
/// torn down on reel-in.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeChain<H> {
    pub anchor: H,
    pub segments: Vec<H>,
    pub joints: Vec<H>,
    pub link_length: f32,
}

impl<H: Copy + Eq + Debug> RopeChain<H> {
    /// Strings `segment_count` segments evenly between `hand` and the bobber.
    pub fn build<P: RopePhysics<Handle = H>>(
        physics: &mut P,
        hand: Vec3,
        bobber: H,
        bobber_position: Vec3,
        segment_count: usize,
    ) -> Self {
        let span = bobber_position - hand;
        let link_length = span.length() / segment_count.max(1) as f32;

        let anchor = physics.spawn_hand_anchor(hand);
        let segments: Vec<H> = (0..segment_count)
            .map(|i| {
                let t = (i + 1) as f32 / (segment_count + 1) as f32;
                physics.spawn_segment(hand + span * t)
            })
            .collect();

        let mut joints = Vec::with_capacity(segment_count + 1);
        let mut parent = anchor;
        for &child in segments.iter().chain(std::iter::once(&bobber)) {
            joints.push(physics.attach_max_distance(parent, child, link_length));
            parent = child;
        }

        Self {
            anchor,
            segments,
            joints,
            link_length,
        }
    }

    /// Joints go first so no constraint outlives one of its bodies.
    pub fn dispose<P: RopePhysics<Handle = H>>(self, physics: &mut P) {
        for joint in self.joints {
            physics.detach(joint);
        }
        for segment in self.segments {
            physics.despawn(segment);
        }
        physics.despawn(self.anchor);
    }
}

/// Points the rendered line passes through: hand, every segment, bobber.
/// The buffer is sized once and overwritten in place each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeSamples {
    points: Vec<Vec3>,
}

impl RopeSamples {
    pub fn new(segment_count: usize) -> Self {
        Self {
            points: vec![Vec3::ZERO; segment_count + 2],
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Lays the samples out along the straight line from `hand` to the
    /// bobber, where a freshly built chain puts its segments.
    pub fn seed(&mut self, hand: Vec3, bobber_position: Vec3, segment_count: usize) {
        let span = bobber_position - hand;
        let steps = (segment_count + 1) as f32;
        self.points.clear();
        self.points
            .extend((0..segment_count + 2).map(|i| hand + span * (i as f32 / steps)));
    }

    pub fn clear(&mut self) {
        self.points.fill(Vec3::ZERO);
    }

    /// Positions that cannot be read keep their previous sample.
    pub fn refresh<P: RopePhysics>(
        &mut self,
        physics: &P,
        hand: Option<Vec3>,
        segments: &[P::Handle],
        bobber: Option<P::Handle>,
    ) {
        let Some(last) = self.points.len().checked_sub(1) else {
            return;
        };
        if let Some(hand) = hand {
            self.points[0] = hand;
        }
        for (slot, &segment) in self.points[1..last].iter_mut().zip(segments) {
            if let Some(position) = physics.position(segment) {
                *slot = position;
            }
        }
        if let Some(position) = bobber.and_then(|b| physics.position(b)) {
            self.points[last] = position;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct FakeBody {
        pub position: Vec3,
        pub velocity: Vec3,
        pub force: Vec3,
        pub enabled: bool,
        pub kinematic: bool,
    }

    /// In-memory physics: bodies never move on their own.
    #[derive(Debug, Default)]
    pub struct FakeRope {
        pub(crate) next: u32,
        pub bodies: HashMap<u32, FakeBody>,
        pub joints: HashMap<u32, (u32, u32, f32)>,
        /// Bodies whose position reads as missing.
        pub unreadable: Vec<u32>,
        /// New segments stay unreadable, as with deferred spawning.
        pub deferred_segments: bool,
    }

    impl FakeRope {
        fn handle(&mut self) -> u32 {
            self.next += 1;
            self.next
        }

        pub fn spawn_bobber(&mut self) -> u32 {
            let id = self.handle();
            self.bodies.insert(id, FakeBody::default());
            id
        }

        pub fn body(&self, id: u32) -> &FakeBody {
            &self.bodies[&id]
        }
    }

    impl RopePhysics for FakeRope {
        type Handle = u32;

        fn spawn_hand_anchor(&mut self, position: Vec3) -> u32 {
            let id = self.handle();
            self.bodies.insert(
                id,
                FakeBody {
                    position,
                    enabled: true,
                    kinematic: true,
                    ..Default::default()
                },
            );
            id
        }

        fn spawn_segment(&mut self, position: Vec3) -> u32 {
            let id = self.handle();
            if self.deferred_segments {
                self.unreadable.push(id);
            }
            self.bodies.insert(
                id,
                FakeBody {
                    position,
                    enabled: true,
                    ..Default::default()
                },
            );
            id
        }

        fn despawn(&mut self, body: u32) {
            self.bodies.remove(&body);
        }

        fn attach_max_distance(&mut self, parent: u32, child: u32, max_distance: f32) -> u32 {
            let id = self.handle();
            self.joints.insert(id, (parent, child, max_distance));
            id
        }

        fn detach(&mut self, joint: u32) {
            self.joints.remove(&joint);
        }

        fn position(&self, body: u32) -> Option<Vec3> {
            if self.unreadable.contains(&body) {
                return None;
            }
            self.bodies.get(&body).map(|b| b.position)
        }

        fn linear_velocity(&self, body: u32) -> Option<Vec3> {
            self.bodies.get(&body).map(|b| b.velocity)
        }

        fn set_linear_velocity(&mut self, body: u32, velocity: Vec3) {
            if let Some(b) = self.bodies.get_mut(&body) {
                b.velocity = velocity;
            }
        }

        fn move_kinematic(&mut self, body: u32, position: Vec3) {
            if let Some(b) = self.bodies.get_mut(&body) {
                b.position = position;
            }
        }

        fn set_force(&mut self, body: u32, force: Vec3) {
            if let Some(b) = self.bodies.get_mut(&body) {
                b.force = force;
            }
        }

        fn set_enabled(&mut self, body: u32, enabled: bool) {
            if let Some(b) = self.bodies.get_mut(&body) {
                b.enabled = enabled;
            }
        }

        fn teleport(&mut self, body: u32, position: Vec3) {
            if let Some(b) = self.bodies.get_mut(&body) {
                b.position = position;
            }
        }
    }

    #[test]
    fn test_chain_links_anchor_segments_and_bobber() {
        let mut physics = FakeRope::default();
        let bobber = physics.spawn_bobber();
        let chain = RopeChain::build(&mut physics, Vec3::ZERO, bobber, Vec3::new(10.0, 0.0, 0.0), 4);

        assert_eq!(chain.segments.len(), 4);
        assert_eq!(chain.joints.len(), 5);
        assert!((chain.link_length - 2.5).abs() < 1e-6);
        assert!(physics.body(chain.anchor).kinematic);
        assert_eq!(physics.body(chain.segments[0]).position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(physics.body(chain.segments[3]).position, Vec3::new(8.0, 0.0, 0.0));

        let first = physics.joints[&chain.joints[0]];
        assert_eq!((first.0, first.1), (chain.anchor, chain.segments[0]));
        let last = physics.joints[&chain.joints[4]];
        assert_eq!((last.0, last.1), (chain.segments[3], bobber));
    }

    #[test]
    fn test_dispose_leaves_only_the_bobber() {
        let mut physics = FakeRope::default();
        let bobber = physics.spawn_bobber();
        let chain = RopeChain::build(&mut physics, Vec3::ZERO, bobber, Vec3::X * 3.0, 3);
        chain.dispose(&mut physics);
        assert!(physics.joints.is_empty());
        assert_eq!(physics.bodies.len(), 1);
        assert!(physics.bodies.contains_key(&bobber));
    }

    #[test]
    fn test_seeded_samples_follow_the_new_chain() {
        let mut physics = FakeRope::default();
        let bobber = physics.spawn_bobber();
        let chain = RopeChain::build(&mut physics, Vec3::ZERO, bobber, Vec3::X * 3.0, 2);
        let mut samples = RopeSamples::new(2);
        samples.seed(Vec3::ZERO, Vec3::X * 3.0, 2);

        physics.unreadable.extend(chain.segments.iter().copied());
        samples.refresh(&physics, Some(Vec3::ZERO), &chain.segments, None);
        assert_eq!(
            samples.points(),
            &[Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0]
        );

        samples.clear();
        assert!(samples.points().iter().all(|p| *p == Vec3::ZERO));
        assert_eq!(samples.points().len(), 4);
    }

    #[test]
    fn test_samples_keep_stale_points() {
        let mut physics = FakeRope::default();
        let bobber = physics.spawn_bobber();
        let chain = RopeChain::build(&mut physics, Vec3::ZERO, bobber, Vec3::X * 3.0, 2);
        let mut samples = RopeSamples::new(2);
        samples.refresh(&physics, Some(Vec3::Y), &chain.segments, Some(bobber));
        assert_eq!(samples.points()[0], Vec3::Y);
        assert_eq!(samples.points()[1], Vec3::X);
        assert_eq!(samples.points().len(), 4);

        physics.unreadable.push(chain.segments[0]);
        physics.move_kinematic(chain.segments[0], Vec3::splat(9.0));
        samples.refresh(&physics, None, &chain.segments, Some(bobber));
        assert_eq!(samples.points()[0], Vec3::Y);
        assert_eq!(samples.points()[1], Vec3::X);
    }
}
