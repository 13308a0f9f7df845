//! Named glTF clips and the animation player that plays them.
//!
//! A model root carries a [`ClipLibrary`]. When its scene spawns, the
//! `AnimationPlayer` somewhere below it is bound to the library's graph and
//! the root gets an [`AnimationRig`] pointing at that player.

use std::collections::HashMap;
use std::time::Duration;

use bevy::gltf::Gltf;
use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct ClipLibrary {
    pub graph: Handle<AnimationGraph>,
    clips: HashMap<String, AnimationNodeIndex>,
    first: Option<AnimationNodeIndex>,
}

impl ClipLibrary {
    pub fn from_gltf(gltf: &Gltf, graphs: &mut Assets<AnimationGraph>) -> Self {
        let mut names: Vec<(&str, Handle<AnimationClip>)> = gltf
            .named_animations
            .iter()
            .map(|(name, clip)| (name.as_ref(), clip.clone()))
            .collect();
        // Keep the first clip in file order.
        let ordered: Vec<Handle<AnimationClip>> = gltf.animations.clone();
        names.sort_by_key(|(_, clip)| ordered.iter().position(|c| c == clip));

        let (graph, nodes) =
            AnimationGraph::from_clips(names.iter().map(|(_, clip)| clip.clone()));
        let clips = names
            .iter()
            .zip(nodes.iter())
            .map(|((name, _), node)| (name.to_string(), *node))
            .collect();

        Self {
            graph: graphs.add(graph),
            clips,
            first: nodes.first().copied(),
        }
    }

    pub fn node(&self, name: &str) -> Option<AnimationNodeIndex> {
        self.clips.get(name).copied()
    }

    pub fn node_or_first(&self, name: &str) -> Option<AnimationNodeIndex> {
        self.node(name).or(self.first)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

/// Clip started as soon as the player is bound.
#[derive(Component, Debug, Clone)]
pub struct StartClip {
    pub name: &'static str,
    /// Fall back to the first clip when `name` is missing.
    pub or_first: bool,
    pub speed: f32,
}

/// Added to a model root once its animation player is bound.
#[derive(Component, Debug, Clone, Copy)]
pub struct AnimationRig {
    pub player: Entity,
}

pub fn bind_animation_players(
    mut commands: Commands,
    mut added: Query<(Entity, &mut AnimationPlayer), Added<AnimationPlayer>>,
    parents: Query<&ChildOf>,
    libraries: Query<(&ClipLibrary, Option<&StartClip>)>,
) {
    for (entity, mut player) in added.iter_mut() {
        let Some((root, (library, start))) = parents
            .iter_ancestors(entity)
            .find_map(|ancestor| libraries.get(ancestor).ok().map(|found| (ancestor, found)))
        else {
            continue;
        };

        let mut transitions = AnimationTransitions::new();
        if let Some(start) = start {
            let node = if start.or_first {
                library.node_or_first(start.name)
            } else {
                library.node(start.name)
            };
            match node {
                Some(node) => {
                    transitions
                        .play(&mut player, node, Duration::ZERO)
                        .set_speed(start.speed)
                        .repeat();
                }
                None => debug!("no clip '{}' to start on {:?}", start.name, root),
            }
        }

        commands.entity(entity).insert((
            AnimationGraphHandle(library.graph.clone()),
            transitions,
        ));
        commands.entity(root).insert(AnimationRig { player: entity });
    }
}

/// Switches to `node`, stopping whatever was playing.
pub fn play_clip(
    player: &mut AnimationPlayer,
    transitions: &mut AnimationTransitions,
    node: AnimationNodeIndex,
    looping: bool,
    speed: f32,
) {
    let active = transitions
        .play(player, node, Duration::ZERO)
        .set_speed(speed);
    if looping {
        active.repeat();
    }
}

pub fn is_clip_finished(player: &AnimationPlayer, node: AnimationNodeIndex) -> bool {
    player.animation(node).is_none_or(|active| active.is_finished())
}

pub fn find_named_descendant(
    root: Entity,
    name: &str,
    children: &Query<&Children>,
    names: &Query<&Name>,
) -> Option<Entity> {
    children
        .iter_descendants(root)
        .find(|entity| names.get(*entity).is_ok_and(|n| n.as_str() == name))
}
