//! Deterministic scenery layout along the route.
//!
//! Everything here is placement data for the rendering layer: road tiles, gates,
//! tree rows and ambient particles. Placement derives from [`crate::path`] with the
//! same [`GATE_SPACING`], so decorations always line up with the gates.

use engine_core::{Transform, TransformRaw};
use glam::Vec3;
use rand::prelude::*;

use crate::path::{finale_longitudinal, heading, lateral_offset, waypoint, Waypoint, GATE_SPACING};

/// Length of one road tile along Z.
pub const ROAD_SEGMENT_LENGTH: f32 = 3.5;
/// Road tiles start slightly behind the first gate so the opening shot is covered.
const ROAD_START_Z: f32 = 10.0;
/// Road extends this many gate spacings past the gate count.
const ROAD_RUNOUT_GATES: usize = 6;
/// Road surface sits just below the gate plane.
const ROAD_HEIGHT: f32 = -0.51;

const TREE_INTERVAL: f32 = 10.0;
const TREE_LATERAL: f32 = 10.0;
const TREE_RUNOUT_GATES: usize = 3;
const TREE_HEIGHT: f32 = -0.5;

const GATE_GLOW_ACTIVE: f32 = 4.0;
const GATE_GLOW_IDLE: f32 = 0.5;

/// Hover height of the goal marker and the finale pair.
const MARKER_HEIGHT: f32 = 1.25;
const AURA_HEIGHT: f32 = 3.0;
/// Sun sits far beyond the finale, up and to the right.
const SUN_OFFSET: Vec3 = Vec3::new(100.0, 70.0, -300.0);
const FINALE_TRAVELLER_OFFSET: Vec3 = Vec3::new(-0.9, 1.1, 0.0);
const FINALE_COMPANION_OFFSET: Vec3 = Vec3::new(1.5, 1.2, 0.0);
const FINALE_LIGHT_HEIGHT: f32 = 3.0;

const PARTICLE_LATERAL_SPREAD: f32 = 30.0;
const PARTICLE_MAX_HEIGHT: f32 = 14.0;

/// One road tile, oriented along the local route heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    pub center: Vec3,
    pub heading: f32,
}

impl RoadSegment {
    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.center, self.heading)
    }
}

/// A gate ring marking one challenge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    pub index: usize,
    pub waypoint: Waypoint,
    /// The gate of the challenge currently being answered.
    pub active: bool,
}

impl Gate {
    /// Base glow of the gate light, before any pulsing.
    pub fn glow_intensity(&self) -> f32 {
        if self.active {
            GATE_GLOW_ACTIVE
        } else {
            GATE_GLOW_IDLE
        }
    }
}

/// Fixed points of interest along a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmarks {
    /// Marker waiting at the last gate.
    pub goal: Vec3,
    /// Light glowing around the goal.
    pub aura_light: Vec3,
    pub sun: Vec3,
    /// Where the traveller stands once the journey is complete.
    pub finale_traveller: Vec3,
    /// Where the goal companion stands once the journey is complete.
    pub finale_companion: Vec3,
    pub finale_light: Vec3,
}

impl Landmarks {
    pub fn for_route(gate_count: usize) -> Self {
        let last_gate = waypoint(gate_count.max(1) - 1);
        let finale = Waypoint::at(finale_longitudinal(gate_count)).position(0.0);
        Self {
            goal: last_gate.position(MARKER_HEIGHT),
            aura_light: last_gate.position(AURA_HEIGHT),
            sun: finale + SUN_OFFSET,
            finale_traveller: finale + FINALE_TRAVELLER_OFFSET,
            finale_companion: finale + FINALE_COMPANION_OFFSET,
            finale_light: finale + Vec3::Y * FINALE_LIGHT_HEIGHT,
        }
    }
}

/// Which side of the road a tree stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub position: Vec3,
    pub side: Side,
}

/// Static scenery for a route of `gate_count` gates.
#[derive(Debug, Clone)]
pub struct Scenery {
    pub gate_count: usize,
    pub road: Vec<RoadSegment>,
    pub trees: Vec<Tree>,
    pub particles: Vec<Vec3>,
}

impl Scenery {
    /// Lay out the road, trees and `particle_count` particles. Particle scatter is
    /// seeded, so the same seed always yields the same scene.
    pub fn generate(gate_count: usize, seed: u64, particle_count: usize) -> Self {
        let road = road_segments(gate_count);
        let trees = tree_rows(gate_count);
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = scatter_particles(gate_count, particle_count, &mut rng);
        log::debug!(
            "Scenery for {} gates: {} road tiles, {} trees, {} particles",
            gate_count,
            road.len(),
            trees.len(),
            particles.len()
        );
        Self {
            gate_count,
            road,
            trees,
            particles,
        }
    }

    /// Gates with the one at `current_step` flagged active. Past the last gate none is active.
    pub fn gates(&self, current_step: usize) -> Vec<Gate> {
        (0..self.gate_count)
            .map(|index| Gate {
                index,
                waypoint: waypoint(index),
                active: index == current_step,
            })
            .collect()
    }

    /// Road tile model matrices, ready for an instance buffer.
    pub fn road_instances(&self) -> Vec<TransformRaw> {
        self.road.iter().map(|s| TransformRaw::from(s.transform())).collect()
    }
}

/// Road tiles covering the route from just behind the first gate to past the last.
pub fn road_segments(gate_count: usize) -> Vec<RoadSegment> {
    let road_length = (gate_count + ROAD_RUNOUT_GATES) as f32 * GATE_SPACING;
    let count = (road_length / ROAD_SEGMENT_LENGTH).ceil() as usize;
    (0..count)
        .map(|i| {
            let z = ROAD_START_Z - i as f32 * ROAD_SEGMENT_LENGTH;
            RoadSegment {
                center: Vec3::new(lateral_offset(z), ROAD_HEIGHT, z),
                heading: heading(z),
            }
        })
        .collect()
}

/// Paired trees on both sides of the road at a fixed interval.
pub fn tree_rows(gate_count: usize) -> Vec<Tree> {
    let road_length = (gate_count + TREE_RUNOUT_GATES) as f32 * GATE_SPACING;
    let rows = ((road_length + ROAD_START_Z) / TREE_INTERVAL).ceil() as usize;
    let mut trees = Vec::with_capacity(rows * 2);
    for row in 0..rows {
        let z = ROAD_START_Z - row as f32 * TREE_INTERVAL;
        let x = lateral_offset(z);
        trees.push(Tree {
            position: Vec3::new(x - TREE_LATERAL, TREE_HEIGHT, z),
            side: Side::Left,
        });
        trees.push(Tree {
            position: Vec3::new(x + TREE_LATERAL, TREE_HEIGHT, z),
            side: Side::Right,
        });
    }
    trees
}

/// Ambient particles scattered around the road centre line.
pub fn scatter_particles<R: Rng>(gate_count: usize, count: usize, rng: &mut R) -> Vec<Vec3> {
    let road_length = (gate_count + ROAD_RUNOUT_GATES) as f32 * GATE_SPACING;
    (0..count)
        .map(|_| {
            let z = ROAD_START_Z - rng.gen::<f32>() * road_length;
            let x = lateral_offset(z) + (rng.gen::<f32>() - 0.5) * PARTICLE_LATERAL_SPREAD;
            let y = rng.gen::<f32>() * PARTICLE_MAX_HEIGHT;
            Vec3::new(x, y, z)
        })
        .collect()
}
