//! Simulated bodies: the sub, platforms, and scenery
//!
//! An entity owns its physics state, collision flags, and sprite state.
//! The physics step is a leaf operation: it integrates, displaces one axis
//! at a time, resolves contacts against a body list, and refreshes the
//! render transform. It knows nothing about the driver that calls it.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::move_toward;

/// Opaque texture handle resolved by the rendering shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// What a body is; fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Static or scripted collidable body
    Platform,
    /// The controllable sub
    Player,
    /// Decorative scenery, never collided with
    Item,
}

/// Sprite facing, also the index into the animation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// Owned per-direction frame tables into the sprite atlas.
/// Unset directions hold an empty table; lookups are bounds-checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationSet {
    frames: [Vec<u32>; 4],
}

impl AnimationSet {
    pub fn set(&mut self, dir: Direction, frames: Vec<u32>) {
        self.frames[dir.index()] = frames;
    }

    pub fn frames(&self, dir: Direction) -> &[u32] {
        &self.frames[dir.index()]
    }
}

/// Which faces of an entity touched another body during the last step
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ContactFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ContactFlags {
    fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Inactive entities are skipped by rendering and by collision
    pub active: bool,

    /// Position in world units (z unused by the simulation)
    pub pos: Vec3,
    /// Accumulated velocity
    pub vel: Vec3,
    /// Acceleration, mutated by gravity/thrust/drag
    pub accel: Vec3,
    /// Per-frame movement intent, normalized when its length exceeds 1
    pub movement: Vec3,
    /// Movement-intent speed multiplier
    pub speed: f32,

    /// Render scale (backdrops scale without growing their collision box)
    pub scale: Vec3,
    /// Collision extents, set together with scale by [`set_dimensions`](Self::set_dimensions)
    pub width: f32,
    pub height: f32,

    pub texture: TextureId,
    /// Translate-by-position, scale-by-scale; refreshed each step
    pub transform: Mat4,

    pub facing: Direction,
    pub animation: AnimationSet,
    pub atlas_cols: u32,
    pub atlas_rows: u32,
    #[serde(default)]
    frame_index: usize,
    #[serde(default)]
    frame_time: f32,

    /// Contacts from the most recent step; read-only to consumers
    pub contact: ContactFlags,

    // Sticky outcome flags. On the player they freeze the run; on a
    // platform they are its win/lose designation.
    won: bool,
    lost: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, texture: TextureId) -> Self {
        Self {
            kind,
            active: true,
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            accel: Vec3::ZERO,
            movement: Vec3::ZERO,
            speed: 0.0,
            scale: Vec3::ONE,
            width: 1.0,
            height: 1.0,
            texture,
            transform: Mat4::IDENTITY,
            facing: Direction::Left,
            animation: AnimationSet::default(),
            atlas_cols: 1,
            atlas_rows: 1,
            frame_index: 0,
            frame_time: 0.0,
            contact: ContactFlags::default(),
            won: false,
            lost: false,
        }
    }

    /// Set collision extents and the matching render scale
    pub fn set_dimensions(&mut self, size: Vec2) {
        let size = size.abs();
        self.width = size.x;
        self.height = size.y;
        self.scale = Vec3::new(size.x, size.y, 1.0);
    }

    /// Set the render scale only; collision extents are untouched
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = Vec3::new(scale.x, scale.y, 1.0);
    }

    /// Collision box at the current position
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.truncate(), Vec2::new(self.width, self.height))
    }

    /// AABB overlap against another body (symmetric, strict inequality)
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    /// Advance one physics step against a collidable set.
    ///
    /// Horizontal motion is acceleration-driven; vertical motion blends
    /// stored velocity with direct movement intent. The asymmetry is part
    /// of the flight model. Displacement and contact resolution run one
    /// axis at a time, Y first, so landings settle before sideways contact
    /// is considered. The caller must not include this entity in `others`
    /// (the borrow rules already forbid it).
    pub fn update(&mut self, dt: f32, others: &[Entity]) {
        self.contact.clear();

        if self.movement.length_squared() > 1.0 {
            self.movement = self.movement.normalize();
        }

        self.vel.x += self.accel.x * dt;
        self.vel.y += self.accel.y * dt;

        self.pos.y += (self.vel.y + self.movement.y * self.speed) * dt;
        self.resolve_y(others);

        self.pos.x += self.vel.x * dt;
        self.resolve_x(others);

        self.advance_animation(dt);
        self.refresh_transform();
    }

    /// Vertical contact: snap out of penetration away from the other
    /// body's center, zero vertical velocity, and take on the other body's
    /// win/lose designation. Landing decides outcomes; see
    /// [`resolve_x`](Self::resolve_x) for why sideways contact does not.
    fn resolve_y(&mut self, others: &[Entity]) {
        for other in others {
            if !other.active || !self.overlaps(other) {
                continue;
            }
            let depth = self.aabb().penetration_y(&other.aabb());
            if self.pos.y > other.pos.y {
                self.pos.y += depth;
                self.contact.bottom = true;
            } else {
                self.pos.y -= depth;
                self.contact.top = true;
            }
            self.vel.y = 0.0;

            if other.has_won() {
                self.mark_win();
            }
            if other.has_lost() {
                self.mark_lose();
            }
        }
    }

    /// Horizontal contact: snap out of penetration and zero horizontal
    /// velocity. Never propagates win/lose; brushing the side of a pad is
    /// not a landing.
    fn resolve_x(&mut self, others: &[Entity]) {
        for other in others {
            if !other.active || !self.overlaps(other) {
                continue;
            }
            let depth = self.aabb().penetration_x(&other.aabb());
            if self.pos.x > other.pos.x {
                self.pos.x += depth;
                self.contact.left = true;
            } else {
                self.pos.x -= depth;
                self.contact.right = true;
            }
            self.vel.x = 0.0;
        }
    }

    /// Nudge horizontal acceleration rightward, clamped to `[-max, max]`
    pub fn thrust_right(&mut self, rate: f32, max: f32) {
        self.accel.x = (self.accel.x + rate).clamp(-max, max);
    }

    /// Nudge horizontal acceleration leftward, clamped to `[-max, max]`
    pub fn thrust_left(&mut self, rate: f32, max: f32) {
        self.accel.x = (self.accel.x - rate).clamp(-max, max);
    }

    /// Bleed horizontal acceleration toward zero without overshooting
    pub fn apply_drag(&mut self, amount: f32) {
        self.accel.x = move_toward(self.accel.x, 0.0, amount);
    }

    /// Latch the win flag (never cleared)
    pub fn mark_win(&mut self) {
        self.won = true;
    }

    /// Latch the lose flag (never cleared)
    pub fn mark_lose(&mut self) {
        self.lost = true;
    }

    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }

    #[inline]
    pub fn has_lost(&self) -> bool {
        self.lost
    }

    /// Atlas frame for the current facing, 0 when the table is empty or
    /// the index is stale from a facing change
    pub fn current_frame(&self) -> u32 {
        self.animation
            .frames(self.facing)
            .get(self.frame_index)
            .copied()
            .unwrap_or(0)
    }

    /// Cycle through the current facing's frame table while the entity
    /// has movement intent
    fn advance_animation(&mut self, dt: f32) {
        let frames = self.animation.frames(self.facing);
        if frames.is_empty() || self.movement.length_squared() == 0.0 {
            return;
        }
        self.frame_time += dt;
        let seconds_per_frame = 1.0 / crate::consts::ANIMATION_FPS;
        if self.frame_time >= seconds_per_frame {
            self.frame_time -= seconds_per_frame;
            self.frame_index = (self.frame_index + 1) % frames.len();
        }
    }

    /// Rebuild the render transform from position and scale
    pub fn refresh_transform(&mut self) {
        self.transform = Mat4::from_translation(self.pos) * Mat4::from_scale(self.scale);
    }
}
