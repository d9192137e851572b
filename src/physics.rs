//! Player kinematics, collision detection, and the magnet attraction helper.
//!
//! All functions here take the current value and return the next one; callers
//! replace their copy with the result.

use crate::core::constants::{
    COYOTE_TIME_FRAMES, DOUBLE_JUMP_ENABLED, GROUND_Y_OFFSET, NEAR_MISS_DISTANCE, PLAYER_HEIGHT,
    PLAYER_WIDTH, PLAYER_X, VARIABLE_JUMP_CUT,
};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in canvas coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Hitbox,
    pub velocity_x: f64,
    /// Negative = moving up.
    pub velocity_y: f64,
    pub grounded: bool,
    pub jumping: bool,
    /// Held state for variable jump height.
    pub jump_key_held: bool,
    /// Frames left in which a jump is still honored after leaving the ground.
    pub coyote_timer: u32,
    pub can_double_jump: bool,
    pub has_double_jumped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    pub collided: bool,
    /// Close but not touching. Never true when `collided` is.
    pub near_miss: bool,
}

/// Y coordinate of the ground line for a canvas height.
pub fn ground_y(canvas_height: f64) -> f64 {
    canvas_height - GROUND_Y_OFFSET
}

/// Player standing on the ground line.
pub fn create_player(canvas_height: f64) -> Player {
    Player {
        body: Hitbox::new(
            PLAYER_X,
            ground_y(canvas_height) - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        ),
        velocity_x: 0.0,
        velocity_y: 0.0,
        grounded: true,
        jumping: false,
        jump_key_held: false,
        coyote_timer: 0,
        can_double_jump: DOUBLE_JUMP_ENABLED,
        has_double_jumped: false,
    }
}

fn land(player: &mut Player) {
    player.velocity_y = 0.0;
    player.grounded = true;
    player.jumping = false;
    player.coyote_timer = COYOTE_TIME_FRAMES;
    player.has_double_jumped = false;
}

fn leave_ground(player: &mut Player) {
    if player.grounded {
        player.coyote_timer = COYOTE_TIME_FRAMES;
    }
    player.grounded = false;
}

/// Advance the player by one frame.
///
/// With `reverse_gravity` the player falls toward the ceiling (y = 0) and
/// lands there instead of on the ground.
pub fn update_player_physics(
    player: &Player,
    gravity: f64,
    ground_y: f64,
    reverse_gravity: bool,
) -> Player {
    let mut next = *player;
    let effective_gravity = if reverse_gravity { -gravity } else { gravity };

    next.velocity_y += effective_gravity;
    next.body.y += next.velocity_y;

    if !next.grounded && next.coyote_timer > 0 {
        next.coyote_timer -= 1;
    }

    // A corrupted position snaps back to the ground rather than propagating.
    if !next.body.y.is_finite() || !next.velocity_y.is_finite() {
        next.body.y = ground_y - next.body.height;
        land(&mut next);
        return next;
    }

    if reverse_gravity {
        if next.body.y <= 0.0 {
            next.body.y = 0.0;
            land(&mut next);
        } else {
            leave_ground(&mut next);
        }
    } else if next.body.bottom() >= ground_y {
        next.body.y = ground_y - next.body.height;
        land(&mut next);
    } else {
        leave_ground(&mut next);
    }

    next
}

/// Start a jump if the player is grounded, inside the coyote window, or has
/// an unused double jump. Returns the player unchanged otherwise.
pub fn initiate_jump(player: &Player, jump_force: f64, reverse_gravity: bool) -> Player {
    let can_jump = player.grounded
        || player.coyote_timer > 0
        || (player.can_double_jump && !player.has_double_jumped && !player.grounded);

    if !can_jump {
        return *player;
    }

    let mut next = *player;
    if !next.grounded && next.coyote_timer == 0 {
        next.has_double_jumped = true;
    }

    next.velocity_y = if reverse_gravity {
        -jump_force
    } else {
        jump_force
    };
    next.jumping = true;
    next.jump_key_held = true;
    next.grounded = false;
    next.coyote_timer = 0;
    next
}

/// Variable jump height: releasing while still rising cuts the jump short.
pub fn release_jump(player: &Player) -> Player {
    let mut next = *player;
    next.jump_key_held = false;

    if next.jumping && next.velocity_y < 0.0 {
        next.velocity_y *= VARIABLE_JUMP_CUT;
    }

    next
}

/// AABB overlap test plus near-miss detection.
pub fn check_collision(player: &Player, object: &Hitbox) -> CollisionResult {
    let collided = player.body.overlaps(object);
    let near_miss = !collided && is_near_miss(player, object);
    CollisionResult {
        collided,
        near_miss,
    }
}

/// Center-to-center distance under the threshold scaled by half-widths.
pub fn is_near_miss(player: &Player, object: &Hitbox) -> bool {
    let (px, py) = player.body.center();
    let (ox, oy) = object.center();
    let distance = ((px - ox).powi(2) + (py - oy).powi(2)).sqrt();

    distance < NEAR_MISS_DISTANCE + (player.body.width + object.width) / 2.0
}

/// Pull `object` toward the player by `strength / distance` when in range.
pub fn apply_magnetism(object: &Hitbox, player: &Player, range: f64, strength: f64) -> Hitbox {
    let (ox, oy) = object.center();
    let (px, py) = player.body.center();
    let dx = px - ox;
    let dy = py - oy;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance >= range || distance <= 0.0 {
        return *object;
    }

    let force = strength / distance;
    let mut moved = *object;
    moved.x += (dx / distance) * force;
    moved.y += (dy / distance) * force;
    moved
}

/// True when the box is entirely outside the canvas plus `margin`, or when
/// its coordinates are not finite.
pub fn is_off_screen(object: &Hitbox, canvas_width: f64, canvas_height: f64, margin: f64) -> bool {
    !object.is_finite()
        || object.right() < -margin
        || object.x > canvas_width + margin
        || object.bottom() < -margin
        || object.y > canvas_height + margin
}

pub fn clamp_position(object: &Hitbox, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Hitbox {
    Hitbox {
        x: min_x.max((max_x - object.width).min(object.x)),
        y: min_y.max((max_y - object.height).min(object.y)),
        ..*object
    }
}
