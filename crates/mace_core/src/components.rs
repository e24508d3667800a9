//! Plain data shared between the resolution engines and the host.
//!
//! Nothing here holds behaviour beyond small accessors; the engines read
//! these values and hand back instructions for the host to apply.

use serde::{Deserialize, Serialize};

use crate::math::DVec3;

/// Stable identifier for an actor, unique within one world session.
///
/// Integer IDs survive reconnects under a different display name, so
/// per-actor state never leaks between two players sharing a name.
pub type ActorId = u64;

// ============================================================================
// Actors
// ============================================================================

/// Broad classification of an actor, as far as impact rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActorKind {
    /// A connected player: living, wears armor, receives sounds.
    Player,
    /// Any other living creature.
    #[default]
    Living,
    /// Non-living entities (dropped items, projectiles, minecarts).
    Object,
}

impl ActorKind {
    /// Whether the actor can take damage.
    #[must_use]
    pub const fn is_living(self) -> bool {
        matches!(self, Self::Player | Self::Living)
    }

    /// Whether the actor is a player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Snapshot of an actor as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    /// Actor identifier.
    pub id: ActorId,
    /// Classification.
    pub kind: ActorKind,
    /// Feet position in world space.
    pub position: DVec3,
    /// Current motion (blocks per tick).
    pub velocity: DVec3,
    /// Whether the actor is standing on a block.
    pub on_ground: bool,
    /// Unit vector the actor is looking along.
    pub facing: DVec3,
}

impl ActorState {
    /// Create a grounded, stationary actor looking along +Z.
    #[must_use]
    pub fn new(id: ActorId, kind: ActorKind, position: DVec3) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: DVec3::ZERO,
            on_ground: true,
            facing: DVec3::Z,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// Enchant-derived bonuses of one weapon for one strike.
///
/// Levels outside the ranges the resolver knows about are tolerated and
/// simply contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct DamageModifiers {
    /// Density level (fall damage scaling), 0-5.
    pub density: u8,
    /// Breach level (armor penetration), 0+.
    pub breach: u8,
    /// Wind burst level (attacker launch height), 0-3.
    pub wind_burst: u8,
}

impl DamageModifiers {
    /// No enchantments.
    pub const NONE: Self = Self {
        density: 0,
        breach: 0,
        wind_burst: 0,
    };

    /// Builder method to set density level.
    #[must_use]
    pub const fn with_density(mut self, level: u8) -> Self {
        self.density = level;
        self
    }

    /// Builder method to set breach level.
    #[must_use]
    pub const fn with_breach(mut self, level: u8) -> Self {
        self.breach = level;
        self
    }

    /// Builder method to set wind burst level.
    #[must_use]
    pub const fn with_wind_burst(mut self, level: u8) -> Self {
        self.wind_burst = level;
        self
    }
}

/// Item type held in an actor's main hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemKind {
    /// The mace weapon.
    Mace,
    /// A throwable wind charge.
    WindCharge,
    /// Anything else, including an empty hand.
    #[default]
    Other,
}

/// The item an actor is holding along with its enchantments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HeldItem {
    /// Item type.
    pub kind: ItemKind,
    /// Enchantment levels on the item.
    #[serde(default)]
    pub modifiers: DamageModifiers,
}

impl HeldItem {
    /// A mace carrying the given enchantments.
    #[must_use]
    pub const fn mace(modifiers: DamageModifiers) -> Self {
        Self {
            kind: ItemKind::Mace,
            modifiers,
        }
    }
}

/// Why an actor is being damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// Direct melee attack by another actor.
    EntityAttack,
    /// Hit by a projectile or its burst.
    Projectile,
}

// ============================================================================
// Blocks
// ============================================================================

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block containing a world-space point.
    #[must_use]
    pub fn containing(point: DVec3) -> Self {
        let floored = point.floor();
        Self::new(floored.x as i32, floored.y as i32, floored.z as i32)
    }

    /// The block directly beneath this one.
    #[must_use]
    pub const fn below(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }
}

/// Block categories the impact rules distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BlockKind {
    /// Empty space.
    #[default]
    Air,
    /// Water source or flow.
    Water,
    /// Lava source or flow.
    Lava,
    /// Door (openable).
    Door,
    /// Trapdoor (openable).
    Trapdoor,
    /// Fence gate (openable).
    FenceGate,
    /// Button (pressable).
    Button,
    /// Lever (toggleable).
    Lever,
    /// Candle, possibly lit.
    Candle {
        /// Whether the wick is burning.
        lit: bool,
    },
    /// Cake with a candle, possibly lit.
    CandleCake {
        /// Whether the wick is burning.
        lit: bool,
    },
    /// Campfire, possibly lit.
    Campfire {
        /// Whether the fire is burning.
        lit: bool,
    },
    /// Any other solid block.
    Solid,
}

impl BlockKind {
    /// Whether this block is a fluid that slows projectiles.
    #[must_use]
    pub const fn is_fluid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }
}

/// A block as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    /// Category used by impact rules.
    pub kind: BlockKind,
    /// Host item name used for block-break particles (e.g. "stone").
    pub name: String,
}

impl Block {
    /// Create a block.
    #[must_use]
    pub fn new(kind: BlockKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// An air block.
    #[must_use]
    pub fn air() -> Self {
        Self::new(BlockKind::Air, "air")
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Named sound effects broadcast to nearby players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Mace strike against an airborne target.
    SmashAir,
    /// Mace strike against a grounded target.
    SmashGround,
    /// Mace strike against a grounded target after a long fall.
    HeavySmashGround,
    /// Wind charge burst.
    WindBurst,
    /// Fire being put out.
    FireExtinguish,
}

impl Sound {
    /// Sound identifier sent to clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmashAir => "mace.smash_air",
            Self::SmashGround => "mace.smash_ground",
            Self::HeavySmashGround => "mace.heavy_smash_ground",
            Self::WindBurst => "wind_charge.burst",
            Self::FireExtinguish => "random.fizz",
        }
    }
}

/// Particle effects spawned in the world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Particle {
    /// Block break debris textured with the named block.
    BlockBreak(String),
    /// Wind charge burst cloud.
    Wind,
}
