//! World-type, generation-settings and biome descriptors
//!
//! Descriptors are immutable value records owned by the session's dynamic
//! registries. The host (or other mods) supplies them; the dimension manager
//! only looks them up.

use serde::{Deserialize, Serialize};
use void_registry::{Identifier, Registrable};

/// Physical properties shared by every world of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldType {
    /// Time of day locked to this value, if any
    pub fixed_time: Option<i64>,
    /// Whether the sky emits light
    pub has_skylight: bool,
    /// Whether there is a bedrock ceiling
    pub has_ceiling: bool,
    /// Water evaporates, lava spreads faster
    pub ultrawarm: bool,
    /// Compasses and clocks work
    pub natural: bool,
    /// Horizontal scale relative to the overworld
    pub coordinate_scale: f64,
    pub piglin_safe: bool,
    pub bed_works: bool,
    pub respawn_anchor_works: bool,
    pub has_raids: bool,
    /// Lowest buildable Y
    pub min_y: i32,
    /// Total buildable height
    pub height: u32,
    /// Height used for portals and chorus teleports
    pub logical_height: u32,
    /// Block tag that burns forever
    pub infiniburn: Identifier,
    /// Sky/fog renderer selector
    pub effects: Identifier,
    pub ambient_light: f32,
}

impl WorldType {
    pub fn overworld() -> Self {
        Self {
            fixed_time: None,
            has_skylight: true,
            has_ceiling: false,
            ultrawarm: false,
            natural: true,
            coordinate_scale: 1.0,
            piglin_safe: false,
            bed_works: true,
            respawn_anchor_works: false,
            has_raids: true,
            min_y: 0,
            height: 256,
            logical_height: 256,
            infiniburn: Identifier::vanilla("infiniburn_overworld"),
            effects: Identifier::vanilla("overworld"),
            ambient_light: 0.0,
        }
    }

    pub fn the_nether() -> Self {
        Self {
            fixed_time: Some(18000),
            has_skylight: false,
            has_ceiling: true,
            ultrawarm: true,
            natural: false,
            coordinate_scale: 8.0,
            piglin_safe: true,
            bed_works: false,
            respawn_anchor_works: true,
            has_raids: false,
            logical_height: 128,
            infiniburn: Identifier::vanilla("infiniburn_nether"),
            effects: Identifier::vanilla("the_nether"),
            ambient_light: 0.1,
            ..Self::overworld()
        }
    }

    pub fn the_end() -> Self {
        Self {
            fixed_time: Some(6000),
            has_skylight: false,
            natural: false,
            bed_works: false,
            has_raids: true,
            infiniburn: Identifier::vanilla("infiniburn_end"),
            effects: Identifier::vanilla("the_end"),
            ..Self::overworld()
        }
    }
}

impl Registrable for WorldType {
    const REGISTRY: &'static str = "minecraft:dimension_type";
}

/// Terrain-shaping parameters handed to the chunk generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Block that fills solid terrain
    pub default_block: Identifier,
    /// Fluid that fills everything below sea level
    pub default_fluid: Identifier,
    pub sea_level: i32,
    /// Y of the bedrock roof; negative disables it
    pub bedrock_roof_position: i32,
    /// Y of the bedrock floor; negative disables it
    pub bedrock_floor_position: i32,
    pub disable_mob_generation: bool,
    pub min_y: i32,
    pub height: u32,
}

impl GenerationSettings {
    pub fn overworld() -> Self {
        Self {
            default_block: Identifier::vanilla("stone"),
            default_fluid: Identifier::vanilla("water"),
            sea_level: 63,
            bedrock_roof_position: -10,
            bedrock_floor_position: 0,
            disable_mob_generation: false,
            min_y: 0,
            height: 256,
        }
    }

    pub fn nether() -> Self {
        Self {
            default_block: Identifier::vanilla("netherrack"),
            default_fluid: Identifier::vanilla("lava"),
            sea_level: 32,
            bedrock_roof_position: 0,
            height: 128,
            ..Self::overworld()
        }
    }

    pub fn end() -> Self {
        Self {
            default_block: Identifier::vanilla("end_stone"),
            default_fluid: Identifier::vanilla("air"),
            sea_level: 0,
            bedrock_floor_position: -10,
            disable_mob_generation: true,
            height: 128,
            ..Self::overworld()
        }
    }
}

impl Registrable for GenerationSettings {
    const REGISTRY: &'static str = "minecraft:worldgen/noise_settings";
}

/// Weather kind for a biome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precipitation {
    None,
    Rain,
    Snow,
}

/// Climate and colour data for one biome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub precipitation: Precipitation,
    pub temperature: f32,
    pub downfall: f32,
    /// Packed 0xRRGGBB
    pub sky_color: u32,
    /// Packed 0xRRGGBB
    pub water_color: u32,
    /// Packed 0xRRGGBB
    pub fog_color: u32,
}

impl Biome {
    pub fn plains() -> Self {
        Self {
            precipitation: Precipitation::Rain,
            temperature: 0.8,
            downfall: 0.4,
            sky_color: 0x78a7ff,
            water_color: 0x3f76e4,
            fog_color: 0xc0d8ff,
        }
    }

    pub fn desert() -> Self {
        Self {
            precipitation: Precipitation::None,
            temperature: 2.0,
            downfall: 0.0,
            sky_color: 0x6eb1ff,
            ..Self::plains()
        }
    }

    pub fn nether_wastes() -> Self {
        Self {
            precipitation: Precipitation::None,
            temperature: 2.0,
            downfall: 0.0,
            sky_color: 0x6eb1ff,
            water_color: 0x3f76e4,
            fog_color: 0x330808,
        }
    }

    pub fn the_end() -> Self {
        Self {
            precipitation: Precipitation::None,
            temperature: 0.5,
            downfall: 0.5,
            sky_color: 0x000000,
            fog_color: 0xa080a0,
            ..Self::plains()
        }
    }
}

impl Registrable for Biome {
    const REGISTRY: &'static str = "minecraft:worldgen/biome";
}
