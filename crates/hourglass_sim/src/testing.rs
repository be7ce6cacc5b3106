//! Fixtures shared by the unit tests.

use crate::render::{FrameInfo, Renderer};
use hourglass_core::ecs::{
    Attack, Collideable, DeathKind, Depth, Entity, Faction, Health, Layer, Location, Npc, OnDeath,
    Player, RenderData, World,
};
use hourglass_services::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    Clear,
    Erase(Layer, i32, i32),
    Draw(Layer, i32, i32, char),
}

/// Renderer that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<RenderOp>,
    pub logs: Vec<String>,
    pub frames: Vec<FrameInfo>,
}

impl RecordingRenderer {
    pub fn draws(&self) -> Vec<(Layer, i32, i32, char)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                RenderOp::Draw(layer, x, y, glyph) => Some((layer, x, y, glyph)),
                _ => None,
            })
            .collect()
    }

    pub fn erases(&self) -> Vec<(Layer, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                RenderOp::Erase(layer, x, y) => Some((layer, x, y)),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.ops.push(RenderOp::Clear);
    }

    fn erase(&mut self, layer: Layer, x: i32, y: i32) {
        self.ops.push(RenderOp::Erase(layer, x, y));
    }

    fn draw(&mut self, layer: Layer, x: i32, y: i32, glyph: char) {
        self.ops.push(RenderOp::Draw(layer, x, y, glyph));
    }

    fn log(&mut self, line: &str) {
        self.logs.push(line.to_string());
    }

    fn present(&mut self, frame: &FrameInfo) -> std::io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Small deterministic settings.
pub fn small_settings() -> Settings {
    let mut settings = Settings::default();
    settings.seed = Some(7);
    settings.map.width = 20;
    settings.map.height = 20;
    settings.map.depth_count = 3;
    settings.screen.width = 11;
    settings.screen.height = 11;
    settings
}

pub fn placed(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = world.create_entity();
    world.add(e, Location::new(x, y));
    world.add(e, Depth::new(z));
    e
}

/// Blocking, rendered combatant.
pub fn fighter(
    world: &mut World,
    x: i32,
    y: i32,
    z: i32,
    health: i32,
    attack: i32,
    faction: i32,
) -> Entity {
    let e = placed(world, x, y, z);
    world.add(e, Health { value: health });
    world.add(e, Attack { value: attack });
    world.add(e, Faction { value: faction });
    world.add(e, Collideable { blocks: true });
    world.add(e, RenderData::new(Layer::Front, 'm'));
    e
}

pub fn hero(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = fighter(world, x, y, z, 10, 1, 0);
    world.add(e, Player);
    world.add(e, OnDeath { kind: DeathKind::Player });
    world.add(e, RenderData::new(Layer::Front, '@'));
    world.set_player(e).unwrap();
    e
}

pub fn monster(world: &mut World, x: i32, y: i32, z: i32) -> Entity {
    let e = fighter(world, x, y, z, 4, 1, 1);
    world.add(e, Npc);
    world.add(e, OnDeath { kind: DeathKind::Npc });
    e
}
