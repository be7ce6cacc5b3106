//! Dungeon assembly: terrain grids become tile entities, stairs get linked,
//! and the levels are populated.

use crate::assemblage;
use crate::mapgen::{self, Terrain, TileGrid};
use crate::spatial;
use crate::SimError;
use hourglass_core::ecs::{
    AdjList, Ascender, Collideable, ComponentKind, Depth, Descender, Entity, Location, World,
};
use hourglass_services::Settings;
use rand::seq::SliceRandom;
use rand::Rng;

/// One actualised level. `tiles` is row-major, like the grid.
#[derive(Debug, Clone)]
pub struct Level {
    pub depth: i32,
    pub grid: TileGrid,
    pub tiles: Vec<Entity>,
}

impl Level {
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Entity> {
        let bounds = self.grid.bounds();
        if !bounds.contains(x, y) {
            return None;
        }
        self.tiles.get((y * bounds.width + x) as usize).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dungeon {
    pub levels: Vec<Level>,
}

impl Dungeon {
    /// Generate, actualise and link every level, then populate them.
    /// Returns the dungeon and the player.
    pub fn generate<R: Rng + ?Sized>(
        world: &mut World,
        settings: &Settings,
        rng: &mut R,
    ) -> Result<(Self, Entity), SimError> {
        let mut dungeon = Dungeon::default();
        for depth in 0..settings.map.depth_count {
            let grid = mapgen::generate_level(&settings.map, depth, rng);
            let level = actualize(world, grid, depth);
            link_adjacency(world, &level);
            dungeon.levels.push(level);
        }
        let linked = link_stairs(world);
        tracing::info!(levels = dungeon.levels.len(), linked, "dungeon generated");

        let player = populate(world, &dungeon, settings, rng)?;
        Ok((dungeon, player))
    }

    pub fn level(&self, depth: i32) -> Option<&Level> {
        self.levels.iter().find(|level| level.depth == depth)
    }
}

/// Create one tile entity per grid cell.
pub fn actualize(world: &mut World, grid: TileGrid, depth: i32) -> Level {
    let bounds = grid.bounds();
    let tiles = grid
        .enumerate()
        .map(|(cell, terrain)| match terrain {
            Terrain::Wall => {
                let destructible = !bounds.is_edge(cell.x, cell.y);
                assemblage::wall(world, cell.x, cell.y, depth, destructible)
            }
            Terrain::Floor => assemblage::floor(world, cell.x, cell.y, depth),
            Terrain::UpStair => assemblage::up_stairs(world, cell.x, cell.y, depth),
            Terrain::DownStair => assemblage::down_stairs(world, cell.x, cell.y, depth),
        })
        .collect();
    Level { depth, grid, tiles }
}

/// Fill each tile's `AdjList` with its in-bounds neighbours.
pub fn link_adjacency(world: &mut World, level: &Level) {
    let bounds = level.grid.bounds();
    for (cell, _) in level.grid.enumerate() {
        let Some(tile) = level.tile_at(cell.x, cell.y) else {
            continue;
        };
        let neighbors = bounds
            .neighbors(cell.x, cell.y)
            .filter_map(|n| level.tile_at(n.x, n.y))
            .collect();
        world.add(tile, AdjList { neighbors });
    }
}

/// Pair every down stair, in handle order, with the nearest unlinked up
/// stair exactly one level below. Returns how many pairs were made.
pub fn link_stairs(world: &mut World) -> usize {
    let downs = world.entities_with(&[
        ComponentKind::Descender,
        ComponentKind::Location,
        ComponentKind::Depth,
    ]);
    let ups = world.entities_with(&[
        ComponentKind::Ascender,
        ComponentKind::Location,
        ComponentKind::Depth,
    ]);

    let mut linked = 0;
    for down in downs {
        let Some((from, depth)) = spatial::placement(world, down) else {
            continue;
        };
        let mut best: Option<(Entity, i32)> = None;
        for &up in &ups {
            let free = world.get::<Ascender>(up).map_or(false, |a| a.up.is_none());
            let Some((to, up_depth)) = spatial::placement(world, up) else {
                continue;
            };
            if !free || up_depth.z != depth.z + 1 {
                continue;
            }
            let dist2 = from.distance2(&to);
            if best.map_or(true, |(_, d)| dist2 < d) {
                best = Some((up, dist2));
            }
        }

        let Some((up, _)) = best else {
            tracing::warn!(stair = %down, depth = depth.z, "down stair left unlinked");
            continue;
        };
        if let Some(descender) = world.get_mut::<Descender>(down) {
            descender.down = Some(up);
        }
        if let Some(ascender) = world.get_mut::<Ascender>(up) {
            ascender.up = Some(down);
        }
        linked += 1;
    }
    linked
}

/// Open cells on a level: not a wall, nothing collideable standing there.
fn open_cells(world: &World, level: &Level) -> Vec<(i32, i32)> {
    level
        .grid
        .enumerate()
        .filter(|&(_, terrain)| !terrain.is_wall())
        .filter_map(|(cell, _)| {
            let tile = level.tile_at(cell.x, cell.y)?;
            let clear = !world.has::<Collideable>(tile)
                && spatial::collider_at(world, cell.x, cell.y, level.depth, tile).is_none();
            clear.then_some((cell.x, cell.y))
        })
        .collect()
}

fn spawn<R, F>(world: &mut World, level: &Level, rng: &mut R, make: F) -> Option<Entity>
where
    R: Rng + ?Sized,
    F: FnOnce(&mut World, i32, i32, i32) -> Entity,
{
    let cells = open_cells(world, level);
    let Some(&(x, y)) = cells.choose(rng) else {
        tracing::warn!(depth = level.depth, "no open cell to spawn into");
        return None;
    };
    Some(make(world, x, y, level.depth))
}

/// Player, sword and camera on the top level; zombies everywhere, a wight
/// by chance; the objective on the deepest level.
pub fn populate<R: Rng + ?Sized>(
    world: &mut World,
    dungeon: &Dungeon,
    settings: &Settings,
    rng: &mut R,
) -> Result<Entity, SimError> {
    let bottom = settings.bottom_depth();
    let mut player = None;

    for level in &dungeon.levels {
        if level.depth == 0 {
            let rules = &settings.rules;
            player = spawn(world, level, rng, |w, x, y, z| {
                assemblage::player(w, x, y, z, rules)
            });
            spawn(world, level, rng, assemblage::sword);
        }
        for _ in 0..settings.map.zombies_per_level {
            spawn(world, level, rng, assemblage::zombie);
        }
        if rng.gen_range(0..100) < settings.map.wight_chance {
            spawn(world, level, rng, assemblage::wight);
        }
        if level.depth == bottom {
            spawn(world, level, rng, assemblage::objective);
        }
    }

    let player = player.ok_or(SimError::NoPlayer)?;
    world.set_player(player)?;

    let start = world.get::<Location>(player).copied().unwrap_or(Location::new(0, 0));
    let camera = assemblage::camera(world, start.x, start.y);
    world.set_camera(camera)?;

    tracing::info!(%player, %camera, depth = ?world.get::<Depth>(player).map(|d| d.z), "populated");
    Ok(player)
}
