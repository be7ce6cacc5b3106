//! Cave generation
//!
//! Produces plain terrain grids. Nothing here touches the world; see
//! `dungeon` for turning a grid into tile entities.

use hourglass_core::math::{GridBounds, IVec2};
use hourglass_services::MapSettings;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Wall,
    Floor,
    UpStair,
    DownStair,
}

impl Terrain {
    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }
}

/// Row-major terrain grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    bounds: GridBounds,
    cells: Vec<Terrain>,
}

impl TileGrid {
    pub fn filled(bounds: GridBounds, terrain: Terrain) -> Self {
        let len = (bounds.width.max(0) * bounds.height.max(0)) as usize;
        Self {
            bounds,
            cells: vec![terrain; len],
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.bounds
            .contains(x, y)
            .then(|| (y * self.bounds.width + x) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Terrain> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, terrain: Terrain) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = terrain;
        }
    }

    /// Every cell with its coordinate, row by row.
    pub fn enumerate(&self) -> impl Iterator<Item = (IVec2, Terrain)> + '_ {
        let width = self.bounds.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &terrain)| (IVec2::new(i as i32 % width, i as i32 / width), terrain))
    }

    pub fn cells_of(&self, terrain: Terrain) -> Vec<IVec2> {
        self.enumerate()
            .filter(|&(_, t)| t == terrain)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Walls in the 3x3 block around `(x, y)`, the cell itself included.
    pub fn wall_count_around(&self, x: i32, y: i32) -> u32 {
        let own = u32::from(self.get(x, y).map_or(false, Terrain::is_wall));
        own + self
            .bounds
            .neighbors(x, y)
            .filter(|cell| self.get(cell.x, cell.y).map_or(false, Terrain::is_wall))
            .count() as u32
    }
}

/// Random walls at `wall_percentage`, floor elsewhere.
pub fn seed<R: Rng + ?Sized>(bounds: GridBounds, wall_percentage: u32, rng: &mut R) -> TileGrid {
    let mut grid = TileGrid::filled(bounds, Terrain::Floor);
    for cell in grid.cells.iter_mut() {
        if rng.gen_range(0..100) < wall_percentage {
            *cell = Terrain::Wall;
        }
    }
    grid
}

/// One smoothing pass: a cell becomes wall when its 3x3 block holds at
/// least `threshold` walls, floor otherwise. Reads the old grid only.
pub fn smooth(grid: &mut TileGrid, threshold: u32) {
    let next: Vec<Terrain> = grid
        .enumerate()
        .map(|(cell, _)| {
            if grid.wall_count_around(cell.x, cell.y) >= threshold {
                Terrain::Wall
            } else {
                Terrain::Floor
            }
        })
        .collect();
    grid.cells = next;
}

/// Wall off the outermost ring.
pub fn add_border(grid: &mut TileGrid) {
    let bounds = grid.bounds;
    for y in 0..bounds.height {
        for x in 0..bounds.width {
            if bounds.is_edge(x, y) {
                grid.set(x, y, Terrain::Wall);
            }
        }
    }
}

pub fn cellular_automata<R: Rng + ?Sized>(settings: &MapSettings, rng: &mut R) -> TileGrid {
    let bounds = GridBounds::new(settings.width, settings.height);
    let mut grid = seed(bounds, settings.wall_percentage, rng);
    for _ in 0..settings.smooth_iterations {
        smooth(&mut grid, settings.smooth_threshold);
    }
    add_border(&mut grid);
    grid
}

/// Place an up stair on every level and a down stair on every level but
/// the deepest, each on a distinct floor cell.
///
/// A level without enough floor gets interior cells carved for its stairs.
pub fn add_stairs<R: Rng + ?Sized>(grid: &mut TileGrid, depth: i32, bottom: i32, rng: &mut R) {
    let mut wanted = vec![Terrain::UpStair];
    if depth < bottom {
        wanted.push(Terrain::DownStair);
    }

    let mut floors = grid.cells_of(Terrain::Floor);
    floors.shuffle(rng);
    if floors.len() < wanted.len() {
        let bounds = grid.bounds;
        let mut spare: Vec<IVec2> = grid
            .enumerate()
            .map(|(cell, _)| cell)
            .filter(|cell| !bounds.is_edge(cell.x, cell.y) || bounds.width < 3 || bounds.height < 3)
            .filter(|cell| !floors.contains(cell))
            .collect();
        spare.shuffle(rng);
        tracing::debug!(depth, "carving floor for stairs");
        floors.extend(spare);
    }

    for (terrain, cell) in wanted.into_iter().zip(floors) {
        grid.set(cell.x, cell.y, terrain);
    }
}

/// A complete level: cave, border, stairs.
pub fn generate_level<R: Rng + ?Sized>(
    settings: &MapSettings,
    depth: i32,
    rng: &mut R,
) -> TileGrid {
    let mut grid = cellular_automata(settings, rng);
    add_stairs(&mut grid, depth, settings.depth_count - 1, rng);
    grid
}
