//! Render feed
//!
//! The simulation never draws; it tells a `Renderer` which cells changed.
//! The renderer keeps its own layered canvas and produces nothing back.

use hourglass_core::ecs::{
    Attack, ComponentKind, Defense, Depth, Health, Layer, Location, RenderData, Time, World,
};
use hourglass_core::event::Events;
use hourglass_core::math::IVec2;

/// Sink for draw instructions.
pub trait Renderer {
    /// Wipe every layer.
    fn clear(&mut self);
    fn erase(&mut self, layer: Layer, x: i32, y: i32);
    fn draw(&mut self, layer: Layer, x: i32, y: i32, glyph: char);
    /// Append a line to the message log.
    fn log(&mut self, line: &str);
    /// Show the composed frame.
    fn present(&mut self, frame: &FrameInfo) -> std::io::Result<()>;
}

/// Player stats shown beside the map. Missing components show as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub health: Option<i32>,
    pub attack: Option<i32>,
    pub defense: Option<i32>,
    pub time: Option<i32>,
    pub depth: Option<i32>,
}

impl StatusLine {
    pub fn of_player(world: &World) -> Self {
        let Some(player) = world.player() else {
            return Self::default();
        };
        Self {
            health: world.get::<Health>(player).map(|c| c.value),
            attack: world.get::<Attack>(player).map(|c| c.value),
            defense: world.get::<Defense>(player).map(|c| c.value),
            time: world.get::<Time>(player).map(|c| c.value),
            depth: world.get::<Depth>(player).map(|c| c.z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    /// Cell the view is centred on.
    pub camera: IVec2,
    pub status: StatusLine,
    pub turn: u64,
}

/// Feed this turn's changes to the renderer and present a frame.
///
/// Order: clear, props on the player's depth, erase refreshes, draw
/// refreshes, cells whose `Location` was removed, log lines, present.
pub fn update_render(
    world: &mut World,
    events: &mut Events,
    renderer: &mut dyn Renderer,
    turn: u64,
) -> std::io::Result<()> {
    if events.clear_screen.pop().is_some() {
        // Drain duplicates from several level changes in one turn.
        events.clear_screen.clear();
        renderer.clear();
    }

    let player_depth = world
        .player()
        .and_then(|player| world.get::<Depth>(player))
        .map(|depth| depth.z);

    draw_props(world, renderer, player_depth);

    let mut erases = Vec::new();
    let mut draws = Vec::new();
    while let Some(refresh) = events.refreshes.pop() {
        if refresh.erase {
            erases.push(refresh.entity);
        } else {
            draws.push(refresh.entity);
        }
    }

    for entity in erases {
        let (Some(location), Some(render)) = (
            world.get::<Location>(entity).copied(),
            world.get_mut::<RenderData>(entity),
        ) else {
            continue;
        };
        renderer.erase(render.last_layer, location.last_x, location.last_y);
        renderer.erase(render.last_layer, location.x, location.y);
        render.last_layer = render.layer;
    }

    for entity in draws {
        let on_level = match (player_depth, world.get::<Depth>(entity)) {
            (Some(z), Some(depth)) => depth.z == z,
            _ => false,
        };
        if !on_level {
            continue;
        }
        let Some(render) = world.get::<RenderData>(entity).copied() else {
            continue;
        };
        let Some(location) = world.get_mut::<Location>(entity) else {
            continue;
        };
        renderer.erase(render.last_layer, location.last_x, location.last_y);
        renderer.draw(render.layer, location.x, location.y, render.glyph);
        location.last_x = location.x;
        location.last_y = location.y;
        if let Some(render) = world.get_mut::<RenderData>(entity) {
            render.last_layer = render.layer;
        }
    }

    for (entity, location) in world.components().location.just_removed() {
        let layer = world
            .get::<RenderData>(*entity)
            .map_or(Layer::Back, |render| render.last_layer);
        renderer.erase(layer, location.x, location.y);
    }

    while let Some(line) = events.logs.pop() {
        renderer.log(&line.0);
    }

    let camera = world
        .camera()
        .and_then(|camera| world.get::<Location>(camera))
        .map_or(IVec2::ZERO, |location| IVec2::new(location.x, location.y));

    renderer.present(&FrameInfo {
        camera,
        status: StatusLine::of_player(world),
        turn,
    })
}

/// Props are redrawn every frame so corpses and items stay on top of tiles.
fn draw_props(world: &World, renderer: &mut dyn Renderer, player_depth: Option<i32>) {
    let Some(z) = player_depth else {
        return;
    };
    let props = world.entities_with(&[
        ComponentKind::Prop,
        ComponentKind::Location,
        ComponentKind::RenderData,
        ComponentKind::Depth,
    ]);
    for prop in props {
        let (Some(location), Some(render), Some(depth)) = (
            world.get::<Location>(prop),
            world.get::<RenderData>(prop),
            world.get::<Depth>(prop),
        ) else {
            continue;
        };
        if depth.z != z {
            continue;
        }
        renderer.erase(render.last_layer, location.x, location.y);
        renderer.draw(render.layer, location.x, location.y, render.glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{hero, placed, RecordingRenderer, RenderOp};
    use hourglass_core::ecs::{Carriable, Prop};
    use hourglass_core::event::{ClearScreen, Refresh};

    #[test]
    fn erases_run_before_draws_and_update_last_state() {
        let mut world = World::new();
        let mut events = Events::new();
        let player = hero(&mut world, 3, 3, 0);
        let tile = placed(&mut world, 1, 1, 0);
        world.add(tile, RenderData::new(Layer::Back, '.'));
        {
            let location = world.get_mut::<Location>(player).unwrap();
            location.last_x = 2;
            location.last_y = 2;
        }

        events.refreshes.push(Refresh::draw(player));
        events.refreshes.push(Refresh::erase(tile));

        let mut renderer = RecordingRenderer::default();
        update_render(&mut world, &mut events, &mut renderer, 0).unwrap();

        assert_eq!(
            renderer.ops,
            vec![
                RenderOp::Erase(Layer::Back, 1, 1),
                RenderOp::Erase(Layer::Back, 1, 1),
                RenderOp::Erase(Layer::Front, 2, 2),
                RenderOp::Draw(Layer::Front, 3, 3, '@'),
            ]
        );
        let location = world.get::<Location>(player).unwrap();
        assert_eq!((location.last_x, location.last_y), (3, 3));
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].status.health, Some(10));
    }

    #[test]
    fn refresh_off_level_is_not_drawn() {
        let mut world = World::new();
        let mut events = Events::new();
        hero(&mut world, 3, 3, 0);
        let below = placed(&mut world, 4, 4, 1);
        world.add(below, RenderData::new(Layer::Front, 'z'));
        events.refreshes.push(Refresh::draw(below));

        let mut renderer = RecordingRenderer::default();
        update_render(&mut world, &mut events, &mut renderer, 0).unwrap();
        assert!(renderer.draws().is_empty());
        assert!(events.refreshes.is_empty());
    }

    #[test]
    fn clear_props_and_removed_locations() {
        let mut world = World::new();
        let mut events = Events::new();
        hero(&mut world, 3, 3, 0);
        let sword = placed(&mut world, 5, 6, 0);
        world.add(sword, RenderData::new(Layer::Mid, ')'));
        world.add(sword, Prop);
        let picked = placed(&mut world, 7, 7, 0);
        world.add(picked, RenderData::new(Layer::Mid, '"'));
        world.add(picked, Carriable);
        world.remove::<Location>(picked);

        events.clear_screen.push(ClearScreen);
        events.log("hello");

        let mut renderer = RecordingRenderer::default();
        update_render(&mut world, &mut events, &mut renderer, 4).unwrap();

        assert_eq!(renderer.ops[0], RenderOp::Clear);
        assert!(renderer.draws().contains(&(Layer::Mid, 5, 6, ')')));
        assert!(renderer.erases().contains(&(Layer::Mid, 7, 7)));
        assert_eq!(renderer.logs, vec!["hello".to_string()]);
        assert_eq!(renderer.frames[0].turn, 4);
    }
}
