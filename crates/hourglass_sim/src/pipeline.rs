//! Turn pipeline
//!
//! Owns the world, the event queues and the run's instrumentation, and
//! drives the phases in a fixed order once per turn. Phases only talk to
//! each other through the queues.

use crate::actions;
use crate::death;
use crate::dungeon::Dungeon;
use crate::render::{self, Renderer};
use crate::systems;
use crate::SimError;
use hourglass_core::ecs::World;
use hourglass_core::event::Events;
use hourglass_core::math::GridBounds;
use hourglass_core::time::TurnClock;
use hourglass_metrics::{Counter, PhaseProfiler, TurnTimer};
use hourglass_services::{Command, InputSource, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Pipeline phases in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Timers,
    Depth,
    Physics,
    Collision,
    LevelChange,
    Special,
    Pickup,
    Heal,
    Damage,
    Siphon,
    Decay,
    Death,
    Camera,
    Render,
    Input,
    Npc,
    Cleanup,
}

impl Phase {
    pub const ALL: [Phase; 17] = [
        Phase::Timers,
        Phase::Depth,
        Phase::Physics,
        Phase::Collision,
        Phase::LevelChange,
        Phase::Special,
        Phase::Pickup,
        Phase::Heal,
        Phase::Damage,
        Phase::Siphon,
        Phase::Decay,
        Phase::Death,
        Phase::Camera,
        Phase::Render,
        Phase::Input,
        Phase::Npc,
        Phase::Cleanup,
    ];

    /// Phases rerun until the intent queues drain.
    pub const INNER: [Phase; 6] = [
        Phase::Depth,
        Phase::Physics,
        Phase::Collision,
        Phase::LevelChange,
        Phase::Special,
        Phase::Pickup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Timers => "timers",
            Phase::Depth => "depth",
            Phase::Physics => "physics",
            Phase::Collision => "collision",
            Phase::LevelChange => "level_change",
            Phase::Special => "special",
            Phase::Pickup => "pickup",
            Phase::Heal => "heal",
            Phase::Damage => "damage",
            Phase::Siphon => "siphon",
            Phase::Decay => "decay",
            Phase::Death => "death",
            Phase::Camera => "camera",
            Phase::Render => "render",
            Phase::Input => "input",
            Phase::Npc => "npc",
            Phase::Cleanup => "cleanup",
        }
    }
}

/// End-of-run report, written to the log as JSON by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub turns: u64,
    pub deaths: u64,
    pub collisions: u64,
    pub avg_turn_ms: f64,
}

pub struct Simulation {
    world: World,
    events: Events,
    settings: Settings,
    rng: StdRng,
    clock: TurnClock,
    profiler: PhaseProfiler,
    counters: Counter,
    turn_timer: TurnTimer,
}

impl Simulation {
    /// Generate a dungeon from `settings` and set up a run in it.
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new();
        let (dungeon, player) = Dungeon::generate(&mut world, &settings, &mut rng)?;
        tracing::info!(%player, levels = dungeon.levels.len(), seed = ?settings.seed, "simulation ready");
        Ok(Self::from_world(world, settings, rng))
    }

    /// Run over an already assembled world. Queues a full redraw of the
    /// player's level.
    pub fn from_world(world: World, settings: Settings, rng: StdRng) -> Self {
        let mut events = Events::new();
        systems::refresh_player_level(&world, &mut events);
        Self {
            world,
            events,
            settings,
            rng,
            clock: TurnClock::new(),
            profiler: PhaseProfiler::new(),
            counters: Counter::new(),
            turn_timer: TurnTimer::new(32),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }

    pub fn profiler(&self) -> &PhaseProfiler {
        &self.profiler
    }

    /// `Won` once a win is pending, `Lost` otherwise.
    pub fn outcome(&self) -> Outcome {
        if self.events.wins.is_empty() {
            Outcome::Lost
        } else {
            Outcome::Won
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            outcome: self.outcome(),
            turns: self.clock.turn_count(),
            deaths: self.counters.get("deaths"),
            collisions: self.counters.get("collisions"),
            avg_turn_ms: self.turn_timer.turn_time_ms(),
        }
    }

    pub fn log_phase_timings(&self) {
        for (name, timing) in self.profiler.iter() {
            tracing::debug!(
                phase = name,
                calls = timing.calls,
                avg_us = timing.average().as_micros() as u64,
                "phase timing"
            );
        }
    }

    /// Play turns until a quit or win is pending.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<Outcome, SimError> {
        while !self.events.finished() {
            self.run_turn(input, renderer)?;
        }
        let outcome = self.outcome();
        tracing::info!(?outcome, turns = self.clock.turn_count(), "run finished");
        Ok(outcome)
    }

    /// One full turn. When the effects end the run, the final frame is
    /// rendered and no input is read.
    pub fn run_turn(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<(), SimError> {
        self.turn_timer.begin();
        let turn = self.clock.turn_count();
        tracing::debug!(turn, "turn start");

        {
            let Self { world, events, profiler, .. } = self;
            profiler.time_phase(Phase::Timers.name(), || systems::update_timers(world, events));
        }
        self.resolve_intents();
        self.resolve_effects();
        {
            let Self { world, settings, profiler, .. } = self;
            profiler.time_phase(Phase::Camera.name(), || systems::update_camera(world, settings));
        }
        self.render(renderer)?;

        if !self.events.finished() {
            self.read_command(input, renderer)?;
            let Self { world, events, settings, rng, profiler, .. } = self;
            profiler.time_phase(Phase::Npc.name(), || {
                systems::fire_npc_actions(world, events, settings.rules.fov_radius, rng)
            });
        }

        {
            let Self { world, profiler, .. } = self;
            profiler.time_phase(Phase::Cleanup.name(), || world.cleanup());
        }
        self.clock.advance_turn();
        self.counters.increment("turns", 1);
        self.turn_timer.end();
        Ok(())
    }

    /// The fixed-point loop over movement, stairs, pulses and pickups.
    fn resolve_intents(&mut self) {
        let Self {
            world,
            events,
            settings,
            profiler,
            counters,
            ..
        } = self;
        let bounds = GridBounds::new(settings.map.width, settings.map.height);

        let mut passes = 0u32;
        while events.intents_pending() {
            passes += 1;
            profiler.time_phase(Phase::Depth.name(), || systems::update_depth(world, events));
            profiler.time_phase(Phase::Physics.name(), || {
                systems::update_physics(world, events, bounds)
            });
            counters.increment("collisions", events.collisions.len() as u64);
            profiler.time_phase(Phase::Collision.name(), || {
                systems::update_collisions(world, events)
            });
            profiler.time_phase(Phase::LevelChange.name(), || {
                systems::resolve_level_change(world, events)
            });
            profiler.time_phase(Phase::Special.name(), || systems::resolve_special(world, events));
            profiler.time_phase(Phase::Pickup.name(), || systems::resolve_pickup(world, events));
        }
        // Pulses fired on a turn with no movement at all.
        systems::resolve_special(world, events);
        tracing::debug!(passes, "intents resolved");
    }

    /// Heals, damage, siphons, decay, then deaths.
    fn resolve_effects(&mut self) {
        let Self {
            world,
            events,
            settings,
            profiler,
            counters,
            ..
        } = self;
        let cap = settings.rules.heal_cap;

        profiler.time_phase(Phase::Heal.name(), || systems::resolve_heals(world, events, cap));
        profiler.time_phase(Phase::Damage.name(), || systems::resolve_damage(world, events));
        profiler.time_phase(Phase::Siphon.name(), || {
            systems::resolve_time_siphon(world, events)
        });
        profiler.time_phase(Phase::Decay.name(), || systems::update_time_decay(world, events));

        counters.increment("deaths", events.deaths.len() as u64);
        let triggered =
            profiler.time_phase(Phase::Death.name(), || death::resolve_deaths(world, events));
        if triggered > 0 {
            tracing::info!(triggered, "death triggers ran");
        }
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> Result<(), SimError> {
        let turn = self.clock.turn_count();
        let Self { world, events, profiler, .. } = self;
        profiler.time_phase(Phase::Render.name(), || {
            render::update_render(world, events, renderer, turn)
        })?;
        Ok(())
    }

    /// Read and dispatch one command, re-prompting while it aborts.
    fn read_command(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> Result<(), SimError> {
        self.dispatch(input)?;
        while self.events.aborts.pop().is_some() {
            self.events.aborts.clear();
            self.render(renderer)?;
            self.dispatch(input)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, input: &mut dyn InputSource) -> Result<(), SimError> {
        let token = input.next_token()?;
        let Self {
            world,
            events,
            settings,
            profiler,
            ..
        } = self;
        profiler.time_phase(Phase::Input.name(), || {
            actions::fire_player_action(world, events, &settings.rules, Command::decode(token))
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemblage;
    use crate::testing::{hero, monster, placed, small_settings, RecordingRenderer};
    use hourglass_core::ecs::{Ascender, Health, Inventory, Prop};
    use hourglass_services::{InputError, ScriptedInput};

    fn sim(world: World) -> Simulation {
        Simulation::from_world(world, small_settings(), StdRng::seed_from_u64(5))
    }

    #[test]
    fn phase_order_is_stable() {
        assert_eq!(Phase::ALL[0], Phase::Timers);
        assert_eq!(Phase::ALL[16], Phase::Cleanup);
        for inner in Phase::INNER {
            assert!(Phase::ALL.contains(&inner));
        }
        assert_eq!(Phase::LevelChange.name(), "level_change");
    }

    #[test]
    fn quit_ends_the_run_lost() {
        let mut world = World::new();
        hero(&mut world, 3, 3, 0);
        let mut sim = sim(world);
        let mut input = ScriptedInput::new("q");
        let mut renderer = RecordingRenderer::default();

        assert_eq!(sim.run(&mut input, &mut renderer).unwrap(), Outcome::Lost);
        assert_eq!(sim.clock().turn_count(), 1);
        assert!(!renderer.frames.is_empty());
    }

    #[test]
    fn aborting_commands_reprompt_within_the_turn() {
        let mut world = World::new();
        hero(&mut world, 3, 3, 0);
        let mut sim = sim(world);
        let mut input = ScriptedInput::new("?#q");
        let mut renderer = RecordingRenderer::default();

        sim.run(&mut input, &mut renderer).unwrap();
        assert_eq!(sim.clock().turn_count(), 1);
        assert_eq!(renderer.frames.len(), 3);
        assert_eq!(renderer.logs.len(), 2);
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let mut world = World::new();
        hero(&mut world, 3, 3, 0);
        let mut sim = sim(world);
        let mut input = ScriptedInput::new("..");
        let mut renderer = RecordingRenderer::default();

        let err = sim.run(&mut input, &mut renderer).unwrap_err();
        assert!(matches!(err, SimError::Input(InputError::Exhausted)));
        assert_eq!(sim.clock().turn_count(), 2);
    }

    #[test]
    fn carrying_the_objective_out_wins() {
        let mut world = World::new();
        let exit = placed(&mut world, 4, 3, 0);
        world.add(exit, Ascender::default());
        assemblage::objective(&mut world, 4, 3, 0);
        let player = hero(&mut world, 3, 3, 0);
        world.add(player, Inventory::new(4));
        let mut sim = sim(world);
        let mut input = ScriptedInput::new("lg<");
        let mut renderer = RecordingRenderer::default();

        assert_eq!(sim.run(&mut input, &mut renderer).unwrap(), Outcome::Won);
        assert_eq!(input.remaining(), 0);
        assert_eq!(sim.summary().outcome, Outcome::Won);
    }

    #[test]
    fn monster_wears_the_player_down() {
        let mut world = World::new();
        let player = hero(&mut world, 10, 10, 0);
        monster(&mut world, 11, 10, 0);
        let mut sim = sim(world);
        let mut input = ScriptedInput::new("............");
        let mut renderer = RecordingRenderer::default();

        assert_eq!(sim.run(&mut input, &mut renderer).unwrap(), Outcome::Lost);
        assert_eq!(sim.clock().turn_count(), 11);
        assert_eq!(sim.counters().get("deaths"), 1);
        assert!(sim.world().has::<Prop>(player));
        assert!(!sim.world().has::<Health>(player));
        assert_eq!(sim.events().quits.len(), 1);
    }

    #[test]
    fn generated_run_quits_cleanly() {
        let mut sim = Simulation::new(small_settings()).unwrap();
        let player = sim.world().player().unwrap();
        assert!(sim.world().has::<Health>(player));

        let mut input = ScriptedInput::new(".q");
        let mut renderer = RecordingRenderer::default();
        assert_eq!(sim.run(&mut input, &mut renderer).unwrap(), Outcome::Lost);
        assert_eq!(sim.summary().turns, 2);
        assert!(!renderer.draws().is_empty());
    }
}
