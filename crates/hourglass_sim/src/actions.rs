//! Player action dispatch: one decoded command becomes zero or more intents.

use crate::spatial;
use hourglass_core::ecs::{Depth, Entity, Health, Location, World};
use hourglass_core::event::{
    AbortTurn, ChangeLevel, Events, MoveAction, Pickup, Quit, TimePulse, TimeSiphon,
};
use hourglass_services::{input::HELP_TEXT, Command, RuleSettings};

/// Queue the intents for `command` on behalf of the active player.
///
/// Help and query log a line and abort the turn. Unknown keys spend it.
pub fn fire_player_action(
    world: &World,
    events: &mut Events,
    rules: &RuleSettings,
    command: Command,
) {
    tracing::debug!(?command, "player command");

    if command == Command::Quit {
        events.quits.push(Quit);
        return;
    }
    if command.is_abortive() {
        events.log(abort_message(world, command));
        events.aborts.push(AbortTurn);
        return;
    }

    let Some(player) = world.player() else {
        return;
    };
    let Some((location, depth)) = spatial::placement(world, player) else {
        return;
    };

    match command {
        Command::Move(offset) => events.moves.push(MoveAction::new(
            player,
            location.x + offset.x,
            location.y + offset.y,
        )),
        Command::Wait => {}
        Command::Pickup => events.pickups.push(Pickup {
            entity: player,
            x: location.x,
            y: location.y,
        }),
        Command::Pulse => fire_pulse(world, events, rules, player),
        Command::Siphon => match spatial::nearest_enemy(world, player) {
            Some((target, _)) => events.time_siphons.push(TimeSiphon {
                actor: player,
                target,
            }),
            None => events.log("Nothing to siphon from."),
        },
        Command::Ascend => events
            .level_changes
            .push(ChangeLevel::new(player, depth.z - 1)),
        Command::Descend => events
            .level_changes
            .push(ChangeLevel::new(player, depth.z + 1)),
        Command::Unknown(token) => {
            tracing::debug!(%token, "unmapped key");
        }
        Command::Quit | Command::Help | Command::Query => {}
    }
}

/// One pulse per hostile health bearer in sight.
fn fire_pulse(world: &World, events: &mut Events, rules: &RuleSettings, player: Entity) {
    let targets: Vec<_> = spatial::all_in_radius(world, player, rules.fov_radius)
        .into_iter()
        .filter(|&target| world.has::<Health>(target) && spatial::is_hostile(world, player, target))
        .collect();
    if targets.is_empty() {
        events.log("The pulse fades without a target.");
    }
    for target in targets {
        events.time_pulses.push(TimePulse {
            actor: player,
            target,
        });
    }
}

/// The line logged by a command that leaves the turn unspent.
fn abort_message(world: &World, command: Command) -> String {
    if command == Command::Help {
        return HELP_TEXT.to_string();
    }
    match world.player().and_then(|player| spatial::placement(world, player)) {
        Some((location, depth)) => describe_position(&location, &depth),
        None => "You are nowhere.".to_string(),
    }
}

fn describe_position(location: &Location, depth: &Depth) -> String {
    format!("You are at ({}, {}) on depth {}.", location.x, location.y, depth.z)
}
