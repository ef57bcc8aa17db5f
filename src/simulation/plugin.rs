//! Match plugin - resources, the fixed tick order, and the initial spawn

use bevy::prelude::*;

use crate::ai::{AiMember, update_ai};
use crate::ball::{Ball, Velocity, advance_ball};
use crate::camera::{CameraFollow, update_camera_target};
use crate::constants::{BALL_SPAWN, TEAM_SIZE};
use crate::events::EventBus;
use crate::helpers::{away_spawn, home_spawn};
use crate::input::{InputSnapshot, InputState, read_input};
use crate::player::{ControlledPlayer, Player, RosterIndex, Stamina, Team, move_player};
use crate::scoring::{Score, ScoreDisplay, check_goal};
use crate::shooting::{ChargeState, accumulate_kick_power, apply_skills, update_charge};
use crate::tuning::PhysicsTweaks;

/// The per-tick simulation step. Input hosts run `.before(SimulationTick)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTick;

/// Ticks run so far. Tick 1 is the first `App::update()`.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchClock {
    pub frame: u64,
}

/// Entities spawned for the match
#[derive(Resource, Debug, Clone)]
pub struct MatchHandles {
    pub ball: Entity,
    /// Home index 0
    pub controlled: Entity,
    /// Home roster in index order
    pub home: Vec<Entity>,
    /// Away roster in index order (index 0 keeps goal)
    pub away: Vec<Entity>,
}

/// Installs match resources and the tick, and spawns ball and rosters
pub struct MatchPlugin;

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsTweaks>()
            .init_resource::<Score>()
            .init_resource::<ScoreDisplay>()
            .init_resource::<ChargeState>()
            .init_resource::<InputSnapshot>()
            .init_resource::<CameraFollow>()
            .init_resource::<MatchClock>();
        if !app.world().contains_resource::<EventBus>() {
            app.insert_resource(EventBus::new());
        }

        app.configure_sets(Update, SimulationTick);
        app.add_systems(
            Update,
            (
                advance_clock,
                read_input,
                move_player,
                update_charge,
                accumulate_kick_power,
                apply_skills,
                advance_ball,
                update_ai,
                update_camera_target,
                check_goal,
            )
                .chain()
                .in_set(SimulationTick),
        );

        // Spawned now rather than at Startup so callers can rearrange the
        // field before the first tick
        let handles = spawn_match(app.world_mut());
        app.insert_resource(handles);
    }
}

/// Tick step 0: count the tick and open the event bus for it
///
/// Events from the previous tick are gone after this; hosts drain between
/// `App::update()` calls.
pub fn advance_clock(mut clock: ResMut<MatchClock>, mut event_bus: ResMut<EventBus>) {
    clock.frame += 1;
    event_bus.begin_tick(clock.frame);
}

/// Spawn the ball and both eleven-member rosters in kickoff formation
pub fn spawn_match(world: &mut World) -> MatchHandles {
    let ball = world
        .spawn((
            Ball,
            Transform::from_translation(BALL_SPAWN),
            Velocity::default(),
        ))
        .id();

    let home: Vec<Entity> = (0..TEAM_SIZE)
        .map(|i| {
            let mut entity = world.spawn((
                Player,
                Team::Home,
                RosterIndex(i),
                Stamina::default(),
                Transform::from_translation(home_spawn(i)),
            ));
            if i == 0 {
                entity.insert((ControlledPlayer, InputState::default()));
            }
            entity.id()
        })
        .collect();

    let away: Vec<Entity> = (0..TEAM_SIZE)
        .map(|i| {
            world
                .spawn((
                    Player,
                    Team::Away,
                    RosterIndex(i),
                    AiMember::new(i),
                    Stamina::default(),
                    Transform::from_translation(away_spawn(i)),
                ))
                .id()
        })
        .collect();

    MatchHandles {
        ball,
        controlled: home[0],
        home,
        away,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MatchPlugin);
        app
    }

    #[test]
    fn test_kickoff_layout() {
        let app = app();
        let world = app.world();
        let handles = world.resource::<MatchHandles>();

        assert_eq!(handles.home.len(), 11);
        assert_eq!(handles.away.len(), 11);
        assert_eq!(handles.controlled, handles.home[0]);

        let ball = world.get::<Transform>(handles.ball).unwrap();
        assert_eq!(ball.translation, Vec3::new(0.0, 0.5, 0.0));

        let keeper = world.get::<Transform>(handles.away[0]).unwrap();
        assert_eq!(keeper.translation, Vec3::new(-20.0, 1.0, 15.0));
        let last = world.get::<Transform>(handles.away[10]).unwrap();
        assert_eq!(last.translation, Vec3::new(12.0, 1.0, 30.0));

        let player = world.get::<Transform>(handles.controlled).unwrap();
        assert_eq!(player.translation, Vec3::new(-20.0, 1.0, -15.0));
        assert!(world.get::<InputState>(handles.home[1]).is_none());
    }

    #[test]
    fn test_clock_counts_ticks() {
        let mut app = app();
        app.update();
        app.update();
        assert_eq!(app.world().resource::<MatchClock>().frame, 2);
        assert_eq!(app.world().resource::<EventBus>().frame(), 2);
    }

    #[test]
    fn test_idle_tick_keeps_ball_on_spot() {
        let mut app = app();
        for _ in 0..30 {
            app.update();
        }
        let world = app.world();
        let handles = world.resource::<MatchHandles>();
        let ball = world.get::<Transform>(handles.ball).unwrap();
        assert_eq!(ball.translation, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(*world.resource::<Score>(), Score::default());
    }

    #[test]
    fn test_undrained_bus_holds_only_current_tick() {
        let mut app = app();
        let mut emitted = 0;
        for tick in 1..=600u64 {
            // Press and release every 10 ticks so ChargeStart and Kick keep coming
            app.world_mut().resource_mut::<InputSnapshot>().charge = tick % 10 < 5;
            app.update();

            let bus = app.world().resource::<EventBus>();
            assert!(bus.pending_count() < 32, "tick {}: {:?}", tick, bus.peek());
            assert!(bus.peek().iter().all(|e| e.frame == tick));
            assert!(bus.processed().is_empty());
            emitted += bus.pending_count();
        }
        assert!(emitted >= 100);
    }
}
