//! Attitude propagation inside a bevy app.
//!
//! Every entity carrying a [`State`] is advanced by one integrator step per
//! `FixedUpdate` tick, and the fixed timestep is set to match the
//! integrator's.

use std::time::Duration;

use adcs_physics::{Integrator, State};
use bevy::log::{error, info, warn};
use bevy::prelude::{
    App, Commands, Component, Entity, FixedUpdate, Plugin, Query, Res, Resource, Startup, Time,
    Without,
};
use bevy::time::Fixed;

use crate::scenario::ScenarioConfig;

/// The integrator shared by every attitude entity.
#[derive(Resource)]
pub struct ActiveIntegrator(pub Box<dyn Integrator>);

/// Marks an entity whose last step failed. It is no longer advanced.
#[derive(Component, Debug)]
pub struct Degenerate;

/// Plugin spawning the configured scenario and stepping it.
pub struct AttitudePlugin {
    pub config: ScenarioConfig,
}

impl AttitudePlugin {
    pub fn new(config: ScenarioConfig) -> Self {
        AttitudePlugin { config }
    }
}

impl Default for AttitudePlugin {
    fn default() -> Self {
        AttitudePlugin::new(ScenarioConfig::reference())
    }
}

impl Plugin for AttitudePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        match self.config.integrator() {
            Ok(integrator) => match fixed_timestep(integrator.time_step()) {
                Some(timestep) => {
                    app.insert_resource(Time::<Fixed>::from_duration(timestep));
                    app.insert_resource(ActiveIntegrator(integrator));
                }
                None => error!(
                    "time step {} s is not representable as a fixed timestep",
                    integrator.time_step()
                ),
            },
            Err(err) => error!("no attitude integrator: {err:#}"),
        }
        app.add_systems(Startup, spawn_scenario);
        app.add_systems(FixedUpdate, step_attitudes);
    }
}

/// The fixed timestep for a step of `seconds`, if it is a non-zero `Duration`.
fn fixed_timestep(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds)
        .ok()
        .filter(|timestep| !timestep.is_zero())
}

fn spawn_scenario(config: Res<ScenarioConfig>, mut commands: Commands) {
    match config.initial_state() {
        Ok(state) => {
            info!("spawning body with ω = {}", state.angular_velocity);
            commands.spawn(state);
        }
        Err(err) => error!("cannot spawn scenario: {err:#}"),
    }
}

fn step_attitudes(
    integrator: Option<Res<ActiveIntegrator>>,
    mut query: Query<(Entity, &mut State), Without<Degenerate>>,
    mut commands: Commands,
) {
    let Some(integrator) = integrator else {
        return;
    };

    for (entity, mut state) in &mut query {
        match integrator.0.step(&state) {
            Ok(next) => *state = next,
            Err(err) => {
                warn!("{entity} stopped at t = {}: {err}", state.time);
                commands.entity(entity).insert(Degenerate);
            }
        }
    }
}
