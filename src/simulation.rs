//! Fixed-step driver: repeatedly hands the current state to an integrator and
//! records what comes back.

use adcs_physics::{Integrator, State};
use anyhow::{Context, Result};
use bevy::log::{debug, info};

use crate::scenario::ScenarioConfig;
use crate::trajectory::Trajectory;

pub struct Simulation {
    state: State,
    integrator: Box<dyn Integrator>,
    /// Total number of steps `run` takes.
    steps: usize,
    taken: usize,
    /// Emit a progress line every this many steps, 0 for never.
    report_every: usize,
}

impl Simulation {
    pub fn new(state: State, integrator: Box<dyn Integrator>, steps: usize) -> Self {
        Simulation {
            state,
            integrator,
            steps,
            taken: 0,
            report_every: (steps / 10).max(1),
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let state = config.initial_state()?;
        let integrator = config.integrator()?;
        Ok(Simulation::new(state, integrator, config.steps))
    }

    pub fn with_report_every(mut self, report_every: usize) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn steps_taken(&self) -> usize {
        self.taken
    }

    /// Advance by one integrator step. On failure the current state is kept.
    pub fn step(&mut self) -> Result<&State> {
        let next = self.integrator.step(&self.state).with_context(|| {
            format!(
                "step {} from t = {} with {} failed",
                self.taken + 1,
                self.state.time,
                self.integrator.name()
            )
        })?;
        self.state = next;
        self.taken += 1;
        Ok(&self.state)
    }

    /// Take the remaining steps, returning the initial state followed by one
    /// sample per step.
    pub fn run(&mut self) -> Result<Trajectory> {
        info!(
            "{} for {} steps of {} s",
            self.integrator.name(),
            self.steps,
            self.integrator.time_step()
        );

        let mut trajectory = Trajectory::new();
        trajectory.record(&self.state)?;
        while self.taken < self.steps {
            self.step()?;
            trajectory.record(&self.state)?;
            if self.report_every > 0 && self.taken % self.report_every == 0 {
                debug!(
                    "t = {:.3}: ω = {}, T = {:.9}",
                    self.state.time,
                    self.state.angular_velocity,
                    self.state.kinetic_energy()
                );
            }
        }

        info!(
            "finished at t = {:.3}, momentum drift {:.3e}",
            self.state.time,
            trajectory.momentum_drift()
        );
        Ok(trajectory)
    }
}
