//! Run one scenario and write its trajectory.
//!
//! Usage: `adcs [SCENARIO.json [TRAJECTORY.cbor]]`. Without a scenario the
//! built-in reference run is used.

use std::{env, fs};

use adcs::{ScenarioConfig, Simulation};
use anyhow::{Context, Result};
use bevy::app::App;
use bevy::log::{LogPlugin, info};

fn main() -> Result<()> {
    // The app is never run: building LogPlugin installs the global log
    // subscriber, which outlives the app. The run itself is headless.
    let mut logging = App::new();
    logging.add_plugins(LogPlugin::default());
    drop(logging);

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))?;
            ScenarioConfig::from_json(&text).with_context(|| format!("in {path}"))?
        }
        None => ScenarioConfig::reference(),
    };

    let trajectory = Simulation::from_config(&config)?.run()?;
    if let Some(last) = trajectory.last() {
        info!("nose {:?}, wingtip {:?}", last.nose, last.wingtip);
    }

    if let Some(path) = args.next() {
        fs::write(&path, trajectory.to_cbor()?).with_context(|| format!("cannot write {path}"))?;
        info!("wrote {} samples to {path}", trajectory.len());
    }
    Ok(())
}
