//! Clean Up puppets: goal schedules over one episode
//!
//! Run with: cargo run --example clean_up_puppets
//! Set RUST_LOG=puppeteer_bots=debug to see goal switches as they happen.
//!
//! This example demonstrates:
//! - Building puppeteers from JSON configs
//! - Driving them through an episode with `run_episode`
//! - How the conditional cleaner reacts to other agents cleaning

use puppeteer_bots::{run_episode, Puppeteer, PuppeteerConfig, PuppeteerError};
use puppeteer_core::{Array, Observation, TimeStep};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EPISODE_LEN: usize = 1000;

/// Agent 0 is the puppet. Agent 1 cleans near the river during steps 300..320.
fn observation(t: usize) -> Observation {
    let helper_action = if (300..320).contains(&t) { 8 } else { 1 };
    let global = Observation::new()
        .with("actions", Array::vector(vec![1, helper_action, 1]))
        .with(
            "observations",
            Observation::new().with(
                "POSITION",
                Array::matrix(vec![vec![3, 4], vec![7, 2], vec![12, 15]])
                    .expect("rows have equal length"),
            ),
        );
    Observation::new()
        .with("agent_slot", Array::vector(vec![1, 0, 0]))
        .with("global", global)
}

fn episode() -> impl Iterator<Item = TimeStep> {
    (0..EPISODE_LEN).map(|t| match t {
        0 => TimeStep::restart(observation(t)),
        t if t + 1 == EPISODE_LEN => TimeStep::truncation(0.0, observation(t)),
        _ => TimeStep::transition(0.0, observation(t)),
    })
}

/// Collapse a goal trace into `(start, goal)` runs.
fn runs<'a>(names: &[&'a str]) -> Vec<(usize, &'a str)> {
    let mut runs: Vec<(usize, &'a str)> = Vec::new();
    for (t, &name) in names.iter().enumerate() {
        if runs.last().map(|&(_, last)| last) != Some(name) {
            runs.push((t, name));
        }
    }
    runs
}

fn main() -> Result<(), PuppeteerError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env())
        .init();

    println!("=== Clean Up Puppets ===\n");

    let configs = [
        r#"{"puppeteer": "alternate_clean_first"}"#,
        r#"{"puppeteer": "alternate_eat_first"}"#,
        r#"{"puppeteer": "conditional_cleaner", "threshold": 1}"#,
    ];

    for json in configs {
        let puppeteer = PuppeteerConfig::from_json(json)?.build();
        let episode = run_episode(&puppeteer, episode())?;
        let names = episode.trace.names(puppeteer.goal_names());

        println!("{}", puppeteer.name());
        println!("  config:   {json}");
        println!("  switches: {}", episode.trace.switches());
        for (start, goal) in runs(&names) {
            println!("  from step {start:>4}: {goal}");
        }
        println!();
    }

    // -------------------------------------------------------------------------
    // Misconfiguration
    // -------------------------------------------------------------------------
    match PuppeteerConfig::from_json(r#"{"puppeteer": "tit_for_tat"}"#) {
        Ok(config) => println!("unexpectedly parsed: {config:?}"),
        Err(e) => println!("Rejected config: {e}"),
    }

    Ok(())
}
