//! Headless runner.
//!
//! Drives a session without a terminal and prints one JSON line per sampled
//! tick on stdout:
//!
//! ```text
//! {"tick":120,"episode":0,"snapshot":{...}}
//! ```
//!
//! Usage:
//!
//! ```text
//! headless [--ticks N] [--seed S] [--every K] [--drop M] [--action TICK:ACTION]...
//! ```
//!
//! `ACTION` uses the camelCase action names (`moveLeft`, `rotateZ`, `pause`,
//! ...). Field dimensions come from the same environment variables as the
//! interactive binary. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufWriter, Write};

use anyhow::{anyhow, Context, Result};
use serde_json::json;

use beyond_tetris::core::{GameConfig, GameState};
use beyond_tetris::types::{GameAction, TICK_MS};

#[derive(Debug, Clone, PartialEq)]
struct HeadlessConfig {
    ticks: u32,
    seed: Option<u32>,
    every: u32,
    drop_multiplier: f32,
    /// `(tick, action)`, sorted by tick
    script: Vec<(u32, GameAction)>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            seed: None,
            every: 60,
            drop_multiplier: 1.0,
            script: Vec::new(),
        }
    }
}

fn parse_args(args: &[String]) -> Result<HeadlessConfig> {
    let mut cfg = HeadlessConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| anyhow!("headless: missing value for {}", flag))?;
        match flag {
            "--ticks" => {
                cfg.ticks = value
                    .parse()
                    .map_err(|_| anyhow!("headless: invalid --ticks value: {}", value))?;
            }
            "--seed" => {
                cfg.seed = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("headless: invalid --seed value: {}", value))?,
                );
            }
            "--every" => {
                let every: u32 = value
                    .parse()
                    .map_err(|_| anyhow!("headless: invalid --every value: {}", value))?;
                cfg.every = every.max(1);
            }
            "--drop" => {
                cfg.drop_multiplier = value
                    .parse()
                    .map_err(|_| anyhow!("headless: invalid --drop value: {}", value))?;
            }
            "--action" => cfg.script.push(parse_scripted_action(value)?),
            other => return Err(anyhow!("headless: unknown argument: {}", other)),
        }
        i += 1;
    }
    cfg.script.sort_by_key(|(tick, _)| *tick);
    Ok(cfg)
}

fn parse_scripted_action(value: &str) -> Result<(u32, GameAction)> {
    let (tick, name) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("headless: expected TICK:ACTION, got {}", value))?;
    let tick = tick
        .parse()
        .map_err(|_| anyhow!("headless: invalid tick in {}", value))?;
    let action =
        GameAction::from_str(name).ok_or_else(|| anyhow!("headless: unknown action: {}", name))?;
    Ok((tick, action))
}

/// Apply a scripted action, then restore `--drop`, which a restart resets
fn apply_scripted(game: &mut GameState, action: GameAction, drop_multiplier: f32) {
    game.apply_action(action);
    game.set_drop_multiplier(drop_multiplier);
}

/// Run the session, writing sampled snapshots to `out`
fn run(cfg: &HeadlessConfig, config: GameConfig, out: &mut impl Write) -> Result<GameState> {
    let mut game = GameState::new(config);
    game.set_drop_multiplier(cfg.drop_multiplier);
    let mut script = cfg.script.iter().peekable();

    for tick in 0..cfg.ticks {
        while let Some((_, action)) = script.next_if(|(at, _)| *at <= tick) {
            apply_scripted(&mut game, *action, cfg.drop_multiplier);
        }

        game.tick(TICK_MS);

        let last = tick + 1 == cfg.ticks;
        if (tick + 1) % cfg.every == 0 || last || game.game_over() {
            let line = json!({
                "tick": tick + 1,
                "episode": game.episode_id(),
                "snapshot": game.snapshot(),
            });
            serde_json::to_writer(&mut *out, &line).context("writing snapshot")?;
            writeln!(out)?;
        }

        if game.game_over() {
            log::info!(
                "game over after {} ticks, score {}",
                tick + 1,
                game.score()
            );
            break;
        }
    }

    out.flush()?;
    Ok(game)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = parse_args(&args)?;

    let mut config = GameConfig::from_env();
    if let Some(seed) = cfg.seed {
        config = config.with_seed(seed);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&cfg, config, &mut out)?;
    Ok(())
}
