//! Claw Tide entry point
//!
//! On the web the library's `wasm_bindgen(start)` hook does the setup and JS
//! drives `WebGame`. Natively this runs a headless auto-play session, handy
//! for checking balance changes:
//!
//! ```text
//! claw-tide [tuning.json] [--seed N] [--seconds N]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = headless::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start hook, this just satisfies the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::BTreeMap;
    use std::error::Error;

    use claw_tide::Tuning;
    use claw_tide::consts::FRAME_MS;
    use claw_tide::sim::{
        ClawState, EffectKind, EntityKind, GameEvent, GameState, Progression, TickInput, catalog,
        tick,
    };

    struct Options {
        tuning_path: Option<String>,
        seed: u64,
        seconds: f64,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, Box<dyn Error>> {
        let mut options = Options {
            tuning_path: None,
            seed: 12345,
            seconds: 300.0,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    options.seed = args.next().ok_or("--seed needs a value")?.parse()?;
                }
                "--seconds" => {
                    options.seconds = args.next().ok_or("--seconds needs a value")?.parse()?;
                }
                _ => options.tuning_path = Some(arg),
            }
        }
        Ok(options)
    }

    #[derive(Default)]
    struct Tally {
        coins: u64,
        rounds: u32,
        empty_rounds: u32,
        caught: BTreeMap<&'static str, u32>,
        severed: u32,
        numbed: u32,
        weather_changes: u32,
    }

    impl Tally {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Caught { kind, value, .. } => {
                    self.coins += u64::from(*value);
                    *self.caught.entry(kind.def().name).or_default() += 1;
                }
                GameEvent::RoundComplete { caught, .. } => {
                    self.rounds += 1;
                    if !caught {
                        self.empty_rounds += 1;
                    }
                }
                GameEvent::PassiveIncome { amount } => self.coins += u64::from(*amount),
                GameEvent::ClawSevered { .. } => self.severed += 1,
                GameEvent::ClawNumbed { .. } => self.numbed += 1,
                GameEvent::WeatherChanged { .. } => self.weather_changes += 1,
                _ => {}
            }
        }
    }

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
        let options = parse_args(args)?;
        log::info!("Claw Tide (native) starting...");

        catalog::validate()?;
        log::info!("Catalog OK ({} entity kinds)", EntityKind::COUNT);

        let tuning = match &options.tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };
        let mut state = GameState::with_tuning(options.seed, tuning)?;

        // Mid-game player: a few upgrades and a multi-claw for the first minute
        let mut progression = Progression {
            spawn_density_level: 3,
            trash_filter_level: 3,
            ..Default::default()
        };
        progression
            .effects
            .activate(EffectKind::MultiClaw, 0.0, 60_000.0);

        let mut tally = Tally::default();
        let frames = (options.seconds * 1000.0 / FRAME_MS) as u64;
        for frame in 1..=frames {
            let now = frame as f64 * FRAME_MS;
            let input = TickInput {
                shoot: state.claws.first().is_some_and(|c| c.state == ClawState::Idle),
                paused: false,
            };
            tick(&mut state, &input, &progression, now);
            progression.effects.clear_expired(now);
            for event in state.drain_events() {
                tally.record(&event);
            }
        }

        log::info!(
            "{:.0}s simulated (seed {}): {} rounds, {} empty, {} coins",
            options.seconds,
            options.seed,
            tally.rounds,
            tally.empty_rounds,
            tally.coins
        );
        log::info!(
            "Max combo {}, severed {}, numbed {}, weather changes {}",
            state.combo.max,
            tally.severed,
            tally.numbed,
            tally.weather_changes
        );
        for (name, count) in &tally.caught {
            log::info!("  {:<16} x{}", name, count);
        }
        Ok(())
    }
}
