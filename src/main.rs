//! Cola Rush entry point
//!
//! Native builds run a headless demo: the autopilot plays a seeded session,
//! takes the first upgrade offered and fires the super as soon as it is
//! armed. The browser build starts from `web::start` instead.
//!
//! Usage: `cola-rush [--classic] [--seed N] [--tuning FILE]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;

    use cola_rush::consts::SIM_DT;
    use cola_rush::{GameEvent, Session, Tuning};

    /// Ten minutes of simulated play
    const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

    /// Headless Cola Rush demo played by the autopilot.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Basic variant: no leveling, no bosses.
        #[arg(long)]
        classic: bool,
        /// Seed for the run; equal seeds replay the same session.
        #[arg(long, default_value_t = 0xC01A)]
        seed: u64,
        /// JSON tuning file; overrides --classic.
        #[arg(long, value_name = "FILE")]
        tuning: Option<PathBuf>,
    }

    impl Args {
        fn load_tuning(&self) -> anyhow::Result<Tuning> {
            let Some(path) = &self.tuning else {
                return Ok(if self.classic {
                    Tuning::classic()
                } else {
                    Tuning::default()
                });
            };
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Tuning::from_json(&json).with_context(|| format!("loading {}", path.display()))
        }
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let tuning = args.load_tuning()?;
        log::info!("Cola Rush (native) starting, seed {}", args.seed);

        let mut session = Session::with_tuning(args.seed, tuning);
        session.set_idle_mode(true);

        let mut supers = 0u32;
        while session.state().time_ticks < MAX_DEMO_TICKS && !session.is_over() {
            for event in session.advance(SIM_DT) {
                if let GameEvent::LevelUpOffer { level, options } = event {
                    log::info!("Level {}: taking {}", level, options[0].description());
                    session.choose_upgrade(options[0]);
                }
            }
            if session.state().super_available() && session.state().is_running() {
                supers += 1;
                session.request_super();
            }
        }

        let state = session.state();
        let seconds = state.time_ticks as f32 * SIM_DT;
        println!(
            "{} after {:.1}s: score {}, level {}, {} supers",
            if state.is_over() { "Game over" } else { "Time up" },
            seconds,
            state.score,
            state.progression.level,
            supers
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["cola-rush"]).unwrap();
            assert_eq!(args.seed, 0xC01A);
            assert!(!args.classic);
            assert_eq!(args.load_tuning().unwrap(), Tuning::default());
        }

        #[test]
        fn test_args_classic_and_seed() {
            let args = Args::try_parse_from(["cola-rush", "--classic", "--seed", "42"]).unwrap();
            assert_eq!(args.seed, 42);
            assert_eq!(args.load_tuning().unwrap(), Tuning::classic());
        }

        #[test]
        fn test_args_rejects_bad_input() {
            assert!(Args::try_parse_from(["cola-rush", "--seed", "forty"]).is_err());
            assert!(Args::try_parse_from(["cola-rush", "--speed"]).is_err());
            let missing = Args::try_parse_from(["cola-rush", "--tuning", "/nonexistent/tuning.json"]).unwrap();
            assert!(missing.load_tuning().is_err());
        }
    }
}
