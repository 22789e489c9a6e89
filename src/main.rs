//! Type Rush entry point
//!
//! The browser build starts from `type_rush::web`. Natively this runs a
//! headless demo: the autopilot plays one run and the summary is printed.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use type_rush::audio::NullAudio;
    use type_rush::autopilot::Autopilot;
    use type_rush::persistence::JsonFileStore;
    use type_rush::sim::GameEvent;
    use type_rush::wordlist::{DirWordSource, StaticWordSource, WordSource};
    use type_rush::{Difficulty, GameConfig, Phase, Selection, Session};

    /// Simulated frame length
    const FRAME_DT: f32 = 1.0 / 60.0;

    /// Built-in catalog used when no wordlist directory is given
    const BUILTIN_ID: &str = "animals.txt";
    const BUILTIN_WORDS: &[&str] = &[
        "cat", "dog", "bird", "fish", "mouse", "horse", "sheep", "goat", "tiger", "zebra",
        "otter", "eagle", "whale", "shark", "camel", "llama", "panda", "koala", "moose",
        "bison", "lemur", "gecko", "heron", "raven", "trout", "squid", "crab", "frog", "toad",
        "newt", "wolf", "fox", "bear", "deer", "hare", "lynx", "puma", "seal", "swan", "duck",
        "giraffe", "penguin", "dolphin", "hamster", "leopard", "buffalo", "gorilla", "ostrich",
        "peacock", "raccoon", "octopus", "panther", "pelican", "sparrow", "tortoise",
        "elephant", "kangaroo", "flamingo", "antelope", "squirrel", "porcupine", "alligator",
    ];

    struct Args {
        words_dir: Option<PathBuf>,
        wordlist: Option<String>,
        difficulty: Difficulty,
        config: Option<PathBuf>,
        progress: PathBuf,
        seconds: f32,
        chars_per_second: f32,
        error_rate: f64,
    }

    impl Default for Args {
        fn default() -> Self {
            Self {
                words_dir: None,
                wordlist: None,
                difficulty: Difficulty::default(),
                config: None,
                progress: PathBuf::from("type-rush-progress.json"),
                seconds: 180.0,
                chars_per_second: 4.0,
                error_rate: 0.05,
            }
        }
    }

    const USAGE: &str = "usage: type-rush [--words DIR] [--wordlist FILE]
                 [--difficulty beginner|normal|challenge] [--config FILE]
                 [--progress FILE] [--seconds N] [--cps N] [--errors P]";

    /// Parse a finite number no smaller than `min`
    fn number<T>(value: &str, min: T) -> Option<T>
    where
        T: std::str::FromStr + PartialOrd + Into<f64> + Copy,
    {
        let n: T = value.parse().ok()?;
        (n.into().is_finite() && n >= min).then_some(n)
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args::default();
        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            if flag == "-h" || flag == "--help" {
                return Err(USAGE.to_string());
            }
            let value = it
                .next()
                .ok_or_else(|| format!("missing value for {}\n{}", flag, USAGE))?;
            let bad = |what: &str| format!("invalid {} '{}'", what, value);
            match flag.as_str() {
                "--words" => args.words_dir = Some(PathBuf::from(&value)),
                "--wordlist" => args.wordlist = Some(value.clone()),
                "--difficulty" => {
                    args.difficulty = Difficulty::from_str(&value).ok_or_else(|| bad("difficulty"))?
                }
                "--config" => args.config = Some(PathBuf::from(&value)),
                "--progress" => args.progress = PathBuf::from(&value),
                "--seconds" => args.seconds = number(&value, 0.0).ok_or_else(|| bad("duration"))?,
                "--cps" => {
                    args.chars_per_second = number(&value, 0.0).ok_or_else(|| bad("typing speed"))?
                }
                "--errors" => {
                    args.error_rate = number(&value, 0.0)
                        .filter(|&p| p <= 1.0)
                        .ok_or_else(|| bad("error rate"))?
                }
                _ => return Err(format!("unknown option {}\n{}", flag, USAGE)),
            }
        }
        Ok(args)
    }

    fn load_config(args: &Args) -> Result<GameConfig, String> {
        let Some(path) = &args.config else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        GameConfig::from_json(&json).map_err(|e| format!("bad config {}: {}", path.display(), e))
    }

    fn word_source(args: &Args) -> Box<dyn WordSource> {
        match &args.words_dir {
            Some(dir) => Box::new(DirWordSource::new(dir)),
            None => Box::new(StaticWordSource::new().with(BUILTIN_ID, BUILTIN_WORDS)),
        }
    }

    pub fn run() -> Result<(), String> {
        let args = parse_args()?;
        let config = load_config(&args)?;
        let source = word_source(&args);

        let catalogs = source.list_catalogs();
        for catalog in &catalogs {
            log::info!("Catalog {} ({} words)", catalog.title, catalog.approx_count);
        }
        let wordlist = args
            .wordlist
            .clone()
            .or_else(|| catalogs.first().map(|c| c.id.clone()))
            .ok_or_else(|| "no wordlists found".to_string())?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let store = JsonFileStore::new(&args.progress);
        let mut session = Session::new(config, source, store, NullAudio);
        session
            .select(Selection::new(args.difficulty, wordlist))
            .map_err(|e| e.to_string())?;
        session.start().map_err(|e| e.to_string())?;

        let mut pilot = Autopilot::new(seed, args.chars_per_second, args.error_rate);
        let mut elapsed = 0.0;
        let (mut completed, mut missed) = (0, 0);
        while session.phase() == Phase::Running && elapsed < args.seconds {
            for _ in 0..pilot.keystrokes_due(FRAME_DT) {
                let Some(key) = session.run().and_then(|run| pilot.next_key(run)) else {
                    break;
                };
                session.on_character(key);
            }
            session.frame(FRAME_DT);
            elapsed += FRAME_DT;

            for event in session.take_events() {
                match event {
                    GameEvent::WordCompleted { .. } => completed += 1,
                    GameEvent::WordMissed { .. } => missed += 1,
                    GameEvent::LevelUp { level } => log::info!("Autopilot reached level {}", level),
                    _ => {}
                }
            }
        }
        println!("{} words typed, {} missed", completed, missed);

        match session.summary() {
            Some(summary) => {
                println!(
                    "{} / {}: score {} | level {} | {} wpm | {:.0}% accuracy | best {}{}",
                    summary.difficulty.as_str(),
                    summary.wordlist,
                    summary.score,
                    summary.level,
                    summary.wpm,
                    summary.accuracy * 100.0,
                    summary.best,
                    if summary.new_best { " (new best!)" } else { "" }
                );
            }
            None => {
                if let Some(run) = session.run() {
                    println!(
                        "Time up after {:.0}s: score {} | level {} | lives {} | {:.0} wpm | {:.0}% accuracy",
                        run.elapsed,
                        run.score,
                        run.level,
                        run.lives,
                        run.wpm(),
                        run.accuracy() * 100.0
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Type Rush (native demo) starting...");

    if let Err(e) = demo::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is type_rush::web::start, this is just to satisfy the compiler
}
