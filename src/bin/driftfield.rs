use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use driftfield::{
    AppState, FileStore, ImmediateClock, IntervalClock, KeyEvent, KeyOutcome, KeyValueStore, Knob,
    LayoutSize, MemoryClipboard, MemoryStore, Runner, Session, Settings, SettingsPatch,
    StudioConfig, Theme, Viewport,
};

const DEFAULT_SHARE_BASE: &str = "https://driftfield.app/";

#[derive(Parser, Debug)]
#[command(name = "driftfield", version)]
struct Cli {
    /// Directory holding persisted settings, presets and theme.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Keep state in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log at DEBUG level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render frames headlessly and write the last one as a PNG.
    Frame(FrameArgs),
    /// Drive the render loop at the configured frame rate, replaying scripted keys.
    Run(RunArgs),
    /// Print a share link for the stored settings (with optional overrides).
    Share(ShareArgs),
    /// Print the settings carried by a share link or encoded payload.
    Decode(DecodeArgs),
    /// Randomize the stored settings.
    Randomize(RandomizeArgs),
    /// Manage saved presets.
    #[command(subcommand)]
    Preset(PresetCommand),
}

#[derive(Args, Debug)]
struct SettingsArgs {
    #[arg(long)]
    complexity: Option<f64>,
    #[arg(long)]
    density: Option<f64>,
    #[arg(long)]
    speed: Option<f64>,
    #[arg(long)]
    stroke: Option<f64>,
    /// Base hue in degrees for the dynamic palette.
    #[arg(long, allow_negative_numbers = true)]
    hue: Option<f64>,
    /// Curated palette name.
    #[arg(long, conflicts_with = "dynamic")]
    palette: Option<String>,
    /// Use the dynamic (hue-derived) palette.
    #[arg(long)]
    dynamic: bool,
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<f64>,
}

impl SettingsArgs {
    fn to_patch(&self) -> SettingsPatch {
        let curated = if self.dynamic {
            Some(None)
        } else {
            self.palette.clone().map(Some)
        };
        SettingsPatch {
            complexity: self.complexity,
            density: self.density,
            speed: self.speed,
            stroke: self.stroke,
            hue: self.hue,
            curated,
            seed: self.seed,
        }
    }
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Layout width.
    #[arg(long, default_value_t = 960.0)]
    width: f64,
    /// Layout height.
    #[arg(long, default_value_t = 540.0)]
    height: f64,
    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,
    /// Theme to render with; persisted like a `D` toggle.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,
    /// Background color `#RRGGBB` overriding the theme.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl From<ThemeChoice> for Theme {
    fn from(c: ThemeChoice) -> Self {
        match c {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Share link or `#preset=...` fragment to start from.
    #[arg(long)]
    fragment: Option<String>,

    /// Number of frames to advance before capturing.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(flatten)]
    view: ViewArgs,

    /// Share link or `#preset=...` fragment to start from.
    #[arg(long)]
    fragment: Option<String>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Frame rate (defaults to DRIFTFIELD_FPS or 60).
    #[arg(long)]
    fps: Option<f64>,

    /// Do not pace frames; run as fast as possible.
    #[arg(long)]
    unpaced: bool,

    /// Scripted key press `FRAME:KEY` (E export, R randomize, D theme). Repeatable.
    #[arg(long = "key", value_name = "FRAME:KEY")]
    keys: Vec<KeyEvent>,

    /// Directory exports are written to.
    #[arg(long)]
    downloads_dir: Option<PathBuf>,

    /// Seed for randomize (random if omitted).
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ShareArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Page URL the fragment is appended to.
    #[arg(long, default_value = DEFAULT_SHARE_BASE)]
    base: String,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Share link, `#preset=...` fragment or bare encoded payload.
    input: String,

    /// Fail on malformed input instead of printing defaults.
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct RandomizeArgs {
    /// Seed for the randomizer (random if omitted).
    #[arg(long)]
    rng_seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum PresetCommand {
    /// Save the stored settings under a title.
    Save { title: String },
    /// List presets, newest first.
    List,
    /// Make a preset's settings the stored settings.
    Load { id: String },
    /// Remove a preset.
    Remove { id: String },
    /// Remove every preset.
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = StudioConfig::from_env();
    if let Some(dir) = &cli.state_dir {
        config.state_dir = Some(dir.clone());
    }
    let store = open_store(&config, cli.ephemeral)?;

    match cli.cmd {
        Command::Frame(args) => cmd_frame(config, store, args),
        Command::Run(args) => cmd_run(config, store, args),
        Command::Share(args) => cmd_share(config, store, args),
        Command::Decode(args) => cmd_decode(args),
        Command::Randomize(args) => cmd_randomize(config, store, args),
        Command::Preset(cmd) => cmd_preset(config, store, cmd),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}

fn open_store(config: &StudioConfig, ephemeral: bool) -> anyhow::Result<Box<dyn KeyValueStore>> {
    match (&config.state_dir, ephemeral) {
        (Some(dir), false) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create state dir '{}'", dir.display()))?;
            Ok(Box::new(FileStore::new(dir)))
        }
        (None, false) => {
            tracing::warn!("no state directory could be resolved, state will not persist");
            Ok(Box::new(MemoryStore::new()))
        }
        (_, true) => Ok(Box::new(MemoryStore::new())),
    }
}

fn apply_view(config: &mut StudioConfig, view: &ViewArgs) -> anyhow::Result<()> {
    if let Some(hex) = &view.background {
        *config = config
            .clone()
            .with_background_hex(hex)
            .map_err(|e| anyhow::anyhow!(e))
            .context("parse --background")?;
    }
    Ok(())
}

/// Session over `store` with `settings` overrides and the optional share fragment applied, in
/// that order.
fn open_session(
    config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    settings: &SettingsArgs,
    view: &ViewArgs,
    fragment: Option<&str>,
) -> anyhow::Result<Session> {
    let mut state = AppState::load(store, config.preset_capacity);
    if let Some(theme) = view.theme {
        state.set_theme(theme.into())?;
    }
    let viewport = Viewport::new(LayoutSize::new(view.width, view.height), view.pixel_ratio);
    let mut session = Session::new(config, state, viewport, Box::new(MemoryClipboard::default()));
    let patch = settings.to_patch();
    if !patch.is_empty() {
        session.update(&patch)?;
    }
    if let Some(fragment) = fragment {
        session.apply_fragment(fragment)?;
    }
    Ok(session)
}

fn cmd_frame(
    mut config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    args: FrameArgs,
) -> anyhow::Result<()> {
    apply_view(&mut config, &args.view)?;
    let mut session = open_session(
        config,
        store,
        &args.settings,
        &args.view,
        args.fragment.as_deref(),
    )?;

    let mut mounted = session.mount().context("mount render surface")?;
    let report = Runner::new(ImmediateClock).run(&mut mounted, args.frames.max(1))?;
    let frame = mounted.render().snapshot()?;
    drop(mounted);

    driftfield::write_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} frames, fingerprint {:016x})",
        args.out.display(),
        frame.width,
        frame.height,
        report.frames_drawn,
        frame.fingerprint()
    );
    Ok(())
}

fn cmd_run(
    mut config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    args: RunArgs,
) -> anyhow::Result<()> {
    apply_view(&mut config, &args.view)?;
    if let Some(fps) = args.fps {
        anyhow::ensure!(fps.is_finite() && fps > 0.0, "--fps must be positive");
        config.fps = fps;
    }
    if let Some(dir) = &args.downloads_dir {
        config.downloads_dir = dir.clone();
    }
    let fps = config.fps;

    let mut session = open_session(
        config,
        store,
        &args.settings,
        &args.view,
        args.fragment.as_deref(),
    )?;
    if let Some(seed) = args.rng_seed {
        session = session.with_rng(fastrand::Rng::with_seed(seed));
    }

    let mut mounted = session.mount().context("mount render surface")?;
    let report = if args.unpaced {
        Runner::new(ImmediateClock)
            .with_script(args.keys)
            .run(&mut mounted, args.frames)?
    } else {
        Runner::new(IntervalClock::from_fps(fps))
            .with_script(args.keys)
            .run(&mut mounted, args.frames)?
    };

    for (frame, outcome) in &report.outcomes {
        match outcome {
            KeyOutcome::Exported(path) => {
                println!("{frame}: exported {}", path.display())
            }
            KeyOutcome::Randomized(s) => {
                println!("{frame}: randomized {}", serde_json::to_string(s)?)
            }
            KeyOutcome::ThemeChanged(t) => println!("{frame}: theme {}", t.as_str()),
        }
    }
    eprintln!("ran {} frames, t = {:.4}", report.frames_drawn, report.time);
    Ok(())
}

fn cmd_share(
    config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    args: ShareArgs,
) -> anyhow::Result<()> {
    let state = AppState::load(store, config.preset_capacity);
    let settings = state.settings().merge(&args.settings.to_patch());
    println!("{}", driftfield::share_url(&args.base, &settings));
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let input = args.input.trim();
    let payload = driftfield::fragment_payload(input).unwrap_or(input);
    let settings = if args.strict {
        driftfield::decode_checked(payload).context("decode share payload")?
    } else {
        driftfield::decode(payload)
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn cmd_randomize(
    config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    args: RandomizeArgs,
) -> anyhow::Result<()> {
    let mut state = AppState::load(store, config.preset_capacity);
    let mut rng = args.rng_seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let next = driftfield::random_settings(&mut rng, config.curated_probability);
    let settings = state.set_settings(&next).context("persist settings")?;
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

fn cmd_preset(
    config: StudioConfig,
    store: Box<dyn KeyValueStore>,
    cmd: PresetCommand,
) -> anyhow::Result<()> {
    let mut state = AppState::load(store, config.preset_capacity);
    match cmd {
        PresetCommand::Save { title } => match state.save_preset(&title)? {
            Some(preset) => println!("{}", preset.id),
            None => anyhow::bail!("preset title must not be empty"),
        },
        PresetCommand::List => {
            for preset in state.presets().list() {
                println!("{}  {}  {}", preset.id, preset.title, describe(&preset.settings));
            }
        }
        PresetCommand::Load { id } => {
            let settings = state
                .load_preset(&id)?
                .with_context(|| format!("no preset with id '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        PresetCommand::Remove { id } => {
            if !state.remove_preset(&id)? {
                eprintln!("no preset with id '{id}'");
            }
        }
        PresetCommand::Clear => state.clear_presets()?,
    }
    Ok(())
}

fn describe(settings: &Settings) -> String {
    let knobs = Knob::ALL
        .iter()
        .map(|k| format!("{}={:.2}", k.name(), k.get(settings)))
        .collect::<Vec<_>>()
        .join(" ");
    let palette = settings
        .curated
        .clone()
        .unwrap_or_else(|| format!("hue {}", settings.hue));
    format!("{knobs} palette={palette} seed={}", settings.seed)
}
