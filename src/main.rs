use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use tilefit::{
    grid_params_from_settings, init_logging, instantiator_from_settings, Canvas, Config,
    LayoutFile, LengthUnit, PreviewController, SceneFile, BUILD_DATE, VERSION,
};

#[derive(Parser, Debug)]
#[command(
    name = "tilefit",
    version,
    about = "Fill a container shape with tile copies that stay inside its outline"
)]
struct Cli {
    /// Scene file (JSON) describing the container and the tile
    scene: PathBuf,

    /// Settings file (.toml or .json); defaults to the platform config dir
    #[arg(long, env = "TILEFIT_CONFIG")]
    config: Option<PathBuf>,

    /// Unit of --gap-x, --gap-y and --margin
    #[arg(long)]
    unit: Option<LengthUnit>,

    #[arg(long)]
    gap_x: Option<f64>,

    #[arg(long)]
    gap_y: Option<f64>,

    /// Clearance from the outline; negative lets tiles overhang
    #[arg(long, allow_hyphen_values = true)]
    margin: Option<f64>,

    /// Tile scale in percent
    #[arg(long)]
    scale: Option<f64>,

    /// Offset every other row by half a step
    #[arg(long)]
    brick: bool,

    /// Keep the generated tiles instead of cancelling the preview
    #[arg(long)]
    commit: bool,

    /// Write the layout here instead of printing it
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, env = "TILEFIT_JSON_LOGS")]
    json_logs: bool,

    /// Persist the effective settings back to the config file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.json_logs)?;
    info!("TileFit {} (built {})", VERSION, BUILD_DATE);

    let config_path = match cli.config.clone() {
        Some(path) => Some(path),
        None => match Config::default_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("No config location: {}", e);
                None
            }
        },
    };
    let mut config = config_path
        .as_deref()
        .map(Config::load_or_default)
        .unwrap_or_default();

    apply_overrides(&cli, &mut config);
    config.validate().context("Invalid tiling settings")?;

    let scene = SceneFile::load_from_file(&cli.scene)?;
    let mut canvas = Canvas::new();
    let (container, tile) = scene.build(&mut canvas)?;

    let params = grid_params_from_settings(&config.tiling);
    let mut preview = PreviewController::with_instantiator(
        container,
        tile,
        instantiator_from_settings(&config.tiling),
    );
    let session = preview
        .update(&mut canvas, params.clone())
        .context("Tile generation failed")?;

    let name = if scene.name.is_empty() {
        cli.scene.display().to_string()
    } else {
        scene.name.clone()
    };
    let layout = LayoutFile::from_session(name, &params, session);

    match &cli.output {
        Some(path) => {
            layout.save_to_file(path)?;
            info!("Layout written to {}", path.display());
        }
        None => println!("{}", layout.to_json_string()?),
    }

    if cli.commit {
        preview.commit()?;
    } else {
        preview.cancel(&mut canvas)?;
    }
    info!("{} shapes left in the document", canvas.shape_count());

    if cli.save_settings {
        let path = config_path.context("No settings file location available")?;
        config.add_recent_scene(cli.scene.clone());
        config.save_to_file(&path)?;
        info!("Settings saved to {}", path.display());
    }

    Ok(())
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    let tiling = &mut config.tiling;
    if let Some(unit) = cli.unit {
        *tiling = tiling.convert_to(unit);
    }
    if let Some(gap_x) = cli.gap_x {
        tiling.gap_x = gap_x;
    }
    if let Some(gap_y) = cli.gap_y {
        tiling.gap_y = gap_y;
    }
    if let Some(margin) = cli.margin {
        tiling.margin = margin;
    }
    if let Some(scale) = cli.scale {
        tiling.scale_pct = scale;
    }
    if cli.brick {
        tiling.brick_mode = true;
    }
}
