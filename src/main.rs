//! selview-native: drive the image canvas without a window.
//!
//! Loads an image (or a generated gradient), optionally shifts its HSV,
//! replays a drag gesture, and writes both the rendered canvas and the
//! exported selection as PNG files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use selview::constants::{
    DEFAULT_TEST_HEIGHT, DEFAULT_TEST_WIDTH, DEFAULT_WIDGET_HEIGHT, DEFAULT_WIDGET_WIDTH,
};
use selview::logging::init_logging;
use selview::{
    test_image, CanvasConfig, CanvasError, ConfigError, HsvDelta, ImageCanvas, LogLevel,
    SelectionChange,
};
use selview_ui::{Color, MouseButton, MouseButtons, PixmapSurface, Point, Size};

#[derive(Parser, Debug)]
#[command(name = "selview-native", version, about = "Render an image canvas and export a selection")]
struct Args {
    /// Image to load; a gradient test image is generated when omitted
    input: Option<PathBuf>,

    /// Widget size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// HSV shift as "hue,saturation,value"
    #[arg(long, allow_hyphen_values = true)]
    hsv: Option<HsvDelta>,

    /// Drag start in widget coordinates, "x,y"
    #[arg(long, value_parser = parse_point)]
    from: Option<Point>,

    /// Drag end in widget coordinates, "x,y"
    #[arg(long, value_parser = parse_point, requires = "from")]
    to: Option<Point>,

    /// Keep the button held at the end of the drag (exports the drag preview)
    #[arg(long)]
    hold: bool,

    /// Where to write the rendered canvas
    #[arg(long, default_value = "canvas.png")]
    render: PathBuf,

    /// Where to write the exported selection
    #[arg(long, default_value = "selection.png")]
    selection: PathBuf,

    /// Config file; defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Write the effective config to the default location
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Cannot render a {0}x{1} canvas")]
    InvalidSize(u32, u32),
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((w, h))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{}'", s))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn load_config(args: &Args) -> Result<CanvasConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => CanvasConfig::load_from(path)?,
        None => CanvasConfig::load_from_default_path().unwrap_or_default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    Ok(config)
}

fn log_change(change: Option<SelectionChange>) {
    if let Some(change) = change {
        log::info!(
            "{:?}: ({:.1}, {:.1}) - ({:.1}, {:.1}){}",
            change.transition,
            change.image_rect.left,
            change.image_rect.top,
            change.image_rect.right,
            change.image_rect.bottom,
            if change.dragging { " [dragging]" } else { "" }
        );
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = load_config(&args)?;
    init_logging(config.log_level.to_level_filter());

    if args.save_config {
        let path = config.save_to_default_path()?;
        log::info!("Config written to {:?}", path);
    }

    let image = match &args.input {
        Some(path) => {
            log::info!("Decoding {:?}", path);
            image::open(path)?.to_rgba8()
        }
        None => {
            log::info!("No input given, generating a test image");
            test_image::gradient(DEFAULT_TEST_WIDTH, DEFAULT_TEST_HEIGHT)
        }
    };

    let (width, height) = args
        .size
        .unwrap_or((DEFAULT_WIDGET_WIDTH, DEFAULT_WIDGET_HEIGHT));
    let mut canvas: ImageCanvas<SelectionChange> = ImageCanvas::new(&config)
        .with_size(Size::new(width as f32, height as f32))
        .on_selection_change(|change| change);

    if let Some(delta) = args.hsv {
        canvas.set_hsv_shift(delta);
    }
    canvas.load_image(image);

    if let Some(from) = args.from {
        let to = args.to.unwrap_or(from);
        log_change(canvas.on_press(from, MouseButton::PRIMARY));
        log_change(canvas.on_move(to, MouseButtons::primary()));
        if !args.hold {
            log_change(canvas.on_release(to, MouseButton::PRIMARY));
        }
    }

    let mut surface =
        PixmapSurface::new(width, height, Color::BLACK).ok_or(AppError::InvalidSize(width, height))?;
    canvas.render(&mut surface);
    surface.to_rgba_image().save(&args.render)?;
    log::info!("Canvas written to {:?}", args.render);

    match canvas.selected() {
        Some(selection) => {
            selection.save(&args.selection)?;
            log::info!(
                "Selection ({}x{}) written to {:?}",
                selection.width(),
                selection.height(),
                args.selection
            );
        }
        None => log::info!("Nothing selected, no selection exported"),
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application error: {}", e);
            ExitCode::FAILURE
        }
    }
}
