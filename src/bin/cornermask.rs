use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use cornermask::{
    BackendKind, Bitmap, CornerMaskRenderer, CpuSurface, ImageSource, Rect, Rgba8Premul,
    RoundedImageView, ScaleType, Surface, VelloSurface, ViewAttrs,
};

#[derive(Parser, Debug)]
#[command(name = "cornermask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Round the corners of an image and write a PNG.
    Mask(MaskArgs),
    /// Write a solid rounded swatch as a PNG.
    Swatch(SwatchArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Cpu,
    Vello,
}

impl From<Backend> for BackendKind {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Cpu => Self::Cpu,
            Backend::Vello => Self::Vello,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScaleArg {
    FitXy,
    FitCenter,
    Center,
    CenterCrop,
}

impl From<ScaleArg> for ScaleType {
    fn from(s: ScaleArg) -> Self {
        match s {
            ScaleArg::FitXy => Self::FitXy,
            ScaleArg::FitCenter => Self::FitCenter,
            ScaleArg::Center => Self::Center,
            ScaleArg::CenterCrop => Self::CenterCrop,
        }
    }
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Corner radius in output pixels. Overrides the attrs file.
    #[arg(long)]
    radius: Option<f64>,

    /// View attributes JSON.
    #[arg(long)]
    attrs: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "cpu")]
    backend: Backend,

    /// Output width (defaults to the image width).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height (defaults to the image height).
    #[arg(long, requires = "width")]
    height: Option<u32>,

    #[arg(long, value_enum)]
    scale_type: Option<ScaleArg>,
}

#[derive(Parser, Debug)]
struct SwatchArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Side length in pixels.
    #[arg(long, default_value_t = 128)]
    size: u32,

    #[arg(long, default_value_t = 24.0)]
    radius: f64,

    /// Fill colour as `RRGGBB` or `RRGGBBAA` hex.
    #[arg(long, default_value = "3366ff")]
    color: String,

    #[arg(long, value_enum, default_value = "cpu")]
    backend: Backend,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Mask(args) => cmd_mask(args),
        Command::Swatch(args) => cmd_swatch(args),
    }
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let mut attrs = match &args.attrs {
        Some(path) => ViewAttrs::from_path(path)?,
        None => ViewAttrs::default(),
    };
    if let Some(r) = args.radius {
        attrs.corner_radius = r;
    }
    if let Some(st) = args.scale_type {
        attrs.scale_type = st.into();
    }
    if let (Some(w), Some(h)) = (args.width, args.height) {
        attrs.width = Some(w);
        attrs.height = Some(h);
    }

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let bitmap = cornermask::assets::decode_bitmap(&bytes)?;
    let (width, height) = (
        attrs.width.unwrap_or(bitmap.width()),
        attrs.height.unwrap_or(bitmap.height()),
    );

    let mut view = RoundedImageView::from_attrs(&attrs)?;
    view.set_size(f64::from(width), f64::from(height));
    view.set_image(Some(ImageSource::from(bitmap)));

    let out = render_with(args.backend.into(), width, height, |surface| {
        let path = view.draw(surface);
        tracing::debug!(?path, "drew view");
    })?;
    write_png(&args.out, &out)
}

fn cmd_swatch(args: SwatchArgs) -> anyhow::Result<()> {
    let color = parse_hex_color(&args.color)?;
    let bitmap = Bitmap::solid(args.size, args.size, color)?;
    let mut image = ImageSource::from(bitmap);
    let bounds = Rect::new(0.0, 0.0, f64::from(args.size), f64::from(args.size));

    let out = render_with(args.backend.into(), args.size, args.size, |surface| {
        CornerMaskRenderer::new().render(surface, &mut image, bounds, args.radius);
    })?;
    write_png(&args.out, &out)
}

fn render_with(
    backend: BackendKind,
    width: u32,
    height: u32,
    draw: impl FnOnce(&mut dyn Surface),
) -> anyhow::Result<Bitmap> {
    let bitmap = match backend {
        BackendKind::Cpu => {
            let mut surface = CpuSurface::new(width, height)?;
            draw(&mut surface);
            surface.to_bitmap()?
        }
        BackendKind::Vello => {
            let mut surface = VelloSurface::new(width, height)?;
            draw(&mut surface);
            surface.finish()?
        }
    };
    Ok(bitmap)
}

fn write_png(path: &std::path::Path, bitmap: &Bitmap) -> anyhow::Result<()> {
    cornermask::assets::save_png(path, bitmap)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn parse_hex_color(s: &str) -> anyhow::Result<Rgba8Premul> {
    let hex = s.trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        anyhow::bail!("color must be RRGGBB or RRGGBBAA, got '{s}'");
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("parse color '{s}'"))
    };
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba8Premul::from_straight_rgba(
        channel(0)?,
        channel(2)?,
        channel(4)?,
        a,
    ))
}
