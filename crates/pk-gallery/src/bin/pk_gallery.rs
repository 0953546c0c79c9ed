use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::info;
use pk_core::{Argb, Image, RasterImage};
use pk_filter::{GaussianBlurConfig, SharpenConfig, gaussian_blur_with, sharpen_with};
use pk_resample::upscale2x;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "pk_gallery")]
#[command(about = "Run pixel-kernels operations on image files")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bicubic 2x upscale
    #[command(name = "upscale")]
    Upscale(UpscaleArgs),
    /// Unsharp-mask sharpening
    #[command(name = "sharpen")]
    Sharpen(SharpenArgs),
    /// Gaussian blur
    #[command(name = "blur")]
    Blur(BlurArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Optional JSON file with filter parameters; explicit flags win.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct UpscaleArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct SharpenArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long)]
    strength: Option<f32>,
}

#[derive(Args, Debug, Clone)]
struct BlurArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long)]
    radius: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GalleryConfig {
    sharpen: SharpenSection,
    blur: BlurSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SharpenSection {
    strength: f32,
}

impl Default for SharpenSection {
    fn default() -> Self {
        Self {
            strength: SharpenConfig::default().strength,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct BlurSection {
    radius: usize,
}

impl Default for BlurSection {
    fn default() -> Self {
        Self {
            radius: GaussianBlurConfig::default().radius,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Meta {
    operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    strength: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<usize>,
    input_size: [usize; 2],
    output_size: [usize; 2],
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Upscale(args) => run_upscale(args),
        Command::Sharpen(args) => run_sharpen(args),
        Command::Blur(args) => run_blur(args),
    }
}

fn run_upscale(args: UpscaleArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "upscale")?;
    let img = load_input_argb(&args.common.input)?;

    let t0 = Instant::now();
    let out = upscale2x(&img.as_view()).context("upscaling image")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    finish_case(
        &case_dir,
        &img,
        &out,
        Meta {
            operation: "upscale2x",
            strength: None,
            radius: None,
            input_size: [img.width(), img.height()],
            output_size: [out.width(), out.height()],
            elapsed_ms,
        },
    )
}

fn run_sharpen(args: SharpenArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "sharpen")?;
    let cfg = load_config(args.common.config.as_deref())?;
    let sharpen_cfg = SharpenConfig {
        strength: args.strength.unwrap_or(cfg.sharpen.strength),
    };
    let img = load_input_argb(&args.common.input)?;

    let t0 = Instant::now();
    let out = sharpen_with(&img.as_view(), &sharpen_cfg).context("sharpening image")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    finish_case(
        &case_dir,
        &img,
        &out,
        Meta {
            operation: "sharpen",
            strength: Some(sharpen_cfg.strength),
            radius: None,
            input_size: [img.width(), img.height()],
            output_size: [out.width(), out.height()],
            elapsed_ms,
        },
    )
}

fn run_blur(args: BlurArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "blur")?;
    let cfg = load_config(args.common.config.as_deref())?;
    let blur_cfg = GaussianBlurConfig {
        radius: args.radius.unwrap_or(cfg.blur.radius),
    };
    let img = load_input_argb(&args.common.input)?;

    let t0 = Instant::now();
    let out = gaussian_blur_with(&img.as_view(), &blur_cfg).context("blurring image")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    finish_case(
        &case_dir,
        &img,
        &out,
        Meta {
            operation: "gaussian_blur",
            strength: None,
            radius: Some(blur_cfg.radius),
            input_size: [img.width(), img.height()],
            output_size: [out.width(), out.height()],
            elapsed_ms,
        },
    )
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;
    if let Some(config) = &common.config {
        ensure_file_exists(config, "config")?;
    }

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    Ok(case_dir)
}

fn finish_case(
    case_dir: &Path,
    input: &RasterImage,
    output: &RasterImage,
    meta: Meta,
) -> Result<()> {
    save_argb_image(case_dir.join("input.png"), input)?;
    save_argb_image(case_dir.join("output.png"), output)?;
    write_json(case_dir.join("meta.json"), &meta)?;
    info!(
        "{}: {}x{} -> {}x{} in {:.3} ms, written to {}",
        meta.operation,
        meta.input_size[0],
        meta.input_size[1],
        meta.output_size[0],
        meta.output_size[1],
        meta.elapsed_ms,
        case_dir.display()
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GalleryConfig> {
    match path {
        Some(path) => {
            read_json(path).with_context(|| format!("reading config json at {}", path.display()))
        }
        None => Ok(GalleryConfig::default()),
    }
}

fn load_input_argb(path: &Path) -> Result<RasterImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba
        .pixels()
        .map(|p| Argb::new(p[3], p[0], p[1], p[2]))
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing raster from {}", path.display()))
}

fn save_argb_image(path: PathBuf, img: &RasterImage) -> Result<()> {
    let raw: Vec<u8> = img
        .data()
        .iter()
        .flat_map(|px| [px.r, px.g, px.b, px.a])
        .collect();
    let rgba = RgbaImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("constructing RgbaImage from raw bytes")?;
    rgba.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
