use clap::{Parser, Subcommand};
use facefit::batch;
use facefit::config::{self, FaceFitConfig};
use facefit::detect::{FaceRecord, SidecarDetector};
use facefit::imaging::{self, ImageSource, Quality, Rect, RustBackend};
use facefit::{output, summary};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Overrides for the `[display]` and `[output]` config sections.
#[derive(clap::Args, Clone)]
struct FitArgs {
    /// Display width in pixels (overrides display.width)
    #[arg(long)]
    width: Option<u32>,

    /// Display height in pixels (overrides display.height)
    #[arg(long)]
    height: Option<u32>,

    /// JPEG quality 1-100 (overrides output.quality)
    #[arg(long)]
    quality: Option<u32>,
}

impl FitArgs {
    fn apply(&self, config: &mut FaceFitConfig) {
        if let Some(width) = self.width {
            config.display.width = width;
        }
        if let Some(height) = self.height {
            config.display.height = height;
        }
        if let Some(quality) = self.quality {
            config.output.quality = quality;
        }
    }
}

#[derive(Parser)]
#[command(name = "facefit")]
#[command(about = "Fit photos to a display, crop faces, summarize expressions")]
#[command(long_about = "\
Fit photos to a display, crop faces, summarize expressions

Each photo is downsampled by a whole-number factor so it still covers the
display area, saved as JPEG, and handed to a face detector. The first face
is cropped to its own JPEG and every face gets a short summary:

  Smile: Yes
  Left eye: Close
  Right eye: Open
   Person's movement:Looking right

Face records come from a JSON sidecar next to each photo:

  shots/
  ├── selfie.jpg
  └── selfie.faces.json      # [{\"bounding_box\": {...}, \"smiling_probability\": 0.8, ...}]

Bounding boxes are in pixels of the FITTED image, since detection runs after
the fit. A 4000x3000 photo fitted to 1000x750 needs boxes within 1000x750.

'batch' mirrors the input tree under --out-dir and skips --out-dir while
scanning. Photos whose outputs would overwrite an input or collide with
another photo's output are reported as errors and left unwritten.

Run 'facefit gen-config' to generate a documented facefit.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./facefit.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit a photo to the display area and save it as JPEG
    Fit {
        /// Photo to read, or '-' for stdin
        input: String,
        /// Where to write the fitted JPEG
        destination: PathBuf,
        #[command(flatten)]
        fit: FitArgs,
    },
    /// Crop a face box out of a photo at full size
    Crop {
        /// Photo to read, or '-' for stdin
        input: String,
        /// Where to write the face JPEG
        destination: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        left: i32,
        #[arg(long, allow_negative_numbers = true)]
        top: i32,
        #[arg(long, allow_negative_numbers = true)]
        width: i32,
        #[arg(long, allow_negative_numbers = true)]
        height: i32,
        /// JPEG quality 1-100 (overrides output.quality)
        #[arg(long)]
        quality: Option<u32>,
    },
    /// Print the summary for a face-record JSON file
    Summarize {
        /// JSON array of face records, or '-' for stdin
        faces: String,
    },
    /// Run fit, detection, summary and face crop for one photo
    Run {
        input: PathBuf,
        /// Output directory for the fitted and face JPEGs
        #[arg(long, default_value = "facefit-out")]
        out_dir: PathBuf,
        /// Face records to use instead of the sidecar next to the photo
        #[arg(long)]
        faces: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        fit: FitArgs,
    },
    /// Process every photo in a directory in parallel
    Batch {
        input_dir: PathBuf,
        /// Output directory for the fitted and face JPEGs
        #[arg(long, default_value = "facefit-out")]
        out_dir: PathBuf,
        /// Print the report as JSON instead of progress lines
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        fit: FitArgs,
    },
    /// Print a stock facefit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };
    let backend = RustBackend::new();

    match cli.command {
        Command::Fit {
            input,
            destination,
            fit,
        } => {
            fit.apply(&mut config);
            config.validate()?;
            let source = read_source(&input)?;
            let fitted =
                imaging::fit_image(&backend, &source, &destination, &config.fit_config())?;
            output::print_fit_output(&input, &destination, (fitted.width(), fitted.height()));
        }
        Command::Crop {
            input,
            destination,
            left,
            top,
            width,
            height,
            quality,
        } => {
            let source = read_source(&input)?;
            let image = imaging::decode_image(&backend, &source)?;
            let bbox = Rect::new(left, top, width, height);
            let crop = imaging::crop_face(&backend, &image, bbox)?;
            let quality = Quality::new(quality.unwrap_or(config.output.quality));
            imaging::save_image(&backend, &crop.image, &destination, quality)?;
            output::print_crop_output(crop.region, &destination);
        }
        Command::Summarize { faces } => {
            let json = read_text(&faces)?;
            let records: Vec<FaceRecord> = serde_json::from_str(&json)?;
            print!("{}", summary::summarize(&records));
        }
        Command::Run {
            input,
            out_dir,
            faces,
            json,
            fit,
        } => {
            fit.apply(&mut config);
            config.validate()?;
            std::fs::create_dir_all(&out_dir)?;
            let detector = match faces {
                Some(path) => SidecarDetector::new(path),
                None => SidecarDetector::beside(&input, &config.detection.sidecar_suffix),
            };
            let report = batch::process_photo(&backend, &detector, &input, &out_dir, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_run_output(&report);
            }
            if report.fitted.is_none() {
                return Err(report.error.unwrap_or_default().into());
            }
        }
        Command::Batch {
            input_dir,
            out_dir,
            json,
            fit,
        } => {
            fit.apply(&mut config);
            config.validate()?;
            init_thread_pool(&config.processing);
            let photos = batch::scan_photos(&input_dir, &out_dir)?;

            let report = if json {
                batch::process_batch(&backend, &input_dir, &photos, &out_dir, &config, None)?
            } else {
                let (tx, rx) = std::sync::mpsc::channel();
                let printer = std::thread::spawn(move || {
                    for event in rx {
                        for line in output::format_batch_event(&event) {
                            println!("{}", line);
                        }
                    }
                });
                let events = Some(tx);
                let report =
                    batch::process_batch(&backend, &input_dir, &photos, &out_dir, &config, events)?;
                printer.join().ok();
                report
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_batch_summary(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Open a photo argument; `-` drains stdin into memory.
fn read_source(arg: &str) -> std::io::Result<ImageSource> {
    if arg == "-" {
        ImageSource::read_from(std::io::stdin().lock())
    } else {
        Ok(ImageSource::from(PathBuf::from(arg)))
    }
}

fn read_text(arg: &str) -> std::io::Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin().lock().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(arg)
    }
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "facefit=debug" } else { "facefit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
