use std::path::PathBuf;
use std::process;

use clap::Parser;

use faceblur_core::blurring::domain::blur_mode::BlurMode;
use faceblur_core::blurring::domain::intensity::IntensityLevel;
use faceblur_core::detection::infrastructure::scripted_face_detector::{
    DetectionScript, ScriptedFaceDetector,
};
use faceblur_core::pipeline::anonymize_config::AnonymizeConfig;
use faceblur_core::pipeline::anonymize_stream_use_case::AnonymizeStreamUseCase;
use faceblur_core::pipeline::frame_anonymizer::FrameAnonymizer;
use faceblur_core::pipeline::pipeline_logger::LogPipelineLogger;
use faceblur_core::video::infrastructure::image_sequence_sink::ImageSequenceSink;
use faceblur_core::video::infrastructure::image_sequence_source::{is_image, ImageSequenceSource};

/// Blur detected faces in a sequence of images.
#[derive(Parser)]
#[command(name = "faceblur")]
struct Cli {
    /// Input image files in frame order, or a single directory of images.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with normalized face boxes per frame.
    #[arg(long)]
    detections: PathBuf,

    /// Output directory for anonymized frames.
    #[arg(long, short)]
    output: PathBuf,

    /// Blur mode: soft-polygon, full-mask, or a mode code (3, 4).
    /// Unrecognized values blur the whole face box.
    #[arg(long)]
    mode: Option<String>,

    /// Blur intensity 1-5; out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    intensity: Option<i64>,

    /// JSON config file with `mode` and `intensity`; flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = resolve_config(&cli)?;
    log::info!(
        "Mode: {}, intensity: {} (kernel {})",
        config.mode,
        config.intensity.level(),
        config.kernel_size()
    );

    let source = open_source(&cli.inputs)?;
    let script = DetectionScript::load(&cli.detections)?;

    let mut use_case = AnonymizeStreamUseCase::new(
        Box::new(source),
        Box::new(ImageSequenceSink::new(&cli.output)),
        Box::new(ScriptedFaceDetector::new(script)),
        FrameAnonymizer::default(),
        config,
        Box::new(LogPipelineLogger::default()),
    );
    let summary = use_case.execute()?;

    log::info!(
        "Wrote {} frames to {} ({} faces blurred, {} malformed detections skipped)",
        summary.frames,
        cli.output.display(),
        summary.blurred,
        summary.skipped
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AnonymizeConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AnonymizeConfig::load(path)?,
        None => AnonymizeConfig::default(),
    };
    if let Some(mode) = &cli.mode {
        config.mode = mode.parse::<BlurMode>().unwrap_or(BlurMode::FullMask);
    }
    if let Some(intensity) = cli.intensity {
        config.intensity = IntensityLevel::clamped(intensity);
    }
    Ok(config)
}

fn open_source(inputs: &[PathBuf]) -> Result<ImageSequenceSource, Box<dyn std::error::Error>> {
    if let [dir] = inputs {
        if dir.is_dir() {
            return ImageSequenceSource::from_directory(dir);
        }
    }
    Ok(ImageSequenceSource::new(inputs.to_vec()))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input not found: {}", input.display()).into());
        }
        if input.is_file() && !is_image(input) {
            return Err(format!("Unsupported image format: {}", input.display()).into());
        }
    }
    if cli.inputs.len() > 1 && cli.inputs.iter().any(|p| p.is_dir()) {
        return Err("A directory input must be the only input".into());
    }
    if !cli.detections.is_file() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    if cli.output.is_file() {
        return Err(format!(
            "Output must be a directory, found a file: {}",
            cli.output.display()
        )
        .into());
    }
    Ok(())
}
