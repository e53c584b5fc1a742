use clap::Parser;
use image_scrubber::args::Args;
use image_scrubber::processor::Processor;
use image_scrubber::scrubber::ensure_codecs_available;
use std::process::ExitCode;

/// Exit status when the image codecs this tool relies on are missing
const EXIT_CODEC_UNAVAILABLE: u8 = 3;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = ensure_codecs_available() {
        eprintln!("✗ Error: {:#}", anyhow::Error::new(e));
        eprintln!("  Rebuild with the image crate's jpeg and png features enabled.");
        return ExitCode::from(EXIT_CODEC_UNAVAILABLE);
    }

    let mut processor = Processor::new(args.directories());
    let summary = processor.run();

    ExitCode::from(summary.exit_status())
}
