mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use img_shrink::constants::{USAGE_LINE, USAGE_SUMMARY};
use img_shrink::{error, logger, Pipeline, PngCompressor, ShrinkOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    let Some(input) = args.input else {
        println!("{}", USAGE_SUMMARY);
        println!("{}", USAGE_LINE);
        return ExitCode::from(2);
    };

    let options = ShrinkOptions::new(args.threads);
    let mut pipeline = Pipeline::new(PngCompressor::new(), options);

    match pipeline
        .run(&input)
        .with_context(|| format!("failed to optimize images in {:?}", input))
    {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
