use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-shrink",
    about = "Optimize image (.png) files losslessly and rewrite them in place",
    long_about = "img-shrink walks a directory tree, compresses every .png file into a sibling \
                  <dirname>_optimized staging directory, then moves the results back over the \
                  originals and prints the size savings. Other files are left untouched.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-shrink ./assets\n  \
    img-shrink ./assets -j 4 -v"
)]
pub struct Args {
    #[arg(help = "Root directory to process")]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of threads used to compress files into the staging directory. \
                     If not specified, uses number of CPU cores."
    )]
    pub threads: Option<usize>,

    #[arg(short = 'q', long, help = "Only print errors", conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print each file as it is processed")]
    pub verbose: bool,
}
