//! Application related stuff

#![allow(dead_code)]

use clap::Parser;

lazy_static! {
    /// The global application options. Falls back to defaults when the
    /// process arguments are not ours (e.g. under the test harness); the
    /// binary parses eagerly so users still get proper error messages.
    pub static ref OPTIONS: Options =
        Options::try_parse().unwrap_or_else(|_| Options::parse_from(["lumo"]));
}

/// System wide options.
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering. Zero uses all logical CPUs.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 = all cores)."
    )]
    n_threads: usize,

    /// Suppress progress output.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Path of the output image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "render.exr",
        help = "Write the final image to the given filename."
    )]
    pub image_file: String,

    /// Samples per pixel override.
    #[arg(
        long = "spp",
        value_name = "NUM",
        help = "Override the number of samples per pixel."
    )]
    pub samples_per_pixel: Option<usize>,

    /// Tile size.
    #[arg(
        long = "tilesize",
        value_name = "NUM",
        default_value_t = 64,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Environment map image for scenes that take one.
    #[arg(
        long = "envmap",
        value_name = "FILE",
        help = "Environment map image used by scenes with a sky."
    )]
    pub envmap: Option<String>,

    /// Name of the built-in demo scene to render.
    #[arg(
        value_name = "SCENE",
        default_value = "cornell",
        help = "Built-in scene to render."
    )]
    pub scene: String,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = std::thread::available_parallelism().map_or(1, |n| n.get());
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
