#[macro_use]
extern crate log;

mod scenes;

use clap::Parser;
use lumo_core::app::Options;
use lumo_core::integrator::Integrator;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    // Parse eagerly so argument errors are reported properly; the global
    // OPTIONS the renderer reads resolves to the same values.
    let options = Options::parse();

    if let Err(err) = render(&options) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn render(options: &Options) -> Result<(), String> {
    let (integrator, film) = scenes::build(&options.scene)?;
    integrator.execute()?;
    film.save(&options.image_file)
}
