mod app;
mod args;
mod embed;
mod logging;
mod scene;

use clap::Parser;

use crate::{app::App, args::Args};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let _guard = logging::init()?;

    let config = args.load_config()?;
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}
