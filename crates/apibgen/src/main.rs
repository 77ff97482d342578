#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod convert;
mod error;
mod info;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert Postman collection exports into API Blueprint markup"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "APIBGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert a collection export into an API Blueprint document
    Convert(crate::convert::Options),

    /// Show collection metadata without converting
    Info(crate::info::Options),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Convert(options) => crate::convert::run(options, app.global),
        SubCommands::Info(options) => crate::info::run(options, app.global),
    }
}
