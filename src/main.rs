use anyhow::Result;
use citycare_icon::icon::{self, Options};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "citycare-icon",
    about = "Render the CityCare application icon as PNG"
)]
struct Args {
    /// Path of the generated master icon.
    #[clap(
        short,
        long,
        value_name = "FILE",
        default_value = "assets/app_icon.png"
    )]
    output: PathBuf,

    /// Edge length of the master icon in pixels.
    #[clap(short, long, value_name = "PIXELS", default_value_t = 1024)]
    size: u32,

    /// Additional PNG icon sizes to render next to the master icon.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    png: Option<Vec<u32>>,

    /// Also render Android launcher icons (mipmap densities).
    #[clap(long)]
    android: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon::generate(&Options {
        output: args.output,
        size: args.size,
        png: args.png,
        android: args.android,
    })
}
