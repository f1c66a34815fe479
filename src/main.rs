use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use speciation::{
    dataset::{Dataset, DatasetLoader},
    render::Visualizer,
    svg::SvgCanvas,
    window::WindowCanvas,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Render a speciation band chart")]
struct Cli {
    /// Path to a dataset file (YAML or JSON); uses the built-in sample when omitted
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Write the chart to this SVG file instead of opening a window
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override the chart title
    #[arg(long)]
    title: Option<String>,

    /// Figure width in pixels (at least 160, to leave room for the margins)
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(160..))]
    width: u32,

    /// Figure height in pixels (at least 160, to leave room for the margins)
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(160..))]
    height: u32,
}


fn main() -> Result<()> {
    let cli = Cli::parse();
    let dataset = match &cli.dataset {
        Some(path) => DatasetLoader::new(".").load(path)?,
        None => Dataset::sample(),
    };
    let table = dataset.to_table()?;
    let title = cli.title.clone().unwrap_or_else(|| dataset.title());
    let visualizer = Visualizer::new()
        .with_title(title)
        .with_axis_labels("Species", "Generations");

    match &cli.output {
        Some(path) => {
            let mut canvas = SvgCanvas::new(path, cli.width, cli.height);
            visualizer.render(&table, &mut canvas)?;
            println!(
                "Rendered {} species over {} generations to {}",
                table.species(),
                table.generations(),
                path.display()
            );
        }
        None => {
            let mut canvas = WindowCanvas::new(cli.width, cli.height);
            visualizer.render(&table, &mut canvas)?;
        }
    }
    Ok(())
}
