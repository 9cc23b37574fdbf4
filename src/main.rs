//! uipanel command line
//!
//! ```bash
//! # Decode a value through a format string
//! uipanel text --format "x1:XX" --value 930
//!
//! # Render a 240x80 clock to PNG
//! uipanel render --format "XX:XX" --value 1205 --width 240 --height 80 --out clock.png
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use uipanel::panel::{self, Geometry, Panel, Widget};
use uipanel::style::StyleSheet;
use uipanel::widgets::NumberField;
use uipanel::DisplayConfig;

#[derive(Parser)]
#[command(name = "uipanel")]
#[command(about = "Headless seven-segment display renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text a format shows for a value
    Text {
        #[arg(short, long)]
        format: String,

        #[arg(short, long)]
        value: u64,
    },

    /// Render a display to PNG
    Render {
        #[arg(short, long)]
        format: String,

        #[arg(short, long)]
        value: u64,

        #[arg(long, default_value = "200")]
        width: u32,

        #[arg(long, default_value = "80")]
        height: u32,

        /// Extra class tags for the display node
        #[arg(long = "class")]
        classes: Vec<String>,

        /// JSON style rule set (or array of rule sets)
        #[arg(long)]
        style: Option<PathBuf>,

        /// JSON display defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// PNG output file
        #[arg(short, long, conflicts_with = "data_url", required_unless_present = "data_url")]
        out: Option<PathBuf>,

        /// Print a data: URL instead of writing a file
        #[arg(long)]
        data_url: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Text { format, value } => {
            let mut field = NumberField::new(&format);
            field.set_value(value);
            println!("{}", field.text());
        }
        Commands::Render {
            format,
            value,
            width,
            height,
            classes,
            style,
            config,
            out,
            data_url,
        } => {
            let config = match config {
                Some(path) => {
                    let json = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    DisplayConfig::from_json(&json)?
                }
                None => DisplayConfig::default(),
            };

            let mut field = NumberField::with_config(&format, &config);
            field.set_value(value);
            for class in &classes {
                field.panel_mut().add_class(class);
            }
            field
                .panel_mut()
                .element_mut()
                .set_geometry(Geometry::sized(width as f64, height as f64));

            let mut root = Panel::new();
            let id = root.append_child(field);

            if let Some(path) = style {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let sheet = StyleSheet::from_json(&json)?;
                panel::apply_style(&mut root, &sheet);
            }
            panel::refresh(&mut root);

            let field = root
                .child_as::<NumberField>(id)
                .context("display node missing after refresh")?;
            info!("rendered {:?} as {:?} ({})", format, field.text(), field.canvas().digest());
            let shot = field.screenshot()?;

            match out {
                Some(path) if !data_url => {
                    fs::write(&path, &shot.png_data)
                        .with_context(|| format!("writing {}", path.display()))?;
                }
                _ => println!("{}", shot.to_data_url()),
            }
        }
    }
    Ok(())
}
