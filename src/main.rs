use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rfcanvas::rendering::raster;
use rfcanvas::{BlitRequest, CanvasConfig, PixelBlitter};

#[derive(Parser)]
#[command(name = "rfcanvas", version, about = "Write raw RGBA blocks onto a headless canvas")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    canvas: CanvasArgs,

    /// Log debug output to stderr (RUST_LOG also works)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Apply blit requests from a JSON file (one object or an array)
    Blit {
        #[arg(long)]
        requests: PathBuf,
    },
    /// Run a script that calls updateImageData(i)
    #[cfg(feature = "script")]
    Run {
        #[arg(long)]
        script: PathBuf,
    },
}

#[derive(Args)]
struct CanvasArgs {
    /// JSON canvas config; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    width: Option<u32>,

    #[arg(long, global = true)]
    height: Option<u32>,

    #[arg(long, global = true)]
    element_id: Option<String>,

    /// Write the canvas as PNG here
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Print the canvas as a data: URL
    #[arg(long, global = true)]
    data_url: bool,

    /// Print the SHA-256 of the raw canvas pixels
    #[arg(long, global = true)]
    digest: bool,
}

impl CanvasArgs {
    fn load_config(&self) -> Result<CanvasConfig> {
        let mut cfg = match &self.config {
            Some(path) => CanvasConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CanvasConfig::default(),
        };
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        if let Some(id) = &self.element_id {
            cfg.element_id = id.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rfcanvas::logger::init(cli.verbose);

    for line in execute(&cli)? {
        println!("{}", line);
    }
    Ok(())
}

/// Run the selected command and return the lines to print.
fn execute(cli: &Cli) -> Result<Vec<String>> {
    let cfg = cli.canvas.load_config()?;
    let (_document, blitter) = rfcanvas::new_blitter(&cfg)?;

    let blitter = match &cli.command {
        Command::Blit { requests } => {
            let json = std::fs::read_to_string(requests)
                .with_context(|| format!("reading {}", requests.display()))?;
            let reqs = BlitRequest::parse_json(&json)?;
            let applied = blitter.blit_all(&reqs)?;
            log::info!("Applied {} blit request(s)", applied);
            blitter
        }
        #[cfg(feature = "script")]
        Command::Run { script } => {
            let code = std::fs::read_to_string(script)
                .with_context(|| format!("reading {}", script.display()))?;
            let mut host = rfcanvas::ScriptHost::new(blitter, &cfg)?;
            let res = host.eval(&code)?;
            if res.is_error {
                anyhow::bail!("{}", res.value);
            }
            host.into_blitter()
        }
    };

    emit(&blitter, &cli.canvas)
}

fn emit(blitter: &PixelBlitter, args: &CanvasArgs) -> Result<Vec<String>> {
    let canvas = blitter.canvas();
    let mut lines = Vec::new();
    if let Some(out) = &args.out {
        let shot = raster::encode_png(canvas)?;
        std::fs::write(out, &shot.png_data)
            .with_context(|| format!("writing {}", out.display()))?;
        log::info!("Wrote {}x{} PNG to {}", shot.width, shot.height, out.display());
    }
    if args.data_url {
        lines.push(raster::to_data_url(canvas)?);
    }
    if args.digest {
        lines.push(raster::pixel_digest(canvas));
    }
    Ok(lines)
}
