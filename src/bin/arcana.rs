use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use arcana::{
    AssetCell, DisplayOptions, FixedInterpreter, Interpreter, OpenAiInterpreter, Reader,
    ReaderConfig,
};

static ASSETS: AssetCell = AssetCell::new();

#[derive(Parser, Debug)]
#[command(name = "arcana", version)]
struct Cli {
    /// Directory holding cards.json, card artwork, font.ttf, reader.jpg and the icons.
    #[arg(long)]
    assets: PathBuf,

    /// What to ask the cards.
    #[arg(long, default_value = "我这周运势怎么样？")]
    question: String,

    /// Output image (PNG or JPEG, chosen by extension).
    #[arg(long, default_value = "reading.png")]
    out: PathBuf,

    /// JSON config; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer with a canned reading instead of calling the backend.
    #[arg(long, default_value_t = false)]
    stub: bool,

    /// Label shown next to the asker icon.
    #[arg(long)]
    asker: Option<String>,

    /// Label shown next to the reader icon.
    #[arg(long)]
    reader: Option<String>,

    /// Log at debug level.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "arcana=debug,info"
    } else {
        "arcana=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn save_image(img: image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        // JPEG has no alpha channel.
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .save(path)
            .with_context(|| format!("write jpeg '{}'", path.display()))
    } else {
        img.save(path)
            .with_context(|| format!("write image '{}'", path.display()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => ReaderConfig::from_path(path)?,
        None => ReaderConfig::default(),
    };
    config.validate()?;

    let assets = ASSETS
        .get_or_try_init(|| arcana::AssetBundle::load(&cli.assets, &config.layout))
        .with_context(|| format!("load assets from '{}'", cli.assets.display()))?;

    let interpreter: Arc<dyn Interpreter> = if cli.stub {
        Arc::new(FixedInterpreter::canned())
    } else {
        Arc::new(OpenAiInterpreter::from_env(&config.backend)?)
    };

    let reader = Reader::new(interpreter, assets, &config)?;
    let mut options = DisplayOptions {
        placeholder: config.answer_placeholder.clone(),
        ..DisplayOptions::default()
    };
    if let Some(asker) = cli.asker {
        options.asker_label = asker;
    }
    if let Some(label) = cli.reader {
        options.reader_label = label;
    }

    let reading = reader.run_sync(&cli.question, &options).await?;
    println!("{}", reading.selection);
    println!("{}", reading.text);

    save_image(reading.image, &cli.out)?;
    tracing::info!(path = %cli.out.display(), "reading saved");
    Ok(())
}
