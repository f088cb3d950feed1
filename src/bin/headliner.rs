use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "headliner", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single card as a PNG.
    Render(RenderArgs),
    /// Render a JSON array of requests into a directory.
    Batch(BatchArgs),
    /// Print the theme and layout catalogs as JSON.
    Catalog(CatalogArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long, default_value = "card.png")]
    out: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input JSON array of requests.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; cards are written as `card-<index>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Engine config JSON (affects font resolution shown).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<headliner::EngineConfig> {
    match path {
        Some(p) => Ok(headliner::EngineConfig::from_path(p)?),
        None => Ok(headliner::EngineConfig::default()),
    }
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn write_png(out: &Path, png: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, png).with_context(|| format!("write png '{}'", out.display()))
}

fn report_degradations(label: &str, degradations: &[headliner::Degradation]) {
    for d in degradations {
        if !matches!(
            d,
            headliner::Degradation::BackgroundFallback(headliner::BackgroundFallback::Absent)
        ) {
            eprintln!("{label}: {d}");
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let renderer = headliner::ThumbnailRenderer::new(config)?;
    let request = headliner::RenderRequest::from_path(&args.in_path)?
        .with_background_base(base_dir(&args.in_path));

    let img = renderer.render(&request)?;
    report_degradations(&args.out.display().to_string(), &img.degradations);
    write_png(&args.out, &img.png)?;

    eprintln!("wrote {} ({})", args.out.display(), img.fingerprint);
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let renderer = headliner::ThumbnailRenderer::new(config)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("open requests '{}'", args.in_path.display()))?;
    let requests: Vec<headliner::RenderRequest> =
        serde_json::from_slice(&bytes).with_context(|| "parse requests JSON array")?;
    let base = base_dir(&args.in_path);
    let requests: Vec<_> = requests
        .into_iter()
        .map(|r| r.with_background_base(base))
        .collect();

    let mut failures = 0usize;
    for (i, result) in renderer.render_batch(&requests).into_iter().enumerate() {
        let out = args.out_dir.join(format!("card-{i}.png"));
        match result {
            Ok(img) => {
                report_degradations(&out.display().to_string(), &img.degradations);
                write_png(&out, &img.png)?;
                eprintln!("wrote {}", out.display());
            }
            Err(e) => {
                failures += 1;
                eprintln!("request {i} failed: {e}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} requests failed", requests.len());
    }
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let renderer = headliner::ThumbnailRenderer::new(config)?;

    let mut themes = serde_json::Map::new();
    for name in headliner::THEME_NAMES {
        let theme = headliner::builtin_theme(name)
            .with_context(|| format!("theme '{name}' missing from catalog"))?;
        let mut fonts = serde_json::Map::new();
        for role in headliner::FontRole::ALL {
            let font = renderer.font_for(name, role)?;
            fonts.insert(
                role.as_str().to_owned(),
                serde_json::json!({
                    "family": font.family(),
                    "source": format!("{:?}", font.source()),
                }),
            );
        }
        let mut entry = serde_json::to_value(&theme)?;
        if let Some(obj) = entry.as_object_mut() {
            obj.insert("resolved_fonts".to_owned(), serde_json::Value::Object(fonts));
        }
        themes.insert(name.to_owned(), entry);
    }

    let mut layouts = serde_json::Map::new();
    for name in headliner::LAYOUT_NAMES {
        let (_, policy) = headliner::builtin_layout(name)
            .with_context(|| format!("layout '{name}' missing from catalog"))?;
        layouts.insert(name.to_owned(), serde_json::to_value(policy)?);
    }

    let out = serde_json::json!({
        "canvas": renderer.config().canvas,
        "themes": themes,
        "layouts": layouts,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
