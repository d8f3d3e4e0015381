use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use roost::app::{App, AppEvent};
use roost::config::Config;
use roost::feed::{self, LoadOutcome};
use roost::render;

/// Get the config directory path (~/.config/roost/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("roost"))
}

/// Atomically write a file using write-to-temp-then-rename.
/// The destination is never left holding a partially written page.
fn write_atomic(dst: &Path, contents: &str) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions or disk space",
                temp_path.display()
            )
        })?;

    temp_file.write_all(contents.as_bytes()).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    temp_file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(temp_file);

    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                dst.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "roost", about = "Build a static home feed page from a feed document")]
struct Args {
    /// Feed document URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    feed: Option<String>,

    /// Initially selected tab (top, game, hobby, article, trending, recommended)
    #[arg(long, value_name = "ID")]
    tab: Option<String>,

    /// Output path for the rendered page; "-" writes to stdout
    #[arg(long, value_name = "FILE", default_value = "index.html")]
    out: PathBuf,

    /// Config file path (default: ~/.config/roost/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip the network and build from the bundled sample snapshot
    #[arg(long)]
    sample: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let feed_url = args.feed.unwrap_or_else(|| config.feed_url.clone());

    // One load, applied exactly once. Fallback substitution happens inside
    // the loader; from here on the pipeline does not care where the
    // snapshot came from.
    let outcome = if args.sample {
        LoadOutcome {
            snapshot: feed::sample_snapshot(),
            fallback: false,
        }
    } else {
        let client = feed::build_client().context("Failed to build HTTP client")?;
        feed::load_feed(&client, &feed_url).await
    };

    let mut app = App::new(config.labels.clone());
    app.dispatch(AppEvent::FeedLoaded {
        snapshot: outcome.snapshot,
        fallback: outcome.fallback,
    });
    if let Some(raw) = args.tab {
        app.dispatch(AppEvent::TabSelected(raw));
    }

    let page = render::render_page(app.views(), app.current_tab(), &config.page_title);

    if args.out == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(page.as_bytes())
            .context("Failed to write page to stdout")?;
    } else {
        write_atomic(&args.out, &page)?;
        tracing::info!(
            path = %args.out.display(),
            bytes = page.len(),
            tab = app.current_tab().id(),
            "home page written"
        );
    }

    Ok(())
}
