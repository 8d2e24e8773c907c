use std::path::PathBuf;

use gallery_scan::config::NAME;
use gallery_scan::prelude::*;
use gallery_scan::{cache_from_config, source_from_config};

const USAGE: &str = "usage: gallery_scan [config.toml] [--refresh]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config_path: Option<PathBuf>,
    refresh: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, GalleryError> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--refresh" => parsed.refresh = true,
            flag if flag.starts_with("--") => {
                return Err(GalleryError::Config(format!("Unknown option {}\n{}", flag, USAGE)));
            }
            _ => parsed.config_path = Some(PathBuf::from(&arg)),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<(), GalleryError> {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    log::info!("{} starting", NAME);

    let Args {
        config_path,
        refresh,
    } = parse_args(std::env::args().skip(1))?;

    let config = match &config_path {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };

    let source = source_from_config(&config)?;
    let cache = cache_from_config(&config)?;
    if refresh {
        log::info!("Dropping cached {}", cache.key());
        cache.invalidate()?;
    }

    let images = cache.get_or_scan_images(source.as_ref()).await;
    let classification = Classification::of(&images, &config.content);

    let report = serde_json::json!({
        "images": images,
        "folders": classification,
    });
    let out = serde_json::to_string_pretty(&report)
        .map_err(|e| GalleryError::Other(format!("Failed to encode report: {}", e)))?;
    println!("{}", out);
    Ok(())
}
