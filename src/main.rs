use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cumulus::engine::{DeviceClass, SuggestionKind, View};
use cumulus::history::JsonHistoryStore;
use cumulus::{Browser, Config};

/// Get the config directory path (~/.config/cumulus/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("cumulus");
    Ok(config_dir)
}

fn parse_device(s: &str) -> Result<DeviceClass, String> {
    match s.to_lowercase().as_str() {
        "desktop" => Ok(DeviceClass::Desktop),
        "tablet" => Ok(DeviceClass::Tablet),
        "phone" => Ok(DeviceClass::Phone),
        other => Err(format!(
            "unknown device class '{}' (expected desktop, tablet, or phone)",
            other
        )),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cumulus",
    about = "Category and tag cloud browser for delimited article datasets"
)]
struct Args {
    /// Config file path (default: ~/.config/cumulus/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Channel to open (default: the config's default_channel)
    #[arg(long, value_name = "ID")]
    channel: Option<String>,

    /// Open a category instead of the full cloud
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Run a search and print results with suggestions
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Container width in pixels for the tag cloud layout
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Device class for layout constants (desktop, tablet, phone)
    #[arg(long, default_value = "desktop", value_parser = parse_device)]
    device: DeviceClass,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if config.channels.is_empty() {
        eprintln!("Error: no channels configured in {}", config_path.display());
        eprintln!();
        eprintln!("Add a channel section, for example:");
        eprintln!("  [channels.wowmind]");
        eprintln!("  title = \"Category and Tag Cloud\"");
        eprintln!("  data_file = \"channels/wowmind/articles.csv\"");
        std::process::exit(1);
    }

    let (channel_id, channel) = config
        .channel(args.channel.as_deref())
        .context("Failed to resolve channel")?;

    // Relative dataset paths resolve against the config file's directory.
    let data_path = {
        let raw = PathBuf::from(&channel.data_file);
        if raw.is_absolute() {
            raw
        } else {
            config_path
                .parent()
                .map(|dir| dir.join(&raw))
                .unwrap_or(raw)
        }
    };

    let store = cumulus::dataset::load_dataset(&data_path, channel.delimiter)
        .await
        .with_context(|| format!("Failed to load dataset from {}", data_path.display()))?;

    let history = JsonHistoryStore::open(config_dir.join("search_history.json"));
    let mut browser = Browser::new(store, Box::new(history));

    println!(
        "Channel '{}' ({}): {} articles",
        channel_id,
        channel.title,
        browser.store().articles().len()
    );

    if let Some(category) = &args.category {
        browser.select_category(category);
    }

    if let Some(term) = &args.search {
        browser.search(term);
        browser.record_search(term);
        print_search(&browser);
    } else {
        print_cloud(&browser, args.width, args.device);
    }

    Ok(())
}

fn print_cloud(browser: &Browser, width: f32, device: DeviceClass) {
    let categories: Vec<&str> = browser
        .store()
        .categories()
        .iter()
        .map(|c| &**c)
        .collect();
    println!("Categories: {}", categories.join(", "));
    println!("Selected: {}", browser.selected_category());

    let cloud = browser.tag_layout(width, device);
    println!(
        "Tag cloud: {} tags in {} rows, {:.0}px tall",
        browser.category_tags().len(),
        cloud.rows.len(),
        cloud.total_height
    );
    for (i, row) in cloud.rows.iter().enumerate() {
        let tags: Vec<String> = row
            .tags
            .iter()
            .map(|t| format!("{} ({})", t.name, t.count))
            .collect();
        println!("  row {}: {}", i + 1, tags.join("  "));
    }
}

fn print_search(browser: &Browser) {
    println!(
        "Search '{}': {} results",
        browser.search_term(),
        browser.articles().len()
    );
    for article in browser.articles() {
        println!("  {} <{}>", article.title, article.url);
    }

    if browser.active_view() == View::SearchResults && !browser.suggestions().is_empty() {
        println!("Suggestions:");
        for suggestion in browser.suggestions() {
            let kind = match &suggestion.kind {
                SuggestionKind::Tag { count } => format!("tag, {} articles", count),
                SuggestionKind::Category => "category".to_string(),
                SuggestionKind::Article { .. } => "article".to_string(),
            };
            println!("  {} ({})", suggestion.value, kind);
        }
    }

    let popular = browser.popular_searches();
    if !popular.is_empty() {
        println!("Popular searches: {}", popular.join(", "));
    }
}
