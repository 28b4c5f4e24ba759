use std::path::PathBuf;

use beatstore_core::{
    AudioDriver, BeatRecord, BeatStoreError, BpmRange, CatalogStore, PlaybackState, StoreConfig,
    Storefront,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> beatstore_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut store = open_store(cli.catalog.as_ref(), cli.config.as_ref())?;

    match cli.command {
        Commands::Browse {
            query,
            tag,
            min_bpm,
            max_bpm,
        } => run_browse(&mut store, query, tag, min_bpm, max_bpm)?,
        Commands::Tags => run_tags(&store),
        Commands::Cart { add, remove } => run_cart(&mut store, &add, &remove),
        Commands::Play { ids } => run_play(&mut store, &ids),
    }
    Ok(())
}

fn open_store(
    catalog: Option<&PathBuf>,
    config: Option<&PathBuf>,
) -> beatstore_core::Result<Storefront> {
    let catalog = match catalog {
        Some(path) => {
            tracing::info!(?path, "loading catalog");
            CatalogStore::from_path(path)?
        }
        None => CatalogStore::demo(),
    };
    let config = match config {
        Some(path) => StoreConfig::from_path(path)?,
        None => StoreConfig::default(),
    };
    Ok(Storefront::new(catalog, config))
}

fn run_browse(
    store: &mut Storefront,
    query: Option<String>,
    tag: Option<String>,
    min_bpm: Option<u16>,
    max_bpm: Option<u16>,
) -> beatstore_core::Result<()> {
    if let Some(query) = query {
        store.set_query_text(&query);
    }
    if let Some(tag) = tag {
        store.set_active_tag(&tag);
    }
    let slider = slider_bounds(store.config().bpm_bounds, store.catalog().bpm_domain());
    let range = resolve_bpm_range(slider, store.criteria().bpm, min_bpm, max_bpm)?;
    store.set_bpm_range(range.min, range.max);

    let currency = store.config().currency.clone();
    let visible = store.visible();
    if visible.is_empty() {
        println!("No beats match. Try other filters.");
        return Ok(());
    }
    for beat in visible {
        println!("{}", describe(beat, &currency));
    }
    Ok(())
}

/// Slider domain: the configured bounds narrowed to the tempos the catalog
/// actually holds, unless the two do not overlap.
fn slider_bounds(configured: BpmRange, catalog_domain: Option<(u16, u16)>) -> BpmRange {
    match catalog_domain {
        Some((lo, hi)) if lo <= configured.max && hi >= configured.min => {
            BpmRange::new(configured.min.max(lo), configured.max.min(hi))
        }
        _ => configured,
    }
}

/// Fills missing ends from `current` and clamps both ends into `slider`.
fn resolve_bpm_range(
    slider: BpmRange,
    current: BpmRange,
    min_bpm: Option<u16>,
    max_bpm: Option<u16>,
) -> beatstore_core::Result<BpmRange> {
    let min = min_bpm.unwrap_or(current.min);
    let max = max_bpm.unwrap_or(current.max);
    if min > max {
        return Err(BeatStoreError::msg(format!(
            "--min-bpm {min} is greater than --max-bpm {max}"
        )));
    }
    let clamp = |bpm: u16| bpm.max(slider.min).min(slider.max);
    Ok(BpmRange::new(clamp(min), clamp(max)))
}

fn run_tags(store: &Storefront) {
    println!("{}", store.tag_tabs().join(" | "));
}

fn run_cart(store: &mut Storefront, add: &[String], remove: &[String]) {
    for id in add {
        store.add_to_cart(id);
    }
    for id in remove {
        store.remove_from_cart(id);
    }

    let currency = &store.config().currency;
    let lines = store.cart_lines();
    if lines.is_empty() {
        println!("Your cart is empty.");
    }
    for line in &lines {
        println!(
            "{:<16} x{:<3} {}",
            line.beat.title,
            line.quantity,
            format_price(line.line_total, currency)
        );
    }

    let summary = store.cart_summary();
    println!(
        "{} item(s), total {}",
        summary.item_count,
        format_price(summary.total, currency)
    );
}

fn run_play(store: &mut Storefront, ids: &[String]) {
    let mut driver = LoggingDriver;
    for id in ids {
        let transition = store.toggle_playback(id);
        transition.dispatch(store.catalog(), &mut driver);
    }

    match store.playback() {
        PlaybackState::Idle => println!("idle"),
        PlaybackState::Playing(id) => println!("playing {id}"),
    }
}

/// Stand-in media backend that only reports the commands it receives.
struct LoggingDriver;

impl AudioDriver for LoggingDriver {
    fn play(&mut self, beat_id: &str, preview_uri: &str) {
        tracing::info!(beat_id, preview_uri, "play");
    }

    fn pause(&mut self, beat_id: &str) {
        tracing::info!(beat_id, "pause");
    }
}

fn describe(beat: &BeatRecord, currency: &str) -> String {
    format!(
        "{:<4} {:<16} {:>3} BPM  {:<3} {:<28} {:.1}★  {}",
        beat.id,
        beat.title,
        beat.bpm,
        beat.key,
        beat.tags.join(", "),
        beat.rating,
        format_price(beat.price, currency)
    )
}

/// French-style amount: comma decimals, thin grouping, symbol last.
fn format_price(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let units = (cents / 100).abs();
    let fraction = (cents % 100).abs();

    let digits = units.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }

    let sign = if cents < 0 { "-" } else { "" };
    let symbol = match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        other => other,
    };
    format!("{sign}{grouped},{fraction:02}\u{a0}{symbol}")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse, preview and buy beats", long_about = None)]
struct Cli {
    /// JSON catalog to load instead of the built-in demo beats.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// JSON storefront configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the beats matching the given filters.
    Browse {
        /// Free-text search over title, producer, tags and mood.
        #[arg(short, long)]
        query: Option<String>,
        /// Tag to filter by; the configured sentinel label shows everything.
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(long)]
        min_bpm: Option<u16>,
        #[arg(long)]
        max_bpm: Option<u16>,
    },
    /// Print the tag tabs.
    Tags,
    /// Apply cart additions then removals and print the cart.
    Cart {
        /// Beat id to add; repeat to add several times.
        #[arg(long)]
        add: Vec<String>,
        /// Beat id to remove entirely.
        #[arg(long)]
        remove: Vec<String>,
    },
    /// Toggle playback for each id in order.
    Play {
        ids: Vec<String>,
    },
}
