use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dropfinder::dataset::{self, Entity, EntityKind, Item, Map, Monster, Npc};
use dropfinder::query::{FilterMode, Linked};
use dropfinder::utils::{self, AppConfig};
use dropfinder::{Lookup, output};
use std::io::Write;
use std::path::PathBuf;
use termcolor::WriteColor;

const DEFAULT_DATA_FILE: &str = "data.json";

#[derive(Parser)]
#[command(name = "dropfinder")]
#[command(about = "Fuzzy lookup over item, monster, map and NPC drop tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset blob to load (falls back to the configured path, then data.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy search one collection by name
    Search {
        /// item, monster, map or npc
        kind: EntityKind,

        /// Keyword; empty lists the whole collection
        #[arg(default_value = "")]
        keyword: String,

        /// Include rows without any linked data
        #[arg(short, long)]
        all: bool,

        /// Print at most this many hits
        #[arg(short, long)]
        limit: Option<usize>,

        /// Render an HTML list fragment instead of text
        #[arg(long)]
        html: bool,
    },
    /// Show one row and everything it links to
    Show {
        kind: EntityKind,
        index: usize,
    },
    /// Show dataset, index and validation statistics
    Stats,
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        AppConfig::default()
    });

    let mut out = output::stdout(true);

    match cli.command {
        Commands::Config => {
            let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", json);
        }
        Commands::Search {
            kind,
            keyword,
            all,
            limit,
            html,
        } => {
            let mut lookup = open_lookup(cli.data, &config)?;
            let mode = if all { FilterMode::All } else { config.default_filter };
            let request = SearchRequest {
                keyword: &keyword,
                mode,
                limit,
                html,
            };
            match kind {
                EntityKind::Item => run_search::<Item>(&mut lookup, &mut out, &request)?,
                EntityKind::Monster => run_search::<Monster>(&mut lookup, &mut out, &request)?,
                EntityKind::Map => run_search::<Map>(&mut lookup, &mut out, &request)?,
                EntityKind::Npc => run_search::<Npc>(&mut lookup, &mut out, &request)?,
            }
        }
        Commands::Show { kind, index } => {
            let lookup = open_lookup(cli.data, &config)?;
            show_row(&lookup, &mut out, kind, index)?;
        }
        Commands::Stats => {
            let lookup = open_lookup(cli.data, &config)?;
            output::write_stats(&mut out, &lookup.stats()?)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Load the dataset blob and install it into a fresh lookup
fn open_lookup(data: Option<PathBuf>, config: &AppConfig) -> Result<Lookup> {
    let data_path = data
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
    let dataset = dataset::load_path(&data_path)?;

    let mut lookup = Lookup::from_config(config);
    let report = lookup.install(dataset);
    if !report.is_clean() {
        tracing::debug!(?report, "dataset repaired on install");
    }
    Ok(lookup)
}

struct SearchRequest<'a> {
    keyword: &'a str,
    mode: FilterMode,
    limit: Option<usize>,
    html: bool,
}

fn run_search<T>(lookup: &mut Lookup, out: &mut impl WriteColor, request: &SearchRequest<'_>) -> Result<()>
where
    T: Entity + Linked,
{
    let outcome = lookup.search::<T>(request.keyword, request.mode)?;
    if outcome.is_no_data() {
        output::write_no_data(out, T::KIND)?;
        return Ok(());
    }

    let mut hits = outcome.into_hits();
    let total = hits.len();
    if let Some(limit) = request.limit {
        hits.truncate(limit);
    }

    if request.html {
        write!(out, "{}", output::render_html_list(T::KIND, &hits))?;
    } else {
        output::write_hits(out, &hits, request.keyword)?;
        if hits.len() < total {
            writeln!(out, "... {} more", total - hits.len())?;
        }
    }

    Ok(())
}

fn show_row(lookup: &Lookup, out: &mut impl WriteColor, kind: EntityKind, index: usize) -> Result<()> {
    match kind {
        EntityKind::Item => {
            let row = lookup.row::<Item>(index)?;
            let rel = lookup.item_relations(index)?;
            output::write_heading(out, kind, index, &row.name)?;
            output::write_related(out, "dropped by", &rel.monsters)?;
            output::write_related(out, "sold by", &rel.npcs)?;
            output::write_related(out, "given by", &rel.given_by)?;
        }
        EntityKind::Monster => {
            let row = lookup.row::<Monster>(index)?;
            let rel = lookup.monster_relations(index)?;
            output::write_heading(out, kind, index, &row.name)?;
            output::write_related(out, "maps", &rel.maps)?;
            output::write_related(out, "drops", &rel.drops)?;
            output::write_entries(out, "spawn", &rel.spawn_schedule)?;
        }
        EntityKind::Map => {
            let row = lookup.row::<Map>(index)?;
            let rel = lookup.map_relations(index)?;
            output::write_heading(out, kind, index, &row.name)?;
            output::write_related(out, "npcs", &rel.npcs)?;
            output::write_related(out, "monsters", &rel.monsters)?;
            output::write_related(out, "reached via", &rel.arrivals)?;
            output::write_entries(out, "path", &rel.path_steps)?;
        }
        EntityKind::Npc => {
            let row = lookup.row::<Npc>(index)?;
            let rel = lookup.npc_relations(index)?;
            output::write_heading(out, kind, index, &row.name)?;
            writeln!(out, "  location: {} {}", row.map_name, row.map_coord)?;
            output::write_related(out, "takes", &rel.items_taken)?;
            output::write_related(out, "gives", &rel.items_given)?;
            output::write_related(out, "transfers to", &rel.transfer_targets)?;
        }
    }

    Ok(())
}
