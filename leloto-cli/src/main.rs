mod config;
mod display;
mod import;
mod interactive;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{DashboardConfig, load_config};
use crate::display::{
    display_combinations, display_delays, display_draws, display_frequencies, display_gaps,
    display_grids, display_import_summary, display_profile, display_stats, display_trend,
};
use leloto_db::db::{fetch_all_draws, insert_draw, migrate, open_db};
use leloto_db::models::{Draw, Pool};
use leloto_db::rusqlite::Connection;
use leloto_stats::StatsError;
use leloto_stats::combination::combination_table;
use leloto_stats::config::RecencyWindow;
use leloto_stats::delay::{current_delays, delay_sequence, gap_histogram};
use leloto_stats::frequency::{frequency_table, number_stats, recent_trend};
use leloto_stats::profile::{consecutive_distribution, parity_distribution, sum_distribution};
use leloto_stats::store::DrawStore;
use leloto_stats::suggest::{Strategy, Suggester};

const GAP_BIN: u32 = 5;
const SUM_BIN: u32 = 10;
const COMBINATION_ARITIES: [usize; 3] = [2, 3, 4];

#[derive(Parser)]
#[command(name = "leloto", about = "Exploration statistique des tirages du Loto")]
struct Cli {
    /// Fichier de configuration JSON
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV (export FDJ)
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/loto.csv")]
        file: PathBuf,

        /// Séparateur de colonnes
        #[arg(short, long, default_value = ";")]
        delimiter: char,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher (5-50)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(5..=50))]
        last: Option<u8>,
    },

    /// Fréquences des numéros principaux et des numéros chance
    Freq,

    /// Fréquence et retard de chaque numéro
    Stats,

    /// Combinaisons de 2, 3 et 4 numéros les plus fréquentes
    Combos {
        /// Nombre de combinaisons par taille
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Numéros les plus sortis sur une période récente
    Trend {
        /// Période d'analyse en jours (30-365)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Écarts entre les apparitions d'un numéro
    Gaps {
        /// Numéro à analyser (1-49)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=49))]
        number: u8,
    },

    /// Parité, sommes, séquences et retards
    Advanced,

    /// Générer des grilles
    Suggest {
        /// Stratégie (toutes par défaut)
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Ajouter un tirage manuellement
    Add,

    /// Mode interactif
    Interactive,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let path = config.db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match run(cli.command, &conn, &path, &config) {
        Err(e) if e.downcast_ref::<StatsError>() == Some(&StatsError::EmptyDataset) => {
            println!("Base vide. Lancez d'abord : leloto import");
            Ok(())
        }
        other => other,
    }
}

fn run(command: Command, conn: &Connection, path: &Path, config: &DashboardConfig) -> Result<()> {
    match command {
        Command::Import { file, delimiter } => cmd_import(conn, &file, delimiter),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(
            &load_store(conn)?,
            last.map(usize::from).unwrap_or(config.recent_results),
        ),
        Command::Freq => cmd_freq(&load_store(conn)?),
        Command::Stats => cmd_stats(&load_store(conn)?),
        Command::Combos { top } => {
            cmd_combos(&load_store(conn)?, top.unwrap_or(config.top_combinations))
        }
        Command::Trend { days } => {
            let window = match days {
                Some(d) => RecencyWindow::new(d)?,
                None => config.recency_window()?,
            };
            cmd_trend(&load_store(conn)?, window)
        }
        Command::Gaps { number } => cmd_gaps(&load_store(conn)?, number),
        Command::Advanced => cmd_advanced(&load_store(conn)?),
        Command::Suggest { strategy, seed } => cmd_suggest(&load_store(conn)?, strategy, seed),
        Command::Add => cmd_add(conn),
        Command::Interactive => interactive::run_interactive(conn, config),
    }
}

pub(crate) fn load_store(conn: &Connection) -> Result<DrawStore> {
    Ok(DrawStore::new(fetch_all_draws(conn)?))
}

fn cmd_import(conn: &Connection, file: &Path, delimiter: char) -> Result<()> {
    let delimiter = u8::try_from(delimiter).context("Le séparateur doit être un caractère ASCII")?;
    let result = import::import_csv(conn, file, delimiter)?;
    display_import_summary(&result);
    Ok(())
}

pub(crate) fn cmd_list(store: &DrawStore, last: usize) -> Result<()> {
    store.require_draws()?;
    display_draws(&store.latest(last));
    Ok(())
}

pub(crate) fn cmd_freq(store: &DrawStore) -> Result<()> {
    store.require_draws()?;
    let principal = frequency_table(store.draws(), Pool::Principal);
    let bonus = frequency_table(store.draws(), Pool::Bonus);
    display_frequencies(&principal, &bonus, store.len());
    Ok(())
}

pub(crate) fn cmd_stats(store: &DrawStore) -> Result<()> {
    store.require_draws()?;
    let ball_stats = number_stats(store.draws(), Pool::Principal);
    let bonus_stats = number_stats(store.draws(), Pool::Bonus);
    display_stats(&ball_stats, &bonus_stats, store.len());
    Ok(())
}

pub(crate) fn cmd_combos(store: &DrawStore, top: usize) -> Result<()> {
    store.require_draws()?;
    let mut tops = Vec::with_capacity(COMBINATION_ARITIES.len());
    for arity in COMBINATION_ARITIES {
        let table = combination_table(store.draws(), arity)?;
        tops.push((arity, table.top_n(top)));
    }
    display_combinations(&tops);
    Ok(())
}

pub(crate) fn cmd_trend(store: &DrawStore, window: RecencyWindow) -> Result<()> {
    store.require_draws()?;
    let trend = recent_trend(store, window);
    display_trend(window.days(), store.recent(window).len(), &trend);
    Ok(())
}

pub(crate) fn cmd_gaps(store: &DrawStore, number: u8) -> Result<()> {
    store.require_draws()?;
    let seq = delay_sequence(store.draws(), Pool::Principal, number);
    let histogram = gap_histogram(&seq.gaps, GAP_BIN);
    display_gaps(&seq, &histogram, GAP_BIN);
    Ok(())
}

pub(crate) fn cmd_advanced(store: &DrawStore) -> Result<()> {
    store.require_draws()?;
    let draws = store.draws();
    display_profile(
        &parity_distribution(draws),
        &sum_distribution(draws, SUM_BIN),
        SUM_BIN,
        &consecutive_distribution(draws),
    );
    display_delays(&current_delays(draws, Pool::Principal));
    Ok(())
}

pub(crate) fn cmd_suggest(store: &DrawStore, strategy: Option<Strategy>, seed: Option<u64>) -> Result<()> {
    store.require_draws()?;
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let principal = frequency_table(store.draws(), Pool::Principal);
    let bonus = frequency_table(store.draws(), Pool::Bonus);
    let triples = combination_table(store.draws(), 3)?;
    let suggester = Suggester::new(&principal, &bonus, &triples)?;

    let strategies = match strategy {
        Some(s) => vec![s],
        None => Strategy::ALL.to_vec(),
    };

    let mut grids = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        match suggester.grid(strategy, &mut rng) {
            Ok(grid) => grids.push(grid),
            Err(e) => {
                log::warn!("Stratégie {:?} en échec : {}", strategy, e);
                println!("{} : impossible de générer une grille ({})", strategy, e);
            }
        }
    }

    if !grids.is_empty() {
        display_grids(&grids);
    }
    Ok(())
}

pub(crate) fn cmd_add(conn: &Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let raw_date = interactive::prompt("Date (JJ/MM/AAAA) : ")?;
    let date = import::parse_date(&raw_date)?;
    let balls = interactive::prompt_balls()?;
    let bonus = interactive::prompt_bonus()?;

    let draw = Draw::new(date, balls, bonus)?;

    println!("\nTirage à insérer :");
    display_draws(std::slice::from_ref(&draw));

    let confirm = interactive::prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Un tirage existe déjà à cette date (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}
