use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use leloto_db::rusqlite::Connection;
use std::io::Read;
use std::path::Path;

use leloto_db::db::insert_draw;
use leloto_db::models::Draw;

/// Valeur de `numero_chance` pour les tirages sans numéro chance.
const NO_BONUS: i32 = -1;

const DATE_COLUMN: &str = "date_de_tirage";
const BALL_COLUMNS: [&str; 5] = ["boule_1", "boule_2", "boule_3", "boule_4", "boule_5"];
const BONUS_COLUMN: &str = "numero_chance";

/// Positions des colonnes utiles dans l'en-tête du fichier FDJ.
struct Columns {
    date: usize,
    balls: [usize; 5],
    bonus: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .with_context(|| format!("Colonne '{}' absente de l'en-tête", name))
        };
        Ok(Self {
            date: find(DATE_COLUMN)?,
            balls: [
                find(BALL_COLUMNS[0])?,
                find(BALL_COLUMNS[1])?,
                find(BALL_COLUMNS[2])?,
                find(BALL_COLUMNS[3])?,
                find(BALL_COLUMNS[4])?,
            ],
            bonus: find(BONUS_COLUMN)?,
        })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    for format in ["%d/%m/%Y", "%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    bail!("Format de date invalide: '{}'", raw)
}

/// `Ok(None)` pour un tirage sans numéro chance, écarté de l'analyse.
fn parse_record(record: &csv::StringRecord, columns: &Columns) -> Result<Option<Draw>> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let raw_bonus = get(columns.bonus)?;
    let bonus: i32 = raw_bonus
        .parse()
        .with_context(|| format!("Numéro chance invalide: '{}'", raw_bonus))?;
    if bonus == NO_BONUS {
        return Ok(None);
    }
    let bonus = u8::try_from(bonus)
        .with_context(|| format!("Numéro chance hors limites: {}", bonus))?;

    let date = parse_date(&get(columns.date)?)?;
    let balls: [u8; 5] = [
        get_u8(columns.balls[0])?,
        get_u8(columns.balls[1])?,
        get_u8(columns.balls[2])?,
        get_u8(columns.balls[3])?,
        get_u8(columns.balls[4])?,
    ];

    Ok(Some(Draw::new(date, balls, bonus)?))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub dropped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path, delimiter: u8) -> Result<ImportResult> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    let result = import_reader(conn, file, delimiter)?;
    log::info!(
        "Import de {:?} : {} insérés, {} doublons, {} sans numéro chance, {} erreurs",
        path, result.inserted, result.skipped, result.dropped, result.errors
    );
    Ok(result)
}

pub fn import_reader<R: Read>(conn: &Connection, input: R, delimiter: u8) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input);

    let columns = Columns::from_headers(reader.headers().context("En-tête CSV illisible")?)?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records;
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Erreur lecture ligne {}: {}", line, e);
                result.errors += 1;
                continue;
            }
        };
        match parse_record(&record, &columns) {
            Ok(Some(draw)) => match insert_draw(&tx, &draw) {
                Ok(true) => result.inserted += 1,
                Ok(false) => result.skipped += 1,
                Err(e) => {
                    log::warn!("Erreur insertion tirage {}: {}", line, e);
                    result.errors += 1;
                }
            },
            Ok(None) => result.dropped += 1,
            Err(e) => {
                log::warn!("Erreur parsing ligne {}: {:#}", line, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
