use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    date    TEXT PRIMARY KEY,
    ball_1  INTEGER NOT NULL,
    ball_2  INTEGER NOT NULL,
    ball_3  INTEGER NOT NULL,
    ball_4  INTEGER NOT NULL,
    ball_5  INTEGER NOT NULL,
    bonus   INTEGER NOT NULL
);
";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("leloto.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

/// Insère un tirage ; retourne `false` si la date existe déjà.
pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (date, ball_1, ball_2, ball_3, ball_4, ball_5, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            draw.date.format(DATE_FORMAT).to_string(),
            draw.balls[0],
            draw.balls[1],
            draw.balls[2],
            draw.balls[3],
            draw.balls[4],
            draw.bonus,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

/// Tout l'historique, du plus ancien au plus récent.
pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT date, ball_1, ball_2, ball_3, ball_4, ball_5, bonus
         FROM draws ORDER BY date ASC"
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            [
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
            ],
            row.get::<_, u8>(6)?,
        ))
    })?.collect::<Result<Vec<_>, _>>()?;

    let mut draws = Vec::with_capacity(rows.len());
    for (raw_date, balls, bonus) in rows {
        let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .with_context(|| format!("Date invalide en base : '{}'", raw_date))?;
        draws.push(Draw::new(date, balls, bonus)
            .with_context(|| format!("Tirage invalide en base au {}", raw_date))?);
    }
    log::debug!("{} tirages lus depuis la base", draws.len());
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draw(date: &str, balls: [u8; 5]) -> Draw {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap();
        Draw::new(date, balls, 3).unwrap()
    }

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_count() {
        let conn = memory_db();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw("2024-01-01", [1, 2, 3, 4, 5])).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_date_ignored() {
        let conn = memory_db();

        let inserted = insert_draw(&conn, &test_draw("2024-01-01", [1, 2, 3, 4, 5])).unwrap();
        assert!(inserted);
        let inserted = insert_draw(&conn, &test_draw("2024-01-01", [6, 7, 8, 9, 10])).unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_chronological_order() {
        let conn = memory_db();

        insert_draw(&conn, &test_draw("2024-01-01", [1, 2, 3, 4, 5])).unwrap();
        insert_draw(&conn, &test_draw("2024-01-08", [6, 7, 8, 9, 10])).unwrap();
        insert_draw(&conn, &test_draw("2024-01-03", [11, 12, 13, 14, 15])).unwrap();

        let draws = fetch_all_draws(&conn).unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].date.to_string(), "2024-01-01");
        assert_eq!(draws[1].date.to_string(), "2024-01-03");
        assert_eq!(draws[2].date.to_string(), "2024-01-08");
        assert_eq!(draws[2].balls, [6, 7, 8, 9, 10]);
        assert_eq!(draws[2].bonus, 3);
    }
}
