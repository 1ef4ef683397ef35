use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use chrono::{Days, NaiveDate};

/// Un tirage du Loto : 5 boules triées + numéro chance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub date: NaiveDate,
    pub balls: [u8; 5],
    pub bonus: u8,
}

impl Draw {
    /// Valide puis construit un tirage. Les boules sont stockées triées.
    pub fn new(date: NaiveDate, mut balls: [u8; 5], bonus: u8) -> Result<Self> {
        validate_draw(&balls, bonus)?;
        balls.sort();
        Ok(Self { date, balls, bonus })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    Principal,
    Bonus,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Principal => 49,
            Pool::Bonus => 10,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Principal => 5,
            Pool::Bonus => 1,
        }
    }

    pub fn numbers(&self) -> RangeInclusive<u8> {
        1..=self.size() as u8
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers().contains(&number)
    }

    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Principal => &draw.balls,
            Pool::Bonus => std::slice::from_ref(&draw.bonus),
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Principal => write!(f, "Numéros principaux"),
            Pool::Bonus => write!(f, "Numéros chance"),
        }
    }
}

pub fn validate_draw(balls: &[u8; 5], bonus: u8) -> Result<()> {
    for &b in balls {
        if !Pool::Principal.contains(b) {
            bail!("Boule {} hors limites (1-49)", b);
        }
    }
    if !Pool::Bonus.contains(bonus) {
        bail!("Numéro chance {} hors limites (1-10)", bonus);
    }
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if balls[i] == balls[j] {
                bail!("Boule en double : {}", balls[i]);
            }
        }
    }
    Ok(())
}

/// Jeu de tirages synthétiques, un tous les trois jours à partir du 2024-01-01.
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..n)
        .map(|i| {
            let base = (i % 9) as u8;
            Draw {
                date: start + Days::new(3 * i as u64),
                balls: [
                    base * 5 + 1,
                    base * 5 + 2,
                    base * 5 + 3,
                    base * 5 + 4,
                    base * 5 + 5,
                ],
                bonus: (i % 10) as u8 + 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], 1).is_ok());
        assert!(validate_draw(&[49, 48, 47, 46, 45], 10).is_ok());
    }

    #[test]
    fn test_validate_draw_ball_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5], 1).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 50], 1).is_err());
    }

    #[test]
    fn test_validate_draw_bonus_out_of_range() {
        assert!(validate_draw(&[1, 2, 3, 4, 5], 0).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5], 11).is_err());
    }

    #[test]
    fn test_validate_draw_duplicate_balls() {
        assert!(validate_draw(&[1, 1, 3, 4, 5], 1).is_err());
    }

    #[test]
    fn test_draw_new_sorts_balls() {
        let draw = Draw::new(date("2024-01-01"), [40, 3, 17, 9, 22], 4).unwrap();
        assert_eq!(draw.balls, [3, 9, 17, 22, 40]);
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(Pool::Principal.size(), 49);
        assert_eq!(Pool::Bonus.size(), 10);
        assert_eq!(Pool::Principal.numbers().count(), 49);
    }

    #[test]
    fn test_pool_numbers_from() {
        let draw = Draw::new(date("2024-01-01"), [1, 2, 3, 4, 5], 7).unwrap();
        assert_eq!(Pool::Principal.numbers_from(&draw), &[1, 2, 3, 4, 5]);
        assert_eq!(Pool::Bonus.numbers_from(&draw), &[7]);
    }

    #[test]
    fn test_make_test_draws_valid() {
        let draws = make_test_draws(40);
        for pair in draws.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        for d in &draws {
            assert!(validate_draw(&d.balls, d.bonus).is_ok());
        }
    }
}
