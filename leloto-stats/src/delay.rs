use leloto_db::models::{Draw, Pool};

/// Écarts entre apparitions successives d'un numéro et retard actuel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelaySequence {
    pub number: u8,
    pub appearances: u32,
    /// Distance en tirages entre deux apparitions consécutives (1 = tirages adjacents).
    pub gaps: Vec<u32>,
    /// Tirages écoulés depuis la dernière apparition (0 = sorti au dernier tirage).
    pub current_delay: u32,
}

impl DelaySequence {
    pub fn mean_gap(&self) -> Option<f64> {
        if self.gaps.is_empty() {
            return None;
        }
        Some(self.gaps.iter().map(|&g| g as f64).sum::<f64>() / self.gaps.len() as f64)
    }

    pub fn max_gap(&self) -> Option<u32> {
        self.gaps.iter().copied().max()
    }
}

/// `draws` doit être en ordre chronologique (plus ancien en premier).
pub fn delay_sequence(draws: &[Draw], pool: Pool, number: u8) -> DelaySequence {
    let mut gaps = Vec::new();
    let mut appearances = 0u32;
    let mut last_seen: Option<usize> = None;

    for (t, draw) in draws.iter().enumerate() {
        if pool.numbers_from(draw).contains(&number) {
            appearances += 1;
            if let Some(prev) = last_seen {
                gaps.push((t - prev) as u32);
            }
            last_seen = Some(t);
        }
    }

    let current_delay = match last_seen {
        Some(t) => (draws.len() - 1 - t) as u32,
        None => draws.len() as u32,
    };

    DelaySequence {
        number,
        appearances,
        gaps,
        current_delay,
    }
}

/// Retard actuel de chaque numéro du pool, par numéro croissant.
pub fn current_delays(draws: &[Draw], pool: Pool) -> Vec<(u8, u32)> {
    let mut delays = vec![0u32; pool.size()];

    for draw in draws {
        let numbers = pool.numbers_from(draw);
        for (i, delay) in delays.iter_mut().enumerate() {
            if numbers.contains(&((i + 1) as u8)) {
                *delay = 0;
            } else {
                *delay += 1;
            }
        }
    }

    pool.numbers().zip(delays).collect()
}

/// Histogramme des écarts par tranches de `bin_width` : (borne basse, effectif).
pub fn gap_histogram(gaps: &[u32], bin_width: u32) -> Vec<(u32, u32)> {
    let bin_width = bin_width.max(1);
    let Some(&max) = gaps.iter().max() else {
        return Vec::new();
    };

    let mut bins = vec![0u32; (max / bin_width) as usize + 1];
    for &g in gaps {
        bins[(g / bin_width) as usize] += 1;
    }
    bins.into_iter()
        .enumerate()
        .map(|(i, c)| (i as u32 * bin_width, c))
        .collect()
}
