use leloto_db::models::Draw;

/// Nombre de boules impaires du tirage (0 à 5).
pub fn parity_count(draw: &Draw) -> usize {
    draw.balls.iter().filter(|&&b| b % 2 == 1).count()
}

pub fn sum_of_draw(draw: &Draw) -> u32 {
    draw.balls.iter().map(|&b| b as u32).sum()
}

/// Paires de numéros consécutifs dans une grille triée (0 à 4).
pub fn consecutive_pair_count(sorted_balls: &[u8; 5]) -> usize {
    sorted_balls.windows(2).filter(|w| w[0].checked_add(1) == Some(w[1])).count()
}

/// Effectif par nombre de boules impaires : index = nombre d'impairs.
pub fn parity_distribution(draws: &[Draw]) -> [u32; 6] {
    let mut dist = [0u32; 6];
    for draw in draws {
        dist[parity_count(draw)] += 1;
    }
    dist
}

/// Effectif par nombre de paires consécutives : index = nombre de paires.
pub fn consecutive_distribution(draws: &[Draw]) -> [u32; 5] {
    let mut dist = [0u32; 5];
    for draw in draws {
        dist[consecutive_pair_count(&draw.balls)] += 1;
    }
    dist
}

/// Répartition des sommes par tranches de `bin_width`, tranches vides incluses
/// entre la plus petite et la plus grande somme observée.
pub fn sum_distribution(draws: &[Draw], bin_width: u32) -> Vec<(u32, u32)> {
    let bin_width = bin_width.max(1);
    let sums: Vec<u32> = draws.iter().map(sum_of_draw).collect();
    let (Some(&min), Some(&max)) = (sums.iter().min(), sums.iter().max()) else {
        return Vec::new();
    };

    let first = min / bin_width;
    let mut bins = vec![0u32; (max / bin_width - first) as usize + 1];
    for s in sums {
        bins[(s / bin_width - first) as usize] += 1;
    }
    bins.into_iter()
        .enumerate()
        .map(|(i, c)| ((first + i as u32) * bin_width, c))
        .collect()
}
