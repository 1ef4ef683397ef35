use rand::seq::{index, IndexedRandom};
use rand::{Rng, RngExt};

use leloto_db::models::Pool;

use crate::combination::CombinationTable;
use crate::error::{Result, StatsError};
use crate::frequency::FrequencyTable;

pub const GRID_SIZE: usize = 5;

const FREQUENT_POOL: usize = 15;
const MIXED_TOP_POOL: usize = 25;
const MIXED_TOP_PICK: usize = 3;
const COMBO_POOL: usize = 10;
const HOT_COLD_POOL: usize = 10;
const BALANCED_EVENS: usize = 2;
const BALANCED_ODDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// 5 numéros parmi les 15 plus fréquents
    Frequent,
    /// 3 parmi les 25 plus fréquents + 2 parmi les autres
    Mixed,
    /// Un trio fréquent complété par 2 numéros
    Combo,
    /// 2 pairs + 3 impairs, au moins un numéro froid
    Balanced,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Frequent,
        Strategy::Mixed,
        Strategy::Combo,
        Strategy::Balanced,
    ];
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Frequent => write!(f, "Numéros fréquents"),
            Strategy::Mixed => write!(f, "Mixte"),
            Strategy::Combo => write!(f, "Combinaisons fréquentes"),
            Strategy::Balanced => write!(f, "Équilibrée"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub strategy: Strategy,
    pub balls: [u8; GRID_SIZE],
    pub bonus: u8,
}

/// Tire `amount` numéros distincts de `pool`, sans remise.
pub fn sample_distinct<R: Rng + ?Sized>(pool: &[u8], amount: usize, rng: &mut R) -> Result<Vec<u8>> {
    if pool.len() < amount {
        return Err(StatsError::InsufficientDomain {
            needed: amount,
            available: pool.len(),
        });
    }
    Ok(index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect())
}

fn into_grid(mut numbers: Vec<u8>) -> Result<[u8; GRID_SIZE]> {
    numbers.sort();
    numbers.dedup();
    let available = numbers.len();
    <[u8; GRID_SIZE]>::try_from(numbers).map_err(|_| StatsError::DomainExhausted {
        needed: GRID_SIZE,
        available,
    })
}

/// Deux corrections indépendantes : un numéro chaud si aucun n'est présent,
/// puis un numéro froid si aucun n'est présent. La seconde peut écraser la
/// case de la première, seule la présence d'un numéro froid est donc garantie.
fn patch_hot_cold<R: Rng + ?Sized>(grid: &mut [u8], hot: &[u8], cold: &[u8], rng: &mut R) {
    if grid.is_empty() {
        return;
    }
    for patch in [hot, cold] {
        if grid.iter().any(|n| patch.contains(n)) {
            continue;
        }
        if let Some(&number) = patch.choose(rng) {
            let slot = rng.random_range(0..grid.len());
            grid[slot] = number;
        }
    }
}

/// Générateur de grilles à partir des tables de fréquences et des trios.
///
/// Le hasard vient toujours du `rng` passé à chaque appel : avec un
/// générateur seedé, le résultat (ou l'erreur) est reproductible.
pub struct Suggester<'a> {
    principal: &'a FrequencyTable,
    bonus: &'a FrequencyTable,
    triples: &'a CombinationTable,
}

impl<'a> Suggester<'a> {
    pub fn new(
        principal: &'a FrequencyTable,
        bonus: &'a FrequencyTable,
        triples: &'a CombinationTable,
    ) -> Result<Self> {
        if triples.arity() != 3 {
            return Err(StatsError::InvalidArity(triples.arity()));
        }
        Ok(Self {
            principal,
            bonus,
            triples,
        })
    }

    fn domain(&self) -> impl Iterator<Item = u8> {
        self.principal.pool().numbers()
    }

    pub fn grid<R: Rng + ?Sized>(&self, strategy: Strategy, rng: &mut R) -> Result<Grid> {
        let balls = self.balls(strategy, rng)?;
        let bonus = self.bonus_number(strategy, rng)?;
        Ok(Grid {
            strategy,
            balls,
            bonus,
        })
    }

    pub fn balls<R: Rng + ?Sized>(&self, strategy: Strategy, rng: &mut R) -> Result<[u8; GRID_SIZE]> {
        match strategy {
            Strategy::Frequent => self.frequent(rng),
            Strategy::Mixed => self.mixed(rng),
            Strategy::Combo => self.combo(rng),
            Strategy::Balanced => self.balanced(rng),
        }
    }

    pub fn frequent<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[u8; GRID_SIZE]> {
        let candidates = self.principal.top_n(FREQUENT_POOL);
        into_grid(sample_distinct(&candidates, GRID_SIZE, rng)?)
    }

    pub fn mixed<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[u8; GRID_SIZE]> {
        let top = self.principal.top_n(MIXED_TOP_POOL);
        let rest: Vec<u8> = self.domain().filter(|n| !top.contains(n)).collect();
        let rest_pick = GRID_SIZE - MIXED_TOP_PICK;

        if top.len() < MIXED_TOP_PICK || rest.len() < rest_pick {
            return Err(StatsError::DomainExhausted {
                needed: GRID_SIZE,
                available: top.len().min(MIXED_TOP_PICK) + rest.len().min(rest_pick),
            });
        }

        let mut grid = sample_distinct(&top, MIXED_TOP_PICK, rng)?;
        grid.extend(sample_distinct(&rest, rest_pick, rng)?);
        into_grid(grid)
    }

    pub fn combo<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[u8; GRID_SIZE]> {
        let triples = self.triples.top_n(COMBO_POOL);
        let (base, _) = triples
            .choose(rng)
            .ok_or(StatsError::InsufficientDomain { needed: 1, available: 0 })?;

        let rest: Vec<u8> = self.domain().filter(|n| !base.contains(n)).collect();
        let mut grid = base.clone();
        grid.extend(sample_distinct(&rest, GRID_SIZE - base.len(), rng)?);
        into_grid(grid)
    }

    /// 2 pairs + 3 impairs, puis les corrections chaud/froid de `patch_hot_cold`.
    pub fn balanced<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[u8; GRID_SIZE]> {
        let mut grid = self.parity_base(rng)?;
        let hot = self.principal.top_n(HOT_COLD_POOL);
        let cold = self.principal.bottom_n(HOT_COLD_POOL);
        patch_hot_cold(&mut grid, &hot, &cold, rng);
        into_grid(grid)
    }

    fn parity_base<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let evens: Vec<u8> = self.domain().filter(|n| n % 2 == 0).collect();
        let odds: Vec<u8> = self.domain().filter(|n| n % 2 == 1).collect();

        let mut grid = sample_distinct(&evens, BALANCED_EVENS, rng)?;
        grid.extend(sample_distinct(&odds, BALANCED_ODDS, rng)?);
        Ok(grid)
    }

    pub fn bonus_number<R: Rng + ?Sized>(&self, strategy: Strategy, rng: &mut R) -> Result<u8> {
        let candidates = match strategy {
            Strategy::Frequent => self.bonus.top_n(3),
            Strategy::Mixed => self.bonus.top_n(5),
            Strategy::Combo | Strategy::Balanced => Pool::Bonus.numbers().collect(),
        };
        candidates
            .choose(rng)
            .copied()
            .ok_or(StatsError::InsufficientDomain { needed: 1, available: 0 })
    }
}
