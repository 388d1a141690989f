//! Coins and fuel canisters scattered along the track

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{Spacing, Tuning};

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Fuel,
}

/// A collectible placed at a fixed world x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub x: f32,
    collected: bool,
}

impl Collectible {
    pub fn new(id: u32, kind: CollectibleKind, x: f32) -> Self {
        Self {
            id,
            kind,
            x,
            collected: false,
        }
    }

    pub fn collected(&self) -> bool {
        self.collected
    }

    /// Mark as collected. Returns true only on the first call.
    pub fn try_collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// A collectible that was just picked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub id: u32,
    pub kind: CollectibleKind,
    pub x: f32,
}

/// Coins and fuel canisters for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectibleField {
    /// Ascending x
    pub coins: Vec<Collectible>,
    /// Ascending x
    pub fuel_cans: Vec<Collectible>,
}

/// Place one entity per randomized step until the track runs out
fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    kind: CollectibleKind,
    spacing: &Spacing,
    track_length: f32,
    next_id: &mut u32,
) -> Vec<Collectible> {
    let mut items = Vec::new();
    let mut x = spacing.start;
    while x < track_length {
        items.push(Collectible::new(*next_id, kind, x));
        *next_id += 1;
        let next = x + rng.random_range(spacing.min..spacing.max);
        if !(next > x) {
            log::warn!("{:?} spacing {} can't advance past x={}", kind, spacing.min, x);
            break;
        }
        x = next;
    }
    items
}

impl CollectibleField {
    /// Scatter a fresh field. Coins and fuel use independent spacing and may overlap.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, track_length: f32, tuning: &Tuning) -> Self {
        let mut next_id = 1;
        let coins = scatter(
            rng,
            CollectibleKind::Coin,
            &tuning.coin_spacing,
            track_length,
            &mut next_id,
        );
        let fuel_cans = scatter(
            rng,
            CollectibleKind::Fuel,
            &tuning.fuel_spacing,
            track_length,
            &mut next_id,
        );
        log::debug!(
            "Scattered {} coins and {} fuel cans",
            coins.len(),
            fuel_cans.len()
        );
        Self { coins, fuel_cans }
    }

    /// Collect everything within pickup radius of `vehicle_x`
    ///
    /// Only entities flipping from uncollected to collected are returned, so
    /// applying the returned pickups can never double-count.
    pub fn collect_near(&mut self, vehicle_x: f32, tuning: &Tuning) -> Vec<Pickup> {
        let mut pickups = Vec::new();
        for (items, radius) in [
            (&mut self.coins, tuning.coin_radius),
            (&mut self.fuel_cans, tuning.fuel_radius),
        ] {
            for item in items.iter_mut() {
                if (item.x - vehicle_x).abs() < radius && item.try_collect() {
                    pickups.push(Pickup {
                        id: item.id,
                        kind: item.kind,
                        x: item.x,
                    });
                }
            }
        }
        pickups
    }

    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected()).count()
    }

    pub fn remaining_fuel(&self) -> usize {
        self.fuel_cans.iter().filter(|c| !c.collected()).count()
    }

    /// Iterate every collectible (coins first)
    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.coins.iter().chain(self.fuel_cans.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generation_spacing_within_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let field = CollectibleField::generate(&mut rng, tuning.track_length, &tuning);

        assert_eq!(field.coins[0].x, tuning.coin_spacing.start);
        assert_eq!(field.fuel_cans[0].x, tuning.fuel_spacing.start);
        for pair in field.coins.windows(2) {
            let gap = pair[1].x - pair[0].x;
            assert!(gap >= tuning.coin_spacing.min - 1e-3 && gap < tuning.coin_spacing.max + 1e-3);
        }
        for pair in field.fuel_cans.windows(2) {
            let gap = pair[1].x - pair[0].x;
            assert!(gap >= tuning.fuel_spacing.min - 1e-3 && gap < tuning.fuel_spacing.max + 1e-3);
        }
        assert!(field.iter().all(|c| c.x < tuning.track_length && !c.collected()));
    }

    #[test]
    fn test_stalled_spacing_stops_scattering() {
        let tuning = Tuning {
            coin_spacing: Spacing {
                start: 300.0,
                min: 1e-9,
                max: 2e-9,
            },
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let field = CollectibleField::generate(&mut rng, tuning.track_length, &tuning);
        assert_eq!(field.coins.len(), 1);
        assert!(!field.fuel_cans.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let field = CollectibleField::generate(&mut rng, tuning.track_length, &tuning);
        let mut ids: Vec<u32> = field.iter().map(|c| c.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_same_seed_same_field() {
        let tuning = Tuning::default();
        let a = CollectibleField::generate(&mut Pcg32::seed_from_u64(5), 5_000.0, &tuning);
        let b = CollectibleField::generate(&mut Pcg32::seed_from_u64(5), 5_000.0, &tuning);
        let xs_a: Vec<f32> = a.iter().map(|c| c.x).collect();
        let xs_b: Vec<f32> = b.iter().map(|c| c.x).collect();
        assert_eq!(xs_a, xs_b);
    }

    #[test]
    fn test_collect_is_idempotent() {
        let tuning = Tuning::default();
        let mut field = CollectibleField {
            coins: vec![Collectible::new(1, CollectibleKind::Coin, 1_000.0)],
            fuel_cans: Vec::new(),
        };

        // Sweep through the coin's radius frame by frame
        let mut total = 0;
        let mut x = 950.0;
        while x <= 1_050.0 {
            total += field.collect_near(x, &tuning).len();
            x += 2.5;
        }
        assert_eq!(total, 1);
        assert!(field.coins[0].collected());
        assert_eq!(field.remaining_coins(), 0);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let tuning = Tuning::default();
        let mut field = CollectibleField {
            coins: vec![Collectible::new(1, CollectibleKind::Coin, 1_000.0)],
            fuel_cans: vec![Collectible::new(2, CollectibleKind::Fuel, 1_000.0)],
        };
        // 35 away: outside the coin radius, inside the fuel radius
        let pickups = field.collect_near(1_035.0, &tuning);
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].kind, CollectibleKind::Fuel);
        assert_eq!(field.remaining_coins(), 1);
    }
}
