//! Sample measurements used to build the pricing grid.

use super::entities::{Category, MeasurementSeed, Origin};

pub const MEASUREMENTS: &[MeasurementSeed] = &[
    MeasurementSeed {
        size: "175/70 R13",
        brand: "Pirelli",
        category: Category::Passenger,
        origin: Origin::Domestic,
        base_cost: 289.90,
    },
    MeasurementSeed {
        size: "205/55 R16",
        brand: "Linglong",
        category: Category::Passenger,
        origin: Origin::Imported,
        base_cost: 342.50,
    },
    MeasurementSeed {
        size: "265/70 R16",
        brand: "Goodyear",
        category: Category::LightTruck,
        origin: Origin::Nationalized,
        base_cost: 698.00,
    },
    MeasurementSeed {
        size: "225/65 R17",
        brand: "Michelin",
        category: Category::Suv,
        origin: Origin::Imported,
        base_cost: 812.40,
    },
    MeasurementSeed {
        size: "295/80 R22.5",
        brand: "Bridgestone",
        category: Category::Truck,
        origin: Origin::Domestic,
        base_cost: 2_145.00,
    },
    MeasurementSeed {
        size: "275/80 R22.5",
        brand: "Triangle",
        category: Category::Truck,
        origin: Origin::Imported,
        base_cost: 1_589.00,
    },
    MeasurementSeed {
        size: "18.4-30",
        brand: "Titan",
        category: Category::Agricultural,
        origin: Origin::Nationalized,
        base_cost: 4_320.00,
    },
    MeasurementSeed {
        size: "17.5-25",
        brand: "Magna",
        category: Category::OffTheRoad,
        origin: Origin::Imported,
        base_cost: 5_980.00,
    },
    MeasurementSeed {
        size: "1000-20",
        brand: "Levorin",
        category: Category::InnerTube,
        origin: Origin::Domestic,
        base_cost: 96.30,
    },
];

/// First `count` measurements of the catalog, or all of them.
pub fn sample(count: Option<usize>) -> &'static [MeasurementSeed] {
    match count {
        Some(count) => &MEASUREMENTS[..count.min(MEASUREMENTS.len())],
        None => MEASUREMENTS,
    }
}
