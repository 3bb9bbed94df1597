use product_catalog::models::{Category, Product};
use rand::Rng;
use rust_decimal::Decimal;

const NAMES: &[&str] = &[
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const CATEGORIES: &[Category] = &[
    Category::Cloths,
    Category::Food,
    Category::Housewares,
    Category::Automotive,
    Category::Tools,
];

pub fn product() -> Product {
    let mut rng = rand::thread_rng();
    let name = NAMES[rng.gen_range(0..NAMES.len())];
    let cents: i64 = rng.gen_range(50..10_000);

    Product {
        name: name.to_string(),
        description: format!("A quality {}", name.to_lowercase()),
        price: Decimal::new(cents, 2),
        available: rng.gen_bool(0.5),
        category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())],
        ..Product::default()
    }
}

pub fn batch(count: usize) -> Vec<Product> {
    (0..count).map(|_| product()).collect()
}
