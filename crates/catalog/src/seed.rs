//! Demo product list the catalog starts with.

use chrono::{DateTime, Utc};

use crate::product::{Product, ProductId};

struct SeedRow {
    id: &'static str,
    name: &'static str,
    price: f64,
    description: &'static str,
    image: &'static str,
    hint: &'static str,
    category: &'static str,
    in_stock: bool,
    discount: Option<u8>,
}

const SEED: &[SeedRow] = &[
    SeedRow {
        id: "1",
        name: "Organic Apples",
        price: 3.99,
        description: "Crisp and sweet organic apples, perfect for snacking.",
        image: "https://placehold.co/600x400.png",
        hint: "apples fruit",
        category: "fruits",
        in_stock: true,
        discount: Some(10),
    },
    SeedRow {
        id: "2",
        name: "Whole Wheat Bread",
        price: 4.49,
        description: "Freshly baked whole wheat bread, high in fiber.",
        image: "https://placehold.co/600x400.png",
        hint: "bread bakery",
        category: "bakery",
        in_stock: true,
        discount: None,
    },
    SeedRow {
        id: "3",
        name: "Free-Range Eggs",
        price: 5.99,
        description: "A dozen large free-range eggs from local farms.",
        image: "https://placehold.co/600x400.png",
        hint: "eggs dairy",
        category: "dairy",
        in_stock: true,
        discount: Some(5),
    },
    SeedRow {
        id: "4",
        name: "Almond Milk",
        price: 3.29,
        description: "Unsweetened almond milk, dairy free.",
        image: "https://placehold.co/600x400.png",
        hint: "milk almond",
        category: "dairy",
        in_stock: false,
        discount: None,
    },
    SeedRow {
        id: "5",
        name: "Fresh Spinach",
        price: 2.79,
        description: "Tender baby spinach leaves, washed and ready to eat.",
        image: "https://placehold.co/600x400.png",
        hint: "spinach greens",
        category: "vegetables",
        in_stock: true,
        discount: None,
    },
    SeedRow {
        id: "6",
        name: "Cheddar Cheese",
        price: 6.49,
        description: "Aged sharp cheddar cheese block.",
        image: "https://placehold.co/600x400.png",
        hint: "cheese dairy",
        category: "dairy",
        in_stock: true,
        discount: Some(15),
    },
    SeedRow {
        id: "7",
        name: "Bananas",
        price: 1.99,
        description: "A bunch of ripe yellow bananas.",
        image: "https://placehold.co/600x400.png",
        hint: "bananas fruit",
        category: "fruits",
        in_stock: true,
        discount: None,
    },
    SeedRow {
        id: "8",
        name: "Orange Juice",
        price: 4.99,
        description: "Freshly squeezed orange juice, no added sugar.",
        image: "https://placehold.co/600x400.png",
        hint: "juice orange",
        category: "beverages",
        in_stock: true,
        discount: None,
    },
    SeedRow {
        id: "9",
        name: "Carrots",
        price: 1.49,
        description: "Crunchy organic carrots.",
        image: "https://placehold.co/600x400.png",
        hint: "carrots vegetables",
        category: "vegetables",
        in_stock: false,
        discount: None,
    },
    SeedRow {
        id: "10",
        name: "Croissants",
        price: 5.49,
        description: "Buttery croissants baked this morning, pack of four.",
        image: "https://placehold.co/600x400.png",
        hint: "croissant pastry",
        category: "bakery",
        in_stock: true,
        discount: Some(20),
    },
    SeedRow {
        id: "11",
        name: "Green Tea",
        price: 3.79,
        description: "Organic green tea, twenty bags.",
        image: "https://placehold.co/600x400.png",
        hint: "tea beverage",
        category: "beverages",
        in_stock: true,
        discount: None,
    },
    SeedRow {
        id: "12",
        name: "Avocados",
        price: 10.99,
        description: "Ripe Hass avocados, bag of five.",
        image: "https://placehold.co/600x400.png",
        hint: "avocado fruit",
        category: "fruits",
        in_stock: true,
        discount: None,
    },
];

/// Materialize the demo products, all stamped with `now`.
pub fn seed_products(now: DateTime<Utc>) -> Vec<Product> {
    SEED.iter()
        .map(|row| Product {
            id: ProductId::new(row.id),
            name: row.name.to_string(),
            price: row.price,
            description: row.description.to_string(),
            image: row.image.to_string(),
            data_ai_hint: row.hint.to_string(),
            category: row.category.to_string(),
            in_stock: row.in_stock,
            discount: row.discount,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
