use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::GenerationError;

/// Options for [`generate_catalog`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogOptions {
    pub seed: u64,
    /// Multiplier applied to every category's default row count.
    pub scale: f64,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            scale: 1.0,
        }
    }
}

/// One catalog row, serialized with the column names the product service
/// imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub item_sku: String,
    pub product_name: String,
    pub product_price: f64,
    pub product_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Phone,
    Laptop,
    Shoe,
    Clothing,
    Cosmetic,
    Electronics,
    Home,
    Sports,
    Book,
    Toy,
}

/// Category, default row count and price range, in output order.
const DISTRIBUTION: [(Kind, usize, (f64, f64)); 10] = [
    (Kind::Phone, 10_000, (200.0, 1500.0)),
    (Kind::Laptop, 8_000, (400.0, 3500.0)),
    (Kind::Shoe, 8_000, (30.0, 250.0)),
    (Kind::Clothing, 8_000, (15.0, 200.0)),
    (Kind::Cosmetic, 6_000, (5.0, 80.0)),
    (Kind::Electronics, 3_000, (20.0, 2000.0)),
    (Kind::Home, 2_000, (10.0, 500.0)),
    (Kind::Sports, 2_000, (15.0, 300.0)),
    (Kind::Book, 2_000, (8.0, 50.0)),
    (Kind::Toy, 1_000, (10.0, 150.0)),
];

const PHONE_BRANDS: &[&str] = &[
    "iPhone", "Samsung Galaxy", "Google Pixel", "OnePlus", "Xiaomi", "Huawei", "Oppo", "Vivo",
    "Realme", "Motorola",
];
const PHONE_MODELS: &[&str] = &[
    "Pro", "Max", "Ultra", "Plus", "Mini", "SE", "Lite", "Note", "Edge", "Fold",
];
const PHONE_STORAGE: &[&str] = &["64GB", "128GB", "256GB", "512GB", "1TB"];
const PHONE_COLORS: &[&str] = &[
    "Black", "White", "Blue", "Red", "Green", "Purple", "Gold", "Silver", "Pink", "Gray",
];

const LAPTOP_BRANDS: &[&str] = &[
    "MacBook", "Dell XPS", "HP Spectre", "Lenovo ThinkPad", "ASUS ROG", "Acer Predator", "MSI",
    "Razer", "Surface", "LG Gram",
];
const LAPTOP_MODELS: &[&str] = &[
    "Pro", "Air", "Gaming", "Ultra", "Elite", "Premium", "Standard", "Workstation",
];
const LAPTOP_CPUS: &[&str] = &[
    "Intel i5", "Intel i7", "Intel i9", "AMD Ryzen 5", "AMD Ryzen 7", "AMD Ryzen 9", "M1", "M2",
    "M3",
];
const LAPTOP_RAM: &[&str] = &["8GB", "16GB", "32GB", "64GB"];
const LAPTOP_STORAGE: &[&str] = &["256GB SSD", "512GB SSD", "1TB SSD", "2TB SSD"];

const SHOE_BRANDS: &[&str] = &[
    "Nike", "Adidas", "Puma", "Reebok", "New Balance", "Converse", "Vans", "Skechers",
    "Under Armour", "Jordan",
];
const SHOE_TYPES: &[&str] = &[
    "Running", "Basketball", "Sneakers", "Casual", "Athletic", "Training", "Walking", "Hiking",
    "Football", "Tennis",
];
const SHOE_SIZES: &[&str] = &["7", "8", "9", "10", "11", "12", "13"];
const SHOE_COLORS: &[&str] = &[
    "Black", "White", "Red", "Blue", "Gray", "Green", "Orange", "Pink", "Yellow", "Multi",
];

const CLOTHING_TYPES: &[&str] = &[
    "T-Shirt", "Jeans", "Jacket", "Hoodie", "Dress", "Shirt", "Shorts", "Pants", "Sweater",
    "Blazer",
];
const CLOTHING_BRANDS: &[&str] = &[
    "Nike", "Adidas", "Levi's", "Zara", "H&M", "Gap", "Uniqlo", "Calvin Klein", "Tommy Hilfiger",
    "Ralph Lauren",
];
const CLOTHING_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];
const CLOTHING_COLORS: &[&str] = &[
    "Black", "White", "Navy", "Gray", "Red", "Blue", "Green", "Beige", "Brown", "Pink",
];
const CLOTHING_MATERIALS: &[&str] = &[
    "Cotton", "Polyester", "Denim", "Wool", "Linen", "Silk", "Leather",
];

const COSMETIC_TYPES: &[&str] = &[
    "Foundation", "Lipstick", "Mascara", "Eyeliner", "Eyeshadow", "Blush", "Concealer", "Powder",
    "Primer", "Highlighter",
];
const COSMETIC_BRANDS: &[&str] = &[
    "Maybelline", "L'Oreal", "MAC", "Revlon", "Covergirl", "NYX", "Elf", "Milani", "Wet n Wild",
    "Rimmel",
];
const COSMETIC_SHADES: &[&str] = &[
    "Natural", "Ivory", "Beige", "Tan", "Deep", "Rose", "Coral", "Nude", "Pink", "Red",
];

const ELECTRONICS_TYPES: &[&str] = &[
    "Headphones", "Speakers", "Smartwatch", "Tablet", "Camera", "TV", "Monitor", "Keyboard",
    "Mouse", "Webcam",
];
const ELECTRONICS_BRANDS: &[&str] = &[
    "Sony", "Bose", "Apple", "Samsung", "LG", "Canon", "Nikon", "Logitech", "Razer", "JBL",
];

const HOME_TYPES: &[&str] = &[
    "Lamp", "Pillow", "Blanket", "Curtains", "Rug", "Mirror", "Frame", "Vase", "Candle", "Clock",
];
const HOME_MATERIALS: &[&str] = &["Wood", "Metal", "Glass", "Fabric", "Ceramic", "Plastic"];

const SPORTS_TYPES: &[&str] = &[
    "Basketball", "Football", "Tennis Racket", "Yoga Mat", "Dumbbells", "Resistance Bands",
    "Jump Rope", "Water Bottle", "Gym Bag", "Fitness Tracker",
];
const SPORTS_BRANDS: &[&str] = &[
    "Nike", "Adidas", "Under Armour", "Wilson", "Spalding", "Yonex", "Head", "Babolat",
];

const BOOK_GENRES: &[&str] = &[
    "Fiction", "Non-Fiction", "Mystery", "Romance", "Sci-Fi", "Biography", "History",
    "Self-Help", "Business", "Cookbook",
];
const BOOK_FORMATS: &[&str] = &["Hardcover", "Paperback", "E-Book"];
const BOOK_TITLES: &[&str] = &[
    "The Journey", "Mystery Solved", "Love Story", "Future World", "Life Lessons",
    "Success Guide", "Adventure Tales", "History Revealed", "Cooking Mastery", "Business Secrets",
];

const TOY_TYPES: &[&str] = &[
    "Action Figure", "Board Game", "Puzzle", "LEGO Set", "Doll", "RC Car", "Building Blocks",
    "Art Supplies", "Musical Toy", "Educational Toy",
];
const TOY_AGE_GROUPS: &[&str] = &["0-3", "3-6", "6-12", "12+"];

/// Generate the full product catalog.
///
/// Rows carry a running 1-based index embedded in the SKU, so SKUs are
/// unique across categories.
pub fn generate_catalog(options: &CatalogOptions) -> Result<Vec<Product>, GenerationError> {
    if !options.scale.is_finite() || options.scale <= 0.0 {
        return Err(GenerationError::InvalidOptions(format!(
            "scale must be a positive number, got {}",
            options.scale
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut products = Vec::new();
    let mut index = 1_usize;

    for (kind, base_count, price_range) in DISTRIBUTION {
        let count = scaled(base_count, options.scale);
        for _ in 0..count {
            products.push(generate_product(&mut rng, kind, price_range, index));
            index += 1;
        }
        info!(event = "catalog_category_generated", category = ?kind, rows = count);
    }

    Ok(products)
}

fn scaled(count: usize, scale: f64) -> usize {
    ((count as f64) * scale).round() as usize
}

fn generate_product(
    rng: &mut ChaCha8Rng,
    kind: Kind,
    (min_price, max_price): (f64, f64),
    index: usize,
) -> Product {
    let (item_sku, product_name, product_description) = match kind {
        Kind::Phone => {
            let brand = pick(rng, PHONE_BRANDS);
            let model = pick(rng, PHONE_MODELS);
            let storage = pick(rng, PHONE_STORAGE);
            let color = pick(rng, PHONE_COLORS);
            (
                format!(
                    "PHN-{}-{}-{storage}-{}-{index:05}",
                    code(brand, 6),
                    code(model, usize::MAX),
                    code(color, 3)
                ),
                format!("{brand} {model} {storage} {color}"),
                format!(
                    "Premium {brand} {model} smartphone with {storage} storage in {color}. \
                     Features high-resolution display, advanced camera system, fast processor, \
                     and long-lasting battery."
                ),
            )
        }
        Kind::Laptop => {
            let brand = pick(rng, LAPTOP_BRANDS);
            let model = pick(rng, LAPTOP_MODELS);
            let cpu = pick(rng, LAPTOP_CPUS);
            let ram = pick(rng, LAPTOP_RAM);
            let storage = pick(rng, LAPTOP_STORAGE);
            (
                format!(
                    "LAP-{}-{}-{}-{ram}-{index:05}",
                    code(brand, 6),
                    code(model, usize::MAX),
                    code(cpu, 4)
                ),
                format!("{brand} {model} {cpu} {ram} {storage}"),
                format!(
                    "Powerful {brand} {model} laptop with {cpu} processor, {ram} RAM, and \
                     {storage} storage. Ideal for work, gaming, and creative projects."
                ),
            )
        }
        Kind::Shoe => {
            let brand = pick(rng, SHOE_BRANDS);
            let shoe_type = pick(rng, SHOE_TYPES);
            let size = pick(rng, SHOE_SIZES);
            let color = pick(rng, SHOE_COLORS);
            (
                format!(
                    "SHO-{}-{}-{size}-{}-{index:05}",
                    code(brand, 4),
                    code(shoe_type, 4),
                    code(color, 3)
                ),
                format!("{brand} {shoe_type} Shoes Size {size} {color}"),
                format!(
                    "Comfortable {brand} {} shoes in {} color, size {size}. Designed with \
                     superior cushioning and support for long-lasting wear.",
                    shoe_type.to_lowercase(),
                    color.to_lowercase()
                ),
            )
        }
        Kind::Clothing => {
            let garment = pick(rng, CLOTHING_TYPES);
            let brand = pick(rng, CLOTHING_BRANDS);
            let size = pick(rng, CLOTHING_SIZES);
            let color = pick(rng, CLOTHING_COLORS);
            let material = pick(rng, CLOTHING_MATERIALS);
            (
                format!(
                    "CLO-{}-{}-{size}-{}-{index:05}",
                    code(brand, 4),
                    code(garment, 4),
                    code(color, 3)
                ),
                format!("{brand} {garment} {size} {color} {material}"),
                format!(
                    "Stylish {brand} {} in {} color, size {size}. Made from premium {} material \
                     with a comfortable fit and modern design.",
                    garment.to_lowercase(),
                    color.to_lowercase(),
                    material.to_lowercase()
                ),
            )
        }
        Kind::Cosmetic => {
            let cosmetic = pick(rng, COSMETIC_TYPES);
            let brand = pick(rng, COSMETIC_BRANDS);
            let shade = pick(rng, COSMETIC_SHADES);
            (
                format!(
                    "COS-{}-{}-{}-{index:05}",
                    code(brand, 4),
                    code(cosmetic, 4),
                    code(shade, 3)
                ),
                format!("{brand} {cosmetic} {shade}"),
                format!(
                    "High-quality {brand} {} in {} shade. Long-lasting formula with smooth \
                     application. Cruelty-free and dermatologically tested.",
                    cosmetic.to_lowercase(),
                    shade.to_lowercase()
                ),
            )
        }
        Kind::Electronics => {
            let product = pick(rng, ELECTRONICS_TYPES);
            let brand = pick(rng, ELECTRONICS_BRANDS);
            (
                format!("ELE-{}-{}-{index:05}", code(brand, 4), code(product, 6)),
                format!("{brand} {product}"),
                format!(
                    "Premium {brand} {} with advanced features and superior quality. Designed \
                     for performance and durability.",
                    product.to_lowercase()
                ),
            )
        }
        Kind::Home => {
            let product = pick(rng, HOME_TYPES);
            let material = pick(rng, HOME_MATERIALS);
            (
                format!("HOM-{}-{}-{index:05}", code(material, 3), code(product, 4)),
                format!("{material} {product}"),
                format!(
                    "Beautiful {} {} for your home. Elegant design that complements any decor \
                     style.",
                    material.to_lowercase(),
                    product.to_lowercase()
                ),
            )
        }
        Kind::Sports => {
            let product = pick(rng, SPORTS_TYPES);
            let brand = if rng.random::<f64>() > 0.3 {
                pick(rng, SPORTS_BRANDS)
            } else {
                "Generic"
            };
            (
                format!("SPO-{}-{}-{index:05}", code(brand, 4), code(product, 6)),
                format!("{brand} {product}"),
                format!(
                    "Professional-grade {brand} {} for athletes and fitness enthusiasts. \
                     Durable construction designed for performance and longevity.",
                    product.to_lowercase()
                ),
            )
        }
        Kind::Book => {
            let genre = pick(rng, BOOK_GENRES);
            let format = pick(rng, BOOK_FORMATS);
            let title = pick(rng, BOOK_TITLES);
            (
                format!("BOK-{}-{}-{index:05}", code(genre, 4), code(format, 3)),
                format!("{title} - {genre} ({format})"),
                format!(
                    "Engaging {} book '{title}' in {} format. A must-read for fans of the genre.",
                    genre.to_lowercase(),
                    format.to_lowercase()
                ),
            )
        }
        Kind::Toy => {
            let toy = pick(rng, TOY_TYPES);
            let ages = pick(rng, TOY_AGE_GROUPS);
            (
                format!("TOY-{}-{}-{index:05}", code(toy, 6), ages.replace('-', "")),
                format!("{toy} for Ages {ages}"),
                format!(
                    "Fun and educational {} suitable for ages {ages}. Safe, durable, and \
                     designed to encourage creativity.",
                    toy.to_lowercase()
                ),
            )
        }
    };

    let price = rng.random_range(min_price..=max_price);
    Product {
        id: uuid::Builder::from_random_bytes(rng.random()).into_uuid(),
        item_sku,
        product_name,
        product_price: (price * 100.0).round() / 100.0,
        product_description,
    }
}

fn pick(rng: &mut ChaCha8Rng, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Uppercase SKU segment: alphanumerics only, truncated to `len` characters.
fn code(value: &str, len: usize) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(len)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strips_punctuation_and_truncates() {
        assert_eq!(code("Samsung Galaxy", 6), "SAMSUN");
        assert_eq!(code("Sci-Fi", 4), "SCIF");
        assert_eq!(code("L'Oreal", 4), "LORE");
        assert_eq!(code("Pro", usize::MAX), "PRO");
    }

    #[test]
    fn scale_rounds_counts() {
        assert_eq!(scaled(10_000, 0.001), 10);
        assert_eq!(scaled(1_000, 0.0005), 1);
    }
}
