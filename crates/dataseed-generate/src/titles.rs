use std::collections::HashSet;

use dataseed_core::WorkItem;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::errors::GenerationError;

/// Options for [`generate_titles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleOptions {
    pub seed: u64,
    /// Approximate number of titles before de-duplication.
    pub target_total: usize,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            target_total: 10_000,
        }
    }
}

/// A generated product title and where it sits in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTitle {
    pub title: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub brand: Option<String>,
}

impl ProductTitle {
    /// Work item keyed by the title, carrying the taxonomy as metadata.
    pub fn to_work_item(&self) -> WorkItem {
        WorkItem::new(
            self.title.clone(),
            json!({
                "category": self.category,
                "subcategory": self.subcategory,
                "brand": self.brand,
            }),
        )
    }
}

struct Category {
    name: &'static str,
    brands: &'static [&'static str],
    subcategories: &'static [(&'static str, &'static [&'static str])],
}

const TAXONOMY: &[Category] = &[
    Category {
        name: "Electronics",
        brands: &[
            "Apple", "Samsung", "Sony", "LG Electronics", "Xiaomi", "Dell", "Lenovo", "ASUS",
            "Logitech", "Canon", "JBL", "Bose", "Anker", "Garmin",
        ],
        subcategories: &[
            ("Smartphones", &["Pro Max", "Ultra", "Plus", "Lite", "5G", "Fold"]),
            (
                "Laptops & Computers",
                &["Gaming Laptop", "Ultrabook", "Chromebook", "Workstation", "Mini PC"],
            ),
            (
                "Audio & Headphones",
                &["Wireless Headphones", "Earbuds", "Bluetooth Speaker", "Soundbar", "Microphone"],
            ),
            (
                "Smart Home",
                &["Smart Speaker", "Smart Light Bulb", "Smart Lock", "Security Camera", "Robot Vacuum"],
            ),
        ],
    },
    Category {
        name: "Fashion",
        brands: &[
            "Nike", "Adidas", "Puma", "Uniqlo", "Zara", "H&M", "New Balance", "Converse", "Vans",
            "Timberland", "Fossil", "Casio", "Samsonite", "Herschel",
        ],
        subcategories: &[
            ("Men's Clothing", &["T-Shirt", "Polo Shirt", "Jeans", "Chinos", "Hoodie", "Blazer"]),
            ("Women's Clothing", &["Blouse", "Dress", "Skirt", "Leggings", "Cardigan", "Jumpsuit"]),
            ("Shoes & Footwear", &["Running Shoes", "Sneakers", "Boots", "Sandals", "Loafers"]),
            ("Bags & Luggage", &["Backpack", "Handbag", "Tote Bag", "Carry-On", "Duffel Bag"]),
        ],
    },
    Category {
        name: "Home & Living",
        brands: &[
            "IKEA", "Muji", "Philips", "Panasonic", "Dyson", "Bosch", "KitchenAid", "Breville",
        ],
        subcategories: &[
            ("Furniture", &["Sofa", "Armchair", "Coffee Table", "Office Chair", "Bookshelf", "Desk"]),
            (
                "Kitchen & Dining",
                &["Cookware Set", "Knife Set", "Cutting Board", "Dinnerware Set", "Mixing Bowls"],
            ),
            ("Lighting", &["Table Lamp", "Floor Lamp", "Pendant Light", "LED Strip", "Desk Lamp"]),
            (
                "Home Appliances",
                &["Air Purifier", "Humidifier", "Fan", "Heater", "Water Purifier"],
            ),
        ],
    },
    Category {
        name: "Beauty & Health",
        brands: &[
            "L'Oréal", "Maybelline", "MAC", "Clinique", "Estée Lauder", "Innisfree", "Laneige",
            "Philips",
        ],
        subcategories: &[
            ("Skincare", &["Moisturizer", "Serum", "Cleanser", "Toner", "Sunscreen", "Eye Cream"]),
            ("Makeup & Cosmetics", &["Foundation", "Concealer", "Lipstick", "Mascara", "Blush"]),
            ("Hair Care", &["Shampoo", "Conditioner", "Hair Oil", "Hair Dryer", "Straightener"]),
            (
                "Vitamins & Supplements",
                &["Multivitamin", "Vitamin C", "Omega-3", "Protein Powder", "Collagen"],
            ),
        ],
    },
    Category {
        name: "Sports & Outdoor",
        brands: &[
            "Nike", "Adidas", "Under Armour", "Puma", "The North Face", "Patagonia", "Columbia",
            "Garmin",
        ],
        subcategories: &[
            (
                "Camping & Hiking",
                &["Tent", "Sleeping Bag", "Camping Stove", "Hiking Backpack", "Headlamp"],
            ),
            ("Cycling", &["Road Bike", "Mountain Bike", "Bike Helmet", "Bike Lock", "Bike Light"]),
            ("Racket Sports", &["Tennis Racket", "Badminton Racket", "Table Tennis Paddle"]),
            ("Martial Arts & Boxing", &["Boxing Gloves", "Punching Bag", "Hand Wraps", "Headgear"]),
        ],
    },
    Category {
        name: "Baby & Kids",
        brands: &["LEGO", "Hasbro", "Mattel", "Fisher-Price", "Hot Wheels", "Funko"],
        subcategories: &[
            ("Baby Gear & Furniture", &["Stroller", "Car Seat", "Crib", "High Chair", "Baby Monitor"]),
            ("Toys & Games", &["Action Figure", "Doll", "Board Game", "Puzzle", "Building Blocks"]),
            ("Feeding & Nursing", &["Baby Bottle", "Bottle Warmer", "Sippy Cup", "Bibs"]),
            ("Educational Toys", &["Learning Tablet", "Science Kit", "Coding Robot", "Art Set"]),
        ],
    },
    Category {
        name: "Automotive",
        brands: &["Bosch", "Stanley", "DeWalt", "Makita", "Milwaukee", "Black+Decker", "Garmin"],
        subcategories: &[
            ("Car Electronics", &["Dash Cam", "GPS Navigator", "Car Stereo", "OBD2 Scanner"]),
            ("Car Care & Maintenance", &["Car Wax", "Car Shampoo", "Glass Cleaner", "Detailing Kit"]),
            ("Interior Accessories", &["Car Seat Cover", "Floor Mats", "Sun Shade", "Phone Mount"]),
            ("Tools & Equipment", &["Socket Set", "Wrench Set", "Torque Wrench", "Tire Inflator"]),
        ],
    },
    Category {
        name: "Books & Media",
        brands: &["Penguin Books", "HarperCollins", "Random House", "Marvel", "DC Comics"],
        subcategories: &[
            ("Fiction", &["Novel", "Mystery Book", "Romance Novel", "Fantasy Book", "Thriller"]),
            ("Non-Fiction", &["Biography", "Self-Help Book", "Cookbook", "Travel Guide", "Memoir"]),
            ("Comics & Manga", &["Comic Book", "Manga Volume", "Graphic Novel", "Anime Art Book"]),
            ("Stationery", &["Notebook", "Journal", "Planner", "Pens", "Sticky Notes"]),
        ],
    },
    Category {
        name: "Food & Beverage",
        brands: &["Nespresso"],
        subcategories: &[
            ("Snacks & Confectionery", &["Chocolate Bar", "Cookies", "Nuts", "Granola Bar"]),
            ("Coffee & Tea", &["Coffee Beans", "Ground Coffee", "Tea Bags", "Matcha Powder"]),
            ("Condiments & Sauces", &["Soy Sauce", "Hot Sauce", "BBQ Sauce", "Olive Oil"]),
            ("Organic & Health Foods", &["Protein Bar", "Organic Cereal", "Plant-Based Milk"]),
        ],
    },
    Category {
        name: "Pet Supplies",
        brands: &[],
        subcategories: &[
            ("Dog Supplies", &["Dog Food", "Dog Treats", "Dog Bed", "Dog Leash", "Dog Toys"]),
            ("Cat Supplies", &["Cat Food", "Cat Litter", "Cat Tree", "Cat Toys", "Cat Carrier"]),
            ("Fish & Aquarium", &["Fish Tank", "Aquarium Filter", "Fish Food", "Air Pump"]),
            ("Small Pets", &["Hamster Cage", "Rabbit Hutch", "Exercise Wheel"]),
        ],
    },
];

const MODIFIERS: &[&[&str]] = &[
    &[
        "Premium", "Professional", "Deluxe", "Essential", "Classic", "Pro", "Elite", "Advanced",
        "Ultra", "Limited Edition", "Signature", "Original",
    ],
    &["Small", "Medium", "Large", "XL", "XXL", "Compact", "Mini", "Full-Size", "Travel-Size"],
    &[
        "Black", "White", "Navy Blue", "Gray", "Red", "Green", "Pink", "Brown", "Beige", "Purple",
        "Orange", "Yellow", "Multicolor",
    ],
    &[
        "Cotton", "Leather", "Stainless Steel", "Aluminum", "Bamboo", "Organic", "Recycled",
        "Synthetic", "Mesh", "Silicone",
    ],
    &[
        "Modern", "Vintage", "Minimalist", "Bohemian", "Industrial", "Scandinavian",
        "Contemporary", "Casual", "Formal", "Athletic",
    ],
    &[
        "Wireless", "Waterproof", "Portable", "Foldable", "Adjustable", "Rechargeable", "Smart",
        "Ergonomic", "Eco-Friendly", "Anti-Slip",
    ],
];

const DESCRIPTORS: &[&str] = &[
    "for Men", "for Women", "for Kids", "Set", "Bundle", "2024 Edition", "Version 2.0", "Plus",
    "Lite",
];

/// Generate product titles across the whole taxonomy.
///
/// Each category gets `target_total / categories` titles plus up to 50
/// extra, cycling through its products. Repeated titles keep only their
/// first occurrence.
pub fn generate_titles(options: &TitleOptions) -> Result<Vec<ProductTitle>, GenerationError> {
    if options.target_total == 0 {
        return Err(GenerationError::InvalidOptions(
            "target_total must be at least 1".to_string(),
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let per_category = options.target_total / TAXONOMY.len();
    let mut titles = Vec::new();

    for category in TAXONOMY {
        let target = per_category + rng.random_range(0..=50);
        let products: Vec<(&str, &str)> = category
            .subcategories
            .iter()
            .flat_map(|(subcategory, products)| {
                products.iter().map(move |product| (*subcategory, *product))
            })
            .collect();

        for (subcategory, product) in products.iter().cycle().take(target) {
            let brand = if !category.brands.is_empty() && rng.random::<f64>() > 0.3 {
                category.brands.choose(&mut rng).copied()
            } else {
                None
            };
            titles.push(ProductTitle {
                title: compose_title(&mut rng, brand, product),
                category: category.name.to_string(),
                subcategory: subcategory.to_string(),
                brand: brand.map(str::to_string),
            });
        }
        info!(event = "titles_category_generated", category = category.name, titles = target);
    }

    let generated = titles.len();
    let mut seen = HashSet::new();
    titles.retain(|title| seen.insert(title.title.clone()));
    info!(
        event = "titles_generated",
        generated,
        unique = titles.len(),
        duplicates = generated - titles.len(),
    );

    Ok(titles)
}

/// `[brand] [modifier] product [descriptor]`
fn compose_title(rng: &mut ChaCha8Rng, brand: Option<&str>, product: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(4);
    if let Some(brand) = brand {
        parts.push(brand);
    }
    if rng.random::<f64>() > 0.5 {
        if let Some(modifier) = MODIFIERS
            .choose(rng)
            .and_then(|group| group.choose(rng))
        {
            parts.push(*modifier);
        }
    }
    parts.push(product);
    if rng.random::<f64>() > 0.7 {
        if let Some(descriptor) = DESCRIPTORS.choose(rng) {
            parts.push(*descriptor);
        }
    }
    parts.join(" ")
}
