//! Launch catalog.

use super::{InMemoryCatalog, Product};
use crate::availability::UnavailableRange;
use crate::money::{Currency, Money};
use chrono::{Days, NaiveDate};

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    per_day: i64,
    retail: i64,
    is_new: bool,
    description: &'static str,
}

const LAUNCH_PRODUCTS: [SeedProduct; 12] = [
    SeedProduct {
        id: "1",
        name: "Floral Print Maxi Dress",
        brand: "Gucci",
        category: "Dresses",
        per_day: 56,
        retail: 320,
        is_new: true,
        description: "Floor-length floral maxi for garden parties and summer evenings.",
    },
    SeedProduct {
        id: "2",
        name: "Classic Black Tuxedo",
        brand: "Armani",
        category: "Suits",
        per_day: 89,
        retail: 450,
        is_new: false,
        description: "Tailored black tuxedo for black-tie events.",
    },
    SeedProduct {
        id: "3",
        name: "Silk Evening Gown",
        brand: "Versace",
        category: "Dresses",
        per_day: 75,
        retail: 380,
        is_new: false,
        description: "Pure silk gown with a fluid drape.",
    },
    SeedProduct {
        id: "4",
        name: "Casual Linen Blazer",
        brand: "Zara",
        category: "Outerwear",
        per_day: 45,
        retail: 220,
        is_new: true,
        description: "Lightweight linen blazer for casual and semi-formal wear.",
    },
    SeedProduct {
        id: "5",
        name: "Sequin Cocktail Dress",
        brand: "Prada",
        category: "Dresses",
        per_day: 70,
        retail: 350,
        is_new: false,
        description: "Fully sequinned cocktail dress for parties.",
    },
    SeedProduct {
        id: "6",
        name: "Navy Blue Suit",
        brand: "Hugo Boss",
        category: "Suits",
        per_day: 85,
        retail: 420,
        is_new: false,
        description: "Modern-cut navy suit for business and formal occasions.",
    },
    SeedProduct {
        id: "7",
        name: "Crystal Embellished Clutch",
        brand: "Chanel",
        category: "Accessories",
        per_day: 30,
        retail: 150,
        is_new: true,
        description: "Evening clutch with crystal embellishment.",
    },
    SeedProduct {
        id: "8",
        name: "Leather Biker Jacket",
        brand: "Saint Laurent",
        category: "Outerwear",
        per_day: 55,
        retail: 275,
        is_new: false,
        description: "Lambskin biker jacket with asymmetric zip.",
    },
    SeedProduct {
        id: "9",
        name: "Velvet Formal Dress",
        brand: "Dolce & Gabbana",
        category: "Dresses",
        per_day: 60,
        retail: 300,
        is_new: false,
        description: "Deep velvet dress for winter formals.",
    },
    SeedProduct {
        id: "10",
        name: "Charcoal Gray Suit",
        brand: "Tom Ford",
        category: "Suits",
        per_day: 80,
        retail: 400,
        is_new: true,
        description: "Two-piece charcoal suit in fine wool.",
    },
    SeedProduct {
        id: "11",
        name: "Off-Shoulder Satin Gown",
        brand: "Valentino",
        category: "Dresses",
        per_day: 95,
        retail: 475,
        is_new: false,
        description: "Off-shoulder satin gown with a sweeping train.",
    },
    SeedProduct {
        id: "12",
        name: "Designer Bow Tie",
        brand: "Fendi",
        category: "Accessories",
        per_day: 15,
        retail: 75,
        is_new: false,
        description: "Silk bow tie to finish a formal look.",
    },
];

/// Product "1" has two booked windows relative to today.
const BOOKED_PRODUCT: &str = "1";
const BOOKED_WINDOWS: [(u64, u64); 2] = [(5, 8), (20, 22)];

pub(super) fn launch_catalog(today: NaiveDate) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();

    for (position, seed) in LAUNCH_PRODUCTS.iter().enumerate() {
        let mut product = Product::new(
            seed.id,
            seed.name,
            seed.brand,
            seed.category,
            Money::from_major(seed.per_day, Currency::INR),
        )
        .with_retail_price(Money::from_major(seed.retail, Currency::INR))
        .with_image(format!("/images/products/{}.jpg", seed.id))
        .with_description(seed.description)
        .with_position(position as i32 + 1);

        if seed.category == "Accessories" {
            product = product.with_sizes(["One Size"]);
        }
        if seed.is_new {
            product = product.mark_new();
        }
        catalog.insert(product);
    }

    for (from, to) in BOOKED_WINDOWS {
        if let (Some(start), Some(end)) = (
            today.checked_add_days(Days::new(from)),
            today.checked_add_days(Days::new(to)),
        ) {
            catalog.block(&BOOKED_PRODUCT.into(), UnavailableRange::new(start, end));
        }
    }

    catalog
}
