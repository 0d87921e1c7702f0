//! Listing fixtures for integration tests.

#![allow(dead_code)]

use mongodb::bson::{DateTime, Document, doc};

/// Listings with varied rooms and review dates for `find` tests.
///
/// Review dates are distinct so the expected order is unambiguous.
pub fn room_search_listings() -> Vec<Document> {
    let rows: [(&str, i32, i32, i64); 8] = [
        ("Studio Nook", 0, 1, 1),
        ("Garden Flat", 1, 1, 2),
        ("Family Terrace", 4, 2, 3),
        ("Harbour Mansion", 6, 4, 4),
        ("Beach House", 4, 3, 5),
        ("Dormitory", 8, 1, 6),
        ("Country Manor", 5, 2, 7),
        ("Penthouse", 4, 2, 8),
    ];
    rows.into_iter()
        .map(|(name, bedrooms, bathrooms, day)| {
            doc! {
                "name": name,
                "bedrooms": bedrooms,
                "bathrooms": bathrooms,
                "last_review": DateTime::from_millis(day * 86_400_000),
            }
        })
        .collect()
}

fn sydney(name: &str, suburb: Option<&str>, bedrooms: i32, room_type: &str, price: f64) -> Document {
    let mut address = doc! { "country": "Australia", "market": "Sydney" };
    if let Some(suburb) = suburb {
        address.insert("suburb", suburb);
    }
    doc! {
        "name": name,
        "bedrooms": bedrooms,
        "room_type": room_type,
        "price": price,
        "address": address,
    }
}

/// Sydney one-bedroom listings plus rows the cheapest-suburbs match must skip.
///
/// Qualifying averages: Rozelle 80, Manly 97.5, Newtown 110, Bondi 150.
pub fn sydney_listings() -> Vec<Document> {
    vec![
        sydney("Bondi 1", Some("Bondi"), 1, "Entire home/apt", 140.0),
        sydney("Bondi 2", Some("Bondi"), 1, "Entire home/apt", 160.0),
        sydney("Manly 1", Some("Manly"), 1, "Entire home/apt", 90.0),
        sydney("Manly 2", Some("Manly"), 1, "Entire home/apt", 105.0),
        sydney("Newtown 1", Some("Newtown"), 1, "Entire home/apt", 110.0),
        sydney("Rozelle 1", Some("Rozelle"), 1, "Entire home/apt", 80.0),
        // Skipped: wrong room type, too many bedrooms, empty or missing suburb.
        sydney("Rozelle room", Some("Rozelle"), 1, "Private room", 10.0),
        sydney("Bondi family", Some("Bondi"), 3, "Entire home/apt", 20.0),
        sydney("No suburb", Some(""), 1, "Entire home/apt", 5.0),
        sydney("Missing suburb", None, 1, "Entire home/apt", 5.0),
        doc! {
            "name": "Melbourne 1",
            "bedrooms": 1,
            "room_type": "Entire home/apt",
            "price": 1.0,
            "address": { "country": "Australia", "market": "Melbourne", "suburb": "Fitzroy" },
        },
    ]
}
