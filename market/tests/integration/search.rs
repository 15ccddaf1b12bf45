//! Search and listing order as seen by a signed-in customer.

use crate::common::MarketHarness;

fn names(views: &[auction_house::ProductView]) -> Vec<&str> {
    views.iter().map(|v| v.name.as_str()).collect()
}

#[test]
fn test_search_hides_own_products_and_sorts() {
    let harness = MarketHarness::new();
    let ann = harness.register("Ann", "ann@example.com");
    let bob = harness.register("Bob", "bob@example.com");

    harness.advertise(&ann, "Lamp", "$5.00");
    harness.advertise(&ann, "Bike", "$50.00");
    harness.advertise(&bob, "Apple", "$1.00");

    let for_bob = harness.house().search(&bob, "ALL").unwrap();
    assert_eq!(names(&for_bob), ["Bike", "Lamp"]);

    let for_ann = harness.house().search(&ann, "all").unwrap();
    assert_eq!(names(&for_ann), ["Apple"]);
}

#[test]
fn test_search_matches_description_case_insensitively() {
    let harness = MarketHarness::new();
    let ann = harness.register("Ann", "ann@example.com");
    let bob = harness.register("Bob", "bob@example.com");
    harness
        .house()
        .advertise(&ann, "Gadget", "eco-APPLE case", "$5.00".parse().unwrap())
        .unwrap();
    harness.advertise(&ann, "Pear", "$1.00");

    let hits = harness.house().search(&bob, "apple").unwrap();
    assert_eq!(names(&hits), ["Gadget"]);
    assert!(harness.house().search(&bob, "kiwi").unwrap().is_empty());
}

#[test]
fn test_same_seller_products_are_distinct() {
    let harness = MarketHarness::new();
    let ann = harness.register("Ann", "ann@example.com");
    let bob = harness.register("Bob", "bob@example.com");
    let bike = harness.advertise(&ann, "Bike", "$50.00");
    harness.advertise(&ann, "Lamp", "$5.00");

    harness.bid(&bob, bike, "$10.00").unwrap();

    let bids = harness.house().bid_products(&ann).unwrap();
    assert_eq!(names(&bids), ["Bike"]);
    assert_eq!(harness.house().advertised_products(&ann).unwrap().len(), 2);
}

#[test]
fn test_advertised_listing_sorted_by_name_description_price() {
    let harness = MarketHarness::new();
    let ann = harness.register("Ann", "ann@example.com");
    let house = harness.house();
    for (name, description, price) in [
        ("Chair", "oak", "$9.00"),
        ("Chair", "oak", "$3.00"),
        ("Chair", "beech", "$7.00"),
        ("Bench", "pine", "$1.00"),
    ] {
        house
            .advertise(&ann, name, description, price.parse().unwrap())
            .unwrap();
    }

    let listed: Vec<String> = house
        .advertised_products(&ann)
        .unwrap()
        .iter()
        .map(|v| format!("{} {} {}", v.name, v.description, v.price))
        .collect();
    assert_eq!(
        listed,
        [
            "Bench pine $1.00",
            "Chair beech $7.00",
            "Chair oak $3.00",
            "Chair oak $9.00"
        ]
    );
}
