//! Bid acceptance and delivery attachment.

use auction_house::{MarketError, ProductId, ProductStatus};

use crate::common::{amount, MarketHarness};

fn setup() -> (MarketHarness, ProductId) {
    let harness = MarketHarness::new();
    let ann = harness.register_with_home("Ann", "ann@example.com");
    harness.register_with_home("Bob", "bob@example.com");
    harness.register_with_home("Cy", "cy@example.com");
    let bike = harness.advertise(&ann, "Bike", "$50.00");
    (harness, bike)
}

#[test]
fn test_first_bid_below_asking_price_is_accepted() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");

    let receipt = harness.bid(&bob, bike, "$1.00").unwrap();
    assert_eq!(receipt.amount, amount("$1.00"));
    assert_eq!(receipt.bidder_name, "Bob");
    assert!(receipt.delivery.is_none());
}

#[test]
fn test_replacement_must_be_strictly_higher() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    let cy = crate::common::email("cy@example.com");
    harness.bid(&bob, bike, "$10.00").unwrap();

    for low in ["$10.00", "$9.99"] {
        let err = harness.bid(&cy, bike, low).unwrap_err();
        assert!(matches!(err, MarketError::BidTooLow { current } if current == amount("$10.00")));
    }

    let receipt = harness.bid(&cy, bike, "$10.01").unwrap();
    assert_eq!(receipt.bidder_email, "cy@example.com");

    let seller_view = harness
        .house()
        .bid_products(&crate::common::email("ann@example.com"))
        .unwrap();
    assert_eq!(seller_view[0].bidder_name.as_deref(), Some("Cy"));
    assert_eq!(seller_view[0].bid_amount, Some(amount("$10.01")));
    assert_eq!(seller_view[0].status, ProductStatus::BidInProgress);
}

#[test]
fn test_current_bidder_may_outbid_themselves() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    harness.bid(&bob, bike, "$10.00").unwrap();
    let receipt = harness.bid(&bob, bike, "$12.00").unwrap();
    assert_eq!(receipt.amount, amount("$12.00"));
}

#[test]
fn test_zero_bid_is_rejected() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    let err = harness.bid(&bob, bike, "$0.00").unwrap_err();
    assert!(matches!(err, MarketError::Validation(_)));
}

#[test]
fn test_seller_cannot_bid_on_own_product() {
    let (harness, bike) = setup();
    let ann = crate::common::email("ann@example.com");
    assert!(matches!(
        harness.bid(&ann, bike, "$60.00"),
        Err(MarketError::InvalidState(_))
    ));
}

#[test]
fn test_unknown_product_and_bidder() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    assert!(matches!(
        harness.bid(&bob, ProductId(999), "$1.00"),
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        harness.bid(&crate::common::email("ghost@example.com"), bike, "$1.00"),
        Err(MarketError::NotFound(_))
    ));
}

#[test]
fn test_delivery_is_replaceable_by_the_winning_bidder() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    harness.bid(&bob, bike, "$20.00").unwrap();

    let home = harness
        .house()
        .home_address(&bob)
        .unwrap()
        .expect("home address");
    let receipt = harness
        .house()
        .attach_delivery(&bob, bike, home.into())
        .unwrap();
    assert_eq!(
        receipt.delivery.as_deref(),
        Some("Deliver to 12 Queen St, Brisbane QLD 4000")
    );

    let receipt = harness
        .house()
        .attach_delivery(&bob, bike, harness.collection(2))
        .unwrap();
    assert!(receipt.delivery.unwrap().starts_with("Pick up between "));
}

#[test]
fn test_outbid_customer_cannot_attach_delivery() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    let cy = crate::common::email("cy@example.com");
    harness.bid(&bob, bike, "$20.00").unwrap();
    harness.bid(&cy, bike, "$25.00").unwrap();

    assert!(matches!(
        harness
            .house()
            .attach_delivery(&bob, bike, harness.collection(2)),
        Err(MarketError::InvalidState(_))
    ));
}

#[test]
fn test_collection_window_bounds() {
    let harness = MarketHarness::new();
    let now = auction_house::TimeProvider::now(harness.time());
    let hour = chrono::Duration::hours(1);
    let house = harness.house();

    assert!(house.collection_window(now + hour, now + hour * 2).is_ok());
    assert!(house
        .collection_window(now + hour - chrono::Duration::seconds(1), now + hour * 3)
        .is_err());
    assert!(house
        .collection_window(now + hour * 2, now + hour * 2 + chrono::Duration::minutes(59))
        .is_err());

    // The window is validated against the current clock.
    harness.time().advance(hour);
    assert!(house.collection_window(now + hour, now + hour * 2).is_err());
}

#[test]
fn test_failed_bid_with_delivery_changes_nothing() {
    let (harness, bike) = setup();
    let bob = crate::common::email("bob@example.com");
    let cy = crate::common::email("cy@example.com");
    harness.bid_and_collect(&bob, bike, "$30.00");

    let err = harness
        .house()
        .place_bid_with_delivery(&cy, bike, amount("$30.00"), harness.collection(5))
        .unwrap_err();
    assert!(matches!(err, MarketError::BidTooLow { .. }));

    let view = &harness.house().search(&cy, "bike").unwrap()[0];
    assert_eq!(view.bidder_name.as_deref(), Some("Bob"));
}
