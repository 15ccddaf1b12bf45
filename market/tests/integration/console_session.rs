//! Scripted console sessions.

use auction_house::marketplace::delivery::COLLECTION_TIME_FORMAT;
use auction_house::{MarketError, TimeProvider};
use chrono::Duration;

use crate::common::{email, MarketHarness};

const HOME_ADDRESS: &str = "\n12\nQueen\nSt\nBrisbane\n4000\nQLD\n";

fn sign_in(mail: &str) -> String {
    format!("2\n{mail}\nSecret1!\n")
}

fn register(name: &str, mail: &str) -> String {
    format!("1\n{name}\n{mail}\nSecret1!\n")
}

#[test]
fn test_full_sale_through_menus() {
    let harness = MarketHarness::new();
    let script = [
        register("Ann", "ann@example.com"),
        register("Bob", "bob@example.com"),
        // Ann: first sign-in records a home address, then advertises.
        sign_in("ann@example.com"),
        HOME_ADDRESS.to_string(),
        "1\nBike\nRed bike\n$50.00\n6\n".to_string(),
        // Bob: bids with delivery to his home address.
        sign_in("bob@example.com"),
        HOME_ADDRESS.to_string(),
        "3\nall\nyes\n1\n$55.00\ndeliver\nyes\n6\n".to_string(),
        // Ann sells to the highest bidder.
        sign_in("ann@example.com"),
        "4\nyes\n1\n6\n".to_string(),
        // Bob checks his purchases.
        sign_in("bob@example.com"),
        "5\n6\n3\n".to_string(),
    ]
    .concat();

    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("Successfully registered as:\n\tAnn (ann@example.com)."));
    assert!(output.contains("Address successfully recorded as:\n\t12 Queen St, Brisbane QLD 4000"));
    assert!(output.contains("Successfully created advertisement:\n\tBike - Red bike $50.00"));
    assert!(output.contains("1\tBike\tRed bike\t$50.00\t-\t-\t-"));
    assert!(output.contains(
        "Bid successfully placed:\n\t$55.00\tBob\tbob@example.com\tDeliver to 12 Queen St, Brisbane QLD 4000"
    ));
    assert!(output.contains(
        "Product Bike sold to Bob for $55.00\n\tCollection arrangement: Deliver to 12 Queen St, Brisbane QLD 4000"
    ));
    assert!(output.contains(
        "1\tann@example.com\tBike\tRed bike\t$50.00\t$55.00\tDeliver to 12 Queen St, Brisbane QLD 4000"
    ));

    let purchases = harness.house().purchases(&email("bob@example.com")).unwrap();
    assert_eq!(purchases.len(), 1);
}

#[test]
fn test_bid_reprompts_until_strictly_higher() {
    let harness = MarketHarness::new();
    let ann = harness.register_with_home("Ann", "ann@example.com");
    let bob = harness.register_with_home("Bob", "bob@example.com");
    harness.register_with_home("Cy", "cy@example.com");
    let lamp = harness.advertise(&ann, "Lamp", "$5.00");
    harness.bid_and_collect(&bob, lamp, "$6.00");

    let script = [
        sign_in("cy@example.com"),
        "3\nlamp\nyes\n1\n6.50\n$6.00\n$0.00\n$6.01\ndeliver\nyes\n6\n3\n".to_string(),
    ]
    .concat();
    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("1\tLamp\tLamp for sale\t$5.00\tBob\tbob@example.com\t$6.00"));
    assert!(output.contains("Must start with '$'"));
    assert_eq!(
        output
            .matches("Bid amount must be greater than the existing bid\n")
            .count(),
        1
    );
    assert!(output.contains("Bid amount must be greater than $0.00"));
    assert!(output.contains("\t$6.01\tCy\tcy@example.com\t"));
}

#[test]
fn test_collection_window_dialogue() {
    let harness = MarketHarness::new();
    let ann = harness.register_with_home("Ann", "ann@example.com");
    harness.register_with_home("Bob", "bob@example.com");
    harness.advertise(&ann, "Desk", "$40.00");

    let now = harness.time().now();
    let fmt = |d: chrono::DateTime<chrono::Local>| d.format(COLLECTION_TIME_FORMAT).to_string();
    let too_soon = fmt(now + Duration::minutes(30));
    let start = fmt(now + Duration::hours(2));
    let too_short = fmt(now + Duration::hours(2) + Duration::minutes(30));
    let end = fmt(now + Duration::hours(4));

    let script = format!(
        "{}3\nALL\nyes\n1\n$41.00\ncollect\nnot a date\n{too_soon}\n{start}\n{too_short}\n{end}\n6\n3\n",
        sign_in("bob@example.com")
    );
    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("'not a date' is not a valid date and time"));
    assert!(output.contains("Start time must be 1 hour later than"));
    assert!(output.contains("End time must be 1 hour later than"));
    assert!(output.contains(&format!("Pick up between {start} and {end}")));
}

#[test]
fn test_menu_rejects_unknown_keys_and_bad_sign_in() {
    let harness = MarketHarness::new();
    harness.register("Ann", "ann@example.com");

    let script = "9\n\n2\nann@example.com\nWrong123!\n 3 \n";
    let (result, output) = harness.run_console(script);
    result.unwrap();

    assert_eq!(output.matches("Please choose a valid option.").count(), 2);
    assert!(output.contains("Wrong email or password."));
    assert!(!output.contains("Client Menu"));
}

#[test]
fn test_duplicate_registration_is_cancelled() {
    let harness = MarketHarness::new();
    harness.register("Ann", "a@b.com");

    let script = [register("Other", "A@B.COM"), "3\n".to_string()].concat();
    let (result, output) = harness.run_console(&script);
    result.unwrap();
    assert!(output.contains("Email already in use. Operation cancelled."));
    assert_eq!(harness.house().counts().0, 1);
}

#[test]
fn test_declining_prompts_leaves_state_unchanged() {
    let harness = MarketHarness::new();
    let ann = harness.register_with_home("Ann", "ann@example.com");
    let bob = harness.register_with_home("Bob", "bob@example.com");
    let lamp = harness.advertise(&ann, "Lamp", "$5.00");
    harness.bid_and_collect(&bob, lamp, "$6.00");

    let script = [
        sign_in("bob@example.com"),
        "3\nall\nno\n6\n".to_string(),
        sign_in("ann@example.com"),
        "4\nno\n2\n6\n3\n".to_string(),
    ]
    .concat();
    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("Bid postponed."));
    assert!(output.contains("Sale postponed"));
    assert_eq!(harness.house().advertised_products(&ann).unwrap().len(), 1);
}

#[test]
fn test_empty_views() {
    let harness = MarketHarness::new();
    harness.register_with_home("Ann", "ann@example.com");

    let script = [sign_in("ann@example.com"), "2\n3\nzzz\n4\n5\n6\n3\n".to_string()].concat();
    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("You have no advertised products at this time."));
    assert!(output.contains("No products match the search phrase."));
    assert!(output.contains("You have no products with bids at this time."));
    assert!(output.contains("You have not purchased any items so far."));
}

#[test]
fn test_end_of_input_is_fatal() {
    let harness = MarketHarness::new();
    let (result, _) = harness.run_console("1\nAnn\n");
    assert!(matches!(result, Err(MarketError::EndOfInput)));
}

#[test]
fn test_sale_without_delivery_is_aborted_quietly() {
    let harness = MarketHarness::new();
    let ann = harness.register_with_home("Ann", "ann@example.com");
    let bob = harness.register_with_home("Bob", "bob@example.com");
    let bike = harness.advertise(&ann, "Bike", "$50.00");
    harness.bid(&bob, bike, "$55.00").unwrap();

    let script = [sign_in("ann@example.com"), "4\nyes\n1\n6\n3\n".to_string()].concat();
    let (result, output) = harness.run_console(&script);
    result.unwrap();

    assert!(output.contains("1\tBike\tBike for sale\t$50.00\tBob\tbob@example.com\t$55.00"));
    assert!(!output.contains("Precondition failed"));
    assert!(!output.contains("sold to"));
    // The client menu is shown again after the aborted sale.
    assert_eq!(output.matches("| Client Menu |").count(), 2);

    assert_eq!(harness.house().advertised_products(&ann).unwrap().len(), 1);
    assert!(harness.house().purchases(&bob).unwrap().is_empty());
    assert_eq!(harness.house().counts(), (2, 1));
}
