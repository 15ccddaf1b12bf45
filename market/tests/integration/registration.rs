//! Customer registration and sign-in.

use auction_house::MarketError;

use crate::common::{email, MarketHarness, PASSWORD};

#[test]
fn test_email_uniqueness_ignores_case() {
    let harness = MarketHarness::new();
    harness.register("Ann", "a@b.com");

    let err = harness
        .house()
        .register(
            "Other".parse().unwrap(),
            email("A@B.COM"),
            PASSWORD.parse().unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, MarketError::Duplicate(_)));
    assert_eq!(harness.house().counts().0, 1);
}

#[test]
fn test_sign_in_with_any_case_email() {
    let harness = MarketHarness::new();
    harness.register("Ann", "Ann@Example.com");

    let session = harness
        .house()
        .sign_in(&email("ann@EXAMPLE.com"), &PASSWORD.parse().unwrap())
        .unwrap();
    assert_eq!(session.name.as_str(), "Ann");
    assert_eq!(session.to_string(), "Ann (Ann@Example.com)");
}

#[test]
fn test_wrong_credentials_are_indistinguishable() {
    let harness = MarketHarness::new();
    harness.register("Ann", "ann@example.com");

    let wrong_password = harness
        .house()
        .sign_in(&email("ann@example.com"), &"Secret2!".parse().unwrap())
        .unwrap_err();
    let unknown = harness
        .house()
        .sign_in(&email("zed@example.com"), &PASSWORD.parse().unwrap())
        .unwrap_err();
    assert_eq!(wrong_password.to_string(), unknown.to_string());
}

#[test]
fn test_home_address_requested_until_recorded() {
    let harness = MarketHarness::new();
    let ann = harness.register("Ann", "ann@example.com");
    let password = PASSWORD.parse().unwrap();

    assert!(harness.house().sign_in(&ann, &password).unwrap().needs_home_address);

    harness
        .house()
        .set_home_address(&ann, MarketHarness::sample_address(3))
        .unwrap();
    assert!(!harness.house().sign_in(&ann, &password).unwrap().needs_home_address);

    // Replacing is allowed.
    harness
        .house()
        .set_home_address(&ann, MarketHarness::sample_address(4))
        .unwrap();
    let home = harness.house().home_address(&ann).unwrap().unwrap();
    assert_eq!(home, MarketHarness::sample_address(4));
}
