use tests::{assert_eq, fixtures, json, record, Test};

use amalgam::{
    driver::operation::{Create, List, One, Pagination, Sort, Update},
    Operation,
};

const RESET: &str = "connection reset by peer";

#[tokio::test]
async fn create_surfaces_dependent_failure() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.fail("profiles", RESET)
    });

    let data = record(json!({
        "username": "c",
        "email": "c@x",
        "first_name": "C",
        "last_name": "D",
    }));
    let err = test
        .provider
        .serve("users_profiles", Create::new(data))
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert_eq!(err.to_string(), RESET);

    // Writes are not rolled back.
    assert_eq!(test.store.rows("users").len(), 1);
    assert_eq!(test.log.count("profiles", Operation::is_create), 1);
}

#[tokio::test]
async fn update_surfaces_dependent_failure() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.fail("profiles", RESET)
    });
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]));

    let data = record(json!({
        "id": 1,
        "username": "a2",
        "email": "a@x",
        "profiles_id": 1,
        "first_name": "A2",
        "last_name": "B",
    }));
    let err = test
        .provider
        .serve("users_profiles", Update::new(1, data))
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert_eq!(err.to_string(), RESET);
    assert_eq!(test.store.rows("users")[0]["username"], json!("a2"));
}

#[tokio::test]
async fn main_failure_wins_over_dependent_failure() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver
            .fail("users", "users is read-only")
            .fail("profiles", RESET)
    });

    let data = record(json!({
        "id": 1,
        "username": "a2",
        "profiles_id": 1,
        "first_name": "A2",
    }));
    let err = test
        .provider
        .serve("users_profiles", Update::new(1, data))
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert_eq!(err.to_string(), "users is read-only");
}

#[tokio::test]
async fn reads_surface_store_failures() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.fail("profiles", RESET)
    });
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]));

    let list = List::new(Pagination::new(1, 10), Sort::asc("id"));
    let err = test
        .provider
        .serve("users_profiles", list)
        .await
        .unwrap_err();
    assert!(err.is_driver());
    assert_eq!(err.to_string(), RESET);

    let err = test
        .provider
        .serve("users_profiles", One::new(1))
        .await
        .unwrap_err();
    assert!(err.is_driver());
}

#[tokio::test]
async fn passthrough_failures_are_unchanged() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.fail("comments", RESET)
    });

    let err = test
        .provider
        .serve("comments", One::new(3))
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert_eq!(err.to_string(), RESET);
    assert_eq!(test.log.tables(), ["comments"]);
}
