use tests::{assert_eq, fixtures, json, record, Event, Test};

use amalgam::driver::operation::{Create, List, Pagination, Sort, Update};

use std::time::Duration;

const LATENCY: Duration = Duration::from_millis(20);

#[tokio::test]
async fn secondary_reads_run_alongside_the_main_read() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.delay("users", LATENCY)
    });
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]))
        .seed(
            "profiles",
            json!([{"first_name": "A", "last_name": "B", "user_id": 1}]),
        );

    let list = List::new(Pagination::new(1, 10), Sort::asc("id"));
    let response = test.provider.serve("users_profiles", list).await.unwrap();
    assert_eq!(response.total, Some(1));

    let profiles_started = test.log.position(&Event::begin("profiles", "LIST")).unwrap();
    let users_done = test.log.position(&Event::end("users", "LIST")).unwrap();
    assert!(
        profiles_started < users_done,
        "profiles began at {profiles_started}, users first ended at {users_done}"
    );
}

#[tokio::test]
async fn dependent_creates_run_together() {
    let test = Test::with_driver([fixtures::users_groups()], |driver| {
        driver.delay("users_groups", LATENCY)
    });

    let data = record(json!({"username": "a", "email": "a@x", "group_id": [7, 9, 11]}));
    test.provider
        .serve("users_groups", Create::new(data))
        .await
        .unwrap();

    let main_done = test.log.position(&Event::end("users", "CREATE")).unwrap();
    let begins = test.log.positions(&Event::begin("users_groups", "CREATE"));
    let ends = test.log.positions(&Event::end("users_groups", "CREATE"));
    assert_eq!(begins.len(), 3);
    assert_eq!(ends.len(), 3);

    // Dependents wait for the main row, then all start before any finishes.
    assert!(main_done < begins[0]);
    assert!(begins[2] < ends[0], "begins={begins:?} ends={ends:?}");
}

#[tokio::test]
async fn update_writes_every_table_at_once() {
    let test = Test::with_driver([fixtures::users_profiles()], |driver| {
        driver.delay("users", LATENCY)
    });
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]))
        .seed(
            "profiles",
            json!([{"first_name": "A", "last_name": "B", "user_id": 1}]),
        );

    let data = record(json!({
        "id": 1,
        "username": "a2",
        "profiles_id": 1,
        "first_name": "A2",
    }));
    test.provider
        .serve("users_profiles", Update::new(1, data))
        .await
        .unwrap();

    let profiles_started = test
        .log
        .position(&Event::begin("profiles", "UPDATE"))
        .unwrap();
    let users_done = test.log.position(&Event::end("users", "UPDATE")).unwrap();
    assert!(profiles_started < users_done);
}
