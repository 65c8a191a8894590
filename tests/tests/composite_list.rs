use tests::{assert_eq, fixtures, json, record, Test};

use amalgam::{
    driver::operation::{List, Pagination, Sort},
    MappingSet, Operation, Resource, TableMapping,
};

fn page(page: u64, per_page: u64) -> List {
    List::new(Pagination::new(page, per_page), Sort::asc("id"))
}

#[tokio::test]
async fn joins_main_and_secondary_rows() {
    let test = Test::new([fixtures::users_profiles()]);
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]))
        .seed(
            "profiles",
            json!([{"first_name": "A", "last_name": "B", "user_id": 1}]),
        );

    let response = test
        .provider
        .serve("users_profiles", page(1, 10))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        json!([{
            "id": 1,
            "username": "a",
            "email": "a@x",
            "first_name": "A",
            "last_name": "B",
            "user_id": 1,
        }])
    );
    assert_eq!(response.total, Some(1));

    // One page read plus a two-step count on `users`, a two-step full read
    // of `profiles`.
    assert_eq!(test.log.count("users", Operation::is_list), 3);
    assert_eq!(test.log.count("profiles", Operation::is_list), 2);
}

#[tokio::test]
async fn pages_and_filters_the_main_table() {
    let test = Test::new([fixtures::users_profiles()]);
    test.seed(
        "users",
        json!([
            {"id": 1, "username": "a", "email": "a@x"},
            {"id": 2, "username": "b", "email": "b@x"},
            {"id": 3, "username": "c", "email": "c@x"},
        ]),
    )
    .seed(
        "profiles",
        json!([
            {"first_name": "A", "last_name": "A", "user_id": 1},
            {"first_name": "C", "last_name": "C", "user_id": 3},
        ]),
    );

    let list = page(2, 1).filter(record(json!({"username": ["a", "c"]})));
    let response = test
        .provider
        .serve("users_profiles", list)
        .await
        .unwrap();

    assert_eq!(response.total, Some(2));
    assert_eq!(
        response.data,
        json!([{
            "id": 3,
            "username": "c",
            "email": "c@x",
            "first_name": "C",
            "last_name": "C",
            "user_id": 3,
        }])
    );
}

#[tokio::test]
async fn uncorrelated_rows_are_dropped() {
    let test = Test::new([fixtures::users_profiles()]);
    test.seed("users", json!([{"id": 1, "username": "a", "email": "a@x"}]))
        .seed(
            "profiles",
            json!([{"first_name": "Z", "last_name": "Z", "user_id": 42}]),
        );

    let response = test
        .provider
        .serve("users_profiles", page(1, 10))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        json!([{"id": 1, "username": "a", "email": "a@x"}])
    );
}

#[tokio::test]
async fn empty_tables_list_nothing() {
    let test = Test::new([fixtures::users_profiles()]);

    let response = test
        .provider
        .serve("users_profiles", page(1, 10))
        .await
        .unwrap();

    assert_eq!(response.data, json!([]));
    assert_eq!(response.total, Some(0));

    // Empty probes skip the full read.
    assert_eq!(test.log.count("profiles", Operation::is_list), 1);
}

#[tokio::test]
async fn accumulate_rows_become_arrays() {
    let resource = Resource::new("users_groups").list(
        MappingSet::new()
            .table(TableMapping::main("users").fields(["id", "username"]))
            .table(
                TableMapping::secondary("users_groups")
                    .field("group_id")
                    .key_field("user_id")
                    .accumulate(),
            ),
    );

    let test = Test::new([resource]);
    test.seed(
        "users",
        json!([{"id": 1, "username": "a"}, {"id": 2, "username": "b"}]),
    )
    .seed(
        "users_groups",
        json!([
            {"group_id": 7, "user_id": 1},
            {"group_id": 8, "user_id": 2},
            {"group_id": 9, "user_id": 1},
        ]),
    );

    let response = test
        .provider
        .serve("users_groups", page(1, 10))
        .await
        .unwrap();

    // Dependent tables are read newest first.
    assert_eq!(
        response.data,
        json!([
            {"id": 1, "username": "a", "group_id": [9, 7]},
            {"id": 2, "username": "b", "group_id": [8]},
        ])
    );
}

#[tokio::test]
async fn params_hook_rewrites_the_main_read() {
    let only_active = |op: Operation| match op {
        Operation::List(list) => {
            let mut filter = list.filter.clone();
            filter.insert("active".to_string(), json!(true));
            list.filter(filter).into()
        }
        op => op,
    };

    let resource = Resource::new("active_users").list(
        MappingSet::new().table(
            TableMapping::main("users")
                .fields(["id", "username"])
                .params(only_active),
        ),
    );

    let test = Test::new([resource]);
    test.seed(
        "users",
        json!([
            {"id": 1, "username": "a", "active": true},
            {"id": 2, "username": "b", "active": false},
            {"id": 3, "username": "c", "active": true},
        ]),
    );

    let response = test
        .provider
        .serve("active_users", page(1, 10))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        json!([{"id": 1, "username": "a"}, {"id": 3, "username": "c"}])
    );
    assert_eq!(response.total, Some(2));
}
