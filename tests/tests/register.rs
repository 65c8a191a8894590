use tests::{assert_eq, json, Test};

use amalgam::{
    driver::operation::{Create, List, Pagination, Sort},
    MappingKind, MappingSet, Provider, Resource, TableMapping,
};
use amalgam_driver_memory::MemoryDriver;

const CONFIG: &str = r#"{
    "users_profiles": {
        "LIST": {
            "users": { "main": true, "fields": ["id", "username", "email"] },
            "profiles": {
                "fields": ["first_name", "last_name", "user_id"],
                "key": "user_id"
            }
        },
        "CREATE": {
            "users": { "main": true, "fields": ["username", "email"] },
            "profiles": {
                "fields": ["first_name", "last_name"],
                "key": "user_id",
                "foreign_key": "user_id"
            }
        },
        "DELETE": {
            "users": { "main": true },
            "profiles": {
                "fields": [{ "name": "id", "alias": "profiles_id" }],
                "key": "user_id",
                "id": "profiles_id"
            }
        }
    }
}"#;

#[tokio::test]
async fn serves_resources_declared_in_json() {
    let resources = Resource::from_json(CONFIG).unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(
        resources[0].mappings.keys().copied().collect::<Vec<_>>(),
        [MappingKind::List, MappingKind::Create, MappingKind::Delete]
    );

    let test = Test::new(resources);
    let data = tests::record(json!({
        "username": "a",
        "email": "a@x",
        "first_name": "A",
        "last_name": "B",
    }));
    test.provider
        .serve("users_profiles", Create::new(data))
        .await
        .unwrap();

    let response = test
        .provider
        .serve(
            "users_profiles",
            List::new(Pagination::new(1, 10), Sort::asc("id")),
        )
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
}

#[test]
fn builder_registers_json() {
    let mut builder = Provider::builder();
    builder.register_json(CONFIG).unwrap();
    let provider = builder.build(MemoryDriver::new()).unwrap();

    assert!(provider
        .registry()
        .lookup("users_profiles", MappingKind::Delete)
        .is_some());
    assert!(provider
        .registry()
        .lookup("users_profiles", MappingKind::Edit)
        .is_none());

    let resource = provider.registry().resource("users_profiles").unwrap();
    let list = resource.get(MappingKind::List).unwrap();
    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
    assert_eq!(list.main().name, "users");
    assert!(provider.registry().resource("comments").is_none());
}

#[test]
fn malformed_json_is_rejected() {
    let mut builder = Provider::builder();
    assert!(builder.register_json(r#"{"r": {"LIST": {"t": {"mian": true}}}}"#).is_err());
    assert!(builder.register_json(r#"{"r": {"READ": {}}}"#).is_err());
}

#[test]
fn invalid_mappings_fail_the_build() {
    let no_main = Resource::new("no_main").list(
        MappingSet::new().table(TableMapping::secondary("profiles").field("first_name")),
    );

    let err = Provider::builder()
        .register(no_main)
        .build(MemoryDriver::new())
        .unwrap_err();
    assert!(err.is_invalid_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: LIST mapping of `no_main`: no main table"
    );
}

#[test]
fn resources_register_once() {
    let resource = || {
        Resource::new("users_list")
            .list(MappingSet::new().table(TableMapping::main("users").field("id")))
    };

    let err = Provider::builder()
        .register(resource())
        .register(resource())
        .build(MemoryDriver::new())
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}
