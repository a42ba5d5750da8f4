use super::*;
use crate::test_utils::{arb_datetime_utc, arb_found_in, arb_optional_text, arb_status};
use proptest::prelude::*;

/// Non-empty query-string-safe text; empty values read back as absent
fn arb_token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,12}"
}

fn arb_query_dto() -> impl Strategy<Value = LostItemQueryDto> {
    (
        (
            prop::option::of(arb_status()),
            prop::option::of(arb_found_in()),
            prop::option::of(arb_token()),
            prop::option::of(arb_token()),
            prop::option::of(any::<bool>()),
        ),
        (
            prop::option::of(arb_datetime_utc()),
            prop::option::of(arb_datetime_utc()),
            prop::option::of(arb_token()),
            prop::option::of(0i64..1000),
            prop::option::of(0i64..1000),
        ),
    )
        .prop_map(
            |((status, found_in, route_number, vehicle_number, open), (found_after, found_before, search, limit, offset))| {
                LostItemQueryDto {
                    status,
                    found_in,
                    route_number,
                    vehicle_number,
                    open,
                    found_after,
                    found_before,
                    search,
                    limit,
                    offset,
                }
            },
        )
}

/// Nullable update field: absent, explicit null, or a value
fn arb_nullable_update() -> impl Strategy<Value = Option<Option<String>>> {
    prop::option::of(arb_optional_text())
}

proptest! {
    /// The CLI encodes filters with the same type the server decodes them into
    #[test]
    fn prop_query_dto_survives_query_string(query in arb_query_dto()) {
        let encoded = serde_html_form::to_string(&query).unwrap();
        let decoded: LostItemQueryDto = serde_html_form::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, query);
    }

    /// "absent" and "null" stay distinguishable through JSON
    #[test]
    fn prop_update_dto_keeps_null_distinct(
        description in arb_nullable_update(),
        storage_location in arb_nullable_update(),
    ) {
        let dto = UpdateLostItemDto {
            description: description.clone(),
            storage_location: storage_location.clone(),
            ..Default::default()
        };

        let value = serde_json::to_value(&dto).unwrap();
        prop_assert_eq!(value.get("description").is_some(), description.is_some());
        prop_assert_eq!(value.get("storage_location").is_some(), storage_location.is_some());

        let decoded: UpdateLostItemDto = serde_json::from_value(value).unwrap();
        prop_assert_eq!(decoded.description, description);
        prop_assert_eq!(decoded.storage_location, storage_location);
        prop_assert!(decoded.title.is_none());
    }
}
