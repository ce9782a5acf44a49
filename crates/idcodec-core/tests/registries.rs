// crates/idcodec-core/tests/registries.rs
// ============================================================================
// Module: Registry Tests
// Description: Raw type registry, id inventory and id factory behavior.
// Purpose: Ensure startup registration rejects conflicts and bad shapes.
// ============================================================================
//! ## Overview
//! Validates registration conflicts, factory component validation, mapper
//! replacement, flag sets, locale normalization and error classification.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::OrderKey;
use common::OrderNo;
use common::TenantKey;
use idcodec_core::IdClass;
use idcodec_core::IdCodecFlag;
use idcodec_core::IdCodecFlags;
use idcodec_core::IdError;
use idcodec_core::IdErrorCategory;
use idcodec_core::IdFactory;
use idcodec_core::IdInventory;
use idcodec_core::Locale;
use idcodec_core::LocaleError;
use idcodec_core::RawMapperError;
use idcodec_core::RawType;
use idcodec_core::RawTypeMapper;
use idcodec_core::RawTypeRegistry;
use idcodec_core::RawValue;
use idcodec_core::downcast_id;
use proptest::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

// ============================================================================
// SECTION: Inventory
// ============================================================================

#[test]
fn inventory_resolves_names_both_ways() {
    let inventory = common::inventory();
    assert_eq!(inventory.type_name_of(IdClass::of::<OrderKey>()), Some("OrderKey"));
    assert_eq!(inventory.type_name(&common::order_key()), Some("OrderKey"));
    assert_eq!(inventory.id_class("Tenant"), Some(IdClass::of::<TenantKey>()));
    assert_eq!(inventory.id_class("tenant"), None);
    assert_eq!(inventory.len(), 9);
}

#[test]
fn inventory_rejects_duplicate_type_name() {
    let mut inventory = IdInventory::new();
    inventory.register::<OrderNo>("Order").unwrap();
    let err = inventory.register::<TenantKey>("Order").unwrap_err();
    assert!(matches!(err, IdError::DuplicateTypeName { .. }), "{err}");
    assert_eq!(inventory.id_class("Order"), Some(IdClass::of::<OrderNo>()));
}

#[test]
fn inventory_rejects_second_name_for_class() {
    let mut inventory = IdInventory::new();
    inventory.register::<OrderNo>("Order").unwrap();
    let err = inventory.register::<OrderNo>("OrderAlias").unwrap_err();
    match err {
        IdError::DuplicateIdClass {
            type_name,
            ..
        } => assert_eq!(type_name, "Order"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(inventory.len(), 1);
}

#[test]
fn inventory_rejects_names_that_break_the_wire_form() {
    let mut inventory = IdInventory::new();
    for name in ["", "a:b", "a;b"] {
        let err = inventory.register::<OrderNo>(name).unwrap_err();
        assert_eq!(err.kind(), "invalid_type_name");
    }
    assert!(inventory.is_empty());
}

// ============================================================================
// SECTION: Factory
// ============================================================================

#[test]
fn factory_reports_declared_raw_types() {
    let factory = common::factory();
    assert_eq!(
        factory.raw_types(IdClass::of::<OrderKey>()),
        Some([RawType::String, RawType::Long].as_slice())
    );
    assert_eq!(factory.raw_types(IdClass::of::<IdFactory>()), None);
}

#[test]
fn factory_builds_from_matching_components() {
    let factory = common::factory();
    let id = factory
        .create(
            IdClass::of::<OrderKey>(),
            vec![Some(RawValue::String("acme".to_string())), Some(RawValue::Long(42))],
        )
        .unwrap()
        .unwrap();
    assert_eq!(downcast_id::<OrderKey>(id), Some(common::order_key()));
}

#[test]
fn factory_rejects_component_type_mismatch() {
    let factory = common::factory();
    let err = factory
        .create(IdClass::of::<OrderKey>(), vec![Some(RawValue::Long(1)), Some(RawValue::Long(2))])
        .unwrap_err();
    match err {
        IdError::ComponentType {
            index,
            expected,
            actual,
            ..
        } => {
            assert_eq!(index, 0);
            assert_eq!(expected, RawType::String);
            assert_eq!(actual, RawType::Long);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn factory_rejects_component_count_mismatch() {
    let err = IdFactory::create_typed::<OrderKey>(vec![Some(RawValue::String("a".to_string())), None, None])
        .unwrap_err();
    match err {
        IdError::ComponentCount {
            components,
            ..
        } => assert_eq!(components, "string, null, null"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn factory_rejects_unregistered_class() {
    let err = IdFactory::new().create(IdClass::of::<OrderNo>(), vec![Some(RawValue::Long(1))]).unwrap_err();
    assert!(matches!(err, IdError::MissingIdDescriptor { .. }), "{err}");
}

// ============================================================================
// SECTION: Raw Types
// ============================================================================

#[test]
fn raw_registry_defaults_cover_builtin_types() {
    let registry = RawTypeRegistry::with_defaults();
    for raw_type in
        [RawType::String, RawType::Uuid, RawType::Integer, RawType::Long, RawType::Date, RawType::Locale]
    {
        assert!(registry.contains(raw_type), "{raw_type}");
    }
    assert!(!RawTypeRegistry::empty().contains(RawType::String));
}

fn assert_default_round_trip(value: RawValue) -> Result<(), TestCaseError> {
    let registry = RawTypeRegistry::with_defaults();
    let text = registry.to_string(&value).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let decoded =
        registry.from_string(value.raw_type(), &text).map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(decoded, value);
    Ok(())
}

proptest! {
    #[test]
    fn default_string_mapper_round_trips(text in ".*") {
        assert_default_round_trip(RawValue::String(text))?;
    }

    #[test]
    fn default_uuid_mapper_round_trips(bits in any::<u128>()) {
        assert_default_round_trip(RawValue::Uuid(Uuid::from_u128(bits)))?;
    }

    #[test]
    fn default_integer_mappers_round_trip(integer in any::<i32>(), long in any::<i64>()) {
        assert_default_round_trip(RawValue::Integer(integer))?;
        assert_default_round_trip(RawValue::Long(long))?;
    }

    #[test]
    fn default_date_mapper_round_trips(millis in -62_135_596_800_000_i64..253_402_300_799_999_i64) {
        let nanos = i128::from(millis) * 1_000_000;
        let date = OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        assert_default_round_trip(RawValue::Date(date))?;
    }

    #[test]
    fn default_locale_mapper_round_trips(tag in "[a-z]{2,3}(-[A-Z]{2})?") {
        let locale = Locale::parse(&tag).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(locale.as_str(), tag.as_str());
        assert_default_round_trip(RawValue::Locale(locale))?;
    }
}

#[test]
fn raw_registry_replaces_mappers() {
    let mut registry = RawTypeRegistry::with_defaults();
    let previous = registry.register_typed::<i64, std::num::ParseIntError, _, _>(
        |text| i64::from_str_radix(text, 16),
        |value| format!("{value:x}"),
    );
    assert!(previous.is_some());
    assert_eq!(registry.to_string(&RawValue::Long(255)).unwrap(), "ff");
    assert_eq!(registry.from_string(RawType::Long, "ff").unwrap(), RawValue::Long(255));
}

#[test]
fn raw_registry_reports_missing_and_failed_mappers() {
    let mut registry = RawTypeRegistry::with_defaults();
    registry.unregister(RawType::Uuid);
    assert!(matches!(
        registry.from_string(RawType::Uuid, "x"),
        Err(RawMapperError::Missing(RawType::Uuid))
    ));
    assert!(matches!(registry.from_string(RawType::Integer, "x"), Err(RawMapperError::Failed { .. })));
}

#[test]
fn raw_registry_rejects_mapper_producing_other_type() {
    let mut registry = RawTypeRegistry::empty();
    registry.register(
        RawType::Integer,
        RawTypeMapper::new(|text| Ok(RawValue::String(text.to_string())), |_| Ok(String::new())),
    );
    assert!(matches!(registry.from_string(RawType::Integer, "1"), Err(RawMapperError::Failed { .. })));
}

// ============================================================================
// SECTION: Flags
// ============================================================================

#[test]
fn flag_sets_combine_and_label() {
    let flags = IdCodecFlags::NONE | IdCodecFlag::Encryption | IdCodecFlag::Lenient;
    assert!(flags.is_lenient());
    assert!(flags.is_encryption());
    assert_eq!(flags.labels(), vec!["lenient", "encryption"]);
    assert_eq!(flags, IdCodecFlags::LENIENT | IdCodecFlags::ENCRYPTION);
    assert_eq!(IdCodecFlag::ALL.into_iter().collect::<IdCodecFlags>(), flags);
    assert!(IdCodecFlags::default().is_empty());
}

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn locale_tags_are_normalized() {
    let cases = [
        ("EN", "en"),
        ("de-ch", "de-CH"),
        ("ZH-hant-tw", "zh-Hant-TW"),
        ("es-419", "es-419"),
        ("en-US-x-PRIVATE", "en-US-x-private"),
    ];
    for (input, expected) in cases {
        let locale = Locale::parse(input).unwrap();
        assert_eq!(locale.as_str(), expected);
    }
    assert_eq!(Locale::parse("de-CH").unwrap().language(), "de");
}

#[test]
fn locale_rejects_malformed_tags() {
    assert_eq!(Locale::parse(""), Err(LocaleError::Empty));
    assert!(matches!(Locale::parse("de--CH"), Err(LocaleError::EmptySubtag { .. })));
    assert!(matches!(Locale::parse("de_CH"), Err(LocaleError::InvalidCharacter { .. })));
}

// ============================================================================
// SECTION: Errors
// ============================================================================

#[test]
fn errors_are_classified() {
    let count = IdError::ComponentCount {
        expected: 2,
        actual: 1,
        components: "A".to_string(),
        id_class: "OrderKey".to_string(),
    };
    assert_eq!(count.category(), IdErrorCategory::Format);
    assert_eq!(
        count.to_string(),
        "wrong argument size, expected 2 parameter, got 1 raw components [A], id type OrderKey"
    );

    let missing = IdError::MissingRawTypeMapper {
        raw_type: RawType::Custom("point"),
        id_class: "CellId".to_string(),
    };
    assert_eq!(missing.category(), IdErrorCategory::Configuration);
    assert_eq!(missing.to_string(), "missing raw type mapper for wrapped type point, id type CellId");
}
