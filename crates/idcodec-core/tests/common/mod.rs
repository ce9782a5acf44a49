// crates/idcodec-core/tests/common/mod.rs
// =============================================================================
// Module: Codec Test Fixtures
// Description: Shared id types and codec builders for core tests.
// Purpose: Reduce duplication across integration tests for idcodec-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;

use idcodec_core::CustomValue;
use idcodec_core::IdCodec;
use idcodec_core::IdCodecAuditSink;
use idcodec_core::IdFactory;
use idcodec_core::IdInventory;
use idcodec_core::Locale;
use idcodec_core::RawPrimitive;
use idcodec_core::RawType;
use idcodec_core::RawTypeRegistry;
use idcodec_core::RawValue;
use idcodec_core::composite_id;
use idcodec_core::root_id;
use time::OffsetDateTime;
use uuid::Uuid;

/// Two-dimensional grid coordinate used as a custom raw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Raw type name of [`Point`].
pub const POINT: &str = "point";

impl RawPrimitive for Point {
    const RAW_TYPE: RawType = RawType::Custom(POINT);

    fn into_raw(self) -> RawValue {
        RawValue::Custom(CustomValue::new(POINT, self))
    }

    fn from_raw_ref(value: &RawValue) -> Option<&Self> {
        match value {
            RawValue::Custom(value) => value.downcast_ref::<Self>(),
            _ => None,
        }
    }
}

/// Parses `"x,y"`.
pub fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = text.split_once(',').ok_or_else(|| format!("'{text}' is not x,y"))?;
    let x = x.parse::<i32>().map_err(|err| err.to_string())?;
    let y = y.parse::<i32>().map_err(|err| err.to_string())?;
    Ok(Point {
        x,
        y,
    })
}

/// Formats `"x,y"`.
pub fn format_point(point: &Point) -> String {
    format!("{},{}", point.x, point.y)
}

root_id! {
    /// User identifier.
    pub struct UserId(Uuid);
}

root_id! {
    /// Order number.
    pub struct OrderNo(i64);
}

root_id! {
    /// Tenant key.
    pub struct TenantKey(String);
}

root_id! {
    /// Region identifier.
    pub struct RegionId(Locale);
}

root_id! {
    /// Slot number.
    pub struct SlotNo(i32);
}

root_id! {
    /// Timestamp identifier.
    pub struct StampId(OffsetDateTime);
}

root_id! {
    /// Grid cell identifier.
    pub struct CellId(Point);
}

composite_id! {
    /// Order scoped by tenant.
    pub struct OrderKey {
        tenant: TenantKey,
        order: OrderNo,
    }
}

composite_id! {
    /// Tenant order scoped by region.
    pub struct RegionalOrder {
        region: RegionId,
        key: OrderKey,
    }
}

/// Raw type registry with defaults and the point mapper.
pub fn raw_types() -> RawTypeRegistry {
    let mut registry = RawTypeRegistry::with_defaults();
    registry.register_typed::<Point, _, _, _>(parse_point, format_point);
    registry
}

/// Inventory naming every fixture id type.
pub fn inventory() -> IdInventory {
    IdInventory::new()
        .with::<UserId>("User")
        .and_then(|inventory| inventory.with::<OrderNo>("OrderNo"))
        .and_then(|inventory| inventory.with::<TenantKey>("Tenant"))
        .and_then(|inventory| inventory.with::<RegionId>("Region"))
        .and_then(|inventory| inventory.with::<SlotNo>("Slot"))
        .and_then(|inventory| inventory.with::<StampId>("Stamp"))
        .and_then(|inventory| inventory.with::<CellId>("Cell"))
        .and_then(|inventory| inventory.with::<OrderKey>("OrderKey"))
        .and_then(|inventory| inventory.with::<RegionalOrder>("RegionalOrder"))
        .expect("fixture inventory")
}

/// Factory constructing every fixture id type.
pub fn factory() -> IdFactory {
    IdFactory::new()
        .with::<UserId>()
        .with::<OrderNo>()
        .with::<TenantKey>()
        .with::<RegionId>()
        .with::<SlotNo>()
        .with::<StampId>()
        .with::<CellId>()
        .with::<OrderKey>()
        .with::<RegionalOrder>()
}

/// Codec over the fixture registries.
pub fn codec() -> IdCodec {
    IdCodec::new(Arc::new(raw_types()), Arc::new(inventory()), Arc::new(factory()))
}

/// Codec over the fixture registries recording into `audit`.
pub fn codec_with_audit(audit: Arc<dyn IdCodecAuditSink>) -> IdCodec {
    codec().with_audit_sink(audit)
}

/// Fixed user id.
pub fn user_id() -> UserId {
    UserId::new(Uuid::from_u128(0x0f1e_2d3c_4b5a_6978_8796_a5b4_c3d2_e1f0))
}

/// Order key `("acme", 42)`.
pub fn order_key() -> OrderKey {
    OrderKey::new(Some(TenantKey::new("acme".to_string())), Some(OrderNo::new(42)))
}
