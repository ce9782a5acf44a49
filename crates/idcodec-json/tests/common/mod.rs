// crates/idcodec-json/tests/common/mod.rs
// =============================================================================
// Module: JSON Test Fixtures
// Description: Shared id types, data objects and mappers for JSON tests.
// Purpose: Reduce duplication across integration tests for idcodec-json.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::HashMap;
use std::sync::Arc;

use idcodec_core::Id;
use idcodec_core::IdClass;
use idcodec_core::IdCodec;
use idcodec_core::IdCodecAuditSink;
use idcodec_core::IdFactory;
use idcodec_core::IdInventory;
use idcodec_core::IdShape;
use idcodec_core::RawTypeRegistry;
use idcodec_core::composite_id;
use idcodec_core::root_id;
use idcodec_json::IdMapKey;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

root_id! {
    /// Order number.
    pub struct OrderNo(i64);
}

root_id! {
    /// Tenant key.
    pub struct TenantKey(String);
}

root_id! {
    /// Customer identifier.
    pub struct CustomerId(Uuid);
}

root_id! {
    /// Id type without a registered type name.
    pub struct DraftNo(i32);
}

composite_id! {
    /// Order scoped by tenant.
    pub struct OrderKey {
        tenant: TenantKey,
        order: OrderNo,
    }
}

/// Map key mixing several id classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyKey {
    /// Order number key.
    Order(OrderNo),
    /// Tenant key.
    Tenant(TenantKey),
    /// Unnamed draft key.
    Draft(DraftNo),
}

impl Id for AnyKey {
    fn id_class(&self) -> IdClass {
        match self {
            Self::Order(id) => id.id_class(),
            Self::Tenant(id) => id.id_class(),
            Self::Draft(id) => id.id_class(),
        }
    }

    fn shape(&self) -> IdShape<'_> {
        match self {
            Self::Order(id) => id.shape(),
            Self::Tenant(id) => id.shape(),
            Self::Draft(id) => id.shape(),
        }
    }
}

/// Data object with id-valued fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDo {
    /// Order number.
    #[serde(with = "idcodec_json::unqualified")]
    pub id: OrderNo,
    /// Optional parent order.
    #[serde(with = "idcodec_json::unqualified_opt", default)]
    pub parent: Option<OrderNo>,
    /// Optional composite key.
    #[serde(with = "idcodec_json::unqualified_opt", default)]
    pub key: Option<OrderKey>,
    /// Optional customer.
    #[serde(with = "idcodec_json::unqualified_opt", default)]
    pub customer: Option<CustomerId>,
}

/// Data object with a map keyed by ids of several classes.
#[derive(Debug, Serialize)]
pub struct MixedIndexDo {
    /// Counts per key.
    #[serde(with = "idcodec_json::qualified_map")]
    pub counts: HashMap<AnyKey, u32>,
}

/// Data object with a map keyed by order numbers.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIndexDo {
    /// Labels per order.
    #[serde(with = "idcodec_json::qualified_map")]
    pub labels: HashMap<IdMapKey<OrderNo>, String>,
}

/// Codec over the fixture id types.
pub fn codec() -> Arc<IdCodec> {
    let inventory = IdInventory::new()
        .with::<OrderNo>("OrderNo")
        .and_then(|inventory| inventory.with::<TenantKey>("Tenant"))
        .and_then(|inventory| inventory.with::<CustomerId>("Customer"))
        .and_then(|inventory| inventory.with::<OrderKey>("OrderKey"))
        .expect("fixture inventory");
    let factory = IdFactory::new()
        .with::<OrderNo>()
        .with::<TenantKey>()
        .with::<CustomerId>()
        .with::<DraftNo>()
        .with::<OrderKey>();
    Arc::new(IdCodec::new(Arc::new(RawTypeRegistry::with_defaults()), Arc::new(inventory), Arc::new(factory)))
}

/// Codec over the fixture id types recording into `audit`.
pub fn codec_with_audit(audit: Arc<dyn IdCodecAuditSink>) -> Arc<IdCodec> {
    let codec = Arc::unwrap_or_clone(codec());
    Arc::new(codec.with_audit_sink(audit))
}

/// Order data object with every field set.
pub fn order() -> OrderDo {
    OrderDo {
        id: OrderNo::new(42),
        parent: Some(OrderNo::new(7)),
        key: Some(OrderKey::new(Some(TenantKey::new("acme".to_string())), Some(OrderNo::new(42)))),
        customer: Some(CustomerId::new(Uuid::from_u128(0x0011_2233_4455_6677_8899_aabb_ccdd_eeff))),
    }
}
