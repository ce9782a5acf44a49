// crates/idcodec-json/tests/encryption_filter.rs
// ============================================================================
// Module: Id Encryption Filter Tests
// Description: Scoped installation of the id-encryption mapper.
// Purpose: Ensure request and response hooks swap mappers for their scope only.
// ============================================================================
//! ## Overview
//! Validates the thread-local mapper stack seen by serde field helpers.

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

use common::OrderDo;
use idcodec_json::DataObjectMapper;
use idcodec_json::IdEncryptionFilter;
use idcodec_json::IdJsonError;
use idcodec_json::MappingContext;
use idcodec_json::active_mapper;
use idcodec_json::with_active_mapper;

#[test]
fn no_mapper_is_active_by_default() {
    assert!(active_mapper().is_none());
    let err = with_active_mapper(|mapper| Ok(mapper.context())).unwrap_err();
    assert_eq!(err, IdJsonError::NoActiveMapper);
}

#[test]
fn request_hook_installs_encryption_mapper_for_its_scope() {
    let filter = IdEncryptionFilter::new(common::codec());
    {
        let _scope = filter.on_request();
        let active = active_mapper().unwrap();
        assert!(active.context().is_id_encryption());
    }
    assert!(active_mapper().is_none());
}

#[test]
fn response_hook_shadows_outer_mapper() {
    let outer = DataObjectMapper::new(common::codec(), MappingContext::new().with_lenient_mode(true));
    let filter = IdEncryptionFilter::new(common::codec());
    let _outer_scope = outer.enter();
    {
        let _scope = filter.on_response();
        let context = with_active_mapper(|mapper| Ok(mapper.context())).unwrap();
        assert!(context.is_id_encryption());
        assert!(!context.is_lenient_mode());
    }
    let context = with_active_mapper(|mapper| Ok(mapper.context())).unwrap();
    assert!(context.is_lenient_mode());
}

#[test]
fn scopes_dropped_out_of_order_keep_the_inner_mapper_active() {
    let outer = DataObjectMapper::new(common::codec(), MappingContext::new().with_lenient_mode(true));
    let filter = IdEncryptionFilter::new(common::codec());
    let outer_scope = outer.enter();
    let request_scope = filter.on_request();
    drop(outer_scope);

    let context = with_active_mapper(|mapper| Ok(mapper.context())).unwrap();
    assert!(context.is_id_encryption());
    assert!(!context.is_lenient_mode());

    drop(request_scope);
    assert!(active_mapper().is_none());
}

#[test]
fn bodies_round_trip_through_filter() {
    let filter = IdEncryptionFilter::new(common::codec());
    assert!(filter.mapper().context().is_id_encryption());
    let body = filter.write_response(&common::order()).unwrap();
    let decoded: OrderDo = filter.read_request(&body).unwrap();
    assert_eq!(decoded, common::order());
    assert!(active_mapper().is_none());
}
