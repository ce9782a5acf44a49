// crates/idcodec-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for the id mapping configuration. The output is
//! deterministic and must always load without errors.

/// Returns a canonical example `idcodec.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[mapping]
id_encryption = false
lenient_mode = false

[audit]
sink = "file"
path = "idcodec-audit.jsonl"
"#,
    )
}
