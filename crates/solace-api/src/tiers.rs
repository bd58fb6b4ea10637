use axum::Json;

use solace_types::tiers::{TIERS, Tier};

/// The compile-time tier catalog. Reference data, safe to serve without auth.
pub async fn list_tiers() -> Json<&'static [Tier]> {
    Json(&TIERS[..])
}
