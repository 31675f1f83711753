use std::sync::Arc;
use std::time::Duration;

use field_types::{FieldBuilderData, FieldOrder};

/// Read-only server state: the served field and the echo latency.
///
/// Nothing posted to the server is ever written here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    seed: FieldBuilderData,
    save_delay: Duration,
}

impl AppState {
    pub fn new(seed: FieldBuilderData, save_delay: Duration) -> Self {
        Self {
            inner: Arc::new(AppStateInner { seed, save_delay }),
        }
    }

    pub fn seed(&self) -> &FieldBuilderData {
        &self.inner.seed
    }

    pub fn save_delay(&self) -> Duration {
        self.inner.save_delay
    }
}

/// The multi-select field served by `GET /api/field`
pub fn sales_region_seed() -> FieldBuilderData {
    FieldBuilderData {
        label: "Sales region".to_string(),
        field_type: "multi-select".to_string(),
        required: true,
        default: Some("North America".to_string()),
        choices: Some(
            [
                "Asia",
                "Australia",
                "Western Europe",
                "North America",
                "Eastern Europe",
                "Latin America",
                "Middle East and Africa",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        ),
        order: None,
        display_alpha: Some(true),
    }
}
