//! URL query-parameter pre-fill.
//!
//! Campaign links can land on the wizard with a starting configuration,
//! e.g. `?project=renovation&base=classic-4&finish=stainless`. Recognized
//! keys are `project`, `base`, `fridge`, and `finish`; any value outside
//! the field's allow-list is silently ignored. Pre-fill runs once on mount,
//! before the user interacts.

use crate::wizard::state::{BaseKit, BuildWizard, Finish, FridgeType, ProjectType};
use tracing::debug;

/// Parse a raw query string into key/value pairs. `+` decodes to a space;
/// the recognized values are all plain slugs, so fuller percent-decoding is
/// not needed here.
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            Some((key.to_string(), value.replace('+', " ")))
        })
        .collect()
}

impl BuildWizard {
    /// Apply recognized query parameters to the initial form values.
    pub fn prefill_from_query(&mut self, query: &str) {
        for (key, value) in parse_query(query) {
            match key.as_str() {
                "project" => {
                    if let Some(v) = ProjectType::from_str(&value) {
                        self.step1.project_type = Some(v);
                    }
                }
                "base" => {
                    // Only URL-settable kits are accepted; premium kits
                    // cannot be promoted through shareable links.
                    if let Some(v) = BaseKit::from_str(&value).filter(|k| k.url_settable()) {
                        self.step2.base_kit = Some(v);
                    }
                }
                "fridge" => {
                    if let Some(v) = FridgeType::from_str(&value) {
                        self.step2.fridge_type = Some(v);
                    }
                }
                "finish" => {
                    if let Some(v) = Finish::from_str(&value) {
                        self.step2.finish = Some(v);
                    }
                }
                other => {
                    debug!(key = other, "wizard prefill: ignoring unrecognized parameter");
                }
            }
        }
    }
}
