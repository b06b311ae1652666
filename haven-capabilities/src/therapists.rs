//! `find_nearby_therapists_by_location`: geocode, search, and report.

use crate::places::{LookupError, PlacesBackend};
use haven_tool::{Parameter, ToolDyn, ToolError, ToolFuture, required_str};
use std::sync::Arc;

/// Capability name.
pub const NAME: &str = "find_nearby_therapists_by_location";

const DESCRIPTION: &str = "Find licensed therapists near the specified location and return \
their names, addresses and phone numbers. Use this when the user asks for local therapist \
recommendations or in-person help in a named city or area.";

/// Search radius in metres.
pub const DEFAULT_RADIUS_M: u32 = 5000;
/// Places category searched for.
pub const DEFAULT_KEYWORD: &str = "Psychotherapist";
/// Maximum number of results in a report.
pub const DEFAULT_LIMIT: usize = 5;

/// One line of the report, before placeholder substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TherapistEntry {
    /// Practice or practitioner name.
    pub name: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// Render the newline-joined report.
pub fn render_report(location: &str, entries: &[TherapistEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("Therapists near {location}:"));
    for entry in entries {
        lines.push(format!(
            "- {} | {} | {}",
            entry.name.as_deref().unwrap_or("Unknown"),
            entry.address.as_deref().unwrap_or("Address not available"),
            entry.phone.as_deref().unwrap_or("Phone not available"),
        ));
    }
    lines.join("\n")
}

/// Looks up therapists around a free-text location.
pub struct TherapistFinder {
    places: Arc<dyn PlacesBackend>,
    radius_m: u32,
    keyword: String,
    limit: usize,
}

impl TherapistFinder {
    /// Finder with the default radius, keyword, and result limit.
    pub fn new(places: Arc<dyn PlacesBackend>) -> Self {
        Self {
            places,
            radius_m: DEFAULT_RADIUS_M,
            keyword: DEFAULT_KEYWORD.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override the search radius.
    #[must_use]
    pub fn radius_m(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Override the maximum number of results.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build the report for `location`.
    pub async fn find(&self, location: &str) -> Result<String, ToolError> {
        let points = self.places.geocode(location).await.map_err(backend_error)?;
        let Some(center) = points.first().copied() else {
            return Err(ToolError::Lookup(format!(
                "no location found matching '{location}'"
            )));
        };

        let places = self
            .places
            .nearby(center, self.radius_m, &self.keyword)
            .await
            .map_err(backend_error)?;

        let mut entries = Vec::with_capacity(self.limit.min(places.len()));
        for place in places.into_iter().take(self.limit) {
            let phone = match &place.place_id {
                Some(id) => match self.places.phone_number(id).await {
                    Ok(phone) => phone,
                    Err(e) => {
                        tracing::warn!(place_id = %id, error = %e, "phone lookup failed");
                        None
                    }
                },
                None => None,
            };
            entries.push(TherapistEntry {
                name: place.name,
                address: place.address,
                phone,
            });
        }

        Ok(render_report(location, &entries))
    }
}

fn backend_error(e: LookupError) -> ToolError {
    ToolError::ExecutionFailed(format!("places lookup failed: {e}"))
}

impl ToolDyn for TherapistFinder {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::string(
            "location",
            "The name of the city or area in which the user is seeking therapy support.",
        )]
    }

    fn call(&self, input: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let location = required_str(&input, "location")?;
            let report = self.find(location).await?;
            Ok(serde_json::Value::String(report))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_substitutes_placeholders() {
        let report = render_report(
            "Austin",
            &[
                TherapistEntry {
                    name: Some("Calm Minds".into()),
                    address: Some("1 Main St".into()),
                    phone: Some("(512) 555-0100".into()),
                },
                TherapistEntry::default(),
            ],
        );
        assert_eq!(
            report,
            "Therapists near Austin:\n\
             - Calm Minds | 1 Main St | (512) 555-0100\n\
             - Unknown | Address not available | Phone not available"
        );
    }

    #[test]
    fn report_without_results_is_header_only() {
        assert_eq!(render_report("Reno", &[]), "Therapists near Reno:");
    }
}
