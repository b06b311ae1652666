#![deny(missing_docs)]
//! The three haven capabilities and the backends they call.
//!
//! - [`SpecialistTool`]: `ask_mental_health_specialist`
//! - [`TherapistFinder`]: `find_nearby_therapists_by_location`
//! - [`EmergencyCallTool`]: `emergency_call_tool`
//!
//! Backends sit behind [`PlacesBackend`] and [`Telephony`] so tests can
//! substitute stubs; [`GoogleMaps`] and [`Twilio`] are the real adapters.

pub mod emergency;
pub mod places;
pub mod specialist;
pub mod telephony;
pub mod therapists;

pub use emergency::EmergencyCallTool;
pub use places::{GeoPoint, GoogleMaps, LookupError, Place, PlacesBackend};
pub use specialist::SpecialistTool;
pub use telephony::{CallError, CallReceipt, Telephony, Twilio, escape_xml};
pub use therapists::{TherapistEntry, TherapistFinder, render_report};

use haven_tool::{RegistryError, ToolRegistry};
use haven_turn::Provider;
use std::sync::Arc;

/// Build the fixed registry: specialist, therapist finder, emergency call.
pub fn standard_registry<P: Provider + 'static>(
    specialist: SpecialistTool<P>,
    places: Arc<dyn PlacesBackend>,
    telephony: Arc<dyn Telephony>,
) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(specialist))?;
    registry.register(Arc::new(TherapistFinder::new(places)))?;
    registry.register(Arc::new(EmergencyCallTool::new(telephony)))?;
    Ok(registry)
}
