//! Traits sitting between the gateway orchestration layer and the concrete
//! connector implementation.

pub mod api;
pub mod connector_integration_v2;
pub mod connector_types;
pub mod events;
