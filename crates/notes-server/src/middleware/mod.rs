//! Request middleware.

pub mod cancellation;
pub mod request_id;

pub use cancellation::track_cancellation;
pub use request_id::{propagate_request_id, request_id_layer, request_span};
