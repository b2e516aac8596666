//! Client side of the service records page: form validation, the HTTP
//! adapter for the API, the page state machine and text rendering.

pub mod api;
pub mod form;
pub mod orchestrator;
pub mod render;

pub use api::{ClientError, HttpServiceApi, ServiceApi};
pub use form::{FormError, ServiceForm, SERVICE_TYPES};
pub use orchestrator::{update, Action, FormMode, Notice, PageState};
