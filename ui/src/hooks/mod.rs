pub mod use_event_form;
pub mod use_scheduled_redirect;

pub use use_event_form::{EventFormHandle, use_event_form};
pub use use_scheduled_redirect::use_scheduled_redirect;
