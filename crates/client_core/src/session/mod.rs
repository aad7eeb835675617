//! Form session: the editable query, the request lifecycle, and the channel
//! through which in-flight predictions report back.

mod controller;
mod state;

pub use controller::{Delivery, RequestHandle, SessionController, Submission};
pub use state::{Resolution, SessionSnapshot, SessionState};
