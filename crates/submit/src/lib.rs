//! Lead submission for the landing page forms.
//!
//! - [`LeadEnvelope`]: the fixed JSON shape posted to the webhook.
//! - [`LeadSubmitter`]: response-opaque POST with a client-side timeout.
//! - [`LeadTransport`]: the network seam; [`HttpTransport`] is the reqwest
//!   implementation.
//! - [`FormSession`]: one form's field state and submit cycle.

pub mod envelope;
pub mod error;
pub mod form;
pub mod submitter;
pub mod transport;

pub use envelope::LeadEnvelope;
pub use error::{SubmitError, TransportError};
pub use form::{FormSession, Notice, NoticeKind, SubmitControl, SubmitOutcome};
pub use submitter::LeadSubmitter;
pub use transport::{HttpTransport, LeadTransport};
