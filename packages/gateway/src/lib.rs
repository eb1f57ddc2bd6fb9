//! # Formstudio Gateway
//!
//! Persistence seam for the form designer: the [`FormGateway`] trait the
//! shell implements against its backend, a memory-backed implementation for
//! tests, and the [`DesignSession`] that ties an open document to a gateway.
//!
//! The core never talks to the network itself. Local edits always land in
//! the document first; a save is a downstream sync of a snapshot, and a
//! failed save leaves the document dirty and otherwise untouched.

mod gateway;
mod memory;
mod session;

pub use gateway::{FormGateway, FormRecord, GatewayError, PublishAction};
pub use memory::MemoryGateway;
pub use session::{DesignSession, SessionError};
