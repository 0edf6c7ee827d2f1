//! Collaborator traits
//!
//! These traits define the interface between the bridge logic and the
//! services it reports to. Hardware traits live in `callerid-hal`.

pub mod publisher;

pub use publisher::Publisher;
