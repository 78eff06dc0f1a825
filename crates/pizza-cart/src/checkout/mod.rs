//! Checkout module.
//!
//! Contains the order context read at submit time, message formatting,
//! and the outbound handoff.

mod context;
mod handoff;
mod message;

pub use context::{ChangeDue, OrderContext};
pub use handoff::{Handoff, OrderSubmitter, WhatsAppLink};
pub use message::{
    encode_component, MessageLabels, OrderMessage, OrderMessageFormatter, TRANSPORT_LINE_BREAK,
};
