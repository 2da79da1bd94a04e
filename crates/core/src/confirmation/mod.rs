//! Confirmation gate for users who approve presence changes themselves

pub mod gate;
pub mod ports;

pub use gate::ConfirmationGate;
pub use ports::Messenger;
