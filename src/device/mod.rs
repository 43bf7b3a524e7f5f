pub mod classifier;
pub mod identifier;
pub mod probe;
pub mod request;

pub use classifier::is_trivial;
pub use identifier::LoopbackId;
pub use probe::{probe, InterfaceSnapshot};
pub use request::ChangeRequest;
