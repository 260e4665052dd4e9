// Event-driven features module
pub mod collect;
pub mod panel;
pub mod publisher;
pub mod reactions;
