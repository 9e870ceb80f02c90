// src/services.rs

pub mod kpi;
pub mod notifier;
pub mod side_effect;
pub mod templates;
pub mod workflow;

pub use notifier::{DisabledNotifier, HttpNotifier, Notification, Notifier};
pub use side_effect::SideEffect;
pub use workflow::{N8nClient, WorkflowTrigger};
