//! Tool definitions module.
//!
//! One file per backend domain. Each file declares the resources it owns
//! (served by the generic CRUD tools) and any tools with bespoke behaviour.

pub mod consultations;
pub mod dopamart;
pub mod greeting;
pub mod mindfulness;
pub mod subscriptions;
pub mod users;

use super::crud::BackendResource;

pub use greeting::SayHelloTool;
pub use subscriptions::UserSubscriptionsTool;
pub use users::{GetProfileTool, UpdateProfileTool};

/// Every backend resource exposed through CRUD tools, in registration order.
pub fn all_resources() -> Vec<&'static BackendResource> {
    consultations::RESOURCES
        .into_iter()
        .chain(mindfulness::RESOURCES)
        .chain(dopamart::RESOURCES)
        .chain(subscriptions::RESOURCES)
        .collect()
}
