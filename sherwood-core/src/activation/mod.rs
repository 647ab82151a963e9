//! Activation flag ownership and its fan-out to the other contexts.

pub mod broker;
pub mod bus;

pub use broker::ActivationBroker;
pub use bus::{
    DEFAULT_STATUS_CHANNEL_CAPACITY, DeliveryAck, DeliveryStats, StatusBus,
    StatusFrame, StatusSubscription,
};
