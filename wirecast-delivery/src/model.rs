//! Delivery timing model.
//!
//! Accessors for the annotated types below are written by the build script
//! and included at the end of this file.

use crate::{Channel, TimeUnit};
use parking_lot::Mutex;
use wirecast::AccessorFields;

/// Recipient card.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Card {
    pub id: u32,
    pub holder: String,
}

/// When a message is delivered.
#[derive(Default, AccessorFields)]
#[accessor(lock = "mu")]
pub struct DeliveryTiming {
    mu: Mutex<()>,
    #[accessor(sample = "7")]
    time_transition: i32,
    #[accessor(getter = "number_of_days", setter, sample = "Some(3)")]
    number: Option<i64>,
    #[accessor(sample = "TimeUnit::TimeUnitDay")]
    unit: TimeUnit,
    #[accessor(getter)]
    card: Card,
    #[accessor]
    note: String,
}

/// How a message is delivered.
#[derive(Default, AccessorFields)]
pub struct Route {
    #[accessor(sample = "Channel::ChannelSms")]
    channel: Channel,
    #[accessor]
    retries: u8,
}

include!(concat!(env!("OUT_DIR"), "/delivery_timing_accessor.rs"));
include!(concat!(env!("OUT_DIR"), "/route_accessor.rs"));
