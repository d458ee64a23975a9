//! # wirecast Delivery
//!
//! Delivery timing model whose enum mirrors and accessors are generated by
//! `build.rs` from `schema/delivery.proto` and `src/model.rs`.

pub mod model;
pub mod proto;

include!(concat!(env!("OUT_DIR"), "/time_unit.rs"));
include!(concat!(env!("OUT_DIR"), "/channel.rs"));

pub use model::{Card, DeliveryTiming, Route};
