//! Wire enums as a protobuf compiler emits them.
//!
//! Both enums carry a variant the local schema does not declare, standing
//! in for values added on the wire after generation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TimeUnit {
    Unspecified = 0,
    Second = 1,
    Minute = 2,
    Day = 3,
    Week = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Channel {
    Unspecified = 0,
    Email = 1,
    Sms = 2,
    Push = 3,
}
