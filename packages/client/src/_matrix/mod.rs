//! Matrix client-server API bindings, laid out by endpoint path.

pub mod client;
