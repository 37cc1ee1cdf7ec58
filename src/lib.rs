//! Pricing engine for a custom print shop.
//!
//! This crate computes itemised prices for printed products: a base
//! paper/print price from area and paper stock, a broker or tagline discount,
//! exact-size and turnaround markups, and per-add-on finishing costs. A
//! separate calculator prices broker orders under the shop's volume and tier
//! discount program.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
