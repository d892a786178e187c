//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::LinkRecord`] data model and its store encoding
//! - [`repositories`] - The [`repositories::KeyValueStore`] contract
//! - [`errors`] - The [`errors::LinkError`] taxonomy
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves a short code
//! 2. A [`click_event::ClickEvent`] is pushed onto a bounded channel (never awaited)
//! 3. [`click_worker::run_click_worker`] increments `clickCount` with retry logic
//! 4. Failures end up in the logs only

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod errors;
pub mod repositories;
