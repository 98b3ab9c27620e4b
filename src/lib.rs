//! # Course Planner Backend
//!
//! Server-side core of a student course-planning application.
//!
//! Users browse a course catalog, collect sections into a personal cart, and
//! persist the selection behind username/password accounts. The one piece of
//! real logic is the weekly schedule engine: parsing the free-form time
//! encodings carried by catalog entries and detecting time conflicts between
//! a candidate course and the courses already selected. Everything else is
//! thin glue around it, exposed as a REST API via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Core shared types (weekdays, sessions, courses)
//! - [`schedule`]: Time-encoding parser and conflict detector
//! - [`services`]: Business logic (cart admission, accounts, catalog loading)
//! - [`db`]: Repository pattern and persistence layer
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;
pub mod schedule;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
