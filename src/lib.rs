//! Quakewatch - Live Seismic Event Monitor
//!
//! This crate implements the ingestion and synchronization engine behind a
//! live earthquake dashboard: push-channel lifecycle with reconnection
//! backoff, event fan-out to decoupled subscribers, a bounded newest-first
//! event store, and keyed marker reconciliation onto a map surface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
