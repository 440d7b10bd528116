// BPTracker Data
// This crate handles local persistence of blood pressure readings

// Key-value storage backends and their configuration
pub mod storage;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
