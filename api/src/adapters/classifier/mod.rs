//! Toxicity classifier adapter
//!
//! HTTP implementation of the classifier port.

pub mod client;

pub use client::HttpToxicityClassifier;
