//! Core data models for the bucket gateway.
//!
//! `StoredObject` is the normalized listing entry; descriptors are the
//! derived views returned as JSON; `UploadRequest` is the inbound file.

pub mod descriptor;
pub mod object;
pub mod upload;
