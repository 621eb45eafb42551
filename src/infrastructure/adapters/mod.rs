//! Channel adapters

pub mod console;
pub mod whatsapp;
