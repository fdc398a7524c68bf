//! poetry-service: answers questions about a single poetry collection by
//! grounding a Gemini prompt in the full text of the book.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
