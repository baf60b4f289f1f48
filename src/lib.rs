//! SalaatFlow Assistant - Conversational core for the SalaatFlow application
//!
//! This crate implements the tool dispatch and conversation orchestration
//! layer: a typed tool registry backed by the SalaatFlow record store, a
//! Gemini model client with bounded retry, and the chat orchestrator that
//! turns user messages into tool invocations or free-form replies.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
