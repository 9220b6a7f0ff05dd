//! Game-session engines for Verseplay.
//!
//! This crate holds the state machines and scoring algorithms behind the
//! three mini-games, plus the collaborator traits (generator, corpus,
//! transcriber) the engines depend on. Concrete collaborator
//! implementations live in verseplay-infra; this crate never depends on
//! them (verseplay-core knows traits, verseplay-infra knows the wire).

pub mod corpus;
pub mod generator;
pub mod quiz;
pub mod recitation;
pub mod registry;
pub mod transcriber;
pub mod wordchain;
