// This file is the module declaration file for the `core` module.
// It declares the submodules of `src/core/` and exposes them to the rest of
// the crate.

// `config` module:
// Selector sheets on disk. Defines `SelectorSheet` and its definitions,
// the `ConfigProvider` trait, and the `ConfigManager` that loads, saves,
// imports and exports sheets.
pub mod config;
pub mod engine;
pub mod error;
pub mod objects;
