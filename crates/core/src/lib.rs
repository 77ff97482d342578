//! Core library for apibgen
//!
//! This crate implements the **Functional Core** of the apibgen
//! application: pure transformation functions with zero I/O. The
//! `apibgen` binary crate is the Imperative Shell that reads the
//! collection export from disk and writes the rendered document.
//!
//! The transformation runs in two stages:
//!
//! - [`collection`]: parse a Postman collection export into an explicit
//!   optional-field data model (name, description, variables, item tree)
//! - [`blueprint`]: walk the item tree, group requests into resources
//!   (see [`resource`]), and render the API Blueprint markup
//!
//! All functions here are deterministic and testable with fixture JSON,
//! no file system or mocking required.

pub mod blueprint;
pub mod collection;
pub mod resource;

pub use blueprint::{render, GeneratorConfig, RenderedBlueprint};
pub use collection::{Collection, CollectionError};
pub use resource::{MalformedItem, MethodEntry, Resource, ResourceMap};
