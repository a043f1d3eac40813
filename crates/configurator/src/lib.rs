// Library crate: the scene-state core, shared by the CLI binary, the HTTP
// server and the wasm bindings.

pub mod build;
pub mod command;
pub mod detection;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod keyboard;
pub mod pricing;
pub mod quotation;
pub mod state;
pub mod validation;

/// Hit testing against object bounds.
pub mod viewport {
    pub mod picking;
}
