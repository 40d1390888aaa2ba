/*
[INPUT]:  Console state and terminal events
[OUTPUT]: TUI module tree and public runtime surface
[POS]:    TUI module root
[UPDATE]: When adding TUI submodules or public exports
*/

mod app;
mod events;
pub mod runtime;
mod terminal;
mod ui;

pub use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_console,
};
