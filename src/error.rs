//! Startup errors
//!
//! Everything here is fatal: the game cannot run without a canvas and a GPU
//! device, so the entry point logs the error and bails out.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} is not a canvas")]
    NotACanvas(&'static str),
    #[error("failed to initialise logger: {0}")]
    Logger(String),
    #[error("failed to create surface")]
    Surface {
        #[from]
        source: wgpu::CreateSurfaceError,
    },
    #[error("no suitable GPU adapter")]
    Adapter {
        #[from]
        source: wgpu::RequestAdapterError,
    },
    #[error("failed to create GPU device")]
    Device {
        #[from]
        source: wgpu::RequestDeviceError,
    },
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
