//! Surface implementations and the pixel math behind them.

pub mod composite;
pub mod coverage;
pub mod cpu;
pub mod vello;

pub use cpu::CpuSurface;
pub use vello::VelloSurface;

/// Available surface backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-crate software rasterizer.
    #[default]
    Cpu,
    /// Raster backend powered by `vello_cpu`.
    Vello,
}
