pub mod camera;
pub mod gpu;

pub use camera::Camera;
pub use gpu::GpuState;
