//! Frame profiling: rolling averages and GPU timestamp queries.

mod gpu_timer;
mod rolling_average;

pub use gpu_timer::GpuTimer;
pub use rolling_average::RollingAverage;
