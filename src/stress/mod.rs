//! Ядро стресс-теста
//!
//! Предоставляет:
//! - Интерфейс вычислительного бэкенда
//! - GPU-сессию поверх OpenCL
//! - Политику выбора размера нагрузки
//! - Цикл диспетчеризации

pub mod backend;
pub mod runner;
pub mod session;
pub mod workload;

pub use backend::{BufferInit, ComputeBackend};
pub use runner::{
    run_stress_loop, CancelToken, ConsoleSink, IterationReport, ReportSink, StressConfig,
};
pub use session::{find_gpu_device, OclBuffer, OclSession};
pub use workload::{work_groups_per_dim, SizePolicy, Workload, WORK_GROUP_SIZE};
