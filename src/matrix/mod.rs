//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Типы заполнения матриц
//! - Операции над матрицами на CPU
//! - Исходный код GPU-ядра умножения

mod types;
pub mod operations;
pub mod kernels;

pub use types::MatrixType;
pub use operations::{cpu_matrix_multiply, compare_results, initialize_matrices};
pub use kernels::{MATRIX_MULTIPLY_KERNEL, MATRIX_MULTIPLY_KERNEL_NAME};
