//! Модуль для работы с OpenCL
//!
//! Содержит низкоуровневые привязки и типы OpenCL API

pub mod bindings;
pub mod callbacks;
pub mod types;
pub mod utils;
