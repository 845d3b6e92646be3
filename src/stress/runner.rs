//! Цикл стресс-теста: нагрузка, буферы, отправка, ожидание, отчет
//!
//! Хост работает строго синхронно: в полете не более одной команды,
//! буферы следующей итерации не создаются до чтения результата текущей.

use crate::matrix::{initialize_matrices, MatrixType};
use crate::stress::backend::{BufferInit, ComputeBackend};
use crate::stress::workload::{SizePolicy, Workload};
use crate::utils::measure_time;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Токен остановки цикла
///
/// Рабочий процесс его не взводит и крутит цикл бесконечно; тесты
/// ограничивают количество итераций детерминированно.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Параметры цикла стресс-теста
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Заполнение входных матриц
    pub matrix_type: MatrixType,
    /// Пауза между итерациями
    pub pace: Duration,
    /// Сколько первых элементов каждой матрицы попадает в отчет
    pub preview: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            matrix_type: MatrixType::OnesAndTwos,
            pace: Duration::from_millis(100),
            preview: 10,
        }
    }
}

/// Итог одной итерации для отчета
pub struct IterationReport<'a> {
    pub iteration: u64,
    pub size: usize,
    pub gpu_time: Duration,
    pub a_prefix: &'a [f32],
    pub b_prefix: &'a [f32],
    pub c_prefix: &'a [f32],
}

/// Приемник отчетов об итерациях
pub trait ReportSink {
    fn report(&mut self, report: &IterationReport<'_>);
}

/// Вывод отчетов в консоль
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn report(&mut self, report: &IterationReport<'_>) {
        println!(
            "\nИтерация {}: матрица {} x {}, GPU за {:?}",
            report.iteration, report.size, report.size, report.gpu_time
        );
        println!("Матрица A (первые {} элементов):", report.a_prefix.len());
        println!("{:?}", report.a_prefix);
        println!("Матрица B (первые {} элементов):", report.b_prefix.len());
        println!("{:?}", report.b_prefix);
        println!("Результирующая матрица C (первые {} элементов):", report.c_prefix.len());
        println!("{:?}", report.c_prefix);
    }
}

/// Запускает цикл стресс-теста до взведения токена остановки
///
/// Каждая итерация: размер нагрузки, три буфера (A, B, C), одна команда
/// умножения, синхронное ожидание, чтение результата, отчет, пауза.
/// Любая ошибка бэкенда фатальна и прерывает цикл.
pub fn run_stress_loop<B: ComputeBackend>(
    backend: &mut B,
    policy: &mut SizePolicy,
    config: &StressConfig,
    cancel: &CancelToken,
    sink: &mut dyn ReportSink,
) -> Result<()> {
    let mut iteration = 0u64;

    while !cancel.is_cancelled() {
        let workload = Workload::new(policy.next_size());
        let elements = workload.elements();

        let (a, b) = initialize_matrices(config.matrix_type, workload.size);

        let a_buffer = backend.create_buffer(elements, BufferInit::Copy(&a))?;
        let b_buffer = backend.create_buffer(elements, BufferInit::Copy(&b))?;
        let c_buffer = backend.create_buffer(elements, BufferInit::Zeroed)?;

        let (submit_result, gpu_time) = measure_time(|| -> Result<()> {
            backend.submit_multiply(&a_buffer, &b_buffer, &c_buffer, workload.size)?;
            backend.wait_completed()
        });
        submit_result?;

        let c = backend.read_buffer(&c_buffer, elements)?;

        iteration += 1;
        let preview = config.preview.min(elements);
        sink.report(&IterationReport {
            iteration,
            size: workload.size,
            gpu_time,
            a_prefix: &a[..preview],
            b_prefix: &b[..preview],
            c_prefix: &c[..preview],
        });

        // Буферы итерации освобождаются здесь, до следующего выделения
        drop(c_buffer);
        drop(b_buffer);
        drop(a_buffer);

        if !config.pace.is_zero() {
            std::thread::sleep(config.pace);
        }
    }

    Ok(())
}
