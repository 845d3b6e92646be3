//! Тесты цикла стресс-теста на программном двойнике бэкенда

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{ensure, Result};
use opencl_stress::matrix::{compare_results, cpu_matrix_multiply, MatrixType};
use opencl_stress::stress::{
    run_stress_loop, BufferInit, CancelToken, ComputeBackend, IterationReport, ReportSink,
    SizePolicy, StressConfig,
};

type SharedBuffer = Rc<RefCell<Vec<f32>>>;

struct PendingMultiply {
    a: SharedBuffer,
    b: SharedBuffer,
    c: SharedBuffer,
    size: usize,
}

/// Программный двойник GPU-бэкенда
///
/// Умножение выполняется на CPU в момент ожидания завершения, поэтому
/// чтение до ожидания вернуло бы нули. Журнал вызовов позволяет
/// проверять порядок операций цикла.
struct SoftwareBackend {
    calls: Vec<&'static str>,
    pending: Option<PendingMultiply>,
}

impl SoftwareBackend {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            pending: None,
        }
    }
}

impl ComputeBackend for SoftwareBackend {
    type Buffer = SharedBuffer;

    fn device_name(&self) -> &str {
        "software-double"
    }

    fn create_buffer(&mut self, len: usize, init: BufferInit<'_>) -> Result<SharedBuffer> {
        self.calls.push("alloc");
        let contents = match init {
            BufferInit::Copy(data) => {
                ensure!(data.len() == len, "размер данных не совпадает с буфером");
                data.to_vec()
            }
            BufferInit::Zeroed => vec![0.0f32; len],
        };
        Ok(Rc::new(RefCell::new(contents)))
    }

    fn submit_multiply(
        &mut self,
        a: &SharedBuffer,
        b: &SharedBuffer,
        c: &SharedBuffer,
        size: usize,
    ) -> Result<()> {
        self.calls.push("submit");
        ensure!(
            self.pending.is_none(),
            "в полете может быть только одна команда"
        );
        self.pending = Some(PendingMultiply {
            a: Rc::clone(a),
            b: Rc::clone(b),
            c: Rc::clone(c),
            size,
        });
        Ok(())
    }

    fn wait_completed(&mut self) -> Result<()> {
        self.calls.push("wait");
        if let Some(pending) = self.pending.take() {
            let a = pending.a.borrow();
            let b = pending.b.borrow();
            let mut c = pending.c.borrow_mut();
            cpu_matrix_multiply(&a, &b, &mut c, pending.size);
        }
        Ok(())
    }

    fn read_buffer(&mut self, buffer: &SharedBuffer, len: usize) -> Result<Vec<f32>> {
        self.calls.push("read");
        let contents = buffer.borrow();
        ensure!(contents.len() >= len, "чтение за границей буфера");
        Ok(contents[..len].to_vec())
    }
}

/// Приемник отчетов, останавливающий цикл после заданного числа итераций
struct CapturingSink {
    cancel: CancelToken,
    stop_after: u64,
    sizes: Vec<usize>,
    a: Vec<f32>,
    b: Vec<f32>,
    c: Vec<f32>,
}

impl CapturingSink {
    fn new(cancel: CancelToken, stop_after: u64) -> Self {
        Self {
            cancel,
            stop_after,
            sizes: Vec::new(),
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
        }
    }
}

impl ReportSink for CapturingSink {
    fn report(&mut self, report: &IterationReport<'_>) {
        self.sizes.push(report.size);
        self.a = report.a_prefix.to_vec();
        self.b = report.b_prefix.to_vec();
        self.c = report.c_prefix.to_vec();
        if report.iteration >= self.stop_after {
            self.cancel.cancel();
        }
    }
}

fn test_config(matrix_type: MatrixType, preview: usize) -> StressConfig {
    StressConfig {
        matrix_type,
        pace: Duration::ZERO,
        preview,
    }
}

#[test]
fn constant_fill_product_is_a_b_n() {
    // A из 1.0, B из 2.0, N=2: каждый элемент C равен 1*2*2 = 4
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::Constant(2);
    let cancel = CancelToken::new();
    let mut sink = CapturingSink::new(cancel.clone(), 1);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::OnesAndTwos, 10),
        &cancel,
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.c, vec![4.0, 4.0, 4.0, 4.0]);
}

#[test]
fn constant_fill_product_scales_with_size() {
    let size = 8;
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::Constant(size);
    let cancel = CancelToken::new();
    let mut sink = CapturingSink::new(cancel.clone(), 1);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::ThreesAndFours, 10),
        &cancel,
        &mut sink,
    )
    .unwrap();

    // C[i][j] = 3 * 4 * N
    assert!(sink.c.iter().all(|&v| v == 3.0 * 4.0 * size as f32));
}

#[test]
fn random_fill_matches_cpu_reference() {
    let size = 5;
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::Constant(size);
    let cancel = CancelToken::new();
    // Превью размером во всю матрицу, чтобы сверить результат целиком
    let mut sink = CapturingSink::new(cancel.clone(), 1);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::Random, size * size),
        &cancel,
        &mut sink,
    )
    .unwrap();

    let mut expected = vec![0.0f32; size * size];
    cpu_matrix_multiply(&sink.a, &sink.b, &mut expected, size);
    assert!(compare_results(&sink.c, &expected, size));
}

#[test]
fn loop_is_strictly_synchronous() {
    let iterations = 3;
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::Constant(4);
    let cancel = CancelToken::new();
    let mut sink = CapturingSink::new(cancel.clone(), iterations);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::OnesAndTwos, 10),
        &cancel,
        &mut sink,
    )
    .unwrap();

    // Каждая итерация: три выделения, отправка, ожидание, чтение.
    // Выделения итерации i+1 идут строго после чтения итерации i.
    let per_iteration = ["alloc", "alloc", "alloc", "submit", "wait", "read"];
    let expected: Vec<&str> = per_iteration
        .iter()
        .cycle()
        .take(per_iteration.len() * iterations as usize)
        .copied()
        .collect();
    assert_eq!(backend.calls, expected);
}

#[test]
fn cancel_token_bounds_iterations() {
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::Constant(2);
    let cancel = CancelToken::new();
    let mut sink = CapturingSink::new(cancel.clone(), 5);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::OnesAndTwos, 4),
        &cancel,
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.sizes.len(), 5);
}

#[test]
fn sequence_policy_drives_workload_sizes() {
    let mut backend = SoftwareBackend::new();
    let mut policy = SizePolicy::sequence(vec![2, 4, 8]);
    let cancel = CancelToken::new();
    let mut sink = CapturingSink::new(cancel.clone(), 3);

    run_stress_loop(
        &mut backend,
        &mut policy,
        &test_config(MatrixType::OnesAndTwos, 4),
        &cancel,
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.sizes, vec![2, 4, 8]);
}
