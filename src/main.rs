//! Непрерывный стресс-тест GPU: бесконечное умножение больших матриц

use anyhow::Result;
use opencl_stress::matrix::{MATRIX_MULTIPLY_KERNEL, MATRIX_MULTIPLY_KERNEL_NAME};
use opencl_stress::stress::{
    find_gpu_device, run_stress_loop, CancelToken, ComputeBackend, ConsoleSink, OclSession,
    SizePolicy, StressConfig, WORK_GROUP_SIZE,
};

const MATRIX_SIZE: usize = 15000;

fn main() -> Result<()> {
    println!("Запуск стресс-теста умножения матриц на GPU");

    // Отсутствие совместимого устройства — отдельный код выхода
    let device = match find_gpu_device() {
        Ok(device) => device,
        Err(err) => {
            eprintln!("Совместимое GPU-устройство не найдено: {err:#}");
            std::process::exit(1);
        }
    };

    let mut session = OclSession::acquire(device, MATRIX_MULTIPLY_KERNEL, MATRIX_MULTIPLY_KERNEL_NAME)?;

    println!("Используется GPU: {}", session.device_name());
    println!("Размер матриц: {0}x{0}", MATRIX_SIZE);
    println!("Размер рабочей группы: {0}x{0}", WORK_GROUP_SIZE);

    let mut policy = SizePolicy::Constant(MATRIX_SIZE);
    let config = StressConfig::default();
    let cancel = CancelToken::new();
    let mut sink = ConsoleSink;

    run_stress_loop(&mut session, &mut policy, &config, &cancel, &mut sink)
}
