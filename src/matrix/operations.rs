//! Операции над матрицами на стороне хоста

use super::types::MatrixType;
use rand::Rng;

/// Инициализирует пару входных матриц заданного типа и размера
pub fn initialize_matrices(matrix_type: MatrixType, size: usize) -> (Vec<f32>, Vec<f32>) {
    let matrix_elements = size * size;
    match matrix_type {
        MatrixType::OnesAndTwos => {
            (vec![1.0f32; matrix_elements], vec![2.0f32; matrix_elements])
        }
        MatrixType::ThreesAndFours => {
            (vec![3.0f32; matrix_elements], vec![4.0f32; matrix_elements])
        }
        MatrixType::Random => {
            let mut rng = rand::thread_rng();
            let a: Vec<f32> = (0..matrix_elements).map(|_| rng.gen_range(0.0..1.0)).collect();
            let b: Vec<f32> = (0..matrix_elements).map(|_| rng.gen_range(0.0..1.0)).collect();
            (a, b)
        }
    }
}

/// Опорная CPU-реализация матричного умножения
///
/// Используется программным двойником бэкенда и тестами верификации.
pub fn cpu_matrix_multiply(a: &[f32], b: &[f32], c: &mut [f32], size: usize) {
    for i in 0..size {
        for j in 0..size {
            let mut sum = 0.0f32;
            for k in 0..size {
                sum += a[i * size + k] * b[k * size + j];
            }
            c[i * size + j] = sum;
        }
    }
}

/// Сравнивает два результата умножения поэлементно
///
/// Возвращает true, если все элементы совпадают в пределах допуска.
pub fn compare_results(lhs: &[f32], rhs: &[f32], size: usize) -> bool {
    let epsilon = 1e-3f32;
    let mut max_diff = 0.0f32;
    let mut diff_count = 0usize;

    for i in 0..size {
        for j in 0..size {
            let idx = i * size + j;
            let diff = (lhs[idx] - rhs[idx]).abs();
            if diff > epsilon {
                diff_count += 1;
                max_diff = max_diff.max(diff);
            }
        }
    }

    if diff_count > 0 {
        println!("Обнаружены расхождения:");
        println!("Количество различающихся элементов: {}", diff_count);
        println!("Максимальная разница: {}", max_diff);
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ones_and_twos_fill_constant_values() {
        let (a, b) = initialize_matrices(MatrixType::OnesAndTwos, 3);
        assert_eq!(a.len(), 9);
        assert_eq!(b.len(), 9);
        assert!(a.iter().all(|&v| v == 1.0));
        assert!(b.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn cpu_multiply_of_constant_matrices() {
        // C[i][j] = a * b * N при постоянном заполнении
        let size = 4;
        let (a, b) = initialize_matrices(MatrixType::ThreesAndFours, size);
        let mut c = vec![0.0f32; size * size];
        cpu_matrix_multiply(&a, &b, &mut c, size);
        assert!(c.iter().all(|&v| v == 3.0 * 4.0 * size as f32));
    }

    #[test]
    fn compare_results_detects_mismatch() {
        let lhs = vec![1.0f32; 4];
        let mut rhs = lhs.clone();
        assert!(compare_results(&lhs, &rhs, 2));
        rhs[3] = 2.0;
        assert!(!compare_results(&lhs, &rhs, 2));
    }
}
