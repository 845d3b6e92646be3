//! OpenCL ядра для матричных операций

/// Имя ядра матричного умножения в скомпилированной программе
pub const MATRIX_MULTIPLY_KERNEL_NAME: &str = "matrix_multiply";

/// Исходный код ядра для матричного умножения
///
/// Глобальная сетка разбивается на рабочие группы 16x16; проверка границ
/// позволяет запускать ядро для любого размера матрицы N >= 1.
pub static MATRIX_MULTIPLY_KERNEL: &str = r#"
__kernel void matrix_multiply(
    __global const float* a,
    __global const float* b,
    __global float* c,
    const int size
) {
    const int row = get_global_id(1);
    const int col = get_global_id(0);

    if (row >= size || col >= size) {
        return;
    }

    float sum = 0.0f;
    for (int k = 0; k < size; k++) {
        sum = fma(a[row * size + k], b[k * size + col], sum);
    }

    c[row * size + col] = sum;
}
"#;
