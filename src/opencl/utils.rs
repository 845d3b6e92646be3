//! Вспомогательные функции для работы с OpenCL API

/// Преобразует строку в null-terminated массив байт для передачи в C API
pub fn to_c_string(s: &str) -> Vec<i8> {
    let mut result: Vec<i8> = s.bytes().map(|b| b as i8).collect();
    result.push(0);
    result
}

#[cfg(test)]
mod tests {
    use super::to_c_string;

    #[test]
    fn c_string_is_null_terminated() {
        let s = to_c_string("matrix_multiply");
        assert_eq!(s.len(), "matrix_multiply".len() + 1);
        assert_eq!(*s.last().unwrap(), 0);
    }
}
