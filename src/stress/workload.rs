//! Размер рабочей нагрузки и политика его выбора

use rand::Rng;

/// Размер рабочей группы ядра в каждом измерении
pub const WORK_GROUP_SIZE: usize = 16;

/// Количество рабочих групп по одному измерению: ceil(size / 16)
pub fn work_groups_per_dim(size: usize) -> usize {
    (size + WORK_GROUP_SIZE - 1) / WORK_GROUP_SIZE
}

/// Рабочая нагрузка одной итерации: квадратная матрица N x N
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workload {
    pub size: usize,
}

impl Workload {
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Количество элементов одной матрицы
    pub fn elements(&self) -> usize {
        self.size * self.size
    }

    /// Размер одной матрицы в байтах
    pub fn bytes(&self) -> usize {
        self.elements() * std::mem::size_of::<f32>()
    }

    /// Сетка рабочих групп, покрывающая матрицу
    pub fn work_groups(&self) -> [usize; 2] {
        let groups = work_groups_per_dim(self.size);
        [groups, groups]
    }
}

/// Политика выбора размера матрицы для очередной итерации
#[derive(Debug, Clone)]
pub enum SizePolicy {
    /// Фиксированный размер
    Constant(usize),
    /// Случайный размер в диапазоне [min, max]
    RandomInRange(usize, usize),
    /// Циклический перебор заданных размеров
    Sequence(Vec<usize>, usize),
}

impl SizePolicy {
    /// Создает циклическую последовательность размеров
    pub fn sequence(sizes: Vec<usize>) -> Self {
        Self::Sequence(sizes, 0)
    }

    /// Возвращает размер для следующей итерации (всегда >= 1)
    pub fn next_size(&mut self) -> usize {
        let size = match self {
            Self::Constant(size) => *size,
            Self::RandomInRange(min, max) => {
                let mut rng = rand::thread_rng();
                rng.gen_range(*min..=*max)
            }
            Self::Sequence(sizes, cursor) => {
                let size = sizes[*cursor % sizes.len()];
                *cursor += 1;
                size
            }
        };
        size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_groups_cover_matrix() {
        assert_eq!(work_groups_per_dim(1), 1);
        assert_eq!(work_groups_per_dim(15), 1);
        assert_eq!(work_groups_per_dim(16), 1);
        assert_eq!(work_groups_per_dim(17), 2);
        assert_eq!(work_groups_per_dim(32), 2);
        assert_eq!(work_groups_per_dim(15000), 938);
    }

    #[test]
    fn workload_derives_elements_and_bytes() {
        let workload = Workload::new(15000);
        assert_eq!(workload.elements(), 15000 * 15000);
        assert_eq!(workload.bytes(), 15000 * 15000 * 4);
        assert_eq!(workload.work_groups(), [938, 938]);
    }

    #[test]
    fn workload_size_is_at_least_one() {
        assert_eq!(Workload::new(0).size, 1);
    }

    #[test]
    fn constant_policy_repeats_size() {
        let mut policy = SizePolicy::Constant(15000);
        assert_eq!(policy.next_size(), 15000);
        assert_eq!(policy.next_size(), 15000);
    }

    #[test]
    fn degenerate_random_range_yields_its_bound() {
        let mut policy = SizePolicy::RandomInRange(15000, 15000);
        for _ in 0..5 {
            assert_eq!(policy.next_size(), 15000);
        }
    }

    #[test]
    fn random_range_stays_in_bounds() {
        let mut policy = SizePolicy::RandomInRange(8, 64);
        for _ in 0..100 {
            let size = policy.next_size();
            assert!((8..=64).contains(&size));
        }
    }

    #[test]
    fn sequence_policy_cycles() {
        let mut policy = SizePolicy::sequence(vec![2, 4, 8]);
        let sizes: Vec<usize> = (0..5).map(|_| policy.next_size()).collect();
        assert_eq!(sizes, vec![2, 4, 8, 2, 4]);
    }
}
