//! Интерфейс вычислительного бэкенда
//!
//! Абстрагирует GPU-контекст, чтобы тесты могли подставить программную
//! реализацию вместо реального устройства.

use anyhow::Result;

/// Начальное содержимое создаваемого буфера
#[derive(Debug, Clone, Copy)]
pub enum BufferInit<'a> {
    /// Скопировать данные хоста в буфер
    Copy(&'a [f32]),
    /// Заполнить буфер нулями
    Zeroed,
}

/// Вычислительный бэкенд матричного умножения
///
/// Контракт ядра: три буфера в фиксированных слотах (A=0, B=1, C=2),
/// один вызов диспетчеризации на итерацию, синхронное ожидание завершения.
pub trait ComputeBackend {
    /// Дескриптор буфера в памяти устройства
    type Buffer;

    /// Имя устройства для диагностики
    fn device_name(&self) -> &str;

    /// Выделяет буфер на `len` элементов f32
    fn create_buffer(&mut self, len: usize, init: BufferInit<'_>) -> Result<Self::Buffer>;

    /// Кодирует и отправляет одну команду умножения C = A * B
    ///
    /// Сетка диспетчеризации покрывает N x N рабочими группами 16x16,
    /// по ceil(N / 16) групп в каждом измерении.
    fn submit_multiply(
        &mut self,
        a: &Self::Buffer,
        b: &Self::Buffer,
        c: &Self::Buffer,
        size: usize,
    ) -> Result<()>;

    /// Блокирует до завершения всех отправленных команд
    fn wait_completed(&mut self) -> Result<()>;

    /// Читает `len` элементов f32 из буфера в память хоста
    fn read_buffer(&mut self, buffer: &Self::Buffer, len: usize) -> Result<Vec<f32>>;
}
