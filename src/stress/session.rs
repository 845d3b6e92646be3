//! Однократное получение GPU-контекста: устройство, очередь команд, конвейер
//!
//! Любая ошибка на этом этапе отражает неисправное окружение и не
//! подлежит повторным попыткам.

use crate::opencl::{bindings::*, types::*, utils::to_c_string};
use crate::stress::backend::{BufferInit, ComputeBackend};
use crate::stress::workload::{Workload, WORK_GROUP_SIZE};
use crate::{cl_check, cl_create};
use anyhow::{ensure, Result};
use std::ffi::c_void;
use std::ptr;

/// Ищет GPU-устройство на первой доступной платформе OpenCL
///
/// Ошибка означает отсутствие совместимого устройства; вызывающая
/// сторона завершает процесс с кодом 1.
pub fn find_gpu_device() -> Result<cl_device_id> {
    let mut platform_ids = vec![ptr::null_mut(); 1];
    let mut num_platforms = 0u32;

    cl_check!(clGetPlatformIDs(1, platform_ids.as_mut_ptr(), &mut num_platforms))?;
    ensure!(num_platforms > 0, "Не найдено ни одной платформы OpenCL");

    let platform = platform_ids[0];

    let mut device_ids = vec![ptr::null_mut(); 1];
    let mut num_devices = 0u32;

    cl_check!(clGetDeviceIDs(
        platform,
        CL_DEVICE_TYPE_GPU,
        1,
        device_ids.as_mut_ptr(),
        &mut num_devices
    ))?;
    ensure!(num_devices > 0, "Не найдено ни одного GPU-устройства");

    Ok(device_ids[0])
}

/// GPU-контекст процесса: создается один раз, живет до завершения
pub struct OclSession {
    context: cl_context,
    command_queue: cl_command_queue,
    program: cl_program,
    kernel: cl_kernel,
    device_name: String,
}

/// Буфер в памяти устройства, принадлежащий одной итерации
pub struct OclBuffer {
    mem: cl_mem,
}

impl Drop for OclBuffer {
    fn drop(&mut self) {
        unsafe {
            clReleaseMemObject(self.mem);
        }
    }
}

impl OclSession {
    /// Создает контекст, очередь команд и конвейер с указанным ядром
    pub fn acquire(device: cl_device_id, source: &str, kernel_name: &str) -> Result<Self> {
        let device_name = query_device_name(device)?;
        let context = create_context(device)?;
        let command_queue = create_queue(context, device)?;
        let (program, kernel) = load_pipeline(context, device, source, kernel_name)?;

        Ok(Self {
            context,
            command_queue,
            program,
            kernel,
            device_name,
        })
    }
}

fn query_device_name(device: cl_device_id) -> Result<String> {
    let mut name_size = 0usize;
    cl_check!(clGetDeviceInfo(
        device,
        CL_DEVICE_NAME,
        0,
        ptr::null_mut(),
        &mut name_size
    ))?;

    let mut name = vec![0u8; name_size];
    cl_check!(clGetDeviceInfo(
        device,
        CL_DEVICE_NAME,
        name_size,
        name.as_mut_ptr() as *mut c_void,
        ptr::null_mut()
    ))?;

    Ok(String::from_utf8_lossy(&name).trim_end_matches('\0').to_string())
}

fn create_context(device: cl_device_id) -> Result<cl_context> {
    cl_create!(clCreateContext(
        ptr::null(),
        1,
        &device,
        None,
        ptr::null_mut(),
        &mut 0
    ))
}

fn create_queue(context: cl_context, device: cl_device_id) -> Result<cl_command_queue> {
    cl_create!(clCreateCommandQueue(context, device, 0, &mut 0))
}

/// Компилирует программу и создает ядро с указанным именем
fn load_pipeline(
    context: cl_context,
    device: cl_device_id,
    source: &str,
    kernel_name: &str,
) -> Result<(cl_program, cl_kernel)> {
    let source_ptr = source.as_ptr() as *const i8;
    let source_len = source.len();

    let program = cl_create!(clCreateProgramWithSource(
        context,
        1,
        &source_ptr,
        &source_len,
        &mut 0
    ))?;

    let build_status = unsafe {
        clBuildProgram(program, 1, &device, ptr::null(), None, ptr::null_mut())
    };

    if build_status != 0 {
        // В случае ошибки выводим лог компиляции
        let mut log_size = 0usize;
        cl_check!(clGetProgramBuildInfo(
            program,
            device,
            CL_PROGRAM_BUILD_LOG,
            0,
            ptr::null_mut(),
            &mut log_size
        ))?;

        let mut log = vec![0u8; log_size];
        cl_check!(clGetProgramBuildInfo(
            program,
            device,
            CL_PROGRAM_BUILD_LOG,
            log_size,
            log.as_mut_ptr() as *mut c_void,
            ptr::null_mut()
        ))?;

        println!("Лог компиляции OpenCL:\n{}", String::from_utf8_lossy(&log));
        return Err(anyhow::anyhow!(
            "Ошибка при компиляции программы, код: {}",
            build_status
        ));
    }

    let name = to_c_string(kernel_name);
    let kernel = cl_create!(clCreateKernel(program, name.as_ptr(), &mut 0))?;

    Ok((program, kernel))
}

impl ComputeBackend for OclSession {
    type Buffer = OclBuffer;

    fn device_name(&self) -> &str {
        &self.device_name
    }

    fn create_buffer(&mut self, len: usize, init: BufferInit<'_>) -> Result<OclBuffer> {
        let bytes = len * std::mem::size_of::<f32>();

        let mem = match init {
            BufferInit::Copy(data) => {
                ensure!(data.len() == len, "Размер данных не совпадает с размером буфера");
                cl_create!(clCreateBuffer(
                    self.context,
                    CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR | CL_MEM_ALLOC_HOST_PTR,
                    bytes,
                    data.as_ptr() as *mut c_void,
                    &mut 0
                ))?
            }
            BufferInit::Zeroed => {
                let zeros = vec![0.0f32; len];
                cl_create!(clCreateBuffer(
                    self.context,
                    CL_MEM_WRITE_ONLY | CL_MEM_COPY_HOST_PTR | CL_MEM_ALLOC_HOST_PTR,
                    bytes,
                    zeros.as_ptr() as *mut c_void,
                    &mut 0
                ))?
            }
        };

        Ok(OclBuffer { mem })
    }

    fn submit_multiply(
        &mut self,
        a: &OclBuffer,
        b: &OclBuffer,
        c: &OclBuffer,
        size: usize,
    ) -> Result<()> {
        // Буферы в фиксированных слотах: A=0, B=1, C=2
        cl_check!(clSetKernelArg(
            self.kernel,
            0,
            std::mem::size_of::<cl_mem>(),
            &a.mem as *const _ as *const c_void
        ))?;
        cl_check!(clSetKernelArg(
            self.kernel,
            1,
            std::mem::size_of::<cl_mem>(),
            &b.mem as *const _ as *const c_void
        ))?;
        cl_check!(clSetKernelArg(
            self.kernel,
            2,
            std::mem::size_of::<cl_mem>(),
            &c.mem as *const _ as *const c_void
        ))?;
        cl_check!(clSetKernelArg(
            self.kernel,
            3,
            std::mem::size_of::<i32>(),
            &(size as i32) as *const _ as *const c_void
        ))?;

        let workload = Workload::new(size);
        let [groups_x, groups_y] = workload.work_groups();
        let global_size = [groups_x * WORK_GROUP_SIZE, groups_y * WORK_GROUP_SIZE];
        let local_size = [WORK_GROUP_SIZE, WORK_GROUP_SIZE];

        cl_check!(clEnqueueNDRangeKernel(
            self.command_queue,
            self.kernel,
            2,
            ptr::null(),
            global_size.as_ptr(),
            local_size.as_ptr(),
            0,
            ptr::null(),
            ptr::null_mut()
        ))
    }

    fn wait_completed(&mut self) -> Result<()> {
        cl_check!(clFinish(self.command_queue))
    }

    fn read_buffer(&mut self, buffer: &OclBuffer, len: usize) -> Result<Vec<f32>> {
        let mut output = vec![0.0f32; len];

        cl_check!(clEnqueueReadBuffer(
            self.command_queue,
            buffer.mem,
            true,
            0,
            len * std::mem::size_of::<f32>(),
            output.as_mut_ptr() as *mut c_void,
            0,
            ptr::null(),
            ptr::null_mut()
        ))?;

        Ok(output)
    }
}

impl Drop for OclSession {
    fn drop(&mut self) {
        unsafe {
            clReleaseKernel(self.kernel);
            clReleaseProgram(self.program);
            clReleaseCommandQueue(self.command_queue);
            clReleaseContext(self.context);
        }
    }
}
