use anyhow::Result;
use primer_engine::device::{GpuInit, HeadlessGpu};

use super::support::{buffer_bind_group, empty_buffer, init_buffer, read_pods, shader_module};

const LEN: usize = 20;

fn input() -> Vec<f32> {
    (0..LEN).map(|i| i as f32).collect()
}

/// Doubles `0..20` on the GPU and prints both arrays.
pub fn run() -> Result<()> {
    let gpu = pollster::block_on(HeadlessGpu::new("basic compute device", GpuInit::default()))?;
    let device = gpu.device();

    let module = shader_module(device, "doubling compute module", include_str!("../shaders/basic_compute.wgsl"));
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("doubling compute pipeline"),
        layout: None,
        module: &module,
        entry_point: None,
        compilation_options: Default::default(),
        cache: None,
    });

    let input = input();
    let bytes: &[u8] = bytemuck::cast_slice(&input);
    let size = bytes.len() as wgpu::BufferAddress;

    let work_buffer = init_buffer(
        device,
        "work buffer",
        bytes,
        wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
    );
    let result_buffer = empty_buffer(device, "result buffer", size, wgpu::BufferUsages::MAP_READ);
    let bind_group = buffer_bind_group(
        device,
        "bindGroup for work buffer",
        &pipeline.get_bind_group_layout(0),
        &[&work_buffer],
    );

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("doubling encoder"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("doubling compute pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(LEN as u32, 1, 1);
    }
    encoder.copy_buffer_to_buffer(&work_buffer, 0, &result_buffer, 0, size);
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let result: Vec<f32> = read_pods(&gpu.read_buffer(&result_buffer)?);

    println!("input  {input:?}");
    println!("result {result:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_counts_up_from_zero() {
        let input = input();
        assert_eq!(input.len(), LEN);
        assert_eq!(input[0], 0.0);
        assert_eq!(input[19], 19.0);
    }
}
