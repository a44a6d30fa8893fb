use std::fmt::{self, Write as _};

use anyhow::Result;
use primer_engine::device::{GpuInit, HeadlessGpu};
use primer_engine::shader::substitute;

use super::support::{buffer_bind_group, empty_buffer, read_pods, shader_module};

const WORKGROUP_SIZE: [u32; 3] = [2, 3, 4];
const DISPATCH_COUNT: [u32; 3] = [4, 3, 2];

/// A `vec3u` in a storage array occupies 16 bytes.
const VEC3U_STRIDE: usize = 4;

fn product(v: [u32; 3]) -> u32 {
    v.iter().product()
}

fn shader_source() -> String {
    let size = WORKGROUP_SIZE.map(|n| n.to_string()).join(",");
    let threads = product(WORKGROUP_SIZE).to_string();
    substitute(
        include_str!("../shaders/compute_shader_basics.wgsl"),
        &[
            ("__WORKGROUP_SIZE__", size.as_str()),
            ("__NUM_THREADS_PER_WORKGROUP__", threads.as_str()),
        ],
    )
    .into_owned()
}

fn get3(values: &[u32], i: usize) -> String {
    let off = i * VEC3U_STRIDE;
    format!("{}, {}, {}", values[off], values[off + 1], values[off + 2])
}

/// One row per invocation, with a header before each workgroup's rows.
fn format_table(workgroup: &[u32], local: &[u32], global: &[u32], threads_per_group: usize) -> Result<String, fmt::Error> {
    let num_results = workgroup.len() / VEC3U_STRIDE;
    let mut out = String::new();
    for i in 0..num_results {
        if i % threads_per_group == 0 {
            writeln!(
                out,
                "   ---------------------------------------\n   \
                 global                 local     global   dispatch: {}\n   \
                 invoc.    workgroup    invoc.    invoc.\n   \
                 index     id           id        id\n   \
                 ---------------------------------------",
                i / threads_per_group
            )?;
        }
        writeln!(
            out,
            " {i:>3}:      {}      {}   {}",
            get3(workgroup, i),
            get3(local, i),
            get3(global, i)
        )?;
    }
    Ok(out)
}

/// Records each invocation's workgroup, local and global id and prints them.
pub fn run() -> Result<()> {
    let gpu = pollster::block_on(HeadlessGpu::new("compute basics device", GpuInit::default()))?;
    let device = gpu.device();

    let module = shader_module(device, "invocation id module", &shader_source());
    let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some("invocation id pipeline"),
        layout: None,
        module: &module,
        entry_point: None,
        compilation_options: Default::default(),
        cache: None,
    });

    let threads_per_group = product(WORKGROUP_SIZE);
    let num_results = product(DISPATCH_COUNT) * threads_per_group;
    let size = (num_results as usize * VEC3U_STRIDE * size_of::<u32>()) as wgpu::BufferAddress;

    let usage = wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC;
    let results = ["workgroup", "local", "global"].map(|name| {
        let storage = empty_buffer(device, &format!("{name} id results"), size, usage);
        let readback = empty_buffer(device, &format!("{name} id readback"), size, wgpu::BufferUsages::MAP_READ);
        (storage, readback)
    });

    let bind_group = buffer_bind_group(
        device,
        "invocation id bind group",
        &pipeline.get_bind_group_layout(0),
        &[&results[0].0, &results[1].0, &results[2].0],
    );

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("invocation id encoder"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("invocation id pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        let [x, y, z] = DISPATCH_COUNT;
        pass.dispatch_workgroups(x, y, z);
    }
    for (storage, readback) in &results {
        encoder.copy_buffer_to_buffer(storage, 0, readback, 0, size);
    }
    gpu.queue().submit(std::iter::once(encoder.finish()));

    let [workgroup, local, global] = &results;
    let workgroup: Vec<u32> = read_pods(&gpu.read_buffer(&workgroup.1)?);
    let local: Vec<u32> = read_pods(&gpu.read_buffer(&local.1)?);
    let global: Vec<u32> = read_pods(&gpu.read_buffer(&global.1)?);

    print!("{}", format_table(&workgroup, &local, &global, threads_per_group as usize)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled() {
        let source = shader_source();
        assert!(source.contains("@workgroup_size(2,3,4)"));
        assert!(source.contains("workgroup_index * 24 +"));
        assert!(!source.contains("__"));
    }

    #[test]
    fn table_has_a_header_per_workgroup() {
        // Two workgroups of two invocations each.
        let workgroup = [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0];
        let local = [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0];
        let global = [0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0];

        let table = format_table(&workgroup, &local, &global, 2).unwrap();
        assert_eq!(table.matches("dispatch:").count(), 2);
        assert!(table.contains("dispatch: 1"));
        assert!(table.contains("   3:      1, 0, 0      1, 0, 0   3, 0, 0"));
    }
}
