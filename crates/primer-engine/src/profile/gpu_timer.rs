use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Readback buffer states, shared with the `map_async` callback.
const IDLE: u8 = 0;
const COPIED: u8 = 1;
const MAPPING: u8 = 2;
const MAPPED: u8 = 3;
const FAILED: u8 = 4;

const QUERY_COUNT: u32 = 2;
const RESOLVE_SIZE: wgpu::BufferAddress = QUERY_COUNT as wgpu::BufferAddress * 8;

/// Measures one render pass with a begin/end timestamp pair.
///
/// Per frame: pass [`timestamp_writes`](Self::timestamp_writes) to the render
/// pass, call [`resolve`](Self::resolve) on the same encoder, submit, then
/// [`begin_readback`](Self::begin_readback). [`poll`](Self::poll) yields the
/// pass duration once the readback buffer has been mapped. Frames recorded
/// while a readback is in flight are not copied, so results trail by a few
/// frames.
pub struct GpuTimer {
    query_set: wgpu::QuerySet,
    resolve_buffer: wgpu::Buffer,
    readback_buffer: wgpu::Buffer,
    period: f32,
    state: Arc<AtomicU8>,
}

impl GpuTimer {
    /// Returns `None` when the device was created without `TIMESTAMP_QUERY`.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Option<Self> {
        if !device.features().contains(wgpu::Features::TIMESTAMP_QUERY) {
            log::info!("timestamp queries unavailable; GPU time will not be reported");
            return None;
        }

        let query_set = device.create_query_set(&wgpu::QuerySetDescriptor {
            label: Some("gpu timer queries"),
            ty: wgpu::QueryType::Timestamp,
            count: QUERY_COUNT,
        });
        let resolve_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gpu timer resolve"),
            size: RESOLVE_SIZE,
            usage: wgpu::BufferUsages::QUERY_RESOLVE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let readback_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gpu timer readback"),
            size: RESOLVE_SIZE,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Some(Self {
            query_set,
            resolve_buffer,
            readback_buffer,
            period: queue.get_timestamp_period(),
            state: Arc::new(AtomicU8::new(IDLE)),
        })
    }

    /// Timestamp writes bracketing a render pass.
    pub fn timestamp_writes(&self) -> wgpu::RenderPassTimestampWrites<'_> {
        wgpu::RenderPassTimestampWrites {
            query_set: &self.query_set,
            beginning_of_pass_write_index: Some(0),
            end_of_pass_write_index: Some(1),
        }
    }

    /// Resolves the queries and, when the readback buffer is free, copies them into it.
    ///
    /// Must be recorded after the measured pass has ended.
    pub fn resolve(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.resolve_query_set(&self.query_set, 0..QUERY_COUNT, &self.resolve_buffer, 0);

        if claim_copy(&self.state) {
            encoder.copy_buffer_to_buffer(
                &self.resolve_buffer,
                0,
                &self.readback_buffer,
                0,
                RESOLVE_SIZE,
            );
        }
    }

    /// Starts mapping the readback buffer if this frame copied into it.
    ///
    /// Call after the encoder holding the copy has been submitted.
    pub fn begin_readback(&self) {
        if !claim_mapping(&self.state) {
            return;
        }

        let state = Arc::clone(&self.state);
        self.readback_buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                if let Err(err) = &result {
                    log::warn!("gpu timer readback failed: {err}");
                }
                finish_mapping(&state, result.is_ok());
            });
    }

    /// Drives pending mappings and returns the measured pass duration in
    /// nanoseconds once one is available.
    pub fn poll(&self, device: &wgpu::Device) -> Option<f64> {
        if let Err(err) = device.poll(wgpu::PollType::Poll) {
            log::debug!("device poll failed: {err}");
        }

        if !settle(&self.state) {
            return None;
        }
        let ns = {
            let range = self.readback_buffer.slice(..).get_mapped_range();
            let begin: u64 = bytemuck::pod_read_unaligned(&range[0..8]);
            let end: u64 = bytemuck::pod_read_unaligned(&range[8..16]);
            elapsed_ns(begin, end, self.period)
        };
        self.readback_buffer.unmap();
        self.state.store(IDLE, Ordering::Release);
        Some(ns)
    }
}

/// IDLE -> COPIED. Only an unmapped, unclaimed buffer may receive a copy.
fn claim_copy(state: &AtomicU8) -> bool {
    state
        .compare_exchange(IDLE, COPIED, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// COPIED -> MAPPING. Anything else means there is nothing new to map.
fn claim_mapping(state: &AtomicU8) -> bool {
    state
        .compare_exchange(COPIED, MAPPING, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// MAPPING -> MAPPED or FAILED, from the `map_async` callback.
fn finish_mapping(state: &AtomicU8, ok: bool) {
    state.store(if ok { MAPPED } else { FAILED }, Ordering::Release);
}

/// Whether a mapped result is waiting to be read.
///
/// FAILED goes straight back to IDLE. MAPPED stays put until the caller has
/// read and unmapped the buffer and stored IDLE itself.
fn settle(state: &AtomicU8) -> bool {
    match state.load(Ordering::Acquire) {
        MAPPED => true,
        FAILED => {
            state.store(IDLE, Ordering::Release);
            false
        }
        _ => false,
    }
}

/// Converts a raw timestamp pair into nanoseconds.
///
/// Some drivers report an end before the begin for very short passes.
fn elapsed_ns(begin: u64, end: u64, period: f32) -> f64 {
    end.saturating_sub(begin) as f64 * f64::from(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_scales_by_period() {
        assert_eq!(elapsed_ns(1_000, 3_000, 1.0), 2_000.0);
        assert_eq!(elapsed_ns(10, 20, 2.5), 25.0);
    }

    #[test]
    fn reversed_timestamps_clamp_to_zero() {
        assert_eq!(elapsed_ns(50, 40, 1.0), 0.0);
    }

    #[test]
    fn copy_is_skipped_while_a_readback_is_in_flight() {
        let state = AtomicU8::new(IDLE);
        assert!(claim_copy(&state));
        assert!(claim_mapping(&state));
        assert_eq!(state.load(Ordering::Acquire), MAPPING);

        assert!(!claim_copy(&state));
        assert_eq!(state.load(Ordering::Acquire), MAPPING);
        assert!(!settle(&state));
    }

    #[test]
    fn mapping_needs_a_copy_first() {
        let state = AtomicU8::new(IDLE);
        assert!(!claim_mapping(&state));
        assert_eq!(state.load(Ordering::Acquire), IDLE);
    }

    #[test]
    fn mapped_result_waits_for_the_reader() {
        let state = AtomicU8::new(IDLE);
        claim_copy(&state);
        claim_mapping(&state);
        finish_mapping(&state, true);

        assert!(settle(&state));
        assert!(settle(&state));
        assert!(!claim_copy(&state));
    }

    #[test]
    fn failed_mapping_returns_to_idle() {
        let state = AtomicU8::new(IDLE);
        claim_copy(&state);
        claim_mapping(&state);
        finish_mapping(&state, false);

        assert!(!settle(&state));
        assert_eq!(state.load(Ordering::Acquire), IDLE);
        assert!(claim_copy(&state));
    }
}
