use criterion::Criterion;
use std::time::Instant;

use rfcanvas::{BlitRequest, CanvasConfig};

// Benchmarks for the pixel blitter. Run with:
//    cargo bench

/// Bench: one full-surface blit versus many small tiles
fn bench_blit_sizes(c: &mut Criterion) {
    let cfg = CanvasConfig { width: 640, height: 480, ..Default::default() };
    let (_doc, blitter) = rfcanvas::new_blitter(&cfg).expect("failed to create canvas");

    let full = BlitRequest::solid(640, 480, 0, 0, [255, 0, 0, 255]).unwrap();
    c.bench_function("blit_full_640x480", |b| {
        b.iter(|| blitter.blit(&full).unwrap())
    });

    let tiles: Vec<BlitRequest> = (0..30)
        .flat_map(|ty| (0..40).map(move |tx| (tx, ty)))
        .map(|(tx, ty)| BlitRequest::solid(16, 16, tx * 16, ty * 16, [0, 0, 255, 255]).unwrap())
        .collect();
    c.bench_function("blit_tiles_16x16", |b| {
        b.iter(|| blitter.blit_all(&tiles).unwrap())
    });

    let clipped = BlitRequest::solid(256, 256, 512, 352, [0, 255, 0, 255]).unwrap();
    c.bench_function("blit_clipped_corner", |b| {
        b.iter(|| blitter.blit(&clipped).unwrap())
    });
}

/// Bench: script-issued blits through the JS host
#[cfg(feature = "script")]
fn bench_script_blits(c: &mut Criterion) {
    let cfg = CanvasConfig { width: 64, height: 64, ..Default::default() };
    let (_doc, blitter) = rfcanvas::new_blitter(&cfg).expect("failed to create canvas");
    let mut host = rfcanvas::ScriptHost::new(blitter, &cfg).expect("failed to create host");
    let script = "for (var i = 0; i < 64; i++) { updateImageData({width:8,height:1,x:0,y:i,data:new Uint8ClampedArray(32)}); }";

    c.bench_function("script_64_blits", |b| {
        b.iter(|| host.eval(script).unwrap())
    });
}

#[cfg(not(feature = "script"))]
fn bench_script_blits(_c: &mut Criterion) {}

/// Micro-benchmark: per-blit latency percentiles (p50/p95/p99).
/// Configure iterations with `BENCH_ITERATIONS`.
fn bench_latency_percentiles() {
    let cfg = CanvasConfig { width: 1024, height: 768, ..Default::default() };
    let (_doc, blitter) = rfcanvas::new_blitter(&cfg).expect("failed to create canvas");
    let req = BlitRequest::solid(512, 512, 100, 100, [9, 9, 9, 255]).unwrap();

    let iterations: usize = std::env::var("BENCH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(200);

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let t0 = Instant::now();
        blitter.blit(&req).expect("blit failed");
        samples.push(t0.elapsed().as_micros() as u64);
    }

    samples.sort_unstable();
    println!(
        "[latency_percentiles] p50={}us p95={}us p99={}us",
        percentile(&samples, 50.0),
        percentile(&samples, 95.0),
        percentile(&samples, 99.0)
    );
}

fn percentile(samples: &[u64], pct: f64) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let n = samples.len();
    let rank = ((pct / 100.0) * (n as f64)).ceil() as usize;
    let idx = if rank == 0 {
        0
    } else {
        rank.saturating_sub(1).min(n - 1)
    };
    samples[idx]
}

fn main() {
    let mut c = Criterion::default();

    bench_blit_sizes(&mut c);
    bench_script_blits(&mut c);

    c.final_summary();

    bench_latency_percentiles();
}
