use criterion::{criterion_group, criterion_main, Criterion};

use orbitlens_core::{Rgb, Session};
use orbitlens_render::{
    palette_hex, period_palette, render_backdrop, RasterSnapshot, RenderBuffer, RenderCancel,
};

fn bench_pointer_move(c: &mut Criterion) {
    let palette = period_palette();
    let cancel = RenderCancel::new();
    let backdrop = render_backdrop(320, 180, 1, &palette, &cancel)
        .unwrap()
        .unwrap();
    let mut session: Session<RasterSnapshot> =
        Session::new(&palette_hex(&palette), 1280.0, 720.0).unwrap();
    session.on_image_loaded(RasterSnapshot::from_buffer(&backdrop).unwrap());

    c.bench_function("pointer_move_interior", |b| {
        b.iter(|| session.on_pointer_move(511.0, 360.0));
    });
    c.bench_function("pointer_move_exterior", |b| {
        b.iter(|| session.on_pointer_move(5.0, 5.0));
    });
}

fn bench_backdrop(c: &mut Criterion) {
    let palette = period_palette();
    let cancel = RenderCancel::new();

    c.bench_function("backdrop_160x90_1spp", |b| {
        b.iter(|| render_backdrop(160, 90, 1, &palette, &cancel));
    });
}

fn bench_trace_rasterize(c: &mut Criterion) {
    let palette = period_palette();
    let mut session: Session<RasterSnapshot> =
        Session::new(&palette_hex(&palette), 1280.0, 720.0).unwrap();
    let trace = session.on_pointer_move(511.0, 360.0).trace;
    let mut canvas = RenderBuffer::new(1280, 720);

    c.bench_function("draw_trace_1280x720", |b| {
        b.iter(|| canvas.draw_polyline(&trace, Rgb::new(0, 255, 0)));
    });
}

criterion_group!(benches, bench_pointer_move, bench_backdrop, bench_trace_rasterize);
criterion_main!(benches);
