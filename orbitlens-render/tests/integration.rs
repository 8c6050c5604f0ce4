use orbitlens_core::{PixelSource, Rgb, Session, SwatchId};
use orbitlens_render::{
    palette_hex, period_palette, render_backdrop, RasterSnapshot, RenderBuffer, RenderCancel,
};

const WIDTH: u32 = 70;
const HEIGHT: u32 = 40;

fn backdrop() -> RenderBuffer {
    let cancel = RenderCancel::new();
    render_backdrop(WIDTH, HEIGHT, 1, &period_palette(), &cancel)
        .unwrap()
        .expect("render was not cancelled")
}

#[test]
fn hovering_a_bulb_highlights_its_period() {
    let palette = period_palette();
    let hex = palette_hex(&palette);
    let mut session: Session<RasterSnapshot> =
        Session::new(&hex, f64::from(WIDTH) * 2.0, f64::from(HEIGHT) * 2.0).unwrap();
    session.on_image_loaded(RasterSnapshot::from_buffer(&backdrop()).unwrap());

    // Canvas is twice the natural size. c = 0 (main cardioid, period 1)
    // sits at natural (50, 20), canvas (100..102, 40..42).
    let frame = session.on_pointer_move(101.0, 41.0);
    assert_eq!(frame.sample, Some(palette[0]));
    assert_eq!(frame.change.set, Some(SwatchId(0)));

    // c = -1 (period-2 bulb) sits at natural (30, 20).
    let frame = session.on_pointer_move(61.0, 41.0);
    assert_eq!(frame.change.cleared, Some(SwatchId(0)));
    assert_eq!(frame.change.set, Some(SwatchId(1)));
    // The orbit of -1 never escapes, so the whole trace is drawn.
    assert_eq!(frame.trace.len(), 201);
}

#[test]
fn escaped_region_matches_nothing() {
    let hex = palette_hex(&period_palette());
    let mut session: Session<RasterSnapshot> =
        Session::new(&hex, f64::from(WIDTH), f64::from(HEIGHT)).unwrap();
    session.on_image_loaded(RasterSnapshot::from_buffer(&backdrop()).unwrap());

    let frame = session.on_pointer_move(0.0, 0.0);
    assert_eq!(frame.sample, Some(Rgb::WHITE));
    assert_eq!(frame.change.set, None);
    // c = -2.5 - i: |z₁|² = 7.25 stays under 8, z₂ = 2.75 + 4i escapes.
    assert_eq!(frame.trace.len(), 3);
}

#[test]
fn backdrop_is_deterministic() {
    let a = backdrop();
    let b = backdrop();
    assert_eq!(a.pixels, b.pixels);
    let snap = RasterSnapshot::from_buffer(&a).unwrap();
    assert_eq!(snap.dimensions(), (WIDTH, HEIGHT));
}

#[test]
fn burned_in_trace_lands_on_canvas() {
    let hex = palette_hex(&period_palette());
    let mut session: Session<RasterSnapshot> =
        Session::new(&hex, f64::from(WIDTH), f64::from(HEIGHT)).unwrap();
    let frame = session.on_pointer_move(30.0, 20.0);

    let mut canvas = RenderBuffer::new(WIDTH, HEIGHT);
    let green: Rgb = "#00ff00".parse().unwrap();
    canvas.draw_polyline(&frame.trace, green);
    // The first trace point is the plane origin, natural (50, 20).
    assert_eq!(canvas.get(50, 20), Some(green));
}
