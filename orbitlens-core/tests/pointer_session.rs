use orbitlens_core::constants::{ESCAPE_THRESHOLD_SQ, MAX_STEPS};
use orbitlens_core::{iterate, Complex, PixelSource, Rgb, Session, SwatchId, Viewport};

/// A flat image whose every pixel has the same color.
#[derive(Debug)]
struct Flat {
    width: u32,
    height: u32,
    color: Rgb,
}

impl PixelSource for Flat {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < self.width && y < self.height).then_some(self.color)
    }
}

const PALETTE: [&str; 4] = ["#1a2b3c", "#FF8800", "#ff8800", "#000000"];

#[test]
fn trace_matches_manual_iteration() {
    let mut session: Session<Flat> = Session::new(&PALETTE, 640.0, 480.0).unwrap();
    let vp = *session.viewport();

    for &(x, y) in &[(0.0, 0.0), (320.0, 240.0), (100.5, 400.25), (639.0, 1.0)] {
        let frame = session.on_pointer_move(x, y);
        let expected: Vec<(f64, f64)> = iterate(vp.to_plane(x, y), MAX_STEPS, ESCAPE_THRESHOLD_SQ)
            .map(|z| vp.to_pixel(z))
            .collect();
        assert_eq!(frame.trace, expected);
        assert!(frame.trace.len() <= MAX_STEPS as usize + 1);
    }
}

#[test]
fn interior_point_draws_full_trace() {
    // c = -1 sits in the period-2 bulb and never escapes.
    let vp = Viewport::standard(350.0, 200.0).unwrap();
    let (x, y) = vp.to_pixel(Complex::new(-1.0, 0.0));
    let mut session: Session<Flat> = Session::new(&PALETTE, 350.0, 200.0).unwrap();
    let frame = session.on_pointer_move(x, y);
    assert_eq!(frame.trace.len(), MAX_STEPS as usize + 1);
}

#[test]
fn image_load_enables_matching_and_duplicates_resolve_to_first() {
    let mut session: Session<Flat> = Session::new(&PALETTE, 100.0, 100.0).unwrap();

    assert_eq!(session.on_pointer_move(50.0, 50.0).change.set, None);

    session.on_image_loaded(Flat {
        width: 1920,
        height: 1080,
        color: Rgb::new(250, 130, 10),
    });
    let frame = session.on_pointer_move(50.0, 50.0);
    assert_eq!(frame.sample, Some(Rgb::new(250, 130, 10)));
    assert_eq!(frame.change.set, Some(SwatchId(1)));

    // A newer image replaces the old snapshot.
    session.on_image_loaded(Flat {
        width: 4,
        height: 4,
        color: Rgb::new(20, 40, 60),
    });
    let frame = session.on_pointer_move(99.0, 99.0);
    assert_eq!(frame.change.cleared, Some(SwatchId(1)));
    assert_eq!(frame.change.set, Some(SwatchId(0)));
}

#[test]
fn leave_then_move_starts_fresh() {
    let mut session: Session<Flat> = Session::new(&PALETTE, 100.0, 100.0).unwrap();
    session.on_image_loaded(Flat {
        width: 10,
        height: 10,
        color: Rgb::BLACK,
    });
    session.on_pointer_move(5.0, 5.0);
    assert_eq!(session.highlight().current(), Some(SwatchId(3)));

    session.on_pointer_leave();
    assert_eq!(session.highlight().current(), None);
    assert!(session.current_trace().is_empty());

    let frame = session.on_pointer_move(5.0, 5.0);
    assert_eq!(frame.change.cleared, None);
    assert_eq!(frame.change.set, Some(SwatchId(3)));
}
