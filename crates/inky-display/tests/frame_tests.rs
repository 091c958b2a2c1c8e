//! Flush-exactly-once behaviour of `Frame` and `scoped`.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use inky_common::{IconType, InkyError, InkyResult, Position, ScaleType, TrainSchedule, WeatherSnapshot};
use inky_display::{scoped, DisplayBackend, Frame};

#[derive(Default)]
struct Counts {
    begins: Cell<usize>,
    flushes: Cell<usize>,
    draws: Cell<usize>,
}

/// Backend that only counts calls.
struct CountingBackend {
    counts: Rc<Counts>,
    fail_flush: bool,
}

impl CountingBackend {
    fn new() -> (Self, Rc<Counts>) {
        let counts = Rc::new(Counts::default());
        (
            Self {
                counts: Rc::clone(&counts),
                fail_flush: false,
            },
            counts,
        )
    }

    fn draw(&self) -> InkyResult<()> {
        self.counts.draws.set(self.counts.draws.get() + 1);
        Ok(())
    }
}

impl DisplayBackend for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn begin(&mut self) -> InkyResult<()> {
        self.counts.begins.set(self.counts.begins.get() + 1);
        Ok(())
    }

    fn flush(&mut self) -> InkyResult<()> {
        self.counts.flushes.set(self.counts.flushes.get() + 1);
        if self.fail_flush {
            return Err(InkyError::Io("panel unplugged".into()));
        }
        Ok(())
    }

    fn draw_date(&mut self, _pos: Position) -> InkyResult<()> {
        self.draw()
    }

    fn draw_time(&mut self, _pos: Position) -> InkyResult<()> {
        self.draw()
    }

    fn draw_train_times(&mut self, _s: &TrainSchedule, _count: usize, _pos: Position) -> InkyResult<()> {
        self.draw()
    }

    fn draw_weather_forecast(
        &mut self,
        _w: &WeatherSnapshot,
        _scale: ScaleType,
        _pos: Position,
        _tomorrow: bool,
    ) -> InkyResult<()> {
        self.draw()
    }

    fn draw_mini_forecast(&mut self, _w: &WeatherSnapshot, _scale: ScaleType, _pos: Position, _day: i32) -> InkyResult<()> {
        self.draw()
    }

    fn draw_weather_icon(&mut self, _icon: IconType, _pos: Position) -> InkyResult<()> {
        self.draw()
    }

    fn draw_forecast_icons(&mut self, _w: &WeatherSnapshot, _scale: ScaleType, _pos: Position) -> InkyResult<()> {
        self.draw()
    }

    fn draw_goodnight(&mut self, _w: &WeatherSnapshot, _scale: ScaleType) -> InkyResult<()> {
        self.draw()
    }
}

#[test]
fn test_finish_flushes_once() {
    let (mut backend, counts) = CountingBackend::new();
    {
        let mut frame = Frame::begin(&mut backend).unwrap();
        frame.draw_date(Position::new(0, 0)).unwrap();
        frame.finish().unwrap();
    }
    assert_eq!(counts.begins.get(), 1);
    assert_eq!(counts.draws.get(), 1);
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_drop_flushes_once() {
    let (mut backend, counts) = CountingBackend::new();
    {
        let mut frame = Frame::begin(&mut backend).unwrap();
        frame.draw_time(Position::new(0, 0)).unwrap();
    }
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_early_return_still_flushes() {
    fn draw_then_bail(backend: &mut CountingBackend, bail: bool) -> InkyResult<()> {
        let mut frame = Frame::begin(backend)?;
        frame.draw_date(Position::new(0, 0))?;
        if bail {
            return Err(InkyError::Render("stop".into()));
        }
        frame.finish()
    }

    let (mut backend, counts) = CountingBackend::new();
    assert!(draw_then_bail(&mut backend, true).is_err());
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_panic_while_drawing_flushes_once() {
    let (mut backend, counts) = CountingBackend::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _frame = Frame::begin(&mut backend).unwrap();
        panic!("drawing blew up");
    }));
    assert!(result.is_err());
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_scoped_returns_value_and_flushes() {
    let (mut backend, counts) = CountingBackend::new();
    let value = scoped(&mut backend, |b| {
        b.draw_date(Position::new(10, 5))?;
        b.draw_time(Position::new(257, 5))?;
        Ok(42)
    })
    .unwrap();
    assert_eq!(value, 42);
    assert_eq!(counts.draws.get(), 2);
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_scoped_draw_error_takes_precedence() {
    let (mut backend, counts) = CountingBackend::new();
    backend.fail_flush = true;
    let err = scoped(&mut backend, |_| -> InkyResult<()> {
        Err(InkyError::Render("bad glyph".into()))
    })
    .unwrap_err();
    assert!(matches!(err, InkyError::Render(_)));
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_scoped_reports_flush_error() {
    let (mut backend, counts) = CountingBackend::new();
    backend.fail_flush = true;
    let err = scoped(&mut backend, |_| Ok(())).unwrap_err();
    assert!(matches!(err, InkyError::Io(_)));
    assert_eq!(counts.flushes.get(), 1);
}

#[test]
fn test_frames_work_through_trait_objects() {
    let (backend, counts) = CountingBackend::new();
    let mut boxed: Box<dyn DisplayBackend> = Box::new(backend);
    scoped(boxed.as_mut(), |b| b.draw_goodnight(&WeatherSnapshot::default(), ScaleType::Celsius)).unwrap();
    scoped(boxed.as_mut(), |_| Ok(())).unwrap();
    assert_eq!(counts.begins.get(), 2);
    assert_eq!(counts.flushes.get(), 2);
}
