//! Draw-then-render in one call.

use crate::bitmap::Bitmap;
use crate::error::Error;
use crate::interface::Transport;

use super::Display;

impl<T> Display<T>
where
    T: Transport,
{
    /// Hand `draw` a blank bitmap the size of the display, then render it.
    ///
    /// The frame is rendered only if `draw` returns `Ok`. An error from `draw` comes back unchanged
    /// and nothing is sent, so the panel keeps showing the previous frame. The bitmap is dropped
    /// either way.
    ///
    /// ```ignore
    /// display.canvas(|bmp| {
    ///     Rectangle::new(Point::zero(), Size::new(10, 10))
    ///         .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
    ///         .draw(bmp)
    ///         .unwrap_or_else(|e| match e {});
    ///     Ok::<_, Error<_>>(())
    /// })?;
    /// ```
    pub fn canvas<F, R, E>(&mut self, draw: F) -> Result<R, E>
    where
        F: FnOnce(&mut Bitmap) -> Result<R, E>,
        E: From<Error<T::Error>>,
    {
        let mut bitmap = Bitmap::new(self.geometry);
        let out = draw(&mut bitmap)?;
        self.render(&bitmap)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::bitmap::Bitmap;
    use crate::chipset::Chipset;
    use crate::config::Config;
    use crate::display::Display;
    use crate::error::Error;
    use crate::geometry::Geometry;
    use crate::interface::test_spy::{SpyError, TestSpyTransport};

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[derive(Debug)]
    enum AppError {
        Drawing(&'static str),
        Display(Error<SpyError>),
    }

    impl From<Error<SpyError>> for AppError {
        fn from(e: Error<SpyError>) -> Self {
            AppError::Display(e)
        }
    }

    fn open(spy: &TestSpyTransport) -> Display<TestSpyTransport> {
        let disp = Display::new(
            spy.split(),
            1,
            0x3C,
            Chipset::Ssd1306,
            Geometry::new(128, 64),
            Config::new(),
        )
        .unwrap();
        spy.clear();
        disp
    }

    #[test]
    fn failed_drawing_sends_nothing() {
        let spy = TestSpyTransport::new();
        let mut disp = open(&spy);
        let res: Result<(), AppError> = disp.canvas(|bmp| {
            bmp.set(0, 0, true);
            Err(AppError::Drawing("font missing"))
        });
        assert!(matches!(res, Err(AppError::Drawing("font missing"))));
        assert!(spy.sent().is_empty());
    }

    #[test]
    fn successful_drawing_renders_once() {
        let spy = TestSpyTransport::new();
        let mut disp = open(&spy);
        let lit = disp
            .canvas(|bmp: &mut Bitmap| -> Result<usize, Error<SpyError>> {
                Line::new(Point::new(0, 0), Point::new(0, 7))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(bmp)
                    .unwrap_or_else(|e| match e {});
                Ok(8)
            })
            .unwrap();
        assert_eq!(lit, 8);
        // One range command, then the frame.
        assert_eq!(spy.writes().len(), 1 + 1024 / 32);
        let data = spy.payload(0x40);
        assert_eq!(data[127], 0xFF);
        assert_eq!(data.iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn canvas_starts_blank() {
        let spy = TestSpyTransport::new();
        let mut disp = open(&spy);
        disp.canvas(|bmp| -> Result<(), Error<SpyError>> {
            bmp.fill(true);
            Ok(())
        })
        .unwrap();
        disp.canvas(|bmp| -> Result<(), Error<SpyError>> {
            assert!(bmp.as_bytes().iter().all(|b| *b == 0));
            assert_eq!(bmp.width(), 128);
            assert_eq!(bmp.height(), 64);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn render_errors_convert_into_caller_error() {
        let spy = TestSpyTransport::new();
        let mut disp = open(&spy);
        disp.close().unwrap();
        let res: Result<(), AppError> = disp.canvas(|_| Ok(()));
        assert!(matches!(res, Err(AppError::Display(Error::Closed))));
    }

    #[cfg(feature = "std")]
    #[test]
    fn panic_in_drawing_sends_nothing() {
        use std::panic::{self, AssertUnwindSafe};

        let spy = TestSpyTransport::new();
        let mut disp = open(&spy);
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            disp.canvas(|bmp| -> Result<(), Error<SpyError>> {
                bmp.fill(true);
                panic!("drawing blew up");
            })
        }));
        assert!(res.is_err());
        assert!(spy.sent().is_empty());
    }
}
