use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::display::window::{DisplaySurface, ESCAPE_KEY};
use crate::foundation::error::{SpacebattleError, SpacebattleResult};
use crate::render::canvas::Canvas;

/// Desktop window backed by `minifb`.
pub struct MinifbSurface {
    window: Option<Window>,
    /// 0x00RRGGBB per pixel.
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl MinifbSurface {
    pub fn new(title: &str, width: u32, height: u32) -> SpacebattleResult<Self> {
        let (width, height) = (width as usize, height as usize);
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| SpacebattleError::resource(format!("failed to open window: {e}")))?;
        tracing::info!(title, width, height, "window opened");
        Ok(Self {
            window: Some(window),
            buffer: vec![0; width * height],
            width,
            height,
        })
    }
}

impl DisplaySurface for MinifbSurface {
    fn present(&mut self, frame: &Canvas) -> SpacebattleResult<()> {
        let Some(window) = self.window.as_mut() else {
            return Err(SpacebattleError::resource("window is closed"));
        };
        if frame.width() as usize != self.width || frame.height() as usize != self.height {
            return Err(SpacebattleError::validation(format!(
                "frame size mismatch: got {}x{}, window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }

        for (dst, px) in self.buffer.iter_mut().zip(frame.as_raw().chunks_exact(3)) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
        window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| SpacebattleError::resource(format!("failed to update window: {e}")))
    }

    fn wait_key(&mut self, timeout: Duration) -> SpacebattleResult<Option<u32>> {
        let Some(window) = self.window.as_mut() else {
            return Ok(Some(ESCAPE_KEY));
        };
        let deadline = Instant::now() + timeout;
        loop {
            if !window.is_open() {
                return Ok(Some(ESCAPE_KEY));
            }
            if let Some(key) = window.get_keys_pressed(KeyRepeat::No).first() {
                return Ok(Some(key_code(*key)));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            std::thread::sleep(Duration::from_millis(1));
            window.update();
        }
    }

    fn close(&mut self) {
        if self.window.take().is_some() {
            tracing::debug!("window closed");
        }
    }
}

fn key_code(key: Key) -> u32 {
    match key {
        Key::Escape => ESCAPE_KEY,
        Key::Enter => 13,
        Key::Space => 32,
        Key::Tab => 9,
        Key::Backspace => 8,
        Key::Key0 => u32::from(b'0'),
        Key::Key1 => u32::from(b'1'),
        Key::Key2 => u32::from(b'2'),
        Key::Key3 => u32::from(b'3'),
        Key::Key4 => u32::from(b'4'),
        Key::Key5 => u32::from(b'5'),
        Key::Key6 => u32::from(b'6'),
        Key::Key7 => u32::from(b'7'),
        Key::Key8 => u32::from(b'8'),
        Key::Key9 => u32::from(b'9'),
        // Letters map to lowercase ASCII; minifb numbers A..Z contiguously.
        other => {
            let idx = other as u32;
            let a = Key::A as u32;
            let z = Key::Z as u32;
            if (a..=z).contains(&idx) {
                u32::from(b'a') + (idx - a)
            } else {
                255
            }
        }
    }
}
