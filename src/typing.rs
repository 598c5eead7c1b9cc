//! Literal text typing, optionally interleaved with pointer jitter
//! ("psycho-mouse").

use alloc::vec::Vec;

use rand::Rng;

use crate::config::PsychoSettings;
use crate::hid::{HidTransport, Keyboard, Mouse};
use crate::locale::Locale;

/// `samples` random offsets in `[-range, range]` (at least one).
pub fn jitter_offsets<R: Rng>(rng: &mut R, settings: &PsychoSettings) -> Vec<i32> {
    let range = settings.jitter_range.saturating_abs();
    (0..settings.jitter_samples.max(1))
        .map(|_| rng.gen_range(-range..=range))
        .collect()
}

/// Devices the typing engine drives.
pub struct Typist<'a, H> {
    pub locale: &'a Locale,
    pub keyboard: &'a mut Keyboard,
    pub mouse: &'a mut Mouse,
    pub hid: &'a mut H,
}

impl<H: HidTransport> Typist<'_, H> {
    /// Type `text` in one go. Returns characters the layout cannot type.
    pub async fn write(&mut self, text: &str) -> Vec<char> {
        self.locale.write(&mut *self.keyboard, &mut *self.hid, text).await
    }

    /// Type `text` in chunks of `chunk_size` characters, moving the pointer
    /// by `(offsets[i], offsets[i + 1])` (wrapping) after chunk `i`.
    pub async fn write_jittered(
        &mut self,
        text: &str,
        chunk_size: usize,
        offsets: &[i32],
    ) -> Vec<char> {
        if offsets.is_empty() {
            return self.write(text).await;
        }
        let mut unsupported = Vec::new();
        let chunk_size = chunk_size.max(1);
        let mut rest = text;
        let mut i = 0;
        while !rest.is_empty() {
            let end = rest
                .char_indices()
                .nth(chunk_size)
                .map_or(rest.len(), |(idx, _)| idx);
            let (chunk, tail) = rest.split_at(end);
            unsupported.extend(self.write(chunk).await);
            let dx = offsets[i % offsets.len()];
            let dy = offsets[(i + 1) % offsets.len()];
            self.mouse.move_by(&mut *self.hid, dx, dy, 0).await;
            i += 1;
            rest = tail;
        }
        unsupported
    }
}
