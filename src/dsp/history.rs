/*
History Ring
============

Every dry sample (plus whatever the feedback path injects) is appended to a
per-channel ring. Taps never write; each one owns a read cursor and walks
forward through the ring at its own pace.

    oldest                                      newest
      │                                            │
      ▼                                            ▼
    ┌───┬───┬───┬───┬───┬───┬───┬───┬───┬───┬───┬───┐
    │   │   │   │ a │   │   │ b │   │   │   │   │ x │ ◄── push()
    └───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴───┘
                  ▲           ▲
             cursor[0]    cursor[1]

    size(0) = samples from cursor[0] up to and including x

Positions are absolute sample counts (u64) and are only reduced to a slot
index with a bitmask at access time, so the capacity must be a power of two.
The write counter starts at `capacity`: the ring begins "full of silence",
which lets a reader seek up to `capacity - 1` samples into the past straight
away.

A reader that falls more than `capacity` samples behind is not waited for.
The writer overwrites its unread history and the reader's effective cursor
snaps forward to the oldest slot still intact. That reader skips audio; every
other reader is unaffected.
*/

/// Read-only view of the unread history in front of one cursor.
#[derive(Clone, Copy)]
pub struct HistoryWindow<'a> {
    samples: &'a [f32],
    mask: usize,
    start: u64,
    len: usize,
}

impl<'a> HistoryWindow<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sample `offset` positions after the cursor. Offsets past the window
    /// read silence.
    #[inline]
    pub fn get(&self, offset: usize) -> f32 {
        if offset >= self.len {
            return 0.0;
        }
        let slot = (self.start as usize).wrapping_add(offset) & self.mask;
        self.samples[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(move |offset| self.get(offset))
    }
}

/// Circular sample history shared by `READERS` independent cursors.
pub struct HistoryBuffer<const READERS: usize> {
    samples: Box<[f32]>,
    mask: usize,
    written: u64,
    cursors: [u64; READERS],
}

impl<const READERS: usize> HistoryBuffer<READERS> {
    /// Allocate a zero-filled ring. `capacity` is rounded up to a power of two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2).next_power_of_two();
        Self {
            samples: vec![0.0; capacity].into_boxed_slice(),
            mask: capacity - 1,
            written: capacity as u64,
            cursors: [capacity as u64; READERS],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Append one sample, overwriting the oldest slot.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        let slot = self.written as usize & self.mask;
        self.samples[slot] = sample;
        self.written += 1;
    }

    #[inline]
    fn oldest(&self) -> u64 {
        self.written - self.capacity() as u64
    }

    #[inline]
    fn effective_cursor(&self, reader: usize) -> u64 {
        self.cursors[reader].max(self.oldest())
    }

    /// Unread samples buffered ahead of `reader`'s cursor.
    #[inline]
    pub fn size(&self, reader: usize) -> usize {
        (self.written - self.effective_cursor(reader)) as usize
    }

    /// Window over everything `reader` has not consumed yet.
    #[inline]
    pub fn start_data(&self, reader: usize) -> HistoryWindow<'_> {
        let start = self.effective_cursor(reader);
        HistoryWindow {
            samples: &self.samples,
            mask: self.mask,
            start,
            len: (self.written - start) as usize,
        }
    }

    /// Mark `consumed` samples as read by `reader`. Never moves past the
    /// write cursor.
    #[inline]
    pub fn start_incr(&mut self, reader: usize, consumed: usize) {
        let next = self.effective_cursor(reader) + consumed as u64;
        self.cursors[reader] = next.min(self.written);
    }

    /// Place `reader` so that its next sample is the one pushed `depth`
    /// samples before the newest.
    pub fn seek(&mut self, reader: usize, depth: usize) {
        let depth = depth.min(self.capacity() - 1) as u64;
        self.cursors[reader] = self.written - 1 - depth;
    }

    /// Zero the ring and rewind every reader.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.written = self.capacity() as u64;
        self.cursors = [self.written; READERS];
    }
}
