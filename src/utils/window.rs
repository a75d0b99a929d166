use alloc::boxed::Box;

/// A fixed-capacity circular buffer of observations.
///
/// Keeps the most recent `period` values. Once full, each push overwrites the
/// oldest value and hands it back to the caller.
#[derive(Debug, Clone)]
pub struct ObservationWindow {
    /// Backing storage, allocated once
    data: Box<[f64]>,
    /// Index of the oldest observation
    head: usize,
    /// Number of observations currently stored
    len: usize,
}

impl ObservationWindow {
    /// Creates a new window with the specified period, panics if period is 0
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "period can not be zero");

        Self {
            data: vec![0.0; period].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Returns the capacity of the window
    #[inline]
    pub fn period(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of buffered observations
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` once `period` observations are buffered
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.period()
    }

    /// Pushes an observation and returns the one it evicted, if any
    ///
    /// # Arguments
    ///
    /// * `value` - The observation to push
    ///
    /// # Returns
    ///
    /// * `Option<f64>` - The evicted observation, `None` while the window is filling
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let period = self.period();

        if self.is_full() {
            let evicted = core::mem::replace(&mut self.data[self.head], value);
            self.head = (self.head + 1) % period;
            Some(evicted)
        } else {
            self.data[(self.head + self.len) % period] = value;
            self.len += 1;
            None
        }
    }

    /// Returns the most recently pushed observation
    pub fn latest(&self) -> Option<f64> {
        (self.len > 0).then(|| self.data[(self.head + self.len - 1) % self.period()])
    }

    /// Clears the window
    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.head = 0;
        self.len = 0;
    }

    /// Returns the observations oldest first
    ///
    /// The iterator is cheap to clone, so it can be walked more than once.
    pub fn iter(&self) -> impl Iterator<Item = f64> + Clone {
        let period = self.period();
        (0..self.len).map(move |i| self.data[(self.head + i) % period])
    }
}
