use std::cell::OnceCell;
use std::future::Future;

/// The `Memo` struct is a memo slot: room for exactly one cached result, owned by whatever
/// instance holds the `Memo`.
///
/// The slot starts empty.  The first call to [`Memo::get_or_init`] runs the computation and
/// stores its result, and every later call hands back the stored result without running anything.
/// The slot is never cleared, so over any number of reads the computation runs exactly once.
///
/// A struct with an expensive, argument-free property keeps a `Memo` field next to its other
/// data and reads through it:
///
/// ```
/// use dawdle::Memo;
///
/// struct Sample {
///     answer: Memo<u64>,
/// }
///
/// impl Sample {
///     fn answer(&self) -> u64 {
///         *self.answer.get_or_init(|| 42)
///     }
/// }
///
/// let sample = Sample { answer: Memo::new() };
/// assert_eq!(sample.answer(), 42);
/// assert_eq!(sample.answer(), 42);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Memo<T> {
    slot: OnceCell<T>,
}

impl<T> Memo<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Returns the cached value, running `f` to produce it if the slot is still empty.
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(|| {
            tracing::trace!("Memo slot empty, computing.");
            f()
        })
    }

    /// Peeks at the slot without computing anything.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether the computation has already run.
    pub fn is_filled(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// The `AsyncMemo` struct is the asynchronous cousin of [`Memo`], built on
/// [`tokio::sync::OnceCell`] so the slot can be shared across tasks.
///
/// The computation is a fallible future.  A successful result fills the slot for good.  A failure
/// is returned to the caller and leaves the slot empty, so the next read tries again.  When several
/// tasks read an empty slot at once, one of them runs the computation and the rest wait for it.
#[derive(Debug, Default)]
pub struct AsyncMemo<T> {
    slot: tokio::sync::OnceCell<T>,
}

impl<T> AsyncMemo<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            slot: tokio::sync::OnceCell::new(),
        }
    }

    /// Returns the cached value, awaiting `f` to produce it if the slot is still empty.
    pub async fn get_or_try_init<E, F, Fut>(&self, f: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.slot
            .get_or_try_init(|| {
                tracing::trace!("Async memo slot empty, computing.");
                f()
            })
            .await
    }

    /// Peeks at the slot without awaiting anything.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether a computation has succeeded and filled the slot.
    pub fn is_filled(&self) -> bool {
        self.slot.initialized()
    }
}
