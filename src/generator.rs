use crate::delay::draw;
use futures::future::join_all;
use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;
use tokio::time;

/// The `ROUNDS` constant is the number of comprehensions [`measure_runtime`] runs side by side.
pub const ROUNDS: usize = 4;

/// The `Generator` struct describes a slow source of random numbers.
///
/// * The `count` field is how many values the stream yields before it ends.
/// * The `interval` field is how long the stream sleeps before each value.
/// * The `ceiling` field is the upper bound of each value, drawn uniformly from zero.  A ceiling
///   that is not a positive finite number yields zeros.
///
/// The default yields ten values between zero and ten, one per second.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    derive_new::new,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct Generator {
    count: usize,
    interval: Duration,
    ceiling: f64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1), 10.0)
    }
}

impl Generator {
    /// The `stream` method returns the values as a lazy [`Stream`].
    ///
    /// Nothing happens until the stream is polled.  Each poll that needs a new value sleeps for
    /// `interval` and then draws one, so the only suspension point is the sleep.  We build the
    /// stream with [`stream::unfold`], carrying the number of values yielded so far as state.
    pub fn stream(&self) -> impl Stream<Item = f64> + Send + 'static {
        let Self {
            count,
            interval,
            ceiling,
        } = *self;
        stream::unfold(0, move |yielded| async move {
            if yielded >= count {
                return None;
            }
            time::sleep(interval).await;
            let value = draw(ceiling);
            tracing::trace!("Yielding {value:.3}");
            Some((value, yielded + 1))
        })
    }

    /// Drains [`Generator::stream`] into a vector.
    #[tracing::instrument(skip(self))]
    pub async fn collect(&self) -> Vec<f64> {
        self.stream().collect().await
    }

    /// The `measure` method runs `rounds` calls to [`Generator::collect`] at once and returns how
    /// long they took together.
    ///
    /// Since the streams sleep side by side, the total comes out close to a single
    /// `count * interval`, however many rounds there are.
    #[tracing::instrument(skip(self))]
    pub async fn measure(&self, rounds: usize) -> Duration {
        let start = time::Instant::now();
        let results = join_all((0..rounds).map(|_| self.collect())).await;
        let elapsed = start.elapsed();
        tracing::trace!("{} rounds in {elapsed:?}", results.len());
        elapsed
    }
}

/// Ten random values between zero and ten, one per second.
pub fn async_generator() -> impl Stream<Item = f64> + Send + 'static {
    Generator::default().stream()
}

/// Collects [`async_generator`] into a vector.
pub async fn async_comprehension() -> Vec<f64> {
    Generator::default().collect().await
}

/// Runs [`ROUNDS`] comprehensions concurrently and returns the total runtime, about ten seconds.
pub async fn measure_runtime() -> Duration {
    Generator::default().measure(ROUNDS).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(1);

    fn close_to(actual: Duration, expected: Duration) -> bool {
        actual + TICK * 20 >= expected && actual <= expected + TICK * 20
    }

    #[tokio::test(start_paused = true)]
    async fn async_generator_yields_ten_values_in_range() {
        let start = time::Instant::now();
        let values = async_generator().collect::<Vec<f64>>().await;
        assert_eq!(values.len(), 10);
        assert!(values.iter().all(|v| (0.0..=10.0).contains(v)));
        assert!(close_to(start.elapsed(), Duration::from_secs(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn async_generator_waits_before_each_value() {
        let mut values = std::pin::pin!(async_generator());
        let start = time::Instant::now();
        for n in 1..=3u32 {
            assert!(values.next().await.is_some());
            assert!(close_to(start.elapsed(), Duration::from_secs(n.into())));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stream_is_lazy() {
        let stream = Generator::default().with_count(2).stream();
        time::advance(Duration::from_secs(30)).await;
        let start = time::Instant::now();
        let values = stream.collect::<Vec<f64>>().await;
        assert_eq!(values.len(), 2);
        assert!(close_to(start.elapsed(), Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn async_comprehension_collects_everything() {
        let cases = [
            (Generator::default(), 10, 10.0),
            (Generator::new(3, Duration::from_millis(50), 1.0), 3, 1.0),
            (Generator::default().with_count(0), 0, 10.0),
        ];
        for (generator, count, ceiling) in cases {
            let values = generator.collect().await;
            assert_eq!(values.len(), count);
            assert!(values.iter().all(|v| (0.0..=ceiling).contains(v)));
        }
        assert_eq!(async_comprehension().await.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn non_finite_ceiling_yields_zeros() {
        for ceiling in [f64::INFINITY, f64::NAN] {
            let generator = Generator::new(2, Duration::from_millis(5), ceiling);
            assert_eq!(generator.collect().await, vec![0.0, 0.0], "ceiling {ceiling}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn measure_runtime_overlaps_rounds() {
        let runtime = measure_runtime().await;
        assert!(close_to(runtime, Duration::from_secs(10)), "{runtime:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn measure_scales_with_count_not_rounds() {
        let generator = Generator::default().with_count(2);
        for rounds in [1, 4, 16] {
            let runtime = generator.measure(rounds).await;
            assert!(close_to(runtime, Duration::from_secs(2)), "{rounds}: {runtime:?}");
        }
    }
}
