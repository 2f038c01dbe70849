use crate::Arrive;
use futures::stream::{FuturesUnordered, StreamExt};
use rand::Rng;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time;

/// Draws a value uniformly from `0.0..=ceiling`.
///
/// A ceiling that is negative, infinite or NaN leaves no range to draw from, so it yields zero.
/// Kept out of the async functions so the thread-local generator never lives across an `.await`.
pub(crate) fn draw(ceiling: f64) -> f64 {
    if !ceiling.is_finite() || ceiling <= 0.0 {
        return 0.0;
    }
    let mut rng = rand::thread_rng();
    rng.gen_range(0.0..=ceiling)
}

/// The `wait_random` function waits for a random number of seconds between zero and `max_delay`,
/// then tells you how long it waited.
///
/// The delay is drawn up front using [`rand::Rng::gen_range`] and spent in [`time::sleep`].  The
/// sleep is the only place this future yields, so when several of these run together the runtime
/// is free to make progress on the others only while this one is sleeping.
#[tracing::instrument]
pub async fn wait_random(max_delay: u32) -> f64 {
    let delay = draw(f64::from(max_delay));
    tracing::trace!("Waiting {delay:.3} seconds.");
    time::sleep(Duration::from_secs_f64(delay)).await;
    delay
}

/// The `wait_n` function runs `n` calls to [`wait_random`] at the same time on the current task.
///
/// Results arrive in the order the waits finish, so the shortest delay comes first and the vector
/// is sorted without anybody sorting it.  The whole call takes about as long as the longest single
/// delay.
#[tracing::instrument]
pub async fn wait_n(n: usize, max_delay: u32) -> Vec<f64> {
    let mut pending = (0..n)
        .map(|_| wait_random(max_delay))
        .collect::<FuturesUnordered<_>>();
    let mut delays = Vec::with_capacity(n);
    while let Some(delay) = pending.next().await {
        delays.push(delay);
    }
    tracing::trace!("{} waits finished.", delays.len());
    delays
}

/// Schedules a [`wait_random`] on the runtime as its own task.
pub fn task_wait_random(max_delay: u32) -> JoinHandle<f64> {
    tokio::spawn(wait_random(max_delay))
}

/// The `task_wait_n` function is [`wait_n`] with each wait spawned as a separate task using a
/// [`JoinSet`].  Delays come back in completion order, same as [`wait_n`].
///
/// Will [`crate::Blame::Join`] if one of the tasks panics or is cancelled.
#[tracing::instrument]
pub async fn task_wait_n(n: usize, max_delay: u32) -> Arrive<Vec<f64>> {
    let mut tasks = JoinSet::new();
    for _ in 0..n {
        tasks.spawn(wait_random(max_delay));
    }
    let mut delays = Vec::with_capacity(n);
    while let Some(delay) = tasks.join_next().await {
        delays.push(delay?);
    }
    Ok(delays)
}

/// Measures the wall-clock time of [`wait_n`] and returns the average per wait.
///
/// Returns [`Duration::ZERO`] when `n` is zero.
#[tracing::instrument]
pub async fn measure_time(n: usize, max_delay: u32) -> Duration {
    if n == 0 {
        return Duration::ZERO;
    }
    let start = time::Instant::now();
    wait_n(n, max_delay).await;
    let total = start.elapsed();
    tracing::trace!("Total time: {total:?}");
    total.div_f64(n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Timers fire on millisecond ticks, so completion order is only exact to within one tick.
    const TICK: f64 = 0.001;

    fn assert_ascending(delays: &[f64]) {
        for pair in delays.windows(2) {
            assert!(pair[0] <= pair[1] + TICK, "out of order: {delays:?}");
        }
    }

    #[test]
    fn draw_stays_in_bounds() {
        for ceiling in [0.0, 1.0, 10.0] {
            for _ in 0..100 {
                let value = draw(ceiling);
                assert!((0.0..=ceiling).contains(&value));
            }
        }
        assert_eq!(draw(-1.0), 0.0);
    }

    #[test]
    fn draw_ignores_non_finite_ceilings() {
        for ceiling in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(draw(ceiling), 0.0, "ceiling {ceiling}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_random_sleeps_for_its_delay() {
        for max_delay in [0, 1, 10] {
            let start = time::Instant::now();
            let delay = wait_random(max_delay).await;
            let elapsed = start.elapsed().as_secs_f64();
            assert!((0.0..=f64::from(max_delay)).contains(&delay));
            assert!(elapsed + TICK >= delay, "woke early: {elapsed} < {delay}");
            assert!(elapsed <= delay + 2.0 * TICK, "woke late: {elapsed} > {delay}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn wait_n_returns_completion_order() {
        let start = time::Instant::now();
        let delays = wait_n(5, 10).await;
        let elapsed = start.elapsed().as_secs_f64();
        assert_eq!(delays.len(), 5);
        assert_ascending(&delays);
        let longest = delays.iter().copied().fold(0.0, f64::max);
        assert!(elapsed <= longest + 2.0 * TICK);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_n_of_zero_is_empty() {
        assert!(wait_n(0, 10).await.is_empty());
        assert_eq!(measure_time(0, 10).await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn task_wait_random_spawns() {
        let delay = task_wait_random(3).await.unwrap();
        assert!((0.0..=3.0).contains(&delay));
    }

    #[tokio::test(start_paused = true)]
    async fn task_wait_n_returns_completion_order() {
        let delays = task_wait_n(10, 7).await.unwrap();
        assert_eq!(delays.len(), 10);
        assert!(delays.iter().all(|d| (0.0..=7.0).contains(d)));
        assert_ascending(&delays);
    }

    #[tokio::test(start_paused = true)]
    async fn measure_time_averages_over_waits() {
        let average = measure_time(5, 10).await;
        // The total is bounded by the longest wait, so the average is at most a fifth of it.
        assert!(average.as_secs_f64() <= 10.0 / 5.0 + TICK);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_waits_take_the_longest_not_the_sum() {
        let start = time::Instant::now();
        let (a, b, c, d) = tokio::join!(
            wait_random(10),
            wait_random(10),
            wait_random(10),
            wait_random(10)
        );
        let elapsed = start.elapsed().as_secs_f64();
        let longest = a.max(b).max(c).max(d);
        assert!((elapsed - longest).abs() <= 2.0 * TICK, "{elapsed} vs {longest}");
    }
}
