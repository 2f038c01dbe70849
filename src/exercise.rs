use crate::{task_wait_n, wait_n, wait_random, Arrive, GithubOrgClient, HttpFetch, Settings};

/// The `Exercise` enum lists the demonstrations run by the `dawdle` binary, in order.
///
/// We iterate the variants with [`strum::IntoEnumIterator`], so adding a variant here is all it
/// takes to add a step to the binary.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum Exercise {
    /// A single [`wait_random`].
    Wait,
    /// [`wait_n`] on one task.
    Waits,
    /// [`task_wait_n`] with a task per wait.
    Tasks,
    /// [`crate::measure_time`] over [`wait_n`].
    Average,
    /// [`crate::Generator::collect`].
    Comprehension,
    /// [`crate::Generator::measure`].
    Runtime,
    /// [`GithubOrgClient::public_repos`], skipped when no org is configured.
    Org,
}

impl Exercise {
    /// The `run` method performs the exercise with the given `settings` and logs the outcome at
    /// the `INFO` level.
    #[tracing::instrument(skip(settings))]
    pub async fn run(&self, settings: &Settings) -> Arrive<()> {
        let max_delay = *settings.max_delay();
        let spawns = *settings.spawns();
        match self {
            Self::Wait => {
                let delay = wait_random(max_delay).await;
                tracing::info!("Waited {delay:.3} seconds.");
            }
            Self::Waits => {
                let delays = wait_n(spawns, max_delay).await;
                tracing::info!("Delays in order of completion: {delays:.3?}");
            }
            Self::Tasks => {
                let delays = task_wait_n(spawns, max_delay).await?;
                tracing::info!("Task delays in order of completion: {delays:.3?}");
            }
            Self::Average => {
                let average = crate::measure_time(spawns, max_delay).await;
                tracing::info!("Average wait: {average:?}");
            }
            Self::Comprehension => {
                let values = settings.generator().collect().await;
                tracing::info!("Collected: {values:.3?}");
            }
            Self::Runtime => {
                let runtime = settings.generator().measure(*settings.rounds()).await;
                tracing::info!("{} comprehensions ran in {runtime:?}", settings.rounds());
            }
            Self::Org => match settings.org() {
                Some(org) => {
                    let client =
                        GithubOrgClient::with_api_url(settings.api_url(), org, HttpFetch::new()?);
                    let repos = client.public_repos(settings.license().as_deref()).await?;
                    tracing::info!("{org} has {} public repos: {repos:?}", repos.len());
                }
                None => tracing::info!("No org configured, set DAWDLE_ORG to list one."),
            },
        }
        Ok(())
    }
}
