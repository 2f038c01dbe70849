use crate::{Arrive, Blame, Generator, GITHUB_API};
use config::builder::DefaultState;
use std::time::Duration;

/// The `Settings` struct holds the knobs for each exercise run by the `dawdle` binary.
///
/// * `max_delay` - Upper bound in seconds for [`crate::wait_random`].
/// * `spawns` - Number of concurrent waits in [`crate::wait_n`] and friends.
/// * `count`, `interval_millis`, `ceiling` - Shape of the [`Generator`].
/// * `rounds` - Number of comprehensions raced by [`Generator::measure`].
/// * `api_url` - Root of the GitHub REST API.
/// * `org` - Organization to list.  When unset, the org exercise is skipped.
/// * `license` - Optional license key used to filter the org's repositories.
///
/// Any key left out of the sources keeps its default.
#[derive(
    Debug,
    Clone,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct Settings {
    max_delay: u32,
    spawns: usize,
    count: usize,
    interval_millis: u64,
    ceiling: f64,
    rounds: usize,
    api_url: String,
    org: Option<String>,
    license: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_delay: 10,
            spawns: 5,
            count: 10,
            interval_millis: 1000,
            ceiling: 10.0,
            rounds: crate::ROUNDS,
            api_url: GITHUB_API.to_string(),
            org: None,
            license: None,
        }
    }
}

impl Settings {
    /// The `load` method reads settings from `Dawdle.toml` in the working directory, with
    /// `DAWDLE_*` environment variables taking precedence (e.g. `DAWDLE_ORG=google`).
    ///
    /// If the sources cannot be built or deserialized, we warn and fall back to
    /// [`Settings::default`] rather than refusing to run.
    pub fn load() -> Self {
        Self::load_from("Dawdle", "DAWDLE")
    }

    /// Same as [`Settings::load`], with the file name and environment prefix spelled out.
    #[tracing::instrument]
    pub fn load_from(name: &str, prefix: &str) -> Self {
        match Self::read_from(name, prefix) {
            Ok(settings) => {
                tracing::trace!("Settings read from sources.");
                tracing::trace!("{:#?}", settings);
                settings
            }
            Err(e) => {
                tracing::warn!("Could not read settings: {}", e.to_string());
                Self::default()
            }
        }
    }

    /// Reads the optional config file `name` (extension inferred) plus the `DAWDLE` environment.
    ///
    /// Will [`crate::Blame::Config`] if a source is malformed.
    pub fn read(name: &str) -> Arrive<Self> {
        Self::read_from(name, "DAWDLE")
    }

    /// Reads the optional config file `name`, then environment variables starting with
    /// `prefix`, which win over the file.
    pub fn read_from(name: &str, prefix: &str) -> Arrive<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix(prefix));
        Self::from_builder(builder)
    }

    /// Builds and deserializes an arbitrary set of sources.
    ///
    /// Will [`Blame::Shape`] if `ceiling` is infinite or NaN, since no value can be drawn below it.
    pub fn from_builder(builder: config::ConfigBuilder<DefaultState>) -> Arrive<Self> {
        let config = builder.build()?;
        let settings = config.try_deserialize::<Self>()?;
        if !settings.ceiling.is_finite() {
            return Err(Blame::Shape {
                field: "ceiling".to_string(),
                expected: "a finite number",
            });
        }
        Ok(settings)
    }

    /// The [`Generator`] described by `count`, `interval_millis` and `ceiling`.
    pub fn generator(&self) -> Generator {
        Generator::new(
            self.count,
            Duration::from_millis(self.interval_millis),
            self.ceiling,
        )
    }
}
