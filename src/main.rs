use dawdle::{trace_init, Arrive, Exercise, Settings};
use strum::IntoEnumIterator;

#[tokio::main]
async fn main() -> Arrive<()> {
    trace_init();
    let settings = Settings::load();
    for exercise in Exercise::iter() {
        tracing::info!("Starting {exercise}.");
        exercise.run(&settings).await?;
    }
    Ok(())
}
