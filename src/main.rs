use raft_commitment::{run_simulation, SimulationOptions};
use std::process;
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    let logger = raft_commitment::create_root_logger_for_stdout("server-1".to_string());

    let options = SimulationOptions {
        num_voters: Some(5),
        last_index: Some(100),
        start_index: Some(1),
        replication_tick: Some(Duration::from_millis(10)),
        reconfigure_at: Some(40),
    };

    match run_simulation(logger.clone(), options).await {
        Ok(report) => slog::info!(
            logger,
            "Committed through {:?} after {} wakeups",
            report.commit_index,
            report.wakeups
        ),
        Err(e) => {
            slog::error!(logger, "Simulation failed: {}", e);
            // Give the async drain a chance to flush.
            drop(logger);
            process::exit(1);
        }
    }
}
