use slog::Drain;

/// Root logger that writes to the terminal through an async drain.
pub fn create_root_logger_for_stdout(leader_id: String) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("LeaderId" => leader_id))
}
