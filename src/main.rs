fn main() -> docsort::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("docsort=info"))
        .init();
    log::info!("Starting docsort");

    match docsort::run() {
        Ok(report) => {
            log::info!(
                "Done: {} moved, {} unmatched, {} failed",
                report.moved.len(),
                report.unmatched.len(),
                report.failed.len()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("docsort encountered an error: {}", e);
            Err(e)
        }
    }
}
