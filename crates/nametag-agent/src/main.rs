use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use tracing::{debug, info};

use nametag_core::prelude::*;
use nametag_core::JsonFileRegistry;
use nametag_observe::{LoggerTimeZone, init_local_offset, init_logger};

mod cli;
use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("nametag: {e:#}");
            ExitCode::from(ExitStatus::Config.code())
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitStatus> {
    // 1) logger
    let log_cfg = args.logger_config();
    if log_cfg.tz == LoggerTimeZone::Local {
        init_local_offset();
    }
    init_logger(&log_cfg)?;
    debug!(?log_cfg, "logger initialized");

    // 2) registry + context
    let registry: Arc<dyn Registry> = Arc::new(JsonFileRegistry::new(&args.registry));
    let ctx = AllocationContext::new(registry);
    info!(%ctx, path = %args.registry.display(), "registry selected");

    // 3) allocate
    let spec = args.allocation_spec();
    let result = Allocator::new(spec, ctx).and_then(|mut allocator| allocator.run());

    // 4) report
    let report = Report::from_result(&result);
    if let Ok(assignment) = &result {
        println!("{}", assignment.name);
    }
    Ok(report.status)
}
