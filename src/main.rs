mod args;
mod config;
mod entry;
mod error;
mod logger;
mod report;
mod runner;
mod workload;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
