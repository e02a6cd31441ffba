mod app;
mod audio;
mod catalog;
mod config;
mod emotion;
mod error;
mod filter;
mod logging;
mod mpris;
mod player;
mod runtime;
mod share;
mod ui;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
