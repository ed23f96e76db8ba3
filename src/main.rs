use anyhow::Result;
use booking_desk::{app::App, config::Config};
use clap::{crate_description, crate_version, App as ClapApp, Arg};
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("booking-desk")
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .short("l")
                .long("log-level")
                .value_name("LEVEL")
                .help("Sets the lowest level shown in the log panel")
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .default_value("info")
                .takes_value(true),
        )
        .get_matches();

    let log_level: LevelFilter = matches.value_of("log-level").unwrap_or("info").parse()?;
    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config, log_level).await
}
