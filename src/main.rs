use std::fs::File;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use simplelog::{Config, WriteLogger};

use monster_snake::config::Settings;
use monster_snake::session::{Flow, Session};

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    settings.validate()?;

    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(&settings.log_file)
        .with_context(|| format!("creating log file {}", settings.log_file.display()))?;
    WriteLogger::init(settings.log_level, Config::default(), log_file).context("initializing logger")?;

    info!("starting with {:?}", settings);

    let mut session = Session::new(settings).context("opening terminal")?;
    session.initialize()?;

    let result = run(&mut session);
    session.restore().context("restoring terminal")?;

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn run(session: &mut Session) -> anyhow::Result<()> {
    loop {
        // The main game loop returns when the player quits
        if session.play()? == Flow::Quit {
            info!("quit");
            return Ok(());
        }
    }
}
