mod cli;
mod lessons;

use anyhow::Result;
use primer_engine::logging::{LoggingConfig, init_logging};

use cli::{Args, Command, USAGE};
use lessons::Lesson;

fn main() -> Result<()> {
    let args = Args::from_env()?;

    init_logging(LoggingConfig {
        filter: args.log_filter,
        ..LoggingConfig::default()
    });

    match args.command {
        Command::Help => println!("{USAGE}"),
        Command::List => {
            for lesson in Lesson::ALL {
                println!("{:02}  {:<26} {}", lesson.number(), lesson.slug(), lesson.summary());
            }
        }
        Command::Run { lesson, options } => lesson.run(&options)?,
    }
    Ok(())
}
