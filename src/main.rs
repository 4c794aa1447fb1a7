use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::Env;

use memory_cue::cli::args::{Cli, Commands};
use memory_cue::cli::commands::{self, Context};
use memory_cue::config::{ColorSetting, Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = Paths::new().context("failed to resolve the data directory")?;
    let config = Config::load_from_path(&paths.config_file).context("failed to load configuration")?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }

    let ctx = Context::new(config, paths, cli.output);

    let output = match cli.command {
        Commands::Add(args) => commands::quick_add(&ctx, args)?,
        Commands::When { text } => commands::when(&ctx, &text.join(" "))?,
        Commands::Search { query, all } => commands::search(&ctx, &query.join(" "), all)?,
        Commands::List { all, category } => commands::list(&ctx, all, category.as_deref())?,
        Commands::Done { id } => commands::set_done(&ctx, id, true)?,
        Commands::Undone { id } => commands::set_done(&ctx, id, false)?,
        Commands::Remove { id } => commands::remove(&ctx, id)?,
        Commands::Export { file } => commands::export(&ctx, file.as_deref())?,
        Commands::Import { file } => commands::import(&ctx, &file)?,
        Commands::Notes { folder } => commands::notes(&ctx, folder.as_deref())?,
        Commands::Folders => commands::folders(&ctx)?,
        Commands::Config(args) => commands::config(&ctx, args.command)?,
        Commands::Completions { shell } => commands::completions(&shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
