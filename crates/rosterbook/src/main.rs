//! `roster` - CLI for rosterbook
//!
//! This binary provides the command-line interface for adding, changing,
//! listing and searching student records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use rosterbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, SearchCommand, StatusCommand, UpdateCommand,
};
use rosterbook::render::{render_record, render_rows};
use rosterbook::{init_logging, Browser, Config, Editor, Error, Field, OutputFormat, Shell, Store};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.database.clone() {
        config.storage.database_path = Some(path);
    }

    let open = || Store::from_config(&config);
    match cli.command {
        Command::Add(cmd) => handle_add(&open()?, &cmd),
        Command::Update(cmd) => handle_update(&open()?, &cmd),
        Command::Delete(cmd) => {
            let store = open()?;
            let mut editor = Editor::new();
            select(&store, &mut editor, &cmd.roll)?;
            let roll = editor.delete(&store)?;
            println!("Record {roll} deleted.");
            Ok(())
        }
        Command::List(cmd) => {
            let mut browser = Browser::new();
            browser.refresh(&open()?)?;
            print_rows(&browser, &config, cmd.format)
        }
        Command::Search(cmd) => handle_search(&open()?, &config, &cmd),
        Command::Status(cmd) => handle_status(&open()?, &cmd),
        Command::Shell => {
            let store = open()?;
            let mut shell = Shell::new(&store, &config.display)?;
            shell.run(io::stdin().lock(), io::stdout().lock())?;
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_add(store: &Store, cmd: &AddCommand) -> Result<()> {
    let mut editor = Editor::new();
    editor.set(Field::Roll, &cmd.roll)?;
    for (field, value) in cmd.fields.given() {
        editor.set(field, value)?;
    }
    let added = editor.add(store)?;
    println!("Student {} added successfully!", added.roll);
    Ok(())
}

fn handle_update(store: &Store, cmd: &UpdateCommand) -> Result<()> {
    let mut editor = Editor::new();
    select(store, &mut editor, &cmd.roll)?;

    let mut fields = editor.fields().clone();
    cmd.fields.apply_to(&mut fields)?;
    editor.set_fields(fields);

    let updated = editor.update(store)?;
    println!("Record updated.");
    print!("{}", render_record(&updated));
    Ok(())
}

fn handle_search(store: &Store, config: &Config, cmd: &SearchCommand) -> Result<()> {
    let mut browser = Browser::new();
    browser.search(store, cmd.field, &cmd.text)?;
    print_rows(&browser, config, cmd.format)
}

fn handle_status(store: &Store, cmd: &StatusCommand) -> Result<()> {
    let stats = store.stats()?;
    if cmd.json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "records": stats.total_records,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roster status");
        println!("-------------");
        println!("Database:      {}", store.path().display());
        println!("Records:       {}", stats.total_records);
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

/// Load a stored record into the editor by way of the browser.
fn select(store: &Store, editor: &mut Editor, roll: &str) -> Result<()> {
    let mut browser = Browser::new();
    browser.refresh(store)?;
    let index = browser
        .position(roll)
        .ok_or_else(|| Error::roll_not_found(roll))?;
    browser.select_row(index, editor)?;
    Ok(())
}

fn print_rows(browser: &Browser, config: &Config, format: Option<OutputFormat>) -> Result<()> {
    let format = format.unwrap_or(config.display.default_format);
    let out = render_rows(browser.rows(), format, config.display.max_column_width)?;
    print!("{out}");
    if format != OutputFormat::Json && browser.is_empty() {
        println!("(no records)");
    } else if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Busy timeout (ms):  {}", config.storage.busy_timeout_ms);
                println!();
                println!("[Display]");
                println!("  Max column width:   {}", config.display.max_column_width);
                println!("  Default format:     {:?}", config.display.default_format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::validate_file(&path).context("validating configuration")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
