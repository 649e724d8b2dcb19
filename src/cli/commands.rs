//! Command dispatch: wires parsed arguments to the domain and config layers.

use std::io;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{ConfigError, Settings};
use crate::domain::{
    display_tree, parse, render, DomainError, Grammar, QueryTree, TrailingDelimiters,
};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render { expression }) => _render(cli, expression),
        Some(Commands::Tree { expression }) => _tree(cli, expression),
        Some(Commands::Terms { expression }) => _terms(cli, expression),
        Some(Commands::Check { expression }) => _check(cli, expression),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Merged grammar: compiled defaults, config file, environment, CLI flags.
fn resolve_grammar(cli: &Cli) -> CliResult<Grammar> {
    let settings = Settings::load()?;
    let mut grammar = settings.to_grammar()?;
    if let Some(token) = &cli.and {
        grammar.and_token = token.clone();
    }
    if let Some(token) = &cli.or {
        grammar.or_token = token.clone();
    }
    if let Some(token) = &cli.not {
        grammar.not_token = token.clone();
    }
    if !cli.delimiters.is_empty() {
        grammar.delimiters.clear();
        for pair in &cli.delimiters {
            let mut chars = pair.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(open), Some(close), None) => {
                    grammar.delimiters.insert(open, close);
                }
                _ => {
                    return Err(CliError::InvalidArgs(format!(
                        "delimiter pair '{pair}' must be exactly two characters, opening then closing"
                    )))
                }
            }
        }
    }
    if cli.strict {
        grammar.trailing = TrailingDelimiters::Error;
    }
    Ok(grammar)
}

/// Parse, printing a caret diagnostic to stderr on scan failures.
fn parse_expression(expression: &str, grammar: &Grammar) -> CliResult<QueryTree> {
    match parse(expression, grammar) {
        Ok(tree) => Ok(tree),
        Err(err) => {
            if let DomainError::UnexpectedCharacter { offset, .. }
            | DomainError::UnterminatedDelimiter { offset, .. } = &err
            {
                eprintln!("{}", output::caret_diagnostic(expression, *offset));
            }
            Err(err.into())
        }
    }
}

#[instrument(skip(cli))]
fn _render(cli: &Cli, expression: &str) -> CliResult<()> {
    let grammar = resolve_grammar(cli)?;
    let tree = parse_expression(expression, &grammar)?;
    output::info(&render(&tree, &grammar));
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, expression: &str) -> CliResult<()> {
    let grammar = resolve_grammar(cli)?;
    let tree = parse_expression(expression, &grammar)?;
    debug!("parsed {} nodes", tree.node_count());
    for row in display_tree(&tree, &grammar) {
        println!("{}", row);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _terms(cli: &Cli, expression: &str) -> CliResult<()> {
    let grammar = resolve_grammar(cli)?;
    let tree = parse_expression(expression, &grammar)?;
    let operands = tree.operands();
    if !operands.is_empty() {
        output::info(&operands.iter().join("\n"));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _check(cli: &Cli, expression: &str) -> CliResult<()> {
    let grammar = resolve_grammar(cli)?;
    let tree = parse_expression(expression, &grammar)?;
    output::success(&format!(
        "{} nodes, depth {}",
        tree.node_count(),
        tree.depth()
    ));
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            let body = toml::to_string_pretty(&settings).map_err(ConfigError::from)?;
            output::info(&body);
            Ok(())
        }
        ConfigCommands::Init => {
            let path = Settings::global_config_path().ok_or(ConfigError::NoConfigDir)?;
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            Settings::write_template(&path)?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let path = Settings::global_config_path().ok_or(ConfigError::NoConfigDir)?;
            output::info(&format!("{}", path.display()));
            Ok(())
        }
    }
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
