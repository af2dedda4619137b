use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use gitlet::artifacts::core::errors::UserError;
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GITLET_LOG";
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny local version-control system",
    long_about = "Content-addressed commits, branches, three-way merges, \
    and push/fetch between repositories on the same filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short = 'C', global = true, help = "Run as if started in <DIR>")]
    directory: Option<PathBuf>,
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Log more to stderr (-v debug, -vv trace)"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Record the staged snapshot")]
    Commit {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Unstage a file, or stage a tracked file for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the IDs of all commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Show branches, staged files and work tree changes")]
    Status,
    #[command(
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from a commit, \
        and checkout <branch> switches branches."
    )]
    Checkout {
        #[arg(index = 1)]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<String>,
    },
    #[command(about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository's .gitlet directory")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, id = "remote_directory", value_name = "DIRECTORY")]
        directory: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Send the current branch's history to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let result = match Cli::try_parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            run(cli).await
        }
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            ErrorKind::InvalidSubcommand => Err(UserError::UnknownCommand.into()),
            _ => Err(UserError::IncorrectOperands.into()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match error.downcast_ref::<UserError>() {
            Some(user_error) => {
                println!("{}", user_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Error: {:?}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.ok_or(UserError::MissingCommand)?;
    let directory = match cli.directory {
        Some(directory) => directory,
        None => std::env::current_dir()?,
    };

    let interactive = std::io::stdout().is_terminal();
    if !interactive {
        colored::control::set_override(false);
    }

    match command {
        Commands::Init => open(&directory)?.init().await,
        Commands::Add { file } => open(&directory)?.add(&file).await,
        Commands::Commit { message } => open(&directory)?.commit(&message).await,
        Commands::Rm { file } => open(&directory)?.rm(&file).await,
        Commands::Log => with_pager(&directory, interactive, |repository| repository.log()),
        Commands::GlobalLog => {
            with_pager(&directory, interactive, |repository| repository.global_log())
        }
        Commands::Find { message } => open(&directory)?.find(&message),
        Commands::Status => open(&directory)?.status().await,
        Commands::Checkout { target, file } => {
            let mut repository = open(&directory)?;
            match (target, file) {
                (None, Some(file)) => repository.checkout_file(&file),
                (Some(commit), Some(file)) => repository.checkout_file_from_commit(&commit, &file),
                (Some(branch), None) => repository.checkout_branch(&branch).await,
                (None, None) => Err(UserError::IncorrectOperands.into()),
            }
        }
        Commands::Branch { name } => open(&directory)?.branch(&name),
        Commands::RmBranch { name } => open(&directory)?.remove_branch(&name),
        Commands::Reset { commit } => open(&directory)?.reset(&commit).await,
        Commands::Merge { branch } => open(&directory)?.merge(&branch).await,
        Commands::AddRemote { name, directory: remote } => {
            open(&directory)?.add_remote(&name, &remote)
        }
        Commands::RmRemote { name } => open(&directory)?.remove_remote(&name),
        Commands::Push { remote, branch } => open(&directory)?.push(&remote, &branch),
        Commands::Fetch { remote, branch } => open(&directory)?
            .fetch(&remote, &branch)
            .map(|_| ()),
        Commands::Pull { remote, branch } => open(&directory)?.pull(&remote, &branch).await,
    }
}

fn open(directory: &Path) -> anyhow::Result<Repository> {
    Repository::new(directory, Box::new(std::io::stdout()))
}

/// Run a history verb, paging its output when stdout is a terminal
fn with_pager(
    directory: &Path,
    interactive: bool,
    verb: impl FnOnce(&Repository) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if !interactive || std::env::var_os(NO_PAGER_ENV).is_some() {
        return verb(&open(directory)?);
    }

    let pager = Pager::new();
    let repository = Repository::new(directory, Box::new(PagerWriter::new(pager.clone())))?;
    verb(&repository)?;
    minus::page_all(pager)?;

    Ok(())
}
