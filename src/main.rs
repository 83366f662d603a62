use crate::areas::repository::Repository;
use crate::errors::GitletError;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A miniature local-first version control system",
    long_about = "Gitlet tracks the evolution of a flat working directory as a DAG of \
    immutable snapshots, with branching, three-way merging, and synchronization \
    against peer repositories reachable through the filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for addition")]
    Add {
        #[arg(value_name = "FILE")]
        file: String,
    },
    #[command(about = "Snapshot the staged changes as a new commit")]
    Commit {
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
    #[command(about = "Unstage a file or schedule a tracked file's removal")]
    Rm {
        #[arg(value_name = "FILE")]
        file: String,
    },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
    #[command(about = "Show branches, staged changes, and the working tree state")]
    Status,
    #[command(
        about = "Check out a branch, or restore files from a commit",
        long_about = "Three forms: `checkout <branch>` switches branches; \
        `checkout -- <file>` restores a file from the current commit; \
        `checkout <commit> -- <file>` restores a file from an arbitrary commit."
    )]
    Checkout {
        #[arg(value_name = "BRANCH_OR_COMMIT")]
        target: Option<String>,
        #[arg(last = true, value_name = "FILE")]
        file: Option<String>,
    },
    #[command(about = "Create a new branch pointing at the current commit")]
    Branch {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Delete a branch pointer")]
    RmBranch {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Move the current branch to an arbitrary commit")]
    Reset {
        #[arg(value_name = "COMMIT")]
        commit: String,
    },
    #[command(about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(about = "Show the history as an ASCII graph")]
    GraphLog,
    #[command(about = "Register a peer repository under a name")]
    AddRemote {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "PATH")]
        path: String,
    },
    #[command(about = "Forget a peer repository")]
    RmRemote {
        #[arg(value_name = "NAME")]
        name: String,
    },
    #[command(about = "Append the current branch's commits onto a peer's branch")]
    Push {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(about = "Copy a peer branch's history into the local store")]
    Fetch {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
    #[command(about = "Fetch a peer branch and merge it")]
    Pull {
        #[arg(value_name = "REMOTE")]
        remote: String,
        #[arg(value_name = "BRANCH")]
        branch: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                error.print()?;
            } else {
                println!("{}", parse_failure_line(&error));
            }
            return Ok(());
        }
    };

    let pwd = std::env::current_dir()?;
    let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    match run(&repository, &cli.command) {
        Ok(()) => Ok(()),
        // every user-facing failure is one printed line and a clean exit;
        // anything else is an internal invariant violation
        Err(error) => match error.downcast_ref::<GitletError>() {
            Some(user_error) => {
                println!("{}", user_error);
                Ok(())
            }
            None => Err(error),
        },
    }
}

fn run(repository: &Repository, command: &Commands) -> anyhow::Result<()> {
    if !matches!(command, Commands::Init) && !repository.is_initialized() {
        return Err(GitletError::NotInitialized.into());
    }

    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(prefix), Some(file)) => repository.checkout_commit_file(prefix, file),
            (None, Some(file)) => repository.checkout_file(file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => {
                println!("Incorrect operands.");
                Ok(())
            }
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch),
        Commands::GraphLog => repository.graph_log(),
        Commands::AddRemote { name, path } => repository.add_remote(name, path),
        Commands::RmRemote { name } => repository.rm_remote(name),
        Commands::Push { remote, branch } => repository.push(remote, branch),
        Commands::Fetch { remote, branch } => repository.fetch(remote, branch),
        Commands::Pull { remote, branch } => repository.pull(remote, branch),
    }
}

/// Map a parse failure to the contract's one-line messages
fn parse_failure_line(error: &clap::Error) -> &'static str {
    match error.kind() {
        ErrorKind::InvalidSubcommand => "No command with that name exists.",
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "Please enter a command."
        }
        _ => "Incorrect operands.",
    }
}
