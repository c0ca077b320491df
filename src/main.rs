use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::errors::{BitError, error_kind};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "TWIG_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small content-addressed version control system",
    long_about = "twig tracks snapshots of a directory tree in a local, \
    single-user repository: stage files, commit them, branch, check out \
    older states and inspect the differences between them.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages files, recursing into directories. \
        Tracked files that were removed from disk are unstaged."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "The paths to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the index on top of HEAD. \
        The author is read from TWIG_AUTHOR_NAME and TWIG_AUTHOR_EMAIL."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show commit logs",
        long_about = "This command lists the first-parent history of a revision, newest first."
    )]
    Log {
        #[arg(index = 1, help = "The revision to start from (defaults to HEAD)")]
        revision: Option<String>,
        #[arg(long, help = "Print each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "Without arguments this command lists branches. \
        With a name it creates a branch at the given revision or at HEAD."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create")]
        name: Option<String>,
        #[arg(index = 2, requires = "name", help = "The revision the new branch starts at")]
        start: Option<String>,
        #[arg(
            short,
            long,
            value_name = "BRANCH",
            conflicts_with_all = ["name", "start"],
            help = "Delete the branch"
        )]
        delete: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "This command updates the working tree and the index to match the target \
        and moves HEAD. It refuses to run when local changes would be lost."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch or revision to check out")]
        target: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists staged, unstaged and untracked changes."
    )]
    Status {
        #[arg(long, help = "Give the output in a stable, script-friendly format")]
        porcelain: bool,
    },
    #[command(
        name = "diff",
        about = "Show changes between the index, the working tree and commits",
        long_about = "Without arguments this command compares the index with the working tree. \
        With --cached it compares HEAD with the index, and with two revisions it compares their trees."
    )]
    Diff {
        #[arg(long, visible_alias = "staged", help = "Compare HEAD with the index")]
        cached: bool,
        #[arg(
            index = 1,
            num_args = 2,
            value_names = ["OLD", "NEW"],
            conflicts_with = "cached",
            help = "Two revisions to compare"
        )]
        revisions: Option<Vec<String>>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It accepts a full or abbreviated object ID, or a revision."
    )]
    CatFile {
        #[arg(short = 't', help = "Print the object type instead of its content")]
        show_type: bool,
        #[arg(index = 1, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes an object file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "write-tree",
        about = "Create tree objects from the index",
        long_about = "This command stores the index as tree objects and prints the root tree ID."
    )]
    WriteTree,
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists a tree, or the tree of a commit."
    )]
    LsTree {
        #[arg(short, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree or revision to list")]
        object: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { path } => {
            let path = path.map_or_else(|| pwd.clone(), |path| pwd.join(path));
            open_at(&path)?.init()?
        }
        Commands::Add { paths } => {
            let paths = paths.iter().map(|path| pwd.join(path)).collect::<Vec<_>>();
            discover(&pwd)?.add(&paths)?
        }
        Commands::Commit { message } => {
            discover(&pwd)?.commit(&message)?;
        }
        Commands::Log { revision, oneline } => {
            discover(&pwd)?.log(revision.as_deref(), oneline)?
        }
        Commands::Branch {
            name,
            start,
            delete,
        } => {
            let repository = discover(&pwd)?;

            match (delete, name) {
                (Some(branch), _) => repository.delete_branch(&branch)?,
                (None, Some(name)) => repository.create_branch(&name, start.as_deref())?,
                (None, None) => repository.list_branches()?,
            }
        }
        Commands::Checkout { target } => {
            discover(&pwd)?.checkout(&target)?;
        }
        Commands::Status { porcelain } => {
            discover(&pwd)?.status(porcelain)?;
        }
        Commands::Diff { cached, revisions } => {
            let repository = discover(&pwd)?;

            match revisions.as_deref() {
                Some([old, new]) => repository.diff(false, Some((old.as_str(), new.as_str())))?,
                _ => repository.diff(cached, None)?,
            }
        }
        Commands::CatFile { show_type, object } => {
            discover(&pwd)?.cat_file(&object, show_type)?
        }
        Commands::HashObject { write, file } => {
            let file = pwd.join(file);
            let repository = match discover(&pwd) {
                Ok(repository) => repository,
                Err(error)
                    if !write && matches!(error_kind(&error), Some(BitError::NotARepository(_))) =>
                {
                    open_at(&pwd)?
                }
                Err(error) => return Err(error),
            };

            repository.hash_object(&file, write)?;
        }
        Commands::WriteTree => {
            discover(&pwd)?.write_tree()?;
        }
        Commands::LsTree { recursive, object } => {
            discover(&pwd)?.ls_tree(&object, recursive)?
        }
    }

    Ok(())
}

fn open_at(path: &Path) -> Result<Repository> {
    Repository::new(path, Box::new(std::io::stdout()))
}

fn discover(path: &Path) -> Result<Repository> {
    Repository::discover(path, Box::new(std::io::stdout()))
}
