//! Shelfkeep command-line harness.
//!
//! Thin driver over `shelfkeep_core`: parses a command, opens the catalog on
//! the selected backend, runs one library operation and prints status lines.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use shelfkeep_core::db::open_db;
use shelfkeep_core::{
    core_version, default_log_level, init_logging, Book, CatalogRepository, LibraryManager,
    RecordId, Role, SqliteCatalogRepository, TextCatalogPaths, TextCatalogRepository, User,
};
use std::path::PathBuf;

const SQLITE_FILE: &str = "catalog.sqlite";

#[derive(Parser)]
#[command(name = "shelfkeep")]
#[command(author, version, about = "Small library catalog: books, users, loans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the catalog records
    #[arg(long, global = true, env = "SHELFKEEP_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Storage backend
    #[arg(
        long,
        global = true,
        env = "SHELFKEEP_BACKEND",
        value_enum,
        default_value_t = Backend::Text
    )]
    backend: Backend,

    /// trace|debug|info|warn|error (defaults per build mode)
    #[arg(long, global = true, env = "SHELFKEEP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log directory (defaults to <data-dir>/logs)
    #[arg(long, global = true, env = "SHELFKEEP_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// books.txt / users.txt record files
    Text,
    /// Embedded SQLite database
    Sqlite,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Librarian,
    Member,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Librarian => Role::Librarian,
            RoleArg::Member => Role::Member,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// List all books
    List,

    /// List registered users
    Users,

    /// Add a book to the catalog
    AddBook {
        id: RecordId,
        title: String,
        author: String,
        /// Record the book as currently lent out
        #[arg(long)]
        unavailable: bool,
    },

    /// Overwrite title, author and availability of a book
    UpdateBook {
        id: RecordId,
        title: String,
        author: String,
        #[arg(long)]
        unavailable: bool,
    },

    /// Delete every book with the id
    DeleteBook { id: RecordId },

    /// Register a user
    RegisterUser {
        id: RecordId,
        name: String,
        email: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Member)]
        role: RoleArg,
    },

    /// Borrow a book for a user
    Borrow { book_id: RecordId, user_id: RecordId },

    /// Return a borrowed book
    Return { book_id: RecordId, user_id: RecordId },

    /// Run the sample librarian/member session
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    let data_dir = cwd.join(&cli.data_dir);
    let log_dir = match cli.log_dir {
        Some(dir) => cwd.join(dir),
        None => data_dir.join("logs"),
    };
    let log_level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(log_level, &log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={} data_dir={}",
        core_version(),
        data_dir.display()
    );

    let conn;
    let repo: Box<dyn CatalogRepository + '_> = match cli.backend {
        Backend::Text => Box::new(TextCatalogRepository::new(TextCatalogPaths::in_dir(
            &data_dir,
        ))),
        Backend::Sqlite => {
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("cannot create `{}`", data_dir.display()))?;
            conn = open_db(data_dir.join(SQLITE_FILE)).context("cannot open catalog database")?;
            Box::new(SqliteCatalogRepository::new(&conn))
        }
    };

    let mut manager = LibraryManager::open(repo).context("failed to load catalog")?;
    run(&mut manager, cli.command)
}

fn run<R: CatalogRepository>(manager: &mut LibraryManager<R>, command: Command) -> Result<()> {
    match command {
        Command::List => print_books(manager),
        Command::Users => {
            for user in manager.list_users() {
                println!("{user} ({})", user.role);
            }
        }
        Command::AddBook {
            id,
            title,
            author,
            unavailable,
        } => {
            manager.add_book(Book::with_availability(id, title, author, !unavailable))?;
            println!("Book with ID {id} added.");
        }
        Command::UpdateBook {
            id,
            title,
            author,
            unavailable,
        } => {
            let book = Book::with_availability(id, title, author, !unavailable);
            if manager.update_book(&book)? {
                println!("Book with ID {id} updated.");
            } else {
                println!("Book with ID {id} not found.");
            }
        }
        Command::DeleteBook { id } => {
            let removed = manager.delete_book(id)?;
            println!("Removed {removed} book(s) with ID {id}.");
        }
        Command::RegisterUser {
            id,
            name,
            email,
            role,
        } => {
            manager.register_user(User::new(id, name, email, role.into()))?;
            println!("User with ID {id} registered.");
        }
        Command::Borrow { book_id, user_id } => {
            println!("{}", manager.borrow_book(book_id, user_id)?);
        }
        Command::Return { book_id, user_id } => {
            println!("{}", manager.return_book(book_id, user_id)?);
        }
        Command::Demo => run_demo(manager)?,
    }
    Ok(())
}

fn run_demo<R: CatalogRepository>(manager: &mut LibraryManager<R>) -> Result<()> {
    let alice = User::librarian(1, "Alice Johnson", "alice.johnson@gmail.com");
    let john = User::member(2, "John Smith", "john.smith@gmail.com");

    let librarian = alice.as_librarian()?;
    librarian.manage_books_named(
        manager,
        Book::new(101, "To Kill a Mockingbird", "Harper Lee"),
        "add",
    )?;
    librarian.manage_books_named(
        manager,
        Book::new(102, "Pride and Prejudice", "Jane Austen"),
        "add",
    )?;

    let member = john.as_member()?;
    println!("{}", member.borrow_book(manager, 101)?);
    println!("{}", member.return_book(manager, 101)?);

    print_books(manager);
    Ok(())
}

fn print_books<R: CatalogRepository>(manager: &LibraryManager<R>) {
    for book in manager.list_books() {
        println!("{book}");
    }
}
