//! SQLite catalog backend.
//!
//! Each save replaces the whole table inside one transaction, mirroring the
//! rewrite-everything contract of the flat-file backend. Row order follows
//! the in-memory collection via the `position` column.

use super::record::ParseError;
use super::{CatalogRepository, RepoError, RepoResult};
use crate::model::book::Book;
use crate::model::user::{Role, User};
use log::debug;
use rusqlite::{params, Connection, Row};

/// SQLite-backed catalog repository over a migrated connection.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn load_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, author, available FROM books ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row, books.len() + 1)?);
        }
        debug!(
            "event=catalog_load module=repo status=ok backend=sqlite collection=books count={}",
            books.len()
        );
        Ok(books)
    }

    fn load_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, role FROM users ORDER BY position ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row, users.len() + 1)?);
        }
        debug!(
            "event=catalog_load module=repo status=ok backend=sqlite collection=users count={}",
            users.len()
        );
        Ok(users)
    }

    fn save_books(&self, books: &[Book]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM books;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO books (position, id, title, author, available)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for (position, book) in books.iter().enumerate() {
                insert.execute(params![
                    position as i64,
                    book.id,
                    book.title.as_str(),
                    book.author.as_str(),
                    book.available,
                ])?;
            }
        }
        tx.commit()?;
        debug!(
            "event=catalog_save module=repo status=ok backend=sqlite collection=books count={}",
            books.len()
        );
        Ok(())
    }

    fn save_users(&self, users: &[User]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM users;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO users (position, id, name, email, role)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for (position, user) in users.iter().enumerate() {
                insert.execute(params![
                    position as i64,
                    user.id,
                    user.name.as_str(),
                    user.email.as_str(),
                    user.role.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        debug!(
            "event=catalog_save module=repo status=ok backend=sqlite collection=users count={}",
            users.len()
        );
        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>, line: usize) -> RepoResult<Book> {
    let available = match row.get::<_, i64>("available")? {
        0 => false,
        1 => true,
        other => {
            return Err(invalid_row("books", line, format!("invalid available value `{other}`")));
        }
    };
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        available,
    })
}

fn parse_user_row(row: &Row<'_>, line: usize) -> RepoResult<User> {
    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text)
        .ok_or_else(|| invalid_row("users", line, format!("unknown role `{role_text}`")))?;
    Ok(User::new(
        row.get("id")?,
        row.get::<_, String>("name")?,
        row.get::<_, String>("email")?,
        role,
    ))
}

fn invalid_row(table: &str, line: usize, reason: String) -> RepoError {
    RepoError::Parse(ParseError {
        source: format!("table {table}"),
        line,
        reason,
    })
}
