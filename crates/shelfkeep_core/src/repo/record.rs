//! Comma-separated line codec for book and user records.
//!
//! Book lines are `id,title,author,True|False`. User lines are
//! `id,name,email,role`; the older `id,name,email` form loads as a member.
//! Fields are not escaped, so callers validate text before encoding.
//! Blank lines are skipped with a `warn` event rather than rejected.

use crate::model::book::Book;
use crate::model::user::{Role, User};
use crate::model::RecordId;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::BufRead;

const TRUE_TOKEN: &str = "True";
const FALSE_TOKEN: &str = "False";

/// Malformed persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Record set the line came from (file name or table).
    pub source: String,
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed record in {} at line {}: {}",
            self.source, self.line, self.reason
        )
    }
}

impl Error for ParseError {}

pub fn encode_book(book: &Book) -> String {
    let available = if book.available {
        TRUE_TOKEN
    } else {
        FALSE_TOKEN
    };
    format!("{},{},{},{}", book.id, book.title, book.author, available)
}

/// Writes `id,name,email,role`.
///
/// The trailing role field extends the three-field `id,name,email` user
/// record so roles survive a reload; readers of the plain three-field
/// format will reject these lines.
pub fn encode_user(user: &User) -> String {
    format!("{},{},{},{}", user.id, user.name, user.email, user.role)
}

/// Decodes every non-blank line of a book record set.
pub fn decode_books(source: &str, bytes: &[u8]) -> Result<Vec<Book>, ParseError> {
    decode_lines(source, bytes, |fields| match fields {
        [id, title, author, available] => Ok(Book {
            id: parse_id(id)?,
            title: (*title).to_string(),
            author: (*author).to_string(),
            available: parse_availability(available)?,
        }),
        other => Err(format!("expected 4 fields, found {}", other.len())),
    })
}

/// Decodes every non-blank line of a user record set.
pub fn decode_users(source: &str, bytes: &[u8]) -> Result<Vec<User>, ParseError> {
    decode_lines(source, bytes, |fields| {
        let (id, name, email, role) = match fields {
            [id, name, email] => (id, name, email, Role::Member),
            [id, name, email, role] => (
                id,
                name,
                email,
                Role::parse(role).ok_or_else(|| format!("unknown role `{role}`"))?,
            ),
            other => return Err(format!("expected 3 or 4 fields, found {}", other.len())),
        };
        Ok(User::new(parse_id(id)?, *name, *email, role))
    })
}

fn decode_lines<T>(
    source: &str,
    bytes: &[u8],
    decode: impl Fn(&[&str]) -> Result<T, String>,
) -> Result<Vec<T>, ParseError> {
    let mut records = Vec::new();
    for (index, raw) in bytes.lines().enumerate() {
        let line_number = index + 1;
        let parse_error = |reason: String| ParseError {
            source: source.to_string(),
            line: line_number,
            reason,
        };

        let raw = raw.map_err(|_| parse_error("line is not valid UTF-8".to_string()))?;
        let line = raw.trim();
        if line.is_empty() {
            warn!(
                "event=record_decode module=repo status=skipped source={source} line={line_number}"
            );
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        records.push(decode(&fields).map_err(parse_error)?);
    }
    Ok(records)
}

fn parse_id(value: &str) -> Result<RecordId, String> {
    value
        .trim()
        .parse::<RecordId>()
        .map_err(|_| format!("invalid id `{value}`"))
}

fn parse_availability(value: &str) -> Result<bool, String> {
    match value {
        TRUE_TOKEN => Ok(true),
        FALSE_TOKEN => Ok(false),
        other => Err(format!(
            "invalid availability `{other}`; expected {TRUE_TOKEN}|{FALSE_TOKEN}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_books, decode_users, encode_book, encode_user};
    use crate::model::book::Book;
    use crate::model::user::{Role, User};

    #[test]
    fn encodes_book_with_python_style_booleans() {
        let book = Book::with_availability(101, "To Kill a Mockingbird", "Harper Lee", false);
        assert_eq!(encode_book(&book), "101,To Kill a Mockingbird,Harper Lee,False");
    }

    #[test]
    fn decodes_books_and_skips_blank_lines() {
        let text = "101,To Kill a Mockingbird,Harper Lee,True\n\n\
                    102,Pride and Prejudice,Jane Austen,False\n";
        let books = decode_books("books.txt", text.as_bytes()).unwrap();
        assert_eq!(books.len(), 2);
        assert!(books[0].available);
        assert_eq!(books[1].author, "Jane Austen");
        assert!(!books[1].available);
    }

    #[test]
    fn rejects_unknown_availability_token() {
        let err = decode_books("books.txt", b"1,Dune,Frank Herbert,yes\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.reason.contains("availability"));
    }

    #[test]
    fn reports_line_number_of_malformed_record() {
        let text = "1,Dune,Frank Herbert,True\nnot a record\n";
        let err = decode_books("books.txt", text.as_bytes()).unwrap_err();
        assert_eq!(err.source, "books.txt");
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("expected 4 fields"));
    }

    #[test]
    fn invalid_utf8_line_is_a_parse_error_with_its_line_number() {
        let bytes = b"101,To Kill a Mockingbird,Harper Lee,True\n\
                      102,Pride \xff,Jane Austen,True\n";
        let err = decode_books("books.txt", bytes).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("UTF-8"));
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let books = decode_books("books.txt", b"   \n1,Dune,Frank Herbert,True\n\t\n").unwrap();
        assert_eq!(books.len(), 1);
    }

    #[test]
    fn rejects_non_integer_id() {
        let err = decode_books("books.txt", b"abc,Dune,Frank Herbert,True").unwrap_err();
        assert!(err.reason.contains("invalid id"));
    }

    #[test]
    fn decodes_legacy_three_field_users_as_members() {
        let users = decode_users("users.txt", b"2,John Smith,john.smith@gmail.com\n").unwrap();
        assert_eq!(
            users,
            vec![User::member(2, "John Smith", "john.smith@gmail.com")]
        );
    }

    #[test]
    fn user_role_survives_encode_decode() {
        let user = User::librarian(1, "Alice Johnson", "alice.johnson@gmail.com");
        let line = encode_user(&user);
        assert_eq!(line, "1,Alice Johnson,alice.johnson@gmail.com,librarian");
        let decoded = decode_users("users.txt", line.as_bytes()).unwrap();
        assert_eq!(decoded[0].role, Role::Librarian);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = decode_users("users.txt", b"3,Bob,bob@example.com,admin").unwrap_err();
        assert!(err.reason.contains("unknown role"));
    }
}
