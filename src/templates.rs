//! HTML assembly for the catalog pages. Every dynamic value goes through
//! `escape` before it reaches the document.

use crate::books::Book;

pub fn index_page(books: &[Book]) -> String {
    let body = if books.is_empty() {
        "  <h1>All Books</h1>\n  <p>No books in the catalog yet.</p>".to_string()
    } else {
        let items = books
            .iter()
            .map(|book| {
                format!(
                    "    <li><a href=\"/books/{}\">{}</a></li>",
                    escape(&book.slug),
                    escape(&book.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("  <h1>All Books</h1>\n  <ul>\n{items}\n  </ul>")
    };
    layout("All Books", &body)
}

pub fn detail_page(title: &str, author: Option<&str>, rating: i64, is_bestselling: bool) -> String {
    let mut body = format!(
        "  <h1>{title}</h1>\n  <p>by {author}</p>\n  <p>Rated {rating}/5</p>",
        title = escape(title),
        author = escape(author.unwrap_or("Unknown")),
        rating = rating,
    );
    if is_bestselling {
        body.push_str("\n  <p><strong>This book is a bestseller!</strong></p>");
    }
    layout(title, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        "  <h1>Not Found</h1>\n  <p>No book lives at this address.</p>",
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title} | Book Outlet</title>
  <meta name="viewport" content="width=device-width,initial-scale=1">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
