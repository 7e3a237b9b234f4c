//! Line-oriented splitting of a SQL script into INSERT statements.

/// Split script text into INSERT statements.
///
/// Comment lines (`--`) and blank lines are skipped, remaining lines are joined
/// with one space, and a statement ends on a line whose trimmed text ends with
/// `);`. Completed statements that are not INSERTs (UPDATE, DELETE, DDL) are
/// dropped.
///
/// Lines that continue an open `'...'` literal are kept verbatim, blank and
/// `--` lines included, and joined with a newline.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quotes = QuoteState::default();

    for line in sql.lines() {
        if quotes.in_quote {
            current.push('\n');
            current.push_str(line);
            quotes.scan(line);
        } else {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with("--") {
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);
            quotes.scan(line);
        }

        if quotes.in_quote {
            continue;
        }
        current.truncate(current.trim_end().len());

        if current.ends_with(");") {
            if current.to_ascii_uppercase().contains("INSERT INTO") {
                statements.push(std::mem::take(&mut current));
            } else {
                tracing::debug!("Skipping non-INSERT statement: {}", current);
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        tracing::debug!("Dropping incomplete statement at end of input: {}", current);
    }

    statements
}

/// Quote and escape state carried from one line to the next
#[derive(Default)]
struct QuoteState {
    in_quote: bool,
    escape_next: bool,
}

impl QuoteState {
    fn scan(&mut self, line: &str) {
        for c in line.chars() {
            if self.escape_next {
                self.escape_next = false;
                continue;
            }
            match c {
                '\\' => self.escape_next = true,
                '\'' => self.in_quote = !self.in_quote,
                _ => {}
            }
        }
        // The line break itself is what an escape at end of line consumes
        self.escape_next = false;
    }
}
