// Directory Lookup: the externally managed spreadsheet that decides who may
// sign in and where their dataset lives.

use crate::config;
use crate::sheets::{self, SheetError, Table};
use crate::types::DirectoryRow;

const EMAIL_COLUMN: &str = "email";
const DATA_LINK_COLUMN: &str = "dataLink";

/// Look up `email` in the authorization directory.
///
/// The directory CSV is fetched in full on every call, deliberately uncached:
/// authorization changes in the spreadsheet take effect on the next login
/// without a redeploy. The match is exact and case-sensitive against the
/// `email` column; the first matching row wins.
///
/// `Ok(None)` means the email is not authorized. Transport and parse errors
/// surface as `Err` so the caller can log them, but to the end user they are
/// indistinguishable from "not authorized".
pub async fn authorize(email: &str) -> Result<Option<DirectoryRow>, SheetError> {
    let url = &config::config().directory.csv_url;
    let table = sheets::fetch_table(url).await?;
    Ok(lookup(&table, email))
}

/// Pure lookup over an already-fetched directory table.
pub fn lookup(table: &Table, email: &str) -> Option<DirectoryRow> {
    let row = table.find_row(EMAIL_COLUMN, email)?;
    let mut extra = table.row_map(row)?;

    let email = extra.remove(EMAIL_COLUMN)?;
    let data_link = extra.remove(DATA_LINK_COLUMN).unwrap_or_default();

    Some(DirectoryRow {
        email,
        data_link,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Table {
        Table::parse(concat!(
            "email,dataLink,team\n",
            "ada@example.com,https://sheets.example.com/ada.csv,infra\n",
            "grace@example.com,https://sheets.example.com/grace.csv,compilers\n",
            "ada@example.com,https://sheets.example.com/dup.csv,dup\n",
        ))
        .unwrap()
    }

    #[test]
    fn finds_first_matching_row() {
        let row = lookup(&roster(), "ada@example.com").unwrap();
        assert_eq!(row.email, "ada@example.com");
        assert_eq!(row.data_link, "https://sheets.example.com/ada.csv");
        assert_eq!(row.extra["team"], "infra");
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(lookup(&roster(), "Ada@example.com").is_none());
    }

    #[test]
    fn unknown_email_is_not_authorized() {
        assert!(lookup(&roster(), "mallory@example.com").is_none());
    }

    #[test]
    fn missing_email_column_denies_everyone() {
        let table = Table::parse("name,dataLink\nAda,https://x.com/a\n").unwrap();
        assert!(lookup(&table, "ada@example.com").is_none());
    }

    #[test]
    fn missing_data_link_column_reads_as_empty() {
        let table = Table::parse("email\nada@example.com\n").unwrap();
        let row = lookup(&table, "ada@example.com").unwrap();
        assert_eq!(row.data_link, "");
        assert!(row.extra.is_empty());
    }
}
