// Data Loader: resolves the session's dataLink into the user-visible table.

use crate::sheets::{self, Table};
use crate::types::Session;

/// Fetch and parse the dataset behind the session's dataLink.
///
/// `None` covers both "no data configured" (no session or no dataLink, in
/// which case no network call is made) and "fetch failed" (logged here with
/// full detail). The page render must always succeed with whatever partial
/// information is available, so this never returns an error.
pub async fn load_user_data(session: Option<&Session>) -> Option<Table> {
    let data_link = session?.user.data_link.as_deref()?;
    if data_link.is_empty() {
        return None;
    }

    match sheets::fetch_table(data_link).await {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::error!("failed to load dataset from {}: {}", data_link, e);
            None
        }
    }
}
