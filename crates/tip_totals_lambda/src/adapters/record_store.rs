use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use tip_totals_core::error::FetchError;
use tip_totals_core::paging::{ScanCursor, ScanPage};
use tip_totals_core::record::TipRecord;
use tracing::debug;

/// Paged, unfiltered read access to the tip records table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Token: Clone + Send + Sync + 'static;

    async fn scan_page(
        &self,
        table_name: &str,
        start_token: Option<Self::Token>,
    ) -> Result<ScanPage<Self::Token>, FetchError>;
}

/// Lazily scans `table_name`, one store request per page.
///
/// The stream ends after the page that carries no next token, or right after
/// the first failed page.
pub fn scan_pages<'a, S>(
    store: &'a S,
    table_name: &'a str,
) -> impl Stream<Item = Result<ScanPage<S::Token>, FetchError>> + 'a
where
    S: RecordStore + ?Sized,
{
    stream::try_unfold(ScanCursor::new(), move |mut cursor| async move {
        let Some(start_token) = cursor.next_request() else {
            return Ok::<_, FetchError>(None);
        };

        let page = store.scan_page(table_name, start_token).await?;
        cursor.advance(page.next_token.clone());
        debug!(
            table_name,
            page = cursor.pages_seen(),
            items = page.items.len(),
            has_more = page.next_token.is_some(),
            "scan page received"
        );
        Ok(Some((page, cursor)))
    })
}

/// Drains the full scan. Any failed page fails the fetch with no partial result.
pub async fn fetch_all_records<S>(store: &S, table_name: &str) -> Result<Vec<TipRecord>, FetchError>
where
    S: RecordStore + ?Sized,
{
    let mut pages = std::pin::pin!(scan_pages(store, table_name));
    let mut records = Vec::new();
    while let Some(page) = pages.try_next().await? {
        records.extend(page.items);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::StreamExt;
    use tip_totals_core::record::TipAmount;

    use super::*;

    struct PagedStore {
        pages: Vec<Vec<TipRecord>>,
        fail_on_page: Option<usize>,
        requests: Mutex<Vec<Option<usize>>>,
    }

    impl PagedStore {
        fn new(pages: Vec<Vec<TipRecord>>) -> Self {
            Self {
                pages,
                fail_on_page: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, page: usize) -> Self {
            self.fail_on_page = Some(page);
            self
        }

        fn requests(&self) -> Vec<Option<usize>> {
            self.requests.lock().expect("poisoned mutex").clone()
        }
    }

    #[async_trait]
    impl RecordStore for PagedStore {
        type Token = usize;

        async fn scan_page(
            &self,
            table_name: &str,
            start_token: Option<usize>,
        ) -> Result<ScanPage<usize>, FetchError> {
            assert_eq!(table_name, "orders");
            self.requests
                .lock()
                .expect("poisoned mutex")
                .push(start_token);

            let index = start_token.unwrap_or(0);
            if self.fail_on_page == Some(index) {
                return Err(FetchError::new(format!("throttled on page {index}")));
            }

            Ok(ScanPage {
                items: self.pages.get(index).cloned().unwrap_or_default(),
                next_token: (index + 1 < self.pages.len()).then_some(index + 1),
            })
        }
    }

    fn record(created_by: &str, amount: &str) -> TipRecord {
        TipRecord::new(created_by, TipAmount::Text(amount.to_string()))
    }

    #[tokio::test]
    async fn merges_every_page_in_scan_order() {
        let store = PagedStore::new(vec![
            vec![record("A", "1"), record("B", "2")],
            vec![record("A", "3")],
            vec![record("C", "4")],
        ]);

        let records = fetch_all_records(&store, "orders")
            .await
            .expect("scan should succeed");

        assert_eq!(store.requests(), vec![None, Some(1), Some(2)]);
        let servers: Vec<_> = records
            .iter()
            .filter_map(|record| record.created_by.as_deref())
            .collect();
        assert_eq!(servers, vec!["A", "B", "A", "C"]);
    }

    #[tokio::test]
    async fn empty_table_is_a_single_request() {
        let store = PagedStore::new(Vec::new());
        let records = fetch_all_records(&store, "orders")
            .await
            .expect("scan should succeed");

        assert!(records.is_empty());
        assert_eq!(store.requests(), vec![None]);
    }

    #[tokio::test]
    async fn failed_page_aborts_the_scan() {
        let store = PagedStore::new(vec![
            vec![record("A", "1")],
            vec![record("B", "2")],
            vec![record("C", "3")],
        ])
        .failing_on(1);

        let error = fetch_all_records(&store, "orders")
            .await
            .expect_err("scan should fail");

        assert_eq!(error.message(), "throttled on page 1");
        assert_eq!(store.requests(), vec![None, Some(1)]);
    }

    #[tokio::test]
    async fn stream_stops_after_first_error() {
        let store = PagedStore::new(vec![vec![record("A", "1")], vec![]]).failing_on(0);
        let pages: Vec<_> = scan_pages(&store, "orders").collect().await;

        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_err());
        assert_eq!(store.requests(), vec![None]);
    }
}
