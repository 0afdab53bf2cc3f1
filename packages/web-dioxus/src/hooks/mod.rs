//! Data hooks shared by the screens
//!
//! Every fetch goes through [`use_api`], which builds the client from the
//! session and ends the session on a 401. List screens use [`use_list`];
//! background refreshes use [`use_polling`].

use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;

use tienda_client::{ApiClient, ApiError, Resource as ApiResource};
use tienda_core::listing::{ListQuery, Page};
use tienda_core::polling::PollSchedule;

use crate::auth::use_auth;

/// Delay before a search box fires its request.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Fetch with the session's client. Re-runs when the session or any signal
/// read inside `fetch` changes.
pub fn use_api<T, F, Fut>(mut fetch: F) -> Resource<Result<T, ApiError>>
where
    T: 'static,
    F: FnMut(ApiClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let auth = use_auth();
    use_resource(move || {
        let request = fetch(auth.client());
        async move {
            let result = request.await;
            if let Err(e) = &result {
                auth.error_message(e);
            }
            result
        }
    })
}

/// Paged, searchable list of a backend collection.
pub struct ListState<R: 'static> {
    pub query: Signal<ListQuery>,
    reload: Signal<u32>,
    pub data: Resource<Result<Page<R>, ApiError>>,
}

impl<R: 'static> Clone for ListState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for ListState<R> {}

impl<R: 'static> ListState<R> {
    /// New search text; goes back to the first page.
    pub fn search(mut self, text: String) {
        let per_page = self.query.peek().per_page;
        let mut query = ListQuery::page(1).with_search(text);
        query.per_page = per_page;
        self.query.set(query);
    }

    pub fn go_to(mut self, page: u32) {
        self.query.write().page = Some(page.max(1));
    }

    /// Fetch the current page again, e.g. after a save.
    pub fn refresh(mut self) {
        *self.reload.write() += 1;
    }

    /// Bumped by every refresh; read it to follow this list's reloads.
    pub fn generation(&self) -> u32 {
        *self.reload.read()
    }

    pub fn search_text(&self) -> String {
        self.query.read().q.clone().unwrap_or_default()
    }
}

pub fn use_list<R: ApiResource>() -> ListState<R> {
    let query = use_signal(|| ListQuery::page(1));
    let reload = use_signal(|| 0u32);
    let data = use_api(move |client| {
        let query = query();
        let _ = reload();
        async move { client.list_page::<R>(&query).await }
    });
    ListState {
        query,
        reload,
        data,
    }
}

/// Run `tick` now and then on `schedule` until the component is dropped.
/// Failures back off; a 401 ends the session and stops the loop.
pub fn use_polling<F, Fut>(schedule: PollSchedule, mut tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let auth = use_auth();
    let task = use_hook(move || {
        spawn(async move {
            let mut schedule = schedule;
            loop {
                match tick().await {
                    Ok(()) => schedule.record_success(),
                    Err(e) => {
                        auth.error_message(&e);
                        if e.is_unauthorized() {
                            break;
                        }
                        schedule.record_failure();
                        tracing::debug!(
                            failures = schedule.failures(),
                            delay_ms = schedule.next_delay().as_millis() as u64,
                            "poll failed, backing off"
                        );
                    }
                }
                sleep(schedule.next_delay()).await;
            }
        })
    });
    use_drop(move || task.cancel());
}

/// Local calendar date, for expiry and due-date checks.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
