use crate::api::{get_current_user, list_active_polls, list_my_polls};
use chrono::{DateTime, Utc};
use leptos::prelude::*;
use server_fn::ServerFnError;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;
use voting_app::domain::{Poll, PollViewState, Profile};
use voting_errors::AppError;

type PollsResource = Resource<Result<Vec<Poll>, ServerFnError>>;

/// Who is signed in, fetched once per page load.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub user: Resource<Result<Option<Profile>, ServerFnError>>,
}

impl AuthState {
    pub fn provide() -> Self {
        let state = Self {
            user: Resource::new(|| (), |_| get_current_user()),
        };
        provide_context(state);
        state
    }

    pub fn profile(&self) -> Option<Profile> {
        self.user.get().and_then(Result::ok).flatten()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.profile().map(|profile| profile.id)
    }

    pub fn user_id_untracked(&self) -> Option<Uuid> {
        self.user
            .get_untracked()
            .and_then(Result::ok)
            .flatten()
            .map(|profile| profile.id)
    }
}

/// Poll listings plus the per-card view state that has to survive a refetch.
#[derive(Clone, Copy)]
pub struct PollsStore {
    refresh: RwSignal<u32>,
    views: RwSignal<HashMap<Uuid, PollViewState>>,
    pub active: PollsResource,
    pub mine: PollsResource,
}

impl PollsStore {
    pub fn provide(auth: AuthState) -> Self {
        let refresh = RwSignal::new(0u32);
        let active = Resource::new(move || refresh.get(), |_| list_active_polls());
        let mine = Resource::new(
            move || (refresh.get(), auth.user_id()),
            |_| list_my_polls(),
        );

        let store = Self {
            refresh,
            views: RwSignal::new(HashMap::new()),
            active,
            mine,
        };
        provide_context(store);
        store
    }

    /// Refetches both listings after a mutation.
    pub fn refetch(&self) {
        self.refresh.update(|n| *n = n.wrapping_add(1));
    }

    pub fn view_state(&self, poll_id: Uuid) -> PollViewState {
        self.views
            .with(|views| views.get(&poll_id).copied())
            .unwrap_or_default()
    }

    pub fn update_view(&self, poll_id: Uuid, f: impl FnOnce(&mut PollViewState)) {
        self.views.update(|views| f(views.entry(poll_id).or_default()));
    }
}

const CLOCK_TICK_SECS: u64 = 15;

/// Wall clock that ticks in the browser so expiry and local times re-render.
///
/// `live` turns on once hydrated; server-rendered HTML carries no local times
/// since the server's time zone is not the viewer's.
#[derive(Clone, Copy)]
pub struct Clock {
    now: RwSignal<DateTime<Utc>>,
    live: RwSignal<bool>,
}

impl Clock {
    pub fn provide() -> Self {
        let clock = Self {
            now: RwSignal::new(Utc::now()),
            live: RwSignal::new(false),
        };

        Effect::new(move |_| {
            clock.now.set(Utc::now());
            clock.live.set(true);
            if let Err(e) = set_interval_with_handle(
                move || clock.now.set(Utc::now()),
                Duration::from_secs(CLOCK_TICK_SECS),
            ) {
                tracing::warn!("Clock did not start: {:?}", e);
            }
        });

        provide_context(clock);
        clock
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    pub fn now_untracked(&self) -> DateTime<Utc> {
        self.now.get_untracked().max(Utc::now())
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    #[cfg(test)]
    pub(crate) fn fixed(now: DateTime<Utc>, live: bool) -> Self {
        Self {
            now: RwSignal::new(now),
            live: RwSignal::new(live),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Error,
}

/// A transient message; both fields are translation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub title: &'static str,
    pub detail: &'static str,
}

impl Notice {
    pub fn success(title: &'static str, detail: &'static str) -> Self {
        Self {
            tone: NoticeTone::Success,
            title,
            detail,
        }
    }

    /// Titles a failure after what went wrong rather than what was attempted,
    /// when the cause is something the user can act on.
    pub fn failure(action: &'static str, err: &AppError) -> Self {
        let title = match err {
            AppError::AuthRequired => "notice.sign.in.first",
            AppError::Conflict => "notice.already.voted",
            _ => action,
        };
        Self {
            tone: NoticeTone::Error,
            title,
            detail: err.message_key(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Notices {
    current: RwSignal<Option<Notice>>,
}

impl Notices {
    pub fn provide() -> Self {
        let notices = Self {
            current: RwSignal::new(None),
        };
        provide_context(notices);
        notices
    }

    pub fn current(&self) -> Option<Notice> {
        self.current.get()
    }

    pub fn success(&self, title: &'static str, detail: &'static str) {
        self.current.set(Some(Notice::success(title, detail)));
    }

    pub fn failure(&self, action: &'static str, err: &AppError) {
        if err.is_expected() {
            tracing::debug!("{} rejected: {}", action, err);
        } else {
            tracing::error!("{} failed: {}", action, err);
        }
        self.current.set(Some(Notice::failure(action, err)));
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}
