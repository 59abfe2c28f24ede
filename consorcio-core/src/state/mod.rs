//! Application state, the actions that change it and the store owning it.
//!
//! [`AppState`] is everything the portal renders from. It is only ever
//! changed by [`AppState::apply`], reached through [`Store::dispatch`].
//!
//! Results of asynchronous reads and writes carry the session epoch that
//! was current when the request was issued. Every session establishment or
//! loss bumps the epoch, so a response that arrives after a logout (or
//! after another owner signed in) no longer matches and is dropped.

use std::sync::Arc;

use consorcio_providers::common_models::{
    claim::{Claim, ClaimStatus},
    expense::ExpenseItem,
    file::UploadFile,
    organisation::{ConsortiumId, UnitId},
    profile::Profile,
    session::{Session, UserId},
};
use tokio::sync::watch;

use crate::model::{
    ChartSlice, DashboardSummary, Notice, PaymentDraft, Screen, SessionMode,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub session_mode: SessionMode,
    pub session: Option<Session>,
    pub epoch: u64,
    pub profile: Option<Profile>,

    pub loading: bool,
    pub claims: Vec<Claim>,
    pub expenses: Vec<ExpenseItem>,
    pub chart: Vec<ChartSlice>,

    pub view: Screen,
    pub payment_modal_open: bool,
    pub sidebar_open: bool,

    pub claim_draft: String,
    pub payment_draft: PaymentDraft,
    pub balance_due: f64,

    pub notice: Option<Notice>,
}

#[derive(Debug, Clone)]
pub enum Action {
    SessionEstablished(Session),
    /// Same owner, new tokens.
    SessionRefreshed(Session),
    SessionLost,
    ProfileLoaded {
        epoch: u64,
        profile: Option<Profile>,
    },

    LoadingStarted {
        epoch: u64,
    },
    DataLoaded {
        epoch: u64,
        claims: Vec<Claim>,
        expenses: Vec<ExpenseItem>,
        chart: Vec<ChartSlice>,
    },

    ClaimDraftChanged(String),
    ClaimCreated {
        epoch: u64,
        claim: Claim,
    },

    PaymentFileSelected(Option<UploadFile>),
    PaymentAmountChanged(f64),
    PaymentRecorded {
        epoch: u64,
    },

    Navigate(Screen),
    SetPaymentModal(bool),
    SetSidebar(bool),

    Notify(Notice),
    DismissNotice,
}

impl AppState {
    pub fn new(session_mode: SessionMode, balance_due: f64) -> Self {
        Self {
            session_mode,
            session: None,
            epoch: 0,
            profile: None,
            loading: false,
            claims: vec![],
            expenses: vec![],
            chart: vec![],
            view: Screen::default(),
            payment_modal_open: false,
            sidebar_open: false,
            claim_draft: String::new(),
            payment_draft: PaymentDraft {
                file: None,
                amount: balance_due,
            },
            balance_due,
            notice: None,
        }
    }

    /// Applies one action. Returns `false` when the state is left untouched,
    /// e.g. for results belonging to a previous session epoch.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SessionEstablished(session) => {
                self.reset_session_data();
                self.session = Some(session);
                self.view = Screen::Dashboard;
            }
            Action::SessionRefreshed(session) => {
                self.session = Some(session);
            }
            Action::SessionLost => {
                self.reset_session_data();
                self.session = None;
            }
            Action::ProfileLoaded { epoch, profile } => {
                if epoch != self.epoch {
                    return false;
                }
                self.profile = profile;
            }

            Action::LoadingStarted { epoch } => {
                if epoch != self.epoch {
                    return false;
                }
                self.loading = true;
            }
            Action::DataLoaded {
                epoch,
                claims,
                expenses,
                chart,
            } => {
                if epoch != self.epoch {
                    return false;
                }
                self.claims = claims;
                self.expenses = expenses;
                self.chart = chart;
                self.loading = false;
            }

            Action::ClaimDraftChanged(title) => {
                self.claim_draft = title;
            }
            Action::ClaimCreated { epoch, claim } => {
                if epoch != self.epoch {
                    return false;
                }
                // text typed while the insert was in flight is kept
                if self.claim_draft.trim() == claim.title {
                    self.claim_draft.clear();
                }
                self.claims.insert(0, claim);
                self.notice = Some(Notice::info("Claim saved"));
            }

            Action::PaymentFileSelected(file) => {
                self.payment_draft.file = file;
            }
            Action::PaymentAmountChanged(amount) => {
                self.payment_draft.amount = amount;
            }
            Action::PaymentRecorded { epoch } => {
                if epoch != self.epoch {
                    return false;
                }
                self.payment_draft = PaymentDraft {
                    file: None,
                    amount: self.balance_due,
                };
                self.payment_modal_open = false;
                self.notice = Some(Notice::info("Payment proof sent for review"));
            }

            Action::Navigate(Screen::Login) => return false,
            Action::Navigate(screen) => {
                self.view = screen;
                self.sidebar_open = false;
            }
            Action::SetPaymentModal(open) => {
                self.payment_modal_open = open;
            }
            Action::SetSidebar(open) => {
                self.sidebar_open = open;
            }

            Action::Notify(notice) => {
                self.notice = Some(notice);
            }
            Action::DismissNotice => {
                self.notice = None;
            }
        }

        true
    }

    fn reset_session_data(&mut self) {
        self.epoch += 1;
        self.profile = None;
        self.loading = false;
        self.claims.clear();
        self.expenses.clear();
        self.chart.clear();
        self.payment_modal_open = false;
        self.payment_draft = PaymentDraft {
            file: None,
            amount: self.balance_due,
        };
    }

    /// The screen to render: the login screen replaces everything while a
    /// session is required and missing.
    pub fn rendered_screen(&self) -> Screen {
        if self.session_mode == SessionMode::Required && self.session.is_none() {
            Screen::Login
        } else {
            self.view
        }
    }

    /// Author of new claims and payments; the nil id stands in when nobody
    /// is signed in.
    pub fn author_id(&self) -> UserId {
        self.session
            .as_ref()
            .map(Session::user_id)
            .unwrap_or_else(UserId::nil)
    }

    pub fn consortium_id(&self, fallback: ConsortiumId) -> ConsortiumId {
        self.profile
            .as_ref()
            .and_then(|profile| profile.consortium_id)
            .unwrap_or(fallback)
    }

    pub fn unit_id(&self, fallback: UnitId) -> UnitId {
        self.profile
            .as_ref()
            .and_then(|profile| profile.unit_id)
            .unwrap_or(fallback)
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            claim_count: self.claims.len(),
            open_claims: self
                .claims
                .iter()
                .filter(|claim| claim.status == ClaimStatus::Open)
                .count(),
            total_expenses: self.chart.iter().map(|slice| slice.value).sum(),
        }
    }
}

/// Owner of the [`AppState`]; cheap to clone, all clones share one state.
#[derive(Clone)]
pub struct Store {
    state: Arc<watch::Sender<AppState>>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        let (state, _) = watch::channel(state);

        Self {
            state: Arc::new(state),
        }
    }

    pub fn dispatch(&self, action: Action) {
        if !self.state.send_if_modified(|state| state.apply(action)) {
            tracing::debug!("action discarded");
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Notified after every action that changed the state.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }
}
