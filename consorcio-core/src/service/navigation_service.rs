use crate::model::Screen;
use crate::state::{Action, Store};

/// View router: screen selection plus the modal and sidebar overlays.
pub struct NavigationService {
    store: Store,
}

impl NavigationService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn navigate(&self, screen: Screen) {
        self.store.dispatch(Action::Navigate(screen));
    }

    pub fn open_payment_modal(&self) {
        self.store.dispatch(Action::SetPaymentModal(true));
    }

    pub fn close_payment_modal(&self) {
        self.store.dispatch(Action::SetPaymentModal(false));
    }

    pub fn toggle_sidebar(&self) {
        let open = self.store.read(|state| state.sidebar_open);
        self.store.dispatch(Action::SetSidebar(!open));
    }

    pub fn dismiss_notice(&self) {
        self.store.dispatch(Action::DismissNotice);
    }

    pub fn rendered_screen(&self) -> Screen {
        self.store.read(|state| state.rendered_screen())
    }
}
