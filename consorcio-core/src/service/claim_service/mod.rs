use std::sync::Arc;

use consorcio_providers::{
    common_models::claim::{Claim, ClaimPriority, ClaimStatus, NewClaim},
    gateway::DataGateway,
};

use super::error::ClaimServiceError;
use crate::{
    config::OrganisationConfig,
    model::Notice,
    state::{Action, Store},
};

/// Files new claims under the signed-in owner's consortium.
pub struct ClaimService {
    data: Arc<dyn DataGateway>,
    store: Store,
    organisation: OrganisationConfig,
}

impl ClaimService {
    pub fn new(data: Arc<dyn DataGateway>, store: Store, organisation: OrganisationConfig) -> Self {
        Self {
            data,
            store,
            organisation,
        }
    }

    pub fn set_draft_title(&self, title: impl Into<String>) {
        self.store.dispatch(Action::ClaimDraftChanged(title.into()));
    }

    /// Inserts the drafted claim and puts it at the top of the cached list.
    ///
    /// A blank title is rejected before anything is sent. On failure the
    /// draft is kept so the owner can retry.
    pub async fn submit(&self) -> Result<Claim, ClaimServiceError> {
        let (epoch, new_claim) = self.store.read(|state| {
            let title = state.claim_draft.trim();
            if title.is_empty() {
                return Err(ClaimServiceError::EmptyTitle);
            }

            Ok((
                state.epoch,
                NewClaim {
                    title: title.to_owned(),
                    status: ClaimStatus::Open,
                    priority: ClaimPriority::Medium,
                    consortium_id: state.consortium_id(self.organisation.consortium_id),
                    user_id: state.author_id(),
                },
            ))
        })?;

        let claim = match self.data.insert_claim(new_claim.clone()).await {
            Ok(Some(claim)) => claim,
            Ok(None) => {
                tracing::debug!("claim stored without representation");
                new_claim.into_local_claim()
            }
            Err(error) => {
                tracing::error!(%error, "could not store claim");
                self.store
                    .dispatch(Action::Notify(Notice::error(error.user_message())));
                return Err(error.into());
            }
        };

        tracing::info!(claim_id = %claim.id, "claim stored");
        self.store.dispatch(Action::ClaimCreated {
            epoch,
            claim: claim.clone(),
        });

        Ok(claim)
    }
}
