//! Payment proof upload: the proof file goes to object storage, then a
//! pending payment row pointing at its public URL is inserted.

use std::sync::Arc;

use consorcio_providers::{
    common_models::{
        file::UploadFile,
        payment::{NewPayment, Payment, PaymentStatus},
    },
    gateway::{error::GatewayError, DataGateway, StorageGateway},
};
use time::OffsetDateTime;

use super::error::PaymentServiceError;
use crate::{
    config::OrganisationConfig,
    model::Notice,
    state::{Action, Store},
};

pub struct PaymentService {
    data: Arc<dyn DataGateway>,
    storage: Arc<dyn StorageGateway>,
    store: Store,
    organisation: OrganisationConfig,
    bucket: String,
}

impl PaymentService {
    pub fn new(
        data: Arc<dyn DataGateway>,
        storage: Arc<dyn StorageGateway>,
        store: Store,
        organisation: OrganisationConfig,
        bucket: String,
    ) -> Self {
        Self {
            data,
            storage,
            store,
            organisation,
            bucket,
        }
    }

    pub fn open_modal(&self) {
        self.store.dispatch(Action::SetPaymentModal(true));
    }

    pub fn close_modal(&self) {
        self.store.dispatch(Action::SetPaymentModal(false));
    }

    pub fn select_file(&self, file: UploadFile) {
        self.store.dispatch(Action::PaymentFileSelected(Some(file)));
    }

    pub fn clear_file(&self) {
        self.store.dispatch(Action::PaymentFileSelected(None));
    }

    pub fn set_amount(&self, amount: f64) {
        self.store.dispatch(Action::PaymentAmountChanged(amount));
    }

    /// Uploads the selected proof and records the payment as pending.
    ///
    /// Without a selected file nothing is sent and the modal stays open. A
    /// failing step aborts the rest; an object already uploaded is kept.
    pub async fn upload(&self) -> Result<Option<Payment>, PaymentServiceError> {
        let (epoch, file, amount, user_id, unit_id) = self.store.read(|state| {
            let file = state
                .payment_draft
                .file
                .to_owned()
                .ok_or(PaymentServiceError::NoFileSelected)?;

            Ok::<_, PaymentServiceError>((
                state.epoch,
                file,
                state.payment_draft.amount,
                state.author_id(),
                state.unit_id(self.organisation.unit_id),
            ))
        })?;

        let key = storage_key(OffsetDateTime::now_utc(), &file.name);
        tracing::debug!(bucket = %self.bucket, %key, size = file.content.len(), "uploading payment proof");

        let result = async {
            let object = self.storage.upload(&self.bucket, &key, file).await?;
            let proof_url = self.storage.public_url(&object.bucket, &object.key)?;

            self.data
                .insert_payment(NewPayment {
                    amount,
                    status: PaymentStatus::Pending,
                    proof_url,
                    user_id,
                    unit_id,
                })
                .await
        }
        .await;

        match result {
            Ok(payment) => {
                tracing::info!(%key, "payment proof recorded");
                self.store.dispatch(Action::PaymentRecorded { epoch });
                Ok(payment)
            }
            Err(error) => Err(self.report(error)),
        }
    }

    fn report(&self, error: GatewayError) -> PaymentServiceError {
        tracing::error!(%error, "payment proof upload failed");
        self.store
            .dispatch(Action::Notify(Notice::error(error.user_message())));
        error.into()
    }
}

/// `<unix millis>_<file name>` with every whitespace run in the name
/// replaced by a single underscore.
pub fn storage_key(now: OffsetDateTime, file_name: &str) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;

    let mut name = String::with_capacity(file_name.len());
    let mut in_whitespace = false;
    for c in file_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }

    format!("{millis}_{name}")
}
