//! Newsletter subscriber repository.

use careers_core::{
  store::CareersStore,
  subscriber::{SubscribeOutcome, normalize_email},
};
use tracing::info;

use crate::ApiError;

pub struct SubscriberRepository<'a, S> {
  store: &'a S,
}

impl<'a, S: CareersStore> SubscriberRepository<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Subscribe `email`. An address already on the list, in any letter case,
  /// is reported rather than inserted twice.
  pub async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, ApiError> {
    let email = normalize_email(email)?;

    let outcome = match self
      .store
      .insert_subscriber(email)
      .await
      .map_err(ApiError::backend)?
    {
      Some(subscriber) => {
        info!(subscriber_id = %subscriber.id, "new subscriber");
        SubscribeOutcome::Subscribed { subscriber }
      }
      None => SubscribeOutcome::AlreadySubscribed,
    };
    Ok(outcome)
  }

  pub async fn count(&self) -> Result<u64, ApiError> {
    self.store.count_subscribers().await.map_err(ApiError::backend)
  }
}
