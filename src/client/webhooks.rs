//! Webhook subscriptions.

// self
use crate::{_prelude::*, client::Client};

const WEBHOOKS: &str = "/api/v1/webhooks";

/// Active webhook subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
	/// Event the subscription listens to, e.g. `employee_created`.
	pub subscription_type: String,
	/// URL receiving the events.
	#[serde(default)]
	pub target_url: Option<String>,
}

/// Payload for [`Client::create_webhook`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CreateWebhookRequest {
	/// Event to subscribe to.
	pub subscription_type: String,
	/// URL receiving the events.
	pub target_url: String,
}

#[derive(Serialize)]
struct WebhookSelector<'a> {
	subscription_type: &'a str,
}

impl Client {
	/// Lists webhook subscriptions.
	pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
		self.get(WEBHOOKS, None).await
	}

	/// Subscribes a URL to an event type.
	pub async fn create_webhook(&self, request: &CreateWebhookRequest) -> Result<Webhook> {
		self.post(WEBHOOKS, request).await
	}

	/// Removes the subscription for `subscription_type` and returns it.
	///
	/// The API deletes on the collection path with a JSON body naming the subscription.
	pub async fn delete_webhook(&self, subscription_type: &str) -> Result<Webhook> {
		self.delete_with_body(WEBHOOKS, &WebhookSelector { subscription_type }).await
	}
}
