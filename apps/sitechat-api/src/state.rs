use std::sync::Arc;

use sitechat_config::Config;
use sitechat_service::{ChatService, Providers};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ChatService>,
}
impl AppState {
	/// Opens the service with the hosted providers and loads the persisted index.
	pub fn new(config: Config) -> Self {
		Self::from_service(ChatService::open(config, Providers::default()))
	}

	pub fn from_service(service: ChatService) -> Self {
		Self { service: Arc::new(service) }
	}
}
