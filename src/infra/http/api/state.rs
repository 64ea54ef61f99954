use std::sync::Arc;

use crate::application::payloads::PayloadService;
use crate::application::repos::HealthProbe;

#[derive(Clone)]
pub struct ApiState {
    pub payloads: Arc<PayloadService>,
    pub health: Arc<dyn HealthProbe>,
}
