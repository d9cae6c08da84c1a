use splitdns_application::use_cases::{
    AddHostUseCase, DeleteClassificationUseCase, RunClassificationUpdateUseCase,
    SetClassificationUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub add_host: Arc<AddHostUseCase>,
    pub set_classification: Arc<SetClassificationUseCase>,
    pub delete_classification: Arc<DeleteClassificationUseCase>,
    pub run_update: Arc<RunClassificationUpdateUseCase>,
}
