mod delete_classification;
mod set_classification;

pub use delete_classification::DeleteClassificationUseCase;
pub use set_classification::SetClassificationUseCase;
