mod add_host;

pub use add_host::AddHostUseCase;
