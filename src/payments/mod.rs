mod payments_errors;
mod payments_model;
mod payments_repository;
mod payments_service;
mod payments_traits;

pub use payments_errors::PaymentError;
pub use payments_model::{PaymentRecord, PendingPayment};
pub use payments_repository::PaymentRepository;
pub use payments_service::PaymentService;
pub use payments_traits::{
    LocatedFlight, LocatedPayment, PaymentRepositoryTrait, PaymentServiceTrait,
};

/// Result type for payment operations
pub type Result<T> = std::result::Result<T, PaymentError>;
