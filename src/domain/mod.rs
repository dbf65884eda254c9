//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{AvailableNumbers, BeginCall, BeginCallOptions};
pub use response::{AvailableNumbersResponse, BeginCallResponse};
pub use validation::ValidationError;
pub use value::{ApiKey, AreaCode, BaseUrl, PhoneNumber};
