use crate::domain::value::{AreaCode, PhoneNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Options for [`BeginCall`].
pub struct BeginCallOptions {
    /// Ask the switchboard to answer the leg automatically (`auto_answer`).
    pub auto_answer: bool,
}

impl Default for BeginCallOptions {
    fn default() -> Self {
        Self { auto_answer: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to bridge a call between two phone numbers.
pub struct BeginCall {
    source: PhoneNumber,
    destination: PhoneNumber,
    options: BeginCallOptions,
}

impl BeginCall {
    /// Build a call request from already-normalized numbers.
    pub fn new(source: PhoneNumber, destination: PhoneNumber, options: BeginCallOptions) -> Self {
        Self {
            source,
            destination,
            options,
        }
    }

    pub fn source(&self) -> &PhoneNumber {
        &self.source
    }

    pub fn destination(&self) -> &PhoneNumber {
        &self.destination
    }

    pub fn options(&self) -> &BeginCallOptions {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Request to list numbers available for purchase in an area code.
pub struct AvailableNumbers {
    area_code: AreaCode,
}

impl AvailableNumbers {
    /// Build a listing request for the given area code.
    pub fn new(area_code: AreaCode) -> Self {
        Self { area_code }
    }

    pub fn area_code(&self) -> &AreaCode {
        &self.area_code
    }
}
