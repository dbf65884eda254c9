//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod available_numbers;
mod begin_call;

pub use available_numbers::{
    decode_available_numbers_json_response, encode_available_numbers_query,
};
pub use begin_call::{decode_begin_call_json_response, encode_begin_call_query};
