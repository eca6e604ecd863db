use error_stack::report;
use serde::de::DeserializeOwned;

use crate::errors::{CustomResult, ParsingError, ValidationError};

pub trait ByteSliceExt {
    fn parse_struct<T: DeserializeOwned>(
        &self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError>;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<T: DeserializeOwned>(
        &self,
        type_name: &'static str,
    ) -> CustomResult<T, ParsingError> {
        serde_json::from_slice(self).map_err(|err| {
            report!(ParsingError::StructParseFailure(type_name))
                .attach_printable(format!("Unable to parse {type_name} from bytes: {err}"))
        })
    }
}

pub trait OptionExt<T> {
    fn get_required_value(self, field_name: &'static str) -> CustomResult<T, ValidationError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn get_required_value(self, field_name: &'static str) -> CustomResult<T, ValidationError> {
        self.ok_or_else(|| report!(ValidationError::MissingRequiredField { field_name }))
    }
}
