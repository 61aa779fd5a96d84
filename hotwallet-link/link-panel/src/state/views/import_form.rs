use crate::{client::api::normalize_name, error::ValidationError};

/// Inputs of the wallet import form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportForm {
    pub private_key: String,
    pub name: String,
}

impl ImportForm {
    pub fn on_update_private_key(&mut self, value: String) {
        self.private_key = value;
    }

    pub fn on_update_name(&mut self, value: String) {
        self.name = value;
    }

    /// Key and normalised name ready to be sent.
    pub fn validate(&self) -> Result<(String, Option<String>), ValidationError> {
        let key = self.private_key.trim();
        if key.is_empty() {
            return Err(ValidationError::EmptyPrivateKey);
        }
        Ok((key.to_string(), normalize_name(&self.name)))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
