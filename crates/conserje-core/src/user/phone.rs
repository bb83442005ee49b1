use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Contact number in international format (e.g., "+56912345678").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(number: &str) -> Result<Self, DomainError> {
        if !Self::is_valid(number) {
            return Err(DomainError::InvalidPhoneFormat);
        }
        Ok(Self(number.to_string()))
    }

    fn is_valid(number: &str) -> bool {
        let bytes = number.as_bytes();
        if bytes.len() < 8 || bytes.len() > 16 {
            return false;
        }
        if bytes[0] != b'+' {
            return false;
        }
        bytes[1..].iter().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_international_numbers() {
        assert!(Phone::new("+56912345678").is_ok());
        assert!(Phone::new("+56976543210").is_ok());
        assert!(Phone::new("+12025551234").is_ok());
    }

    #[test]
    fn rejects_local_or_formatted_numbers() {
        assert_eq!(Phone::new("912345678"), Err(DomainError::InvalidPhoneFormat));
        assert_eq!(Phone::new("+569 1234"), Err(DomainError::InvalidPhoneFormat));
        assert_eq!(
            Phone::new("+56-9-1234-5678"),
            Err(DomainError::InvalidPhoneFormat)
        );
        assert_eq!(Phone::new(""), Err(DomainError::InvalidPhoneFormat));
    }
}
