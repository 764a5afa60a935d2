//! Result type alias for Keyport
//!
//! This module provides a convenient Result type alias that uses KeyportError
//! as the error type.

use super::errors::KeyportError;

/// Result type alias for Keyport operations
///
/// # Examples
///
/// ```
/// use keyport::domain::result::Result;
/// use keyport::domain::errors::KeyportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KeyportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KeyportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::KeyportError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(KeyportError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
