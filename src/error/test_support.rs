use super::{ConfigError, HttpError, ReportError, ValidationError};

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::TestExpectation { message }
    }
}

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ConfigError {
    fn from(message: &'static str) -> Self {
        ConfigError::TestExpectation { message }
    }
}

impl From<String> for ConfigError {
    fn from(value: String) -> Self {
        ConfigError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for HttpError {
    fn from(message: &'static str) -> Self {
        HttpError::TestExpectation { message }
    }
}

impl From<String> for HttpError {
    fn from(value: String) -> Self {
        HttpError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}

impl From<&'static str> for ReportError {
    fn from(message: &'static str) -> Self {
        ReportError::TestExpectation { message }
    }
}

impl From<String> for ReportError {
    fn from(value: String) -> Self {
        ReportError::TestExpectationValue {
            message: "Test expectation failed",
            value,
        }
    }
}
